use std::path::Path;

use log::debug;

use crate::error::{FsError, Result};
use crate::probe::{FileSystem, epoch_seconds};
use crate::record::{
    FileKind, FileStatus, Md5Sum, OUTPUT_PERMISSION_DENIED, OUTPUT_PRESENT,
};

/// Inspect `path` and describe it as a [`FileStatus`].
///
/// A missing path yields `present == false` and an unreadable one yields the
/// permission message; both keep every other field at its sentinel and are
/// returned as `Ok`. Only a failure to stat or hash an entry that passed both
/// checks is an error.
pub fn inspect<F: FileSystem + ?Sized>(fs: &F, path: &Path) -> Result<FileStatus> {
    let unprobed = FileStatus::unprobed(path);

    if !fs.exists(path) {
        debug!("Asked for status of '{}' - it is not present", path.display());
        return Ok(unprobed);
    }

    debug!("Asked for status of '{}' - it is present", path.display());

    if !fs.readable(path) {
        return Ok(FileStatus {
            present: true,
            output: OUTPUT_PERMISSION_DENIED.to_owned(),
            ..unprobed
        });
    }

    // A symlink is described by the link itself, not its target.
    let follow = !fs.is_symlink(path);
    let st = fs.stat(path, follow).map_err(|source| FsError::Stat {
        path: path.to_path_buf(),
        source,
    })?;

    let md5 = if st.kind == FileKind::File {
        let hex = fs.md5(path).map_err(|source| FsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Md5Sum::Hex(hex)
    } else {
        Md5Sum::NotComputed
    };

    Ok(FileStatus {
        present: true,
        output: OUTPUT_PRESENT.to_owned(),
        kind: st.kind,
        mode: render_mode(st.mode),
        size: st.size,
        mtime: st.mtime,
        ctime: st.ctime,
        atime: st.atime,
        mtime_seconds: epoch_seconds(st.mtime),
        ctime_seconds: epoch_seconds(st.ctime),
        atime_seconds: epoch_seconds(st.atime),
        md5,
        uid: st.uid,
        gid: st.gid,
        ..unprobed
    })
}

/// Raw `st_mode` in octal without a leading zero, e.g. 511 -> "777".
pub fn render_mode(raw: u32) -> String {
    format!("{:o}", raw)
}

#[cfg(test)]
#[path = "inspect_tests.rs"]
mod tests;
