use std::{
    fs::{self, File, FileTimes, Metadata, OpenOptions},
    io::{self, Read},
    os::unix::fs::{FileTypeExt, MetadataExt},
    path::{Path, PathBuf},
    time::{Duration, SystemTime, UNIX_EPOCH},
};

use log::warn;
use nix::fcntl::AtFlags;
use nix::unistd::{AccessFlags, faccessat};

use crate::config::HASH_BUFFER_SIZE;
use crate::record::FileKind;

/// The subset of a `stat(2)` result the inspector reports on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawStat {
    pub kind: FileKind,
    /// Raw `st_mode`, file type bits included
    pub mode: u32,
    pub size: u64,
    pub mtime: SystemTime,
    pub ctime: SystemTime,
    pub atime: SystemTime,
    pub uid: u32,
    pub gid: u32,
}

impl From<&Metadata> for RawStat {
    fn from(meta: &Metadata) -> Self {
        Self {
            kind: classify(meta.file_type()),
            mode: meta.mode(),
            size: meta.size(),
            mtime: from_unix_parts(meta.mtime(), meta.mtime_nsec()),
            ctime: from_unix_parts(meta.ctime(), meta.ctime_nsec()),
            atime: from_unix_parts(meta.atime(), meta.atime_nsec()),
            uid: meta.uid(),
            gid: meta.gid(),
        }
    }
}

/// Classify in a fixed order: directory, file, symlink, socket, chardev, blockdev.
pub fn classify(ft: fs::FileType) -> FileKind {
    if ft.is_dir() {
        FileKind::Directory
    } else if ft.is_file() {
        FileKind::File
    } else if ft.is_symlink() {
        FileKind::Symlink
    } else if ft.is_socket() {
        FileKind::Socket
    } else if ft.is_char_device() {
        FileKind::Chardev
    } else if ft.is_block_device() {
        FileKind::Blockdev
    } else {
        FileKind::Unknown
    }
}

fn from_unix_parts(secs: i64, nsecs: i64) -> SystemTime {
    let nanos = Duration::from_nanos(nsecs.clamp(0, 999_999_999) as u64);
    if secs >= 0 {
        UNIX_EPOCH + Duration::from_secs(secs as u64) + nanos
    } else {
        UNIX_EPOCH - Duration::from_secs(secs.unsigned_abs()) + nanos
    }
}

/// Whole seconds since the epoch, rounded towards negative infinity.
pub fn epoch_seconds(t: SystemTime) -> i64 {
    match t.duration_since(UNIX_EPOCH) {
        Ok(d) => d.as_secs() as i64,
        Err(e) => {
            let d = e.duration();
            let secs = d.as_secs() as i64;
            if d.subsec_nanos() > 0 { -secs - 1 } else { -secs }
        }
    }
}

/// Filesystem operations the core relies on.
///
/// Every check is a separate call; nothing here is atomic with respect to
/// concurrent modification of the same path.
pub trait FileSystem {
    /// Whether `path` exists, following symlinks.
    fn exists(&self, path: &Path) -> bool;

    fn is_dir(&self, path: &Path) -> bool;

    /// Whether the calling process may read `path`.
    fn readable(&self, path: &Path) -> bool;

    /// Whether `path` itself is a symlink.
    fn is_symlink(&self, path: &Path) -> bool;

    /// `stat(2)` when `follow` is set, `lstat(2)` otherwise.
    fn stat(&self, path: &Path, follow: bool) -> io::Result<RawStat>;

    /// Lowercase hex MD5 of the full contents of `path`.
    fn md5(&self, path: &Path) -> io::Result<String>;

    /// Immediate children of `dir`, joined onto `dir`, in enumeration order.
    fn read_dir(&self, dir: &Path) -> io::Result<Vec<PathBuf>>;

    /// Create `path` if missing, else bump its access and modification times.
    fn touch(&self, path: &Path) -> io::Result<()>;

    /// Unlink a single non-directory entry.
    fn remove(&self, path: &Path) -> io::Result<()>;
}

/// The host filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalFs;

impl FileSystem for LocalFs {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    /// Checked against the effective uid/gid.
    fn readable(&self, path: &Path) -> bool {
        faccessat(None, path, AccessFlags::R_OK, AtFlags::AT_EACCESS).is_ok()
    }

    fn is_symlink(&self, path: &Path) -> bool {
        path.is_symlink()
    }

    fn stat(&self, path: &Path, follow: bool) -> io::Result<RawStat> {
        let meta = if follow {
            fs::metadata(path)?
        } else {
            fs::symlink_metadata(path)?
        };
        Ok(RawStat::from(&meta))
    }

    fn md5(&self, path: &Path) -> io::Result<String> {
        let mut file = File::open(path)?;
        let mut context = md5::Context::new();
        let mut buffer = vec![0u8; HASH_BUFFER_SIZE];

        loop {
            let n = file.read(&mut buffer)?;
            if n == 0 {
                break;
            }
            context.consume(&buffer[..n]);
        }

        Ok(format!("{:x}", context.compute()))
    }

    fn read_dir(&self, dir: &Path) -> io::Result<Vec<PathBuf>> {
        let mut children = Vec::new();

        for entry_res in fs::read_dir(dir)? {
            match entry_res {
                Ok(entry) => children.push(entry.path()),
                Err(e) => {
                    warn!("[list] error reading entry in {:?}: {e}", dir);
                }
            }
        }

        Ok(children)
    }

    fn touch(&self, path: &Path) -> io::Result<()> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        let now = SystemTime::now();
        file.set_times(FileTimes::new().set_accessed(now).set_modified(now))
    }

    fn remove(&self, path: &Path) -> io::Result<()> {
        fs::remove_file(path)
    }
}

#[cfg(test)]
#[path = "probe_tests.rs"]
mod tests;
