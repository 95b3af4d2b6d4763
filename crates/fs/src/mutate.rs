use std::path::Path;

use log::debug;

use crate::error::{FsError, Result};
use crate::probe::FileSystem;

/// Create `path` or refresh its timestamps.
pub fn touch<F: FileSystem + ?Sized>(fs: &F, path: &Path) -> Result<()> {
    fs.touch(path).map_err(|source| FsError::Touch {
        path: path.to_path_buf(),
        source,
    })?;

    debug!("Touched file '{}'", path.display());
    Ok(())
}

/// Remove `path`, which must exist beforehand.
///
/// The existence check and the unlink are separate calls; a concurrent
/// removal in between surfaces as [`FsError::Remove`].
pub fn remove<F: FileSystem + ?Sized>(fs: &F, path: &Path) -> Result<()> {
    if !fs.exists(path) {
        debug!("Asked to remove file '{}', but it does not exist", path.display());
        return Err(FsError::NotFound {
            path: path.to_path_buf(),
        });
    }

    fs.remove(path).map_err(|source| FsError::Remove {
        path: path.to_path_buf(),
        source,
    })?;

    debug!("Removed file '{}'", path.display());
    Ok(())
}

#[cfg(test)]
#[path = "mutate_tests.rs"]
mod tests;
