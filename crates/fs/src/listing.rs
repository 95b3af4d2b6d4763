use std::path::Path;

use log::debug;

use crate::error::{FsError, Result};
use crate::inspect::inspect;
use crate::probe::FileSystem;
use crate::record::FileStatus;

/// Children of a directory, either as bare paths or paired with their status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectoryListing {
    Paths(Vec<String>),
    Detailed(Vec<(String, FileStatus)>),
}

impl DirectoryListing {
    pub fn len(&self) -> usize {
        match self {
            DirectoryListing::Paths(p) => p.len(),
            DirectoryListing::Detailed(d) => d.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// List the immediate children of `dir` in enumeration order.
///
/// With `detail` set each child is inspected; a missing or unreadable child
/// shows up in its status rather than failing the listing.
pub fn list<F: FileSystem + ?Sized>(fs: &F, dir: &Path, detail: bool) -> Result<DirectoryListing> {
    if !fs.exists(dir) {
        return Err(FsError::NotFound {
            path: dir.to_path_buf(),
        });
    }

    if !fs.is_dir(dir) {
        return Err(FsError::NotADirectory {
            path: dir.to_path_buf(),
        });
    }

    let children = fs.read_dir(dir).map_err(|source| FsError::ReadDir {
        path: dir.to_path_buf(),
        source,
    })?;

    debug!("[list] {} entries in {}", children.len(), dir.display());

    if !detail {
        let paths = children
            .iter()
            .map(|p| p.display().to_string())
            .collect();
        return Ok(DirectoryListing::Paths(paths));
    }

    let mut detailed = Vec::with_capacity(children.len());
    for child in &children {
        let status = inspect(fs, child)?;
        detailed.push((child.display().to_string(), status));
    }

    Ok(DirectoryListing::Detailed(detailed))
}

#[cfg(test)]
#[path = "listing_tests.rs"]
mod tests;
