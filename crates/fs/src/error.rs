use std::io;
use std::path::PathBuf;

/// Fail-fast errors raised by directory checks, mutations and content probes.
///
/// Absence and unreadability of an inspected path are *not* errors; they
/// are reported as data in [`crate::FileStatus`].
#[derive(Debug, thiserror::Error)]
pub enum FsError {
    #[error("{} does not exist", path.display())]
    NotFound { path: PathBuf },

    #[error("'{}' is not a directory", path.display())]
    NotADirectory { path: PathBuf },

    #[error("Could not read directory '{}': {}", path.display(), describe(source))]
    ReadDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Could not stat '{}': {}", path.display(), describe(source))]
    Stat {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Could not read file '{}': {}", path.display(), describe(source))]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Could not touch file '{}': {}", path.display(), describe(source))]
    Touch {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Could not remove file '{}': {}", path.display(), describe(source))]
    Remove {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub type Result<T> = std::result::Result<T, FsError>;

/// `<Kind>: <message>`, keeping the classification of the underlying error.
fn describe(err: &io::Error) -> String {
    format!("{:?}: {}", err.kind(), err)
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
