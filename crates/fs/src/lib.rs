mod config;
mod error;
mod inspect;
mod listing;
mod mutate;
mod probe;
mod record;
mod resolver;
#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use error::{FsError, Result};
pub use inspect::{inspect, render_mode};
pub use listing::{DirectoryListing, list};
pub use mutate::{remove, touch};
pub use probe::{FileSystem, LocalFs, RawStat, epoch_seconds};
pub use record::{
    DEFAULT_MODE, FileKind, FileStatus, Md5Sum, OUTPUT_NOT_PRESENT, OUTPUT_PERMISSION_DENIED,
    OUTPUT_PRESENT,
};
pub use resolver::{DEFAULT_TOUCH_FILE, TOUCH_FILE_KEY, resolve};
