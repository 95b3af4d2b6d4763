use std::fmt;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

pub const OUTPUT_PRESENT: &str = "present";
pub const OUTPUT_NOT_PRESENT: &str = "not present";
pub const OUTPUT_PERMISSION_DENIED: &str = "you do not have permission to read this file";

/// Mode reported when the entry could not be probed.
pub const DEFAULT_MODE: &str = "0000";

/// Kind of filesystem entry, as classified from a stat result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    #[default]
    Unknown,
    File,
    Directory,
    Symlink,
    Socket,
    Chardev,
    Blockdev,
}

impl FileKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FileKind::Unknown => "unknown",
            FileKind::File => "file",
            FileKind::Directory => "directory",
            FileKind::Symlink => "symlink",
            FileKind::Socket => "socket",
            FileKind::Chardev => "chardev",
            FileKind::Blockdev => "blockdev",
        }
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Content digest of a regular file.
///
/// `NotComputed` is the sentinel for anything that is not a readable
/// regular file and renders as `0`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Md5Sum {
    #[default]
    NotComputed,
    Hex(String),
}

impl Md5Sum {
    pub fn as_hex(&self) -> Option<&str> {
        match self {
            Md5Sum::NotComputed => None,
            Md5Sum::Hex(h) => Some(h),
        }
    }
}

impl fmt::Display for Md5Sum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Md5Sum::NotComputed => f.pad("0"),
            Md5Sum::Hex(h) => f.pad(h),
        }
    }
}

/// Metadata record produced by a status inspection.
///
/// Every field is populated even when the target is missing or unreadable;
/// the defaults (`0`, `"0000"`, the epoch, `unknown`) mean "not probed".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileStatus {
    /// Resolved path that was inspected
    pub name: String,
    pub present: bool,
    /// "present", "not present" or the permission message
    pub output: String,
    #[serde(rename = "type")]
    pub kind: FileKind,
    /// Raw st_mode in octal
    pub mode: String,
    pub size: u64,
    #[serde(with = "unix_time")]
    pub mtime: SystemTime,
    #[serde(with = "unix_time")]
    pub ctime: SystemTime,
    #[serde(with = "unix_time")]
    pub atime: SystemTime,
    pub mtime_seconds: i64,
    pub ctime_seconds: i64,
    pub atime_seconds: i64,
    pub md5: Md5Sum,
    pub uid: u32,
    pub gid: u32,
}

impl FileStatus {
    /// A record carrying only sentinel values for `path`.
    pub fn unprobed(path: &Path) -> Self {
        Self {
            name: path.display().to_string(),
            present: false,
            output: OUTPUT_NOT_PRESENT.to_owned(),
            kind: FileKind::Unknown,
            mode: DEFAULT_MODE.to_owned(),
            size: 0,
            mtime: UNIX_EPOCH,
            ctime: UNIX_EPOCH,
            atime: UNIX_EPOCH,
            mtime_seconds: 0,
            ctime_seconds: 0,
            atime_seconds: 0,
            md5: Md5Sum::NotComputed,
            uid: 0,
            gid: 0,
        }
    }
}

/// `SystemTime` as signed `(seconds, nanoseconds)` since the epoch, so that
/// timestamps before 1970 survive serialization. Seconds are floored and
/// the nanosecond part is always in `0..1_000_000_000`.
mod unix_time {
    use std::time::{Duration, SystemTime, UNIX_EPOCH};

    use serde::de::Error as _;
    use serde::ser::Error as _;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    const NANOS_PER_SEC: u32 = 1_000_000_000;

    pub fn to_parts(t: SystemTime) -> Option<(i64, u32)> {
        match t.duration_since(UNIX_EPOCH) {
            Ok(d) => Some((i64::try_from(d.as_secs()).ok()?, d.subsec_nanos())),
            Err(e) => {
                let d = e.duration();
                let secs = i64::try_from(d.as_secs()).ok()?;
                match d.subsec_nanos() {
                    0 => Some((-secs, 0)),
                    n => Some((-secs - 1, NANOS_PER_SEC - n)),
                }
            }
        }
    }

    pub fn from_parts(secs: i64, nanos: u32) -> Option<SystemTime> {
        if nanos >= NANOS_PER_SEC {
            return None;
        }
        let whole = if secs >= 0 {
            UNIX_EPOCH.checked_add(Duration::from_secs(secs.unsigned_abs()))?
        } else {
            UNIX_EPOCH.checked_sub(Duration::from_secs(secs.unsigned_abs()))?
        };
        whole.checked_add(Duration::from_nanos(u64::from(nanos)))
    }

    pub fn serialize<S: Serializer>(t: &SystemTime, serializer: S) -> Result<S::Ok, S::Error> {
        to_parts(*t)
            .ok_or_else(|| S::Error::custom("timestamp out of range"))?
            .serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<SystemTime, D::Error> {
        let (secs, nanos) = <(i64, u32)>::deserialize(deserializer)?;
        from_parts(secs, nanos)
            .ok_or_else(|| D::Error::custom(format!("invalid timestamp ({secs}, {nanos})")))
    }
}

#[cfg(test)]
#[path = "record_tests.rs"]
mod tests;
