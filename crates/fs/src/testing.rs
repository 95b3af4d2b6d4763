//! In-memory [`FileSystem`] for exercising callers without touching disk.

use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::UNIX_EPOCH;

use crate::probe::{FileSystem, RawStat};
use crate::record::FileKind;

#[derive(Debug, Clone)]
pub struct FakeEntry {
    pub readable: bool,
    pub symlink: bool,
    /// `None` makes `stat` fail
    pub stat: Option<RawStat>,
    /// `None` makes `md5` fail
    pub md5: Option<String>,
}

impl FakeEntry {
    pub fn file(mode: u32, size: u64, md5: &str) -> Self {
        Self {
            readable: true,
            symlink: false,
            stat: Some(raw_stat(FileKind::File, mode, size)),
            md5: Some(md5.to_owned()),
        }
    }

    pub fn dir() -> Self {
        Self {
            readable: true,
            symlink: false,
            stat: Some(raw_stat(FileKind::Directory, 0o40755, 4096)),
            md5: None,
        }
    }

    pub fn unreadable(mut self) -> Self {
        self.readable = false;
        self
    }
}

pub fn raw_stat(kind: FileKind, mode: u32, size: u64) -> RawStat {
    RawStat {
        kind,
        mode,
        size,
        mtime: UNIX_EPOCH,
        ctime: UNIX_EPOCH,
        atime: UNIX_EPOCH,
        uid: 0,
        gid: 0,
    }
}

/// Paths map to entries; children of a directory are the entries whose
/// parent is that directory, in path order. Every call is recorded.
#[derive(Debug, Default)]
pub struct FakeFs {
    entries: BTreeMap<PathBuf, FakeEntry>,
    calls: Mutex<Vec<String>>,
    touch_error: Option<io::ErrorKind>,
    remove_error: Option<io::ErrorKind>,
}

impl FakeFs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, path: impl Into<PathBuf>, entry: FakeEntry) -> Self {
        self.entries.insert(path.into(), entry);
        self
    }

    pub fn failing_touch(mut self, kind: io::ErrorKind) -> Self {
        self.touch_error = Some(kind);
        self
    }

    pub fn failing_remove(mut self, kind: io::ErrorKind) -> Self {
        self.remove_error = Some(kind);
        self
    }

    /// Calls made so far, e.g. `"touch /tmp/foo"` or `"lstat /tmp/link"`.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    fn record(&self, op: &str, path: &Path) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(format!("{op} {}", path.display()));
        }
    }

    fn entry(&self, path: &Path) -> io::Result<&FakeEntry> {
        self.entries
            .get(path)
            .ok_or_else(|| io::Error::from(io::ErrorKind::NotFound))
    }
}

impl FileSystem for FakeFs {
    fn exists(&self, path: &Path) -> bool {
        self.entries.contains_key(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.entries
            .get(path)
            .and_then(|e| e.stat.as_ref())
            .is_some_and(|st| st.kind == FileKind::Directory)
    }

    fn readable(&self, path: &Path) -> bool {
        self.entries.get(path).is_some_and(|e| e.readable)
    }

    fn is_symlink(&self, path: &Path) -> bool {
        self.entries.get(path).is_some_and(|e| e.symlink)
    }

    fn stat(&self, path: &Path, follow: bool) -> io::Result<RawStat> {
        self.record(if follow { "stat" } else { "lstat" }, path);
        self.entry(path)?
            .stat
            .clone()
            .ok_or_else(|| io::Error::other("stat failed"))
    }

    fn md5(&self, path: &Path) -> io::Result<String> {
        self.record("md5", path);
        self.entry(path)?
            .md5
            .clone()
            .ok_or_else(|| io::Error::from(io::ErrorKind::NotFound))
    }

    fn read_dir(&self, dir: &Path) -> io::Result<Vec<PathBuf>> {
        self.record("read_dir", dir);
        Ok(self
            .entries
            .keys()
            .filter(|p| p.parent() == Some(dir))
            .cloned()
            .collect())
    }

    fn touch(&self, path: &Path) -> io::Result<()> {
        self.record("touch", path);
        match self.touch_error {
            Some(kind) => Err(io::Error::from(kind)),
            None => Ok(()),
        }
    }

    fn remove(&self, path: &Path) -> io::Result<()> {
        self.record("remove", path);
        match self.remove_error {
            Some(kind) => Err(io::Error::from(kind)),
            None => Ok(()),
        }
    }
}
