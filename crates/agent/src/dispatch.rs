use std::path::{Path, PathBuf};

use filemgr_fs::{
    DirectoryListing, FileSystem, FsError, LocalFs, inspect, list, remove, resolve, touch,
};
use filemgr_protocol::{AgentRequest, Reply, ReplyData};
use filemgr_runtime::{ConfigFile, ConfigSource};
use log::{debug, warn};

/// Binds the named actions to the filesystem core and shapes replies.
///
/// Configuration is snapshotted once per action, so edits to the plugin
/// configuration take effect on the next request.
pub struct Agent<F, C> {
    fs: F,
    config: C,
}

impl Agent<LocalFs, ConfigFile> {
    /// Agent over the host filesystem reading plugin settings from `config_path`.
    pub fn local(config_path: impl Into<PathBuf>) -> Self {
        Self::new(LocalFs, ConfigFile::new(config_path))
    }
}

impl<F: FileSystem, C: ConfigSource> Agent<F, C> {
    pub fn new(fs: F, config: C) -> Self {
        Self { fs, config }
    }

    /// Run one action. Failures become aborted replies; nothing escapes.
    pub fn handle(&self, request: &AgentRequest) -> Reply {
        debug!("[{}] {:?}", request.action(), request);

        let reply = match request {
            AgentRequest::Touch { file } => self.touch(file.as_deref()),
            AgentRequest::Remove { file } => self.remove(file.as_deref()),
            AgentRequest::List { dir, details } => self.list(dir, details.unwrap_or(false)),
            AgentRequest::Status { file } => self.status(file.as_deref()),
            AgentRequest::Ping => Reply::ok(ReplyData::Pong),
        };

        if !reply.is_ok() {
            warn!("[{}] {}", request.action(), reply.statusmsg);
        }

        reply
    }

    fn target(&self, file: Option<&str>) -> String {
        resolve(file, &self.config.snapshot())
    }

    fn touch(&self, file: Option<&str>) -> Reply {
        let path = self.target(file);

        match touch(&self.fs, Path::new(&path)) {
            Ok(()) => Reply::ok(ReplyData::None),
            Err(e) => Reply::fail(e.to_string()),
        }
    }

    fn remove(&self, file: Option<&str>) -> Reply {
        let path = self.target(file);

        match remove(&self.fs, Path::new(&path)) {
            Ok(()) => Reply::ok(ReplyData::None),
            Err(FsError::NotFound { .. }) => {
                Reply::fail(format!("Could not remove file '{path}' - it is not present"))
            }
            Err(e) => Reply::fail(e.to_string()),
        }
    }

    fn list(&self, dir: &str, details: bool) -> Reply {
        match list(&self.fs, Path::new(dir), details) {
            Ok(DirectoryListing::Paths(files)) => Reply::ok(ReplyData::Files(files)),
            Ok(DirectoryListing::Detailed(files)) => Reply::ok(ReplyData::DetailedFiles(files)),
            Err(FsError::NotFound { .. }) => {
                Reply::fail("Could not read directory. Directory does not exist.")
            }
            Err(FsError::NotADirectory { .. }) => Reply::fail(format!(
                "Could not read directory. '{dir}' is not a directory"
            )),
            Err(e) => Reply::fail(e.to_string()),
        }
    }

    fn status(&self, file: Option<&str>) -> Reply {
        let path = self.target(file);

        match inspect(&self.fs, Path::new(&path)) {
            Ok(status) if !status.present => {
                Reply::fail(format!("{} does not exist", status.name))
            }
            Ok(status) => Reply::ok(ReplyData::Status(status)),
            Err(e) => Reply::fail(e.to_string()),
        }
    }
}

#[cfg(test)]
#[path = "dispatch_tests.rs"]
mod tests;
