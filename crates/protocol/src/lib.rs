pub mod codec;

use filemgr_fs::FileStatus;
use serde::{Deserialize, Serialize};

/// One action invocation sent to the agent.
///
/// `file` arguments are optional and resolved on the agent side; `dir` is
/// used as given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AgentRequest {
    Touch { file: Option<String> },
    Remove { file: Option<String> },
    List { dir: String, details: Option<bool> },
    Status { file: Option<String> },
    Ping,
}

impl AgentRequest {
    /// Action name as exposed to callers.
    pub fn action(&self) -> &'static str {
        match self {
            AgentRequest::Touch { .. } => "touch",
            AgentRequest::Remove { .. } => "remove",
            AgentRequest::List { .. } => "list",
            AgentRequest::Status { .. } => "status",
            AgentRequest::Ping => "ping",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReplyStatus {
    Ok,
    /// The action failed and `statusmsg` says why.
    Aborted,
}

impl ReplyStatus {
    pub fn code(&self) -> u8 {
        match self {
            ReplyStatus::Ok => 0,
            ReplyStatus::Aborted => 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReplyData {
    None,
    /// `list` without details
    Files(Vec<String>),
    /// `list` with details: one `{path: status}` pair per child
    DetailedFiles(Vec<(String, FileStatus)>),
    Status(FileStatus),
    Pong,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reply {
    pub status: ReplyStatus,
    pub statusmsg: String,
    pub data: ReplyData,
}

impl Reply {
    pub fn ok(data: ReplyData) -> Self {
        Self {
            status: ReplyStatus::Ok,
            statusmsg: "OK".to_owned(),
            data,
        }
    }

    pub fn fail(msg: impl Into<String>) -> Self {
        Self {
            status: ReplyStatus::Aborted,
            statusmsg: msg.into(),
            data: ReplyData::None,
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == ReplyStatus::Ok
    }
}
