//! Dispatch Status - 명령어 실행 결과

use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of a dispatch. Expected failures are returned as values, never
/// raised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    /// Command ran to completion
    Ok,

    /// Actor lacks the permission of a node on the path
    NoPermission,

    /// No terminal action at the resolved node
    Unsupported,

    /// The command ran and reported a failure
    Failed,

    /// The command exists but is currently not allowed to run
    Restricted,
}

impl Status {
    pub fn is_success(&self) -> bool {
        matches!(self, Status::Ok)
    }

    /// Message catalog key for feedback. `None` for [`Status::Ok`], which
    /// leaves feedback to the command itself.
    pub fn message_key(&self) -> Option<&'static str> {
        match self {
            Status::Ok => None,
            Status::NoPermission => Some("no-permission"),
            Status::Unsupported => Some("unsupported"),
            Status::Failed => Some("failed"),
            Status::Restricted => Some("restricted"),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Ok => "OK",
            Status::NoPermission => "NO_PERMISSION",
            Status::Unsupported => "UNSUPPORTED",
            Status::Failed => "FAILED",
            Status::Restricted => "RESTRICTED",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
