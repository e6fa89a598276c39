//! Command trait - 노드별 오버라이드 지점
//!
//! A [`Command`] describes one node of the tree: its name, its one-line
//! description and what happens when resolution stops at it. The recursive
//! resolution itself lives on [`CommandNode`](crate::CommandNode) and is
//! shared by every command.

use crate::Status;
use arbor_foundation::{Actor, AppIdentity};
use std::sync::Arc;

/// Per-node behavior of the command tree
pub trait Command: Send + Sync {
    /// Name matched against the input token (exact, case-sensitive)
    fn name(&self) -> &str;

    /// One-line summary
    fn description(&self) -> &str;

    /// Usage hint shown to users.
    ///
    /// The default renders only this command's own name after the command
    /// label, so nested commands get an incomplete hint unless they override
    /// it. Help listings use the full path instead.
    fn usage_hint(&self, owner: &AppIdentity) -> String {
        format!("/{} {}", owner.command_label(), self.name())
    }

    /// Runs when resolution stops at this node. `args` are the tokens left
    /// at this node, including an unmatched leading token.
    ///
    /// Purely organizational nodes keep the default.
    fn execute(&self, _actor: &dyn Actor, _args: &[String]) -> Status {
        Status::Unsupported
    }
}

impl<T: Command + ?Sized> Command for Arc<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn description(&self) -> &str {
        (**self).description()
    }

    fn usage_hint(&self, owner: &AppIdentity) -> String {
        (**self).usage_hint(owner)
    }

    fn execute(&self, actor: &dyn Actor, args: &[String]) -> Status {
        (**self).execute(actor, args)
    }
}

/// Organizational command with no terminal action
#[derive(Debug, Clone)]
pub struct Group {
    name: String,
    description: String,
}

impl Group {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

impl Command for Group {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }
}
