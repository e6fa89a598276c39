//! arbor-core: Command Dispatch Tree for Arbor
//!
//! Layer2 - 명령어 트리 레이어
//!
//! # 주요 모듈
//!
//! - `command`: Command trait (노드별 오버라이드 지점)
//! - `node`: CommandNode / NodeKind (재귀 resolve, registry, flatten)
//! - `tree`: CommandTree / TreeBuilder (조립 및 dispatch 진입점)
//! - `help`: 내장 help 명령어 (HelpIndex, SharedIndex)
//! - `feedback`: Messenger / MessageCatalog / CommandHost
//! - `status`: Status (dispatch 결과)
//!
//! # 사용 예시
//!
//! ```ignore
//! use arbor_core::{CommandNode, LogMessenger, MessageCatalog, TreeBuilder};
//! use arbor_foundation::{AppIdentity, ConsoleActor};
//!
//! let tree = TreeBuilder::new(AppIdentity::named("App"))
//!     .command(
//!         CommandNode::group("admin", "Administrative commands")
//!             .with_child(CommandNode::branch(ReloadCommand::new())),
//!     )
//!     .default_help(Arc::new(LogMessenger), Arc::new(MessageCatalog::new()))
//!     .build()?;
//!
//! // checks "app.cmd.admin" then "app.cmd.admin.reload"
//! let status = tree.dispatch(&ConsoleActor, &["admin".into(), "reload".into()]);
//! ```

pub mod command;
pub mod feedback;
pub mod help;
pub mod node;
pub mod status;
pub mod tree;

// Re-exports: Command
pub use command::{Command, Group};

// Re-exports: Node
pub use node::{CommandNode, NodeKind, HELP_COMMAND};

// Re-exports: Tree
pub use tree::{CommandTree, TreeBuilder};

// Re-exports: Help
pub use help::{HelpCommand, HelpEntry, HelpIndex, SharedIndex};

// Re-exports: Feedback
pub use feedback::{CommandHost, LogMessenger, MessageCatalog, Messenger};

// Re-exports: Status
pub use status::Status;
