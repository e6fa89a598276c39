//! Sample commands mounted by the CLI host
//!
//! ```text
//! /arbor
//!   ├── help [command]
//!   ├── version
//!   ├── echo <text...>
//!   └── admin
//!         ├── reload
//!         ├── list
//!         └── lockdown
//! ```

use arbor_core::{
    Command, CommandNode, CommandTree, MessageCatalog, Messenger, SharedIndex, Status,
    TreeBuilder,
};
use arbor_foundation::{Actor, AppConfig, AppIdentity, Result};
use std::path::PathBuf;
use std::sync::Arc;

/// Everything the sample commands need, injected at build time
#[derive(Clone)]
pub struct CommandContext {
    pub messenger: Arc<dyn Messenger>,
    pub catalog: Arc<MessageCatalog>,
    pub config_path: Option<PathBuf>,
}

// ============================================================================
// Leaves
// ============================================================================

pub struct VersionCommand {
    messenger: Arc<dyn Messenger>,
}

impl Command for VersionCommand {
    fn name(&self) -> &str {
        "version"
    }

    fn description(&self) -> &str {
        "Show the Arbor version"
    }

    fn execute(&self, actor: &dyn Actor, _args: &[String]) -> Status {
        self.messenger
            .send(actor, &format!("arbor {}", env!("CARGO_PKG_VERSION")));
        Status::Ok
    }
}

pub struct EchoCommand {
    messenger: Arc<dyn Messenger>,
}

impl Command for EchoCommand {
    fn name(&self) -> &str {
        "echo"
    }

    fn description(&self) -> &str {
        "Repeat the given text"
    }

    fn usage_hint(&self, owner: &AppIdentity) -> String {
        format!("/{} echo <text...>", owner.command_label())
    }

    fn execute(&self, actor: &dyn Actor, args: &[String]) -> Status {
        if args.is_empty() {
            return Status::Failed;
        }
        self.messenger.send(actor, &args.join(" "));
        Status::Ok
    }
}

/// Re-reads the config file and reports whether it is still valid
pub struct ReloadCommand {
    messenger: Arc<dyn Messenger>,
    config_path: Option<PathBuf>,
}

impl Command for ReloadCommand {
    fn name(&self) -> &str {
        "reload"
    }

    fn description(&self) -> &str {
        "Validate the configuration file again"
    }

    fn execute(&self, actor: &dyn Actor, _args: &[String]) -> Status {
        let Some(path) = &self.config_path else {
            self.messenger.send(actor, "No configuration file in use.");
            return Status::Ok;
        };

        match AppConfig::from_path(path) {
            Ok(config) => {
                self.messenger
                    .send(actor, &format!("Configuration for {} is valid.", config.name));
                Status::Ok
            }
            Err(e) => {
                tracing::warn!("Reload of {} failed: {}", path.display(), e);
                self.messenger.send(actor, &e.to_string());
                Status::Failed
            }
        }
    }
}

/// Lists every command path with the permission it requires
pub struct ListCommand {
    messenger: Arc<dyn Messenger>,
    index: SharedIndex,
}

impl Command for ListCommand {
    fn name(&self) -> &str {
        "list"
    }

    fn description(&self) -> &str {
        "List command paths and their permissions"
    }

    fn execute(&self, actor: &dyn Actor, _args: &[String]) -> Status {
        let Some(index) = self.index.get() else {
            tracing::warn!("Command index requested before the tree was built");
            return Status::Failed;
        };

        for entry in index.entries() {
            let permission = entry.permissions.last().map(String::as_str).unwrap_or("-");
            self.messenger
                .send(actor, &format!("{:<28} {}", entry.usage, permission));
        }
        Status::Ok
    }
}

pub struct LockdownCommand;

impl Command for LockdownCommand {
    fn name(&self) -> &str {
        "lockdown"
    }

    fn description(&self) -> &str {
        "Lock the application (disabled in this build)"
    }

    fn execute(&self, _actor: &dyn Actor, _args: &[String]) -> Status {
        Status::Restricted
    }
}

// ============================================================================
// Assembly
// ============================================================================

fn command_nodes(ctx: &CommandContext, index: SharedIndex) -> Vec<CommandNode> {
    vec![
        CommandNode::branch(VersionCommand {
            messenger: Arc::clone(&ctx.messenger),
        }),
        CommandNode::branch(EchoCommand {
            messenger: Arc::clone(&ctx.messenger),
        }),
        CommandNode::group("admin", "Administrative commands")
            .with_child(CommandNode::branch(ReloadCommand {
                messenger: Arc::clone(&ctx.messenger),
                config_path: ctx.config_path.clone(),
            }))
            .with_child(CommandNode::branch(ListCommand {
                messenger: Arc::clone(&ctx.messenger),
                index,
            }))
            .with_child(CommandNode::branch(LockdownCommand)),
    ]
}

/// Build the sample tree. `admin list` reads the index the builder
/// publishes once assembly finishes.
pub fn build_tree(config: &AppConfig, ctx: &CommandContext) -> Result<CommandTree> {
    let builder = TreeBuilder::from_config(config);
    let index = builder.index();

    command_nodes(ctx, index)
        .into_iter()
        .fold(builder, TreeBuilder::command)
        .default_help(Arc::clone(&ctx.messenger), Arc::clone(&ctx.catalog))
        .build()
}
