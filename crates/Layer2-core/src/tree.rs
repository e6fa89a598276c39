//! Command Tree - 트리 조립 및 dispatch 진입점
//!
//! ```text
//! TreeBuilder (bootstrap, single-threaded)
//!   ├── command(node) ...
//!   ├── default_help(messenger, catalog)
//!   ├── index() ──► SharedIndex (filled by build)
//!   └── build() ──► CommandTree (read-only, Send + Sync)
//!                      └── dispatch(actor, tokens)
//! ```

use crate::feedback::{MessageCatalog, Messenger};
use crate::help::{HelpCommand, HelpIndex, SharedIndex};
use crate::node::{CommandNode, NodeKind, HELP_COMMAND};
use crate::Status;
use arbor_foundation::{Actor, AppConfig, AppIdentity, Error, Result};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, info};

/// A published dispatch tree. Structure is immutable; `dispatch` may be
/// called from many threads at once.
#[derive(Debug)]
pub struct CommandTree {
    owner: Arc<AppIdentity>,
    root: CommandNode,
}

impl CommandTree {
    /// Publish an already assembled root. Does not check for a help child.
    pub fn new(root: CommandNode) -> Result<Self> {
        let owner = match root.kind() {
            NodeKind::Root { owner } => Arc::clone(owner),
            NodeKind::Branch { .. } => {
                return Err(Error::InvalidInput(format!(
                    "'{}' is not a root command",
                    root.name()
                )))
            }
        };
        Ok(Self { owner, root })
    }

    pub fn owner(&self) -> &AppIdentity {
        &self.owner
    }

    pub fn root(&self) -> &CommandNode {
        &self.root
    }

    /// Resolve a full token list from the root
    pub fn dispatch(&self, actor: &dyn Actor, tokens: &[String]) -> Status {
        self.root.resolve(actor, "", tokens)
    }

    /// Leaf index keyed by `label a b c`
    pub fn flatten_paths(&self) -> BTreeMap<String, &CommandNode> {
        self.root.flatten_paths()
    }

    /// Leaf path to the permission string of the leaf itself
    pub fn permission_paths(&self) -> BTreeMap<String, String> {
        self.root
            .permission_chains("")
            .into_iter()
            .filter_map(|(path, mut chain)| chain.pop().map(|permission| (path, permission)))
            .collect()
    }
}

/// Assembles a [`CommandTree`] during bootstrap
pub struct TreeBuilder {
    owner: Arc<AppIdentity>,
    commands: Vec<CommandNode>,
    strict: bool,
    help: Option<(Arc<dyn Messenger>, Arc<MessageCatalog>)>,
    index: SharedIndex,
}

impl TreeBuilder {
    pub fn new(owner: AppIdentity) -> Self {
        Self {
            owner: Arc::new(owner),
            commands: Vec::new(),
            strict: false,
            help: None,
            index: SharedIndex::new(),
        }
    }

    /// Owner and registration mode taken from config
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.identity()).strict(config.strict_registration)
    }

    /// Reject duplicate top-level names instead of overwriting
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Add a top-level command
    pub fn command(mut self, node: CommandNode) -> Self {
        self.commands.push(node);
        self
    }

    /// Install the built-in help command unless a `help` command was added
    pub fn default_help(
        mut self,
        messenger: Arc<dyn Messenger>,
        catalog: Arc<MessageCatalog>,
    ) -> Self {
        self.help = Some((messenger, catalog));
        self
    }

    /// Handle to the leaf index of the tree this builder will publish.
    /// Commands added before `build` can hold it and read it at dispatch.
    pub fn index(&self) -> SharedIndex {
        self.index.clone()
    }

    pub fn build(self) -> Result<CommandTree> {
        let strict = self.strict;
        let register = |root: &mut CommandNode, node: CommandNode| -> Result<()> {
            if strict {
                root.try_register(node)
            } else {
                root.register(node);
                Ok(())
            }
        };

        let mut root = CommandNode::root(Arc::clone(&self.owner));
        for node in self.commands {
            register(&mut root, node)?;
        }

        let mut index = HelpIndex::from_root(&root, &self.owner);
        if let Some((messenger, catalog)) = self.help {
            if root.walk(HELP_COMMAND).is_some() {
                debug!("Keeping custom '{}' command", HELP_COMMAND);
            } else {
                index.push(HelpCommand::entry(&self.owner));
                let help = HelpCommand::new(&self.owner, index.clone(), messenger, catalog);
                register(&mut root, CommandNode::branch(help))?;
            }
        }

        if root.walk(HELP_COMMAND).is_none() {
            return Err(Error::MissingHelp(root.name().to_string()));
        }
        self.index.publish(index);

        info!(
            "Command tree '{}' published with {} commands",
            root.name(),
            root.flatten_paths().len()
        );
        CommandTree::new(root)
    }
}
