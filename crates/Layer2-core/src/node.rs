//! Command Node - 명령어 트리의 단위
//!
//! ## Resolution
//!
//! ```text
//! dispatch(actor, ["admin", "reload", "now"])
//!   │
//!   ▼
//! Root "app"          prefix := "app.cmd"          (never checked)
//!   │ "admin"
//!   ▼
//! Branch "admin"      check "app.cmd.admin"        NO_PERMISSION on deny
//!   │ "reload"
//!   ▼
//! Branch "reload"     check "app.cmd.admin.reload"
//!   │ "now" matches no child
//!   ▼
//! reload.execute(actor, ["now"])
//! ```
//!
//! The permission of a node is never stored. It is rebuilt from the path
//! on every traversal.

use crate::command::{Command, Group};
use crate::Status;
use arbor_foundation::{Actor, AppIdentity, Error, Result};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

/// Reserved child name the root delegates to
pub const HELP_COMMAND: &str = "help";

/// Explicit node tag
pub enum NodeKind {
    /// Entry point of a tree. Seeds the permission prefix from its owner.
    Root { owner: Arc<AppIdentity> },

    /// Any other node
    Branch { command: Box<dyn Command> },
}

impl fmt::Debug for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKind::Root { owner } => f.debug_struct("Root").field("owner", owner).finish(),
            NodeKind::Branch { command } => f
                .debug_struct("Branch")
                .field("command", &command.name())
                .finish(),
        }
    }
}

/// One node of the dispatch tree. Owns its children outright.
pub struct CommandNode {
    name: String,
    kind: NodeKind,
    children: HashMap<String, CommandNode>,
}

impl CommandNode {
    /// Root node named after the owner's command label
    pub fn root(owner: Arc<AppIdentity>) -> Self {
        Self {
            name: owner.command_label().to_string(),
            kind: NodeKind::Root { owner },
            children: HashMap::new(),
        }
    }

    /// Branch node driven by `command`
    pub fn branch(command: impl Command + 'static) -> Self {
        Self {
            name: command.name().to_string(),
            kind: NodeKind::Branch {
                command: Box::new(command),
            },
            children: HashMap::new(),
        }
    }

    /// Organizational branch with no terminal action
    pub fn group(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self::branch(Group::new(name, description))
    }

    /// Builder-style [`register`](Self::register)
    pub fn with_child(mut self, child: CommandNode) -> Self {
        self.register(child);
        self
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn is_root(&self) -> bool {
        matches!(self.kind, NodeKind::Root { .. })
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// One-line summary.
    ///
    /// # Panics
    ///
    /// A root has no description of its own; asking for one is a tree
    /// assembly bug.
    pub fn description(&self) -> &str {
        match &self.kind {
            NodeKind::Root { .. } => panic!(
                "root command '{}' has no description; describe its children instead",
                self.name
            ),
            NodeKind::Branch { command } => command.description(),
        }
    }

    pub fn usage_hint(&self, owner: &AppIdentity) -> String {
        match &self.kind {
            NodeKind::Root { .. } => format!("/{}", owner.command_label()),
            NodeKind::Branch { command } => command.usage_hint(owner),
        }
    }

    // ========================================================================
    // Registry
    // ========================================================================

    /// Insert `child` under its own name. A previous child with the same
    /// name is replaced and returned.
    pub fn register(&mut self, child: CommandNode) -> Option<CommandNode> {
        let replaced = self.children.insert(child.name.clone(), child);
        if let Some(old) = &replaced {
            warn!("Command '{}' under '{}' was replaced", old.name, self.name);
        }
        replaced
    }

    /// Insert `child`, failing if the name is already taken
    pub fn try_register(&mut self, child: CommandNode) -> Result<()> {
        if self.children.contains_key(&child.name) {
            return Err(Error::duplicate_command(&self.name, &child.name));
        }
        self.children.insert(child.name.clone(), child);
        Ok(())
    }

    /// Direct child lookup
    pub fn walk(&self, token: &str) -> Option<&CommandNode> {
        self.children.get(token)
    }

    pub fn children(&self) -> impl Iterator<Item = &CommandNode> {
        self.children.values()
    }

    // ========================================================================
    // Resolution
    // ========================================================================

    /// Permission string this node is checked against when reached with
    /// `permission_prefix`. A root ignores the prefix.
    pub fn permission_for(&self, permission_prefix: &str) -> String {
        match &self.kind {
            NodeKind::Root { owner } => owner.base_permission(),
            NodeKind::Branch { .. } => {
                format!("{}.{}", permission_prefix, self.name.to_lowercase())
            }
        }
    }

    /// Resolve `tokens` starting at this node.
    ///
    /// A branch first checks its own permission and returns
    /// [`Status::NoPermission`] without looking at any child. Then the first
    /// token selects a child to recurse into; if none matches, this node's
    /// [`execute`](Self::execute) runs with the tokens exactly as received.
    pub fn resolve(&self, actor: &dyn Actor, permission_prefix: &str, tokens: &[String]) -> Status {
        let permission = self.permission_for(permission_prefix);

        if !self.is_root() && !actor.has_capability(&permission) {
            debug!(actor = actor.name(), %permission, "Permission denied");
            return Status::NoPermission;
        }

        if let Some((head, rest)) = tokens.split_first() {
            if let Some(child) = self.children.get(head) {
                return child.resolve(actor, &permission, rest);
            }
        }

        debug!(command = %self.name, args = ?tokens, "Executing");
        self.execute(actor, tokens)
    }

    /// Terminal action of this node.
    ///
    /// # Panics
    ///
    /// A root delegates to its `"help"` child; a root without one was
    /// assembled incorrectly.
    pub fn execute(&self, actor: &dyn Actor, tokens: &[String]) -> Status {
        match &self.kind {
            NodeKind::Root { .. } => match self.children.get(HELP_COMMAND) {
                Some(help) => help.execute(actor, tokens),
                None => panic!(
                    "root command '{}' has no '{}' child to delegate to",
                    self.name, HELP_COMMAND
                ),
            },
            NodeKind::Branch { command } => command.execute(actor, tokens),
        }
    }

    // ========================================================================
    // Tree walk
    // ========================================================================

    /// Every leaf below this node, keyed by the space-joined path from this
    /// node's name down to the leaf's name. Inner nodes are never listed.
    pub fn flatten_paths(&self) -> BTreeMap<String, &CommandNode> {
        let mut paths = BTreeMap::new();
        self.collect_leaves(self.name.clone(), &mut paths);
        paths
    }

    fn collect_leaves<'a>(&'a self, path: String, out: &mut BTreeMap<String, &'a CommandNode>) {
        if self.children.is_empty() {
            out.insert(path, self);
            return;
        }
        for child in self.children.values() {
            child.collect_leaves(format!("{} {}", path, child.name), out);
        }
    }

    /// For every leaf (keyed as in [`flatten_paths`](Self::flatten_paths)),
    /// the permission strings checked on the way to it, top-down.
    pub fn permission_chains(&self, permission_prefix: &str) -> BTreeMap<String, Vec<String>> {
        let mut chains = BTreeMap::new();
        self.collect_chains(self.name.clone(), permission_prefix, Vec::new(), &mut chains);
        chains
    }

    fn collect_chains(
        &self,
        path: String,
        permission_prefix: &str,
        mut chain: Vec<String>,
        out: &mut BTreeMap<String, Vec<String>>,
    ) {
        let permission = self.permission_for(permission_prefix);
        if !self.is_root() {
            chain.push(permission.clone());
        }
        if self.children.is_empty() {
            out.insert(path, chain);
            return;
        }
        for child in self.children.values() {
            child.collect_chains(
                format!("{} {}", path, child.name),
                &permission,
                chain.clone(),
                out,
            );
        }
    }
}

impl fmt::Debug for CommandNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut children: Vec<&str> = self.children.keys().map(String::as_str).collect();
        children.sort_unstable();
        f.debug_struct("CommandNode")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("children", &children)
            .finish()
    }
}
