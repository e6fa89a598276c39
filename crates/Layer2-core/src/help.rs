//! Help - 내장 도움말 명령어
//!
//! The index is computed once at build time from the assembled tree and
//! injected into [`HelpCommand`]; nothing is looked up lazily at dispatch.
//! Other commands that need the finished listing hold a [`SharedIndex`],
//! which `TreeBuilder::build` fills exactly once.

use crate::command::Command;
use crate::feedback::{MessageCatalog, Messenger};
use crate::node::{CommandNode, HELP_COMMAND};
use crate::Status;
use arbor_foundation::{Actor, AppIdentity};
use std::sync::{Arc, OnceLock};

/// One listed leaf command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelpEntry {
    /// Path below the root, e.g. `admin reload`
    pub path: String,
    /// Full usage, e.g. `/app admin reload`
    pub usage: String,
    pub description: String,
    /// Permissions checked on the way to this leaf, top-down
    pub permissions: Vec<String>,
}

impl HelpEntry {
    /// Whether `actor` would pass every permission check on the path
    pub fn is_visible_to(&self, actor: &dyn Actor) -> bool {
        self.permissions.iter().all(|p| actor.has_capability(p))
    }
}

/// Leaf index of a tree, sorted by path
#[derive(Debug, Clone, Default)]
pub struct HelpIndex {
    entries: Vec<HelpEntry>,
}

impl HelpIndex {
    /// Index every leaf below `root`
    pub fn from_root(root: &CommandNode, owner: &AppIdentity) -> Self {
        let mut chains = root.permission_chains("");
        let entries = root
            .flatten_paths()
            .into_iter()
            .filter(|(_, node)| !node.is_root())
            .map(|(full_path, node)| {
                let path = strip_root(&full_path, root.name()).to_string();
                HelpEntry {
                    usage: format!("/{} {}", owner.command_label(), path),
                    description: node.description().to_string(),
                    permissions: chains.remove(&full_path).unwrap_or_default(),
                    path,
                }
            })
            .collect();

        Self { entries }
    }

    pub fn push(&mut self, entry: HelpEntry) {
        let at = self
            .entries
            .binary_search_by(|e| e.path.cmp(&entry.path))
            .unwrap_or_else(|i| i);
        self.entries.insert(at, entry);
    }

    pub fn entries(&self) -> &[HelpEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries `actor` can reach. A filter keeps the command named `filter`
    /// and everything below it; `admin` does not match `administrator`.
    pub fn visible_to<'a>(
        &'a self,
        actor: &'a dyn Actor,
        filter: Option<&'a str>,
    ) -> impl Iterator<Item = &'a HelpEntry> + 'a {
        self.entries
            .iter()
            .filter(move |e| filter.map_or(true, |f| is_under(&e.path, f)))
            .filter(move |e| e.is_visible_to(actor))
    }
}

/// `path` equals `command` or continues it with another segment
fn is_under(path: &str, command: &str) -> bool {
    match path.strip_prefix(command) {
        Some(rest) => rest.is_empty() || rest.starts_with(' '),
        None => false,
    }
}

// ============================================================================
// SharedIndex
// ============================================================================

/// Handle to the index of a tree that is still being assembled
#[derive(Debug, Clone, Default)]
pub struct SharedIndex(Arc<OnceLock<HelpIndex>>);

impl SharedIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// `None` until the tree is built
    pub fn get(&self) -> Option<&HelpIndex> {
        self.0.get()
    }

    pub(crate) fn publish(&self, index: HelpIndex) {
        if self.0.set(index).is_err() {
            tracing::warn!("Help index already published; keeping the first one");
        }
    }
}

fn strip_root<'a>(full_path: &'a str, root_name: &str) -> &'a str {
    full_path
        .strip_prefix(root_name)
        .map(str::trim_start)
        .unwrap_or(full_path)
}

/// Built-in `help` leaf
pub struct HelpCommand {
    app_name: String,
    index: HelpIndex,
    messenger: Arc<dyn Messenger>,
    catalog: Arc<MessageCatalog>,
}

impl HelpCommand {
    pub const DESCRIPTION: &'static str = "Show available commands";

    pub fn new(
        owner: &AppIdentity,
        index: HelpIndex,
        messenger: Arc<dyn Messenger>,
        catalog: Arc<MessageCatalog>,
    ) -> Self {
        Self {
            app_name: owner.name().to_string(),
            index,
            messenger,
            catalog,
        }
    }

    /// Entry describing the help command itself
    pub fn entry(owner: &AppIdentity) -> HelpEntry {
        HelpEntry {
            path: HELP_COMMAND.to_string(),
            usage: format!("/{} {} [command]", owner.command_label(), HELP_COMMAND),
            description: Self::DESCRIPTION.to_string(),
            permissions: vec![format!("{}.{}", owner.base_permission(), HELP_COMMAND)],
        }
    }

    pub fn index(&self) -> &HelpIndex {
        &self.index
    }
}

impl Command for HelpCommand {
    fn name(&self) -> &str {
        HELP_COMMAND
    }

    fn description(&self) -> &str {
        Self::DESCRIPTION
    }

    fn usage_hint(&self, owner: &AppIdentity) -> String {
        format!("/{} {} [command]", owner.command_label(), HELP_COMMAND)
    }

    fn execute(&self, actor: &dyn Actor, args: &[String]) -> Status {
        let filter = args.first().map(String::as_str);
        let visible: Vec<&HelpEntry> = self.index.visible_to(actor, filter).collect();

        if visible.is_empty() {
            let message = match filter {
                None => self.catalog.render("help-empty", &[]),
                Some(filter) => self.catalog.render("help-no-match", &[("filter", filter)]),
            };
            self.messenger.send(actor, &message);
            return Status::Ok;
        }

        self.messenger.send(
            actor,
            &self.catalog.render("help-header", &[("app", self.app_name.as_str())]),
        );
        for entry in visible {
            let line = self.catalog.render(
                "help-entry",
                &[
                    ("usage", entry.usage.as_str()),
                    ("description", entry.description.as_str()),
                ],
            );
            self.messenger.send(actor, &line);
        }

        Status::Ok
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arbor_foundation::{ConsoleActor, PermissionSet, PermissionSettings};
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recorder {
        lines: Mutex<Vec<String>>,
    }

    impl Messenger for Recorder {
        fn send(&self, _actor: &dyn Actor, message: &str) {
            self.lines.lock().unwrap().push(message.to_string());
        }
    }

    fn owner() -> AppIdentity {
        AppIdentity::new("App", "app")
    }

    fn sample_root() -> CommandNode {
        CommandNode::root(Arc::new(owner()))
            .with_child(CommandNode::group("version", "Show version"))
            .with_child(
                CommandNode::group("admin", "Admin")
                    .with_child(CommandNode::group("reload", "Reload config"))
                    .with_child(CommandNode::group("list", "List commands")),
            )
    }

    fn help_for(index: HelpIndex) -> (HelpCommand, Arc<Recorder>) {
        let recorder = Arc::new(Recorder::default());
        let help = HelpCommand::new(
            &owner(),
            index,
            recorder.clone(),
            Arc::new(MessageCatalog::new()),
        );
        (help, recorder)
    }

    #[test]
    fn test_index_from_root() {
        let index = HelpIndex::from_root(&sample_root(), &owner());
        let paths: Vec<&str> = index.entries().iter().map(|e| e.path.as_str()).collect();

        assert_eq!(paths, vec!["admin list", "admin reload", "version"]);
        assert_eq!(index.entries()[1].usage, "/app admin reload");
        assert_eq!(
            index.entries()[1].permissions,
            vec!["app.cmd.admin".to_string(), "app.cmd.admin.reload".to_string()]
        );
    }

    #[test]
    fn test_push_keeps_order() {
        let mut index = HelpIndex::from_root(&sample_root(), &owner());
        index.push(HelpCommand::entry(&owner()));

        let paths: Vec<&str> = index.entries().iter().map(|e| e.path.as_str()).collect();
        assert_eq!(paths, vec!["admin list", "admin reload", "help", "version"]);
    }

    #[test]
    fn test_lists_only_reachable_entries() {
        let (help, recorder) = help_for(HelpIndex::from_root(&sample_root(), &owner()));
        let actor = PermissionSet::new(
            "steve",
            PermissionSettings::new()
                .grant("app.cmd.version")
                .grant("app.cmd.admin.reload"),
        );

        assert_eq!(help.execute(&actor, &[]), Status::Ok);
        let lines = recorder.lines.lock().unwrap().clone();
        assert_eq!(
            lines,
            vec![
                "Commands for App:".to_string(),
                "  /app version - Show version".to_string(),
            ]
        );
    }

    #[test]
    fn test_filter() {
        let (help, recorder) = help_for(HelpIndex::from_root(&sample_root(), &owner()));

        help.execute(&ConsoleActor, &["admin".to_string()]);
        assert_eq!(recorder.lines.lock().unwrap().len(), 3);

        recorder.lines.lock().unwrap().clear();
        help.execute(&ConsoleActor, &["nothing".to_string()]);
        assert_eq!(
            recorder.lines.lock().unwrap().clone(),
            vec!["No commands match 'nothing'.".to_string()]
        );
    }

    #[test]
    fn test_filter_matches_whole_segments() {
        let root = CommandNode::root(Arc::new(owner()))
            .with_child(
                CommandNode::group("admin", "Admin")
                    .with_child(CommandNode::group("reload", "Reload config")),
            )
            .with_child(CommandNode::group("administrator", "Who is in charge"));
        let (help, recorder) = help_for(HelpIndex::from_root(&root, &owner()));

        assert_eq!(help.execute(&ConsoleActor, &["admin".to_string()]), Status::Ok);
        assert_eq!(
            recorder.lines.lock().unwrap().clone(),
            vec![
                "Commands for App:".to_string(),
                "  /app admin reload - Reload config".to_string(),
            ]
        );

        recorder.lines.lock().unwrap().clear();
        help.execute(&ConsoleActor, &["administrator".to_string()]);
        assert_eq!(recorder.lines.lock().unwrap().len(), 2);
    }

    #[test]
    fn test_filter_uses_first_token() {
        let (help, recorder) = help_for(HelpIndex::from_root(&sample_root(), &owner()));

        help.execute(&ConsoleActor, &["version".to_string(), "extra".to_string()]);
        assert_eq!(
            recorder.lines.lock().unwrap().clone(),
            vec![
                "Commands for App:".to_string(),
                "  /app version - Show version".to_string(),
            ]
        );
    }

    #[test]
    fn test_shared_index_publishes_once() {
        let shared = SharedIndex::new();
        assert!(shared.get().is_none());

        shared.publish(HelpIndex::from_root(&sample_root(), &owner()));
        shared.publish(HelpIndex::default());
        let handle = shared.clone();
        assert_eq!(handle.get().map(HelpIndex::len), Some(3));
    }

    #[test]
    fn test_empty_for_unprivileged() {
        let (help, recorder) = help_for(HelpIndex::from_root(&sample_root(), &owner()));

        assert_eq!(help.execute(&PermissionSet::empty("guest"), &[]), Status::Ok);
        assert_eq!(
            recorder.lines.lock().unwrap().clone(),
            vec!["No commands available.".to_string()]
        );
    }
}
