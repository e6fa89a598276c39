//! Feedback - 사용자 메시지 전달
//!
//! Rendering text for users belongs to the host. The tree only needs a
//! [`Messenger`] to hand lines to and a [`MessageCatalog`] of templates keyed
//! by [`Status::message_key`].

use crate::tree::CommandTree;
use crate::Status;
use arbor_foundation::Actor;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info_span};

// ============================================================================
// Messenger
// ============================================================================

/// Delivers rendered text to an actor
pub trait Messenger: Send + Sync {
    fn send(&self, actor: &dyn Actor, message: &str);
}

/// Messenger that writes every message to the log
#[derive(Debug, Clone, Copy, Default)]
pub struct LogMessenger;

impl Messenger for LogMessenger {
    fn send(&self, actor: &dyn Actor, message: &str) {
        tracing::info!(actor = actor.name(), "{}", message);
    }
}

// ============================================================================
// MessageCatalog
// ============================================================================

/// Message templates. `{name}` placeholders are substituted on render.
#[derive(Debug, Clone)]
pub struct MessageCatalog {
    templates: HashMap<String, String>,
}

impl Default for MessageCatalog {
    fn default() -> Self {
        let templates = [
            ("no-permission", "You do not have permission to use /{command}."),
            ("unsupported", "/{command} has no action here. Try /{label} help."),
            ("failed", "/{command} failed."),
            ("restricted", "/{command} is restricted right now."),
            ("help-header", "Commands for {app}:"),
            ("help-entry", "  {usage} - {description}"),
            ("help-empty", "No commands available."),
            ("help-no-match", "No commands match '{filter}'."),
        ]
        .into_iter()
        .map(|(key, template)| (key.to_string(), template.to_string()))
        .collect();

        Self { templates }
    }
}

impl MessageCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace templates by key (e.g. from `AppConfig::messages`)
    pub fn with_overrides<I, K, V>(mut self, overrides: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (key, template) in overrides {
            self.templates.insert(key.into(), template.into());
        }
        self
    }

    pub fn template(&self, key: &str) -> Option<&str> {
        self.templates.get(key).map(String::as_str)
    }

    /// Render `key` with `vars`. Unknown keys render as the key itself.
    pub fn render(&self, key: &str, vars: &[(&str, &str)]) -> String {
        let mut text = self.template(key).unwrap_or(key).to_string();
        for (name, value) in vars {
            text = text.replace(&format!("{{{}}}", name), value);
        }
        text
    }
}

// ============================================================================
// CommandHost - 호스트의 단일 명령어 콜백
// ============================================================================

/// The host's command callback: dispatches and reports every non-`Ok`
/// outcome to the actor.
pub struct CommandHost {
    tree: CommandTree,
    messenger: Arc<dyn Messenger>,
    catalog: Arc<MessageCatalog>,
}

impl CommandHost {
    pub fn new(
        tree: CommandTree,
        messenger: Arc<dyn Messenger>,
        catalog: Arc<MessageCatalog>,
    ) -> Self {
        Self {
            tree,
            messenger,
            catalog,
        }
    }

    pub fn tree(&self) -> &CommandTree {
        &self.tree
    }

    pub fn catalog(&self) -> &MessageCatalog {
        &self.catalog
    }

    /// Handle one invocation of the root command
    pub fn on_command(&self, actor: &dyn Actor, tokens: &[String]) -> Status {
        let label = self.tree.owner().command_label();
        let span = info_span!("command", actor = actor.name(), label);
        let _guard = span.enter();

        let status = self.tree.dispatch(actor, tokens);
        debug!(%status, "Dispatched");

        if let Some(key) = status.message_key() {
            let command = if tokens.is_empty() {
                label.to_string()
            } else {
                format!("{} {}", label, tokens.join(" "))
            };
            let message = self
                .catalog
                .render(key, &[("command", command.as_str()), ("label", label)]);
            self.messenger.send(actor, &message);
        }

        status
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_defaults() {
        let catalog = MessageCatalog::new();

        assert_eq!(
            catalog.render("failed", &[("command", "app admin reload")]),
            "/app admin reload failed."
        );
        assert_eq!(
            catalog.render("unsupported", &[("command", "app bogus"), ("label", "app")]),
            "/app bogus has no action here. Try /app help."
        );
    }

    #[test]
    fn test_overrides() {
        let catalog = MessageCatalog::new().with_overrides([("failed", "Oops: {command}")]);

        assert_eq!(catalog.render("failed", &[("command", "x")]), "Oops: x");
        assert_eq!(
            catalog.template("restricted"),
            Some("/{command} is restricted right now.")
        );
    }

    #[test]
    fn test_unknown_key_renders_key() {
        let catalog = MessageCatalog::new();
        assert_eq!(catalog.render("custom-key", &[]), "custom-key");
    }
}
