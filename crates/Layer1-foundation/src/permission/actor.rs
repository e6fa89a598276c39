//! Actor - 명령어를 실행하는 주체
//!
//! The command tree only ever asks an actor one question: does it hold a
//! given permission string. Everything else about the actor is opaque.

use super::settings::PermissionSettings;

/// Invoking identity against which capability checks are made
pub trait Actor: Send + Sync {
    /// Whether this actor holds the dotted permission string
    fn has_capability(&self, permission: &str) -> bool;

    /// Display name, used for logging and feedback only
    fn name(&self) -> &str {
        "anonymous"
    }
}

/// The host console. Holds every capability.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleActor;

impl Actor for ConsoleActor {
    fn has_capability(&self, _permission: &str) -> bool {
        true
    }

    fn name(&self) -> &str {
        "console"
    }
}

/// Named actor backed by [`PermissionSettings`]
#[derive(Debug, Clone)]
pub struct PermissionSet {
    name: String,
    settings: PermissionSettings,
}

impl PermissionSet {
    pub fn new(name: impl Into<String>, settings: PermissionSettings) -> Self {
        Self {
            name: name.into(),
            settings,
        }
    }

    /// Actor with no capabilities at all
    pub fn empty(name: impl Into<String>) -> Self {
        Self::new(name, PermissionSettings::default())
    }

    pub fn settings(&self) -> &PermissionSettings {
        &self.settings
    }
}

impl Actor for PermissionSet {
    fn has_capability(&self, permission: &str) -> bool {
        let allowed = self.settings.allows(permission);
        if !allowed {
            tracing::trace!(actor = %self.name, permission, "capability missing");
        }
        allowed
    }

    fn name(&self) -> &str {
        &self.name
    }
}
