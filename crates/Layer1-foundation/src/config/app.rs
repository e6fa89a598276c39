//! App Config - 애플리케이션 식별 정보와 트리 설정

use crate::storage::ConfigStore;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// 설정 파일명
pub const APP_CONFIG_FILE: &str = "config.json";

/// Suffix appended to the lowercase application name to form the
/// permission prefix of every top-level command.
pub const COMMAND_PERMISSION_SUFFIX: &str = "cmd";

// ============================================================================
// AppIdentity - 트리 소유자 (owner)
// ============================================================================

/// Owner of a command tree: the canonical application name and the command
/// word users type. Shared by every node of the tree it seeds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppIdentity {
    name: String,
    command_label: String,
}

impl AppIdentity {
    pub fn new(name: impl Into<String>, command_label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            command_label: command_label.into(),
        }
    }

    /// Identity whose command label is the lowercase application name
    pub fn named(name: impl Into<String>) -> Self {
        let name = name.into();
        let command_label = name.to_lowercase();
        Self::new(name, command_label)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Canonical lowercase application name
    pub fn canonical_name(&self) -> String {
        self.name.to_lowercase()
    }

    pub fn command_label(&self) -> &str {
        &self.command_label
    }

    /// `lowercase(name) + ".cmd"`
    pub fn base_permission(&self) -> String {
        format!("{}.{}", self.canonical_name(), COMMAND_PERMISSION_SUFFIX)
    }
}

// ============================================================================
// AppConfig
// ============================================================================

/// Arbor 애플리케이션 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    /// 애플리케이션 이름 (권한 prefix의 기준)
    #[serde(default = "default_name")]
    pub name: String,

    /// 사용자가 입력하는 명령어 (없으면 name 소문자)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command_label: Option<String>,

    /// 중복 명령어 등록을 에러로 처리
    #[serde(default)]
    pub strict_registration: bool,

    /// 메시지 템플릿 오버라이드 (key -> template)
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub messages: HashMap<String, String>,
}

fn default_name() -> String {
    "Arbor".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            command_label: None,
            strict_registration: false,
            messages: HashMap::new(),
        }
    }
}

impl AppConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// 파일에서 로드 (확장자로 JSON/TOML 판별)
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let config: Self = ConfigStore::read_path(path)?;
        config.validate()?;
        Ok(config)
    }

    /// 저장소에서 로드 (없으면 기본값)
    pub fn load_from(store: &ConfigStore) -> Result<Self> {
        let config: Self = store.read(APP_CONFIG_FILE)?.unwrap_or_default();
        config.validate()?;
        Ok(config)
    }

    /// 저장소에 저장
    pub fn save_to(&self, store: &ConfigStore) -> Result<()> {
        store.write(APP_CONFIG_FILE, self)
    }

    /// 설정 검증
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::Config("name must not be empty".to_string()));
        }
        if self.name.contains('.') || self.name.contains(char::is_whitespace) {
            return Err(Error::Config(format!(
                "name '{}' must not contain dots or whitespace",
                self.name
            )));
        }
        if let Some(label) = &self.command_label {
            if label.is_empty() || label.contains(char::is_whitespace) {
                return Err(Error::Config(format!(
                    "commandLabel '{}' must be a single non-empty word",
                    label
                )));
            }
        }
        Ok(())
    }

    /// 트리 소유자 정보
    pub fn identity(&self) -> AppIdentity {
        match &self.command_label {
            Some(label) => AppIdentity::new(self.name.clone(), label.clone()),
            None => AppIdentity::named(self.name.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_defaults() {
        let identity = AppConfig::new("SkyBank").identity();

        assert_eq!(identity.name(), "SkyBank");
        assert_eq!(identity.command_label(), "skybank");
        assert_eq!(identity.base_permission(), "skybank.cmd");
    }

    #[test]
    fn test_explicit_label() {
        let mut config = AppConfig::new("SkyBank");
        config.command_label = Some("bank".to_string());

        let identity = config.identity();
        assert_eq!(identity.command_label(), "bank");
        assert_eq!(identity.base_permission(), "skybank.cmd");
    }

    #[test]
    fn test_validate() {
        assert!(AppConfig::default().validate().is_ok());
        assert!(AppConfig::new("").validate().is_err());
        assert!(AppConfig::new("sky.bank").validate().is_err());

        let mut config = AppConfig::new("SkyBank");
        config.command_label = Some("two words".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_json_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("arbor.json");
        std::fs::write(
            &path,
            r#"{ "name": "Shop", "strictRegistration": true, "messages": { "failed": "nope" } }"#,
        )
        .unwrap();

        let config = AppConfig::from_path(&path).unwrap();
        assert_eq!(config.name, "Shop");
        assert!(config.strict_registration);
        assert_eq!(config.messages.get("failed").map(String::as_str), Some("nope"));
    }

    #[test]
    fn test_from_toml_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("arbor.toml");
        std::fs::write(
            &path,
            "name = \"Shop\"\ncommandLabel = \"store\"\n\n[messages]\nrestricted = \"locked\"\n",
        )
        .unwrap();

        let config = AppConfig::from_path(&path).unwrap();
        assert_eq!(config.identity().command_label(), "store");
        assert!(!config.strict_registration);
        assert_eq!(config.messages.get("restricted").map(String::as_str), Some("locked"));
    }

    #[test]
    fn test_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{ not json").unwrap();

        assert!(matches!(AppConfig::from_path(&path), Err(Error::Json(_))));
        assert!(matches!(
            AppConfig::from_path(dir.path().join("missing.json")),
            Err(Error::Io(_))
        ));
    }

    #[test]
    fn test_invalid_toml_and_validation() {
        let dir = tempfile::tempdir().unwrap();
        let broken = dir.path().join("broken.toml");
        std::fs::write(&broken, "name = ").unwrap();
        assert!(matches!(AppConfig::from_path(&broken), Err(Error::Toml(_))));

        let dotted = dir.path().join("dotted.toml");
        std::fs::write(&dotted, "name = \"sky.bank\"\n").unwrap();
        assert!(matches!(AppConfig::from_path(&dotted), Err(Error::Config(_))));
    }

    #[test]
    fn test_store_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = ConfigStore::at(dir.path());

        assert_eq!(AppConfig::load_from(&store).unwrap().name, "Arbor");

        let config = AppConfig::new("Shop");
        config.save_to(&store).unwrap();
        assert_eq!(AppConfig::load_from(&store).unwrap().name, "Shop");
    }
}
