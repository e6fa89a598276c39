//! ConfigStore - 설정 디렉토리 기반 파일 저장소
//!
//! 파일 확장자로 포맷을 결정한다: `.toml`은 TOML, 나머지는 JSON.
//!
//! ```text
//! ~/.config/arbor/          (global)
//! <project>/.arbor/         (project)
//!   ├── config.json | config.toml
//!   └── permissions.json
//! ```

use crate::{Error, Result};
use serde::{de::DeserializeOwned, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

// ============================================================================
// FileFormat
// ============================================================================

/// On-disk encoding of a settings file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Json,
    Toml,
}

impl FileFormat {
    /// Format implied by the file extension (JSON unless `.toml`)
    pub fn of(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => FileFormat::Toml,
            _ => FileFormat::Json,
        }
    }

    pub fn parse<T: DeserializeOwned>(self, content: &str) -> Result<T> {
        Ok(match self {
            FileFormat::Json => serde_json::from_str(content)?,
            FileFormat::Toml => toml::from_str(content)?,
        })
    }

    pub fn render<T: Serialize>(self, value: &T) -> Result<String> {
        Ok(match self {
            FileFormat::Json => serde_json::to_string_pretty(value)?,
            FileFormat::Toml => toml::to_string_pretty(value)?,
        })
    }
}

// ============================================================================
// ConfigStore
// ============================================================================

/// Settings files under one directory
#[derive(Debug, Clone)]
pub struct ConfigStore {
    root: PathBuf,
}

impl ConfigStore {
    /// Directory name under the user's config dir
    pub const GLOBAL_DIR: &'static str = "arbor";

    /// Directory name inside a project
    pub const PROJECT_DIR: &'static str = ".arbor";

    pub fn at(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// `~/.config/arbor` (platform config dir)
    pub fn global() -> Result<Self> {
        let base = dirs::config_dir()
            .ok_or_else(|| Error::Config("no config directory on this platform".to_string()))?;
        Ok(Self::at(base.join(Self::GLOBAL_DIR)))
    }

    /// `<project>/.arbor`
    pub fn project(project_root: impl AsRef<Path>) -> Self {
        Self::at(project_root.as_ref().join(Self::PROJECT_DIR))
    }

    pub fn current_project() -> Result<Self> {
        Ok(Self::project(std::env::current_dir()?))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_of(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    /// Read `name`; `Ok(None)` when the file does not exist
    pub fn read<T: DeserializeOwned>(&self, name: &str) -> Result<Option<T>> {
        match Self::read_path(self.path_of(name)) {
            Ok(value) => Ok(Some(value)),
            Err(Error::Io(e)) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Read `name`, falling back to the default on any error
    pub fn read_or_default<T: DeserializeOwned + Default>(&self, name: &str) -> T {
        match self.read(name) {
            Ok(value) => value.unwrap_or_default(),
            Err(e) => {
                tracing::warn!("Ignoring {}: {}", self.path_of(name).display(), e);
                T::default()
            }
        }
    }

    pub fn write<T: Serialize>(&self, name: &str, value: &T) -> Result<()> {
        Self::write_path(self.path_of(name), value)
    }

    /// Parse a single file in the format implied by its extension
    pub fn read_path<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let value = FileFormat::of(path).parse(&content)?;
        tracing::debug!("Read {}", path.display());
        Ok(value)
    }

    /// Write a single file, creating parent directories as needed
    pub fn write_path<T: Serialize>(path: impl AsRef<Path>, value: &T) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, FileFormat::of(path).render(value)?)?;
        tracing::debug!("Wrote {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use std::collections::BTreeMap;

    #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
    struct Sample {
        name: String,
        tags: BTreeMap<String, String>,
    }

    fn sample() -> Sample {
        Sample {
            name: "shop".to_string(),
            tags: [("failed".to_string(), "nope".to_string())].into(),
        }
    }

    #[test]
    fn test_format_by_extension() {
        assert_eq!(FileFormat::of(Path::new("a/config.toml")), FileFormat::Toml);
        assert_eq!(FileFormat::of(Path::new("a/config.TOML")), FileFormat::Toml);
        assert_eq!(FileFormat::of(Path::new("a/config.json")), FileFormat::Json);
        assert_eq!(FileFormat::of(Path::new("a/config")), FileFormat::Json);
    }

    #[test]
    fn test_json_and_toml_files() {
        let dir = tempfile::tempdir().unwrap();
        let store = ConfigStore::at(dir.path().join("nested"));

        store.write("sample.json", &sample()).unwrap();
        store.write("sample.toml", &sample()).unwrap();

        let toml_text = std::fs::read_to_string(store.path_of("sample.toml")).unwrap();
        assert!(toml_text.contains("name = \"shop\""));
        assert!(std::fs::read_to_string(store.path_of("sample.json"))
            .unwrap()
            .contains("\"name\": \"shop\""));

        assert_eq!(store.read::<Sample>("sample.json").unwrap(), Some(sample()));
        assert_eq!(store.read::<Sample>("sample.toml").unwrap(), Some(sample()));
    }

    #[test]
    fn test_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = ConfigStore::at(dir.path());

        assert_eq!(store.read::<Sample>("absent.json").unwrap(), None);
        assert!(matches!(
            ConfigStore::read_path::<Sample>(dir.path().join("absent.json")),
            Err(Error::Io(_))
        ));
    }

    #[test]
    fn test_parse_errors_are_typed() {
        let dir = tempfile::tempdir().unwrap();
        let store = ConfigStore::at(dir.path());
        std::fs::write(store.path_of("bad.json"), "{ nope").unwrap();
        std::fs::write(store.path_of("bad.toml"), "name = ").unwrap();

        assert!(matches!(store.read::<Sample>("bad.json"), Err(Error::Json(_))));
        assert!(matches!(store.read::<Sample>("bad.toml"), Err(Error::Toml(_))));
        assert_eq!(store.read_or_default::<Sample>("bad.json"), Sample::default());
    }

    #[test]
    fn test_project_dir() {
        let store = ConfigStore::project("/work/app");
        assert_eq!(store.root(), Path::new("/work/app/.arbor"));
        assert_eq!(
            store.path_of("permissions.json"),
            Path::new("/work/app/.arbor/permissions.json")
        );
    }
}
