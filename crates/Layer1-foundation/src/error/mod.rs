//! Error types for Arbor
//!
//! 트리 조립/설정 경로의 에러를 중앙에서 관리.
//! Dispatch 결과는 `Status`로 반환되며 여기에 포함되지 않는다.

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Arbor 에러 타입
#[derive(Error, Debug)]
pub enum Error {
    // ========================================================================
    // 설정 관련
    // ========================================================================
    #[error("Configuration error: {0}")]
    Config(String),

    // ========================================================================
    // 트리 조립 관련
    // ========================================================================
    #[error("Duplicate command: '{name}' is already registered under '{parent}'")]
    DuplicateCommand { parent: String, name: String },

    #[error("Missing help command under root '{0}'")]
    MissingHelp(String),

    // ========================================================================
    // 일반
    // ========================================================================
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    // ========================================================================
    // 외부 에러 변환
    // ========================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

impl Error {
    /// 중복 등록 에러 생성 헬퍼
    pub fn duplicate_command(parent: impl Into<String>, name: impl Into<String>) -> Self {
        Error::DuplicateCommand {
            parent: parent.into(),
            name: name.into(),
        }
    }
}
