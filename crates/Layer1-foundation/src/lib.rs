//! # arbor-foundation
//!
//! Foundation layer for Arbor:
//! - Error: 트리 조립/설정 경로 에러 (Error, Result)
//! - Config: 애플리케이션 설정 (AppConfig, AppIdentity)
//! - Permission: 권한 질의 (Actor, PermissionSettings)
//! - Storage: ConfigStore (JSON/TOML 설정 파일 저장소)
//!
//! ## 아키텍처
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  Layer3-CLI (host)                                      │
//! │     └── on_command(actor, tokens)                       │
//! ├─────────────────────────────────────────────────────────┤
//! │  Layer2-Core                                            │
//! │     └── CommandTree ── CommandNode (Root / Branch)      │
//! ├─────────────────────────────────────────────────────────┤
//! │  Layer1-Foundation (이 레이어)                           │
//! │     ├── Actor::has_capability                           │
//! │     └── AppIdentity (permission prefix seed)            │
//! └─────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod error;
pub mod permission;
pub mod storage;

// ============================================================================
// Error
// ============================================================================
pub use error::{Error, Result};

// ============================================================================
// Config (설정)
// ============================================================================
pub use config::{AppConfig, AppIdentity, APP_CONFIG_FILE};

// ============================================================================
// Permission (권한 시스템)
// ============================================================================
pub use permission::{Actor, ConsoleActor, PermissionSet, PermissionSettings, PERMISSIONS_FILE};

// ============================================================================
// Storage
// ============================================================================
pub use storage::{ConfigStore, FileFormat};
