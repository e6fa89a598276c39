//! Config - 통합 설정 관리
//!
//! - `app.rs` - AppConfig / AppIdentity (트리 소유자 정보)

mod app;

pub use app::{AppConfig, AppIdentity, APP_CONFIG_FILE, COMMAND_PERMISSION_SUFFIX};
