//! Storage module for Arbor
//!
//! - `store`: 설정 파일 저장/로드 (JSON, TOML)

mod store;

pub use store::{ConfigStore, FileFormat};
