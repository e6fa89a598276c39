//! Permission system for Arbor
//!
//! - `actor`: 권한 질의 인터페이스 (Actor, ConsoleActor, PermissionSet)
//! - `settings`: JSON 설정 저장/로드 (PermissionSettings)
//!
//! ## 사용 예시
//!
//! ```rust,ignore
//! use arbor_foundation::permission::{Actor, PermissionSet, PermissionSettings};
//!
//! let settings = PermissionSettings::new()
//!     .grant("arbor.cmd.*")
//!     .deny("arbor.cmd.admin.*");
//! let actor = PermissionSet::new("steve", settings);
//!
//! assert!(actor.has_capability("arbor.cmd.help"));
//! assert!(!actor.has_capability("arbor.cmd.admin.reload"));
//! ```

mod actor;
mod settings;

pub use actor::{Actor, ConsoleActor, PermissionSet};
pub use settings::{PermissionSettings, PERMISSIONS_FILE};
