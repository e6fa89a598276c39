//! Permission 설정 저장/로드
//!
//! Actor별 허용/거부 권한 노드를 JSON/TOML로 관리

use crate::storage::ConfigStore;
use crate::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// 설정 파일명
pub const PERMISSIONS_FILE: &str = "permissions.json";

/// Permission 설정 파일 구조
///
/// Patterns are dotted permission strings. A trailing `.*` matches every
/// descendant node and a lone `*` matches everything. Matching ignores case.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionSettings {
    /// 허용된 권한 패턴들
    #[serde(default)]
    pub grants: BTreeSet<String>,

    /// 항상 거부할 패턴들 (grants보다 우선)
    #[serde(default)]
    pub denies: BTreeSet<String>,

    /// Operator 모드 (거부 목록을 제외한 모든 권한 허용)
    #[serde(default)]
    pub operator: bool,
}

impl PermissionSettings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Operator settings: everything not explicitly denied is granted
    pub fn operator() -> Self {
        Self {
            operator: true,
            ..Self::default()
        }
    }

    /// 글로벌 설정 로드
    pub fn load_global() -> Result<Self> {
        Ok(ConfigStore::global()?.read_or_default(PERMISSIONS_FILE))
    }

    /// 프로젝트 설정 로드
    pub fn load_project() -> Result<Self> {
        Ok(ConfigStore::current_project()?.read_or_default(PERMISSIONS_FILE))
    }

    /// 글로벌 + 프로젝트 병합 로드
    pub fn load() -> Result<Self> {
        let mut settings = Self::load_global().unwrap_or_default();
        if let Ok(project) = Self::load_project() {
            settings.merge(project);
        }
        Ok(settings)
    }

    /// 지정 저장소에서 로드
    pub fn load_from(store: &ConfigStore) -> Result<Self> {
        Ok(store.read(PERMISSIONS_FILE)?.unwrap_or_default())
    }

    /// 지정 저장소에 저장
    pub fn save_to(&self, store: &ConfigStore) -> Result<()> {
        store.write(PERMISSIONS_FILE, self)
    }

    /// 권한 패턴 추가
    pub fn grant(mut self, pattern: impl Into<String>) -> Self {
        self.add_grant(pattern);
        self
    }

    /// 거부 패턴 추가
    pub fn deny(mut self, pattern: impl Into<String>) -> Self {
        self.add_deny(pattern);
        self
    }

    pub fn add_grant(&mut self, pattern: impl Into<String>) {
        self.grants.insert(pattern.into().to_lowercase());
    }

    pub fn add_deny(&mut self, pattern: impl Into<String>) {
        self.denies.insert(pattern.into().to_lowercase());
    }

    /// 권한 확인 (deny → operator → grants 순서)
    pub fn allows(&self, permission: &str) -> bool {
        if self.is_denied(permission) {
            return false;
        }
        self.operator || self.is_granted(permission)
    }

    /// grants 중 하나라도 일치하는지 확인
    pub fn is_granted(&self, permission: &str) -> bool {
        self.grants
            .iter()
            .any(|pattern| Self::pattern_matches(pattern, permission))
    }

    /// 거부 확인
    pub fn is_denied(&self, permission: &str) -> bool {
        self.denies
            .iter()
            .any(|pattern| Self::pattern_matches(pattern, permission))
    }

    /// 병합
    pub fn merge(&mut self, other: PermissionSettings) {
        self.grants.extend(other.grants);
        self.denies.extend(other.denies);
        self.operator = self.operator || other.operator;
    }

    // === Helper functions ===

    fn pattern_matches(pattern: &str, value: &str) -> bool {
        if pattern == "*" {
            return true;
        }
        let value = value.to_lowercase();
        let pattern = pattern.to_lowercase();
        if let Some(prefix) = pattern.strip_suffix(".*") {
            return value.len() > prefix.len()
                && value.starts_with(prefix)
                && value[prefix.len()..].starts_with('.');
        }
        pattern == value
    }
}
