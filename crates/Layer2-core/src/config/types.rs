//! Host configuration types

use crate::mfe::MicroFrontendManifest;
use alumnet_foundation::{Error, EventBusConfig, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// 기본 마이크로 프론트엔드 로드 제한 시간 (ms)
pub const DEFAULT_LOAD_TIMEOUT_MS: u64 = 10_000;

/// 기본 이벤트 히스토리 크기
pub const DEFAULT_EVENT_HISTORY: usize = 100;

// ============================================================================
// HostConfig
// ============================================================================

/// 호스트 설정 (`alumnet.toml` / `alumnet.json`)
///
/// 스칼라 값은 `Option`으로 두어 여러 파일을 병합할 때
/// 지정하지 않은 값이 앞선 파일의 값을 덮어쓰지 않게 합니다.
///
/// ```toml
/// load_timeout_ms = 5000
/// disabled_plugins = ["stories.digest"]
///
/// [[micro_frontends]]
/// id = "job-board"
/// name = "Job Board"
/// entryPoint = "jobs/main"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HostConfig {
    /// 마이크로 프론트엔드 로드 제한 시간 (ms)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub load_timeout_ms: Option<u64>,

    /// 이벤트 버스 히스토리 크기
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_history_size: Option<usize>,

    /// 등록 핸들을 프로세스 전역 슬롯에 게시할지 여부
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expose_global_handle: Option<bool>,

    /// 시작 시 활성화하지 않을 플러그인
    #[serde(default)]
    pub disabled_plugins: Vec<String>,

    /// 시작 시 등록할 마이크로 프론트엔드 카탈로그
    #[serde(default)]
    pub micro_frontends: Vec<MicroFrontendManifest>,
}

impl HostConfig {
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // Parsing
    // ========================================================================

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.load_timeout_ms == Some(0) {
            return Err(Error::Config("load_timeout_ms must be greater than 0".into()));
        }
        if self.event_history_size == Some(0) {
            return Err(Error::Config(
                "event_history_size must be greater than 0".into(),
            ));
        }
        Ok(())
    }

    // ========================================================================
    // Resolved values
    // ========================================================================

    pub fn load_timeout(&self) -> Duration {
        Duration::from_millis(self.load_timeout_ms.unwrap_or(DEFAULT_LOAD_TIMEOUT_MS))
    }

    pub fn event_bus_config(&self) -> EventBusConfig {
        EventBusConfig {
            history_size: self.event_history_size.unwrap_or(DEFAULT_EVENT_HISTORY),
            ..EventBusConfig::default()
        }
    }

    pub fn exposes_global_handle(&self) -> bool {
        self.expose_global_handle.unwrap_or(false)
    }

    pub fn is_plugin_disabled(&self, id: &str) -> bool {
        self.disabled_plugins.iter().any(|p| p == id)
    }

    // ========================================================================
    // Builder
    // ========================================================================

    pub fn with_load_timeout(mut self, timeout: Duration) -> Self {
        self.load_timeout_ms = Some(timeout.as_millis() as u64);
        self
    }

    pub fn with_global_handle(mut self, expose: bool) -> Self {
        self.expose_global_handle = Some(expose);
        self
    }

    pub fn disable_plugin(mut self, id: impl Into<String>) -> Self {
        self.disabled_plugins.push(id.into());
        self
    }

    pub fn with_micro_frontend(mut self, manifest: MicroFrontendManifest) -> Self {
        self.micro_frontends.push(manifest);
        self
    }

    /// 다른 설정을 덮어쓰기 병합 (`other` 우선)
    ///
    /// 카탈로그는 ID 기준으로 교체/추가, 비활성 플러그인은 합집합.
    pub fn merge(&mut self, other: HostConfig) {
        self.load_timeout_ms = other.load_timeout_ms.or(self.load_timeout_ms);
        self.event_history_size = other.event_history_size.or(self.event_history_size);
        self.expose_global_handle = other.expose_global_handle.or(self.expose_global_handle);

        for id in other.disabled_plugins {
            if !self.disabled_plugins.contains(&id) {
                self.disabled_plugins.push(id);
            }
        }

        for manifest in other.micro_frontends {
            match self.micro_frontends.iter_mut().find(|m| m.id == manifest.id) {
                Some(existing) => *existing = manifest,
                None => self.micro_frontends.push(manifest),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = HostConfig::default();
        assert_eq!(config.load_timeout(), Duration::from_millis(DEFAULT_LOAD_TIMEOUT_MS));
        assert_eq!(config.event_bus_config().history_size, DEFAULT_EVENT_HISTORY);
        assert!(!config.exposes_global_handle());
        assert!(config.micro_frontends.is_empty());
    }

    #[test]
    fn test_from_toml() {
        let config = HostConfig::from_toml_str(
            r#"
            load_timeout_ms = 2500
            expose_global_handle = true
            disabled_plugins = ["stories.digest"]

            [[micro_frontends]]
            id = "job-board"
            name = "Job Board"
            entryPoint = "jobs/main"

            [[micro_frontends]]
            id = "admin-panel"
            name = "Admin Panel"
            entryPoint = "admin/main"
            requiredPermissions = ["admin:read"]
            team = "platform"
            "#,
        )
        .unwrap();

        assert_eq!(config.load_timeout(), Duration::from_millis(2500));
        assert!(config.exposes_global_handle());
        assert!(config.is_plugin_disabled("stories.digest"));
        assert!(!config.is_plugin_disabled("jobs.board"));
        assert_eq!(config.micro_frontends.len(), 2);
        assert!(config.micro_frontends[1]
            .required_permissions
            .contains("admin:read"));
    }

    #[test]
    fn test_from_json() {
        let config = HostConfig::from_json_str(
            r#"{
                "event_history_size": 16,
                "micro_frontends": [
                    { "id": "stories", "name": "Stories", "entryPoint": "stories/main" }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(config.event_bus_config().history_size, 16);
        assert_eq!(config.micro_frontends[0].entry_point, "stories/main");
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            HostConfig::from_toml_str("load_timeout_ms = 0"),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            HostConfig::from_toml_str("load_timeout_ms = \"fast\""),
            Err(Error::Toml(_))
        ));
        assert!(matches!(
            HostConfig::from_json_str("{ not json"),
            Err(Error::Json(_))
        ));
    }

    #[test]
    fn test_merge() {
        let mut base = HostConfig::new()
            .with_load_timeout(Duration::from_secs(3))
            .disable_plugin("a")
            .with_micro_frontend(MicroFrontendManifest::new("jobs", "Jobs", "jobs/v1"));

        let overlay = HostConfig::new()
            .with_global_handle(true)
            .disable_plugin("a")
            .disable_plugin("b")
            .with_micro_frontend(MicroFrontendManifest::new("jobs", "Jobs", "jobs/v2"))
            .with_micro_frontend(MicroFrontendManifest::new("stories", "Stories", "stories/main"));

        base.merge(overlay);

        assert_eq!(base.load_timeout(), Duration::from_secs(3));
        assert!(base.exposes_global_handle());
        assert_eq!(base.disabled_plugins, vec!["a", "b"]);
        assert_eq!(base.micro_frontends.len(), 2);
        assert_eq!(base.micro_frontends[0].entry_point, "jobs/v2");
    }
}
