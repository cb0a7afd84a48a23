//! Event Types - 확장 레이어 이벤트 정의
//!
//! 플러그인 라이프사이클, 확장 포인트 등록, 마이크로 프론트엔드 로딩,
//! 호스트 시작/종료에서 발생하는 이벤트를 정의합니다.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

// ============================================================================
// Event ID
// ============================================================================

/// 이벤트 고유 ID
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EventId(pub String);

impl EventId {
    /// 새 이벤트 ID 생성
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }
}

impl Default for EventId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for EventId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// Event Category
// ============================================================================

/// 이벤트 카테고리
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventCategory {
    /// 호스트 시작/종료
    Host,
    /// 플러그인 라이프사이클
    Plugin,
    /// 확장 포인트 등록/회수
    Extension,
    /// 마이크로 프론트엔드 카탈로그/로딩
    MicroFrontend,
}

impl EventCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Host => "host",
            Self::Plugin => "plugin",
            Self::Extension => "extension",
            Self::MicroFrontend => "micro_frontend",
        }
    }
}

impl std::fmt::Display for EventCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// HostEvent
// ============================================================================

/// 확장 레이어 이벤트
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostEvent {
    pub id: EventId,

    /// 이벤트 타입 (예: "plugin.enabled")
    pub event_type: String,

    pub category: EventCategory,

    /// 발생 위치 (예: "plugin_manager")
    pub source: String,

    /// 이벤트 데이터
    pub data: Value,

    pub timestamp: DateTime<Utc>,
}

impl HostEvent {
    /// 새 이벤트 생성
    pub fn new(event_type: impl Into<String>, category: EventCategory) -> Self {
        Self {
            id: EventId::new(),
            event_type: event_type.into(),
            category,
            source: "system".to_string(),
            data: Value::Null,
            timestamp: Utc::now(),
        }
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = data;
        self
    }
}

// ============================================================================
// 사전 정의된 이벤트
// ============================================================================

pub mod host {
    use super::*;

    pub fn started(plugins: usize, micro_frontends: usize) -> HostEvent {
        HostEvent::new("host.started", EventCategory::Host)
            .with_source("host")
            .with_data(serde_json::json!({
                "plugins": plugins,
                "micro_frontends": micro_frontends,
            }))
    }

    pub fn stopped() -> HostEvent {
        HostEvent::new("host.stopped", EventCategory::Host).with_source("host")
    }
}

pub mod plugin {
    use super::*;

    fn lifecycle(event_type: &str, plugin_id: &str) -> HostEvent {
        HostEvent::new(event_type, EventCategory::Plugin)
            .with_source("plugin_manager")
            .with_data(serde_json::json!({ "plugin_id": plugin_id }))
    }

    pub fn installed(plugin_id: &str, version: &str) -> HostEvent {
        HostEvent::new("plugin.installed", EventCategory::Plugin)
            .with_source("plugin_manager")
            .with_data(serde_json::json!({
                "plugin_id": plugin_id,
                "version": version,
            }))
    }

    pub fn enabled(plugin_id: &str) -> HostEvent {
        lifecycle("plugin.enabled", plugin_id)
    }

    pub fn disabled(plugin_id: &str) -> HostEvent {
        lifecycle("plugin.disabled", plugin_id)
    }

    pub fn uninstalled(plugin_id: &str) -> HostEvent {
        lifecycle("plugin.uninstalled", plugin_id)
    }

    pub fn init_failed(plugin_id: &str, error: &str) -> HostEvent {
        HostEvent::new("plugin.init_failed", EventCategory::Plugin)
            .with_source("plugin_manager")
            .with_data(serde_json::json!({
                "plugin_id": plugin_id,
                "error": error,
            }))
    }
}

pub mod extension {
    use super::*;

    pub fn registered(kind: &str, item_id: &str, owner: &str) -> HostEvent {
        HostEvent::new("extension.registered", EventCategory::Extension)
            .with_source("extension_registry")
            .with_data(serde_json::json!({
                "kind": kind,
                "item_id": item_id,
                "owner": owner,
            }))
    }

    pub fn retracted(owner: &str, removed: usize) -> HostEvent {
        HostEvent::new("extension.retracted", EventCategory::Extension)
            .with_source("extension_registry")
            .with_data(serde_json::json!({
                "owner": owner,
                "removed": removed,
            }))
    }
}

pub mod micro_frontend {
    use super::*;

    fn catalog(event_type: &str, id: &str) -> HostEvent {
        HostEvent::new(event_type, EventCategory::MicroFrontend)
            .with_source("micro_frontend_registry")
            .with_data(serde_json::json!({ "id": id }))
    }

    pub fn registered(id: &str) -> HostEvent {
        catalog("micro_frontend.registered", id)
    }

    pub fn unregistered(id: &str) -> HostEvent {
        catalog("micro_frontend.unregistered", id)
    }

    pub fn loaded(id: &str, duration_ms: u64) -> HostEvent {
        HostEvent::new("micro_frontend.loaded", EventCategory::MicroFrontend)
            .with_source("micro_frontend_loader")
            .with_data(serde_json::json!({
                "id": id,
                "duration_ms": duration_ms,
            }))
    }

    pub fn load_failed(id: &str, reason: &str) -> HostEvent {
        HostEvent::new("micro_frontend.load_failed", EventCategory::MicroFrontend)
            .with_source("micro_frontend_loader")
            .with_data(serde_json::json!({
                "id": id,
                "reason": reason,
            }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_creation() {
        let event = HostEvent::new("custom.thing", EventCategory::Extension);
        assert_eq!(event.event_type, "custom.thing");
        assert_eq!(event.source, "system");
        assert!(event.data.is_null());
    }

    #[test]
    fn test_plugin_events() {
        let event = plugin::installed("mentor.match", "1.2.0");
        assert_eq!(event.category, EventCategory::Plugin);
        assert_eq!(event.data["plugin_id"], "mentor.match");
        assert_eq!(event.data["version"], "1.2.0");

        let event = plugin::init_failed("mentor.match", "boom");
        assert_eq!(event.event_type, "plugin.init_failed");
    }

    #[test]
    fn test_category_serde() {
        let json = serde_json::to_string(&EventCategory::MicroFrontend).unwrap();
        assert_eq!(json, "\"micro_frontend\"");
    }
}
