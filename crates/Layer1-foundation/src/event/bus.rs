//! Event Bus - 이벤트 브로드캐스트 시스템
//!
//! 레지스트리 변경은 동기적으로 일어나므로 발행도 동기입니다.
//! 비동기 소비자는 `receiver()`로 broadcast 채널을 구독합니다.

use super::types::HostEvent;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::broadcast;
use tracing::trace;

// ============================================================================
// EventBus
// ============================================================================

/// 이벤트 버스 설정
#[derive(Debug, Clone)]
pub struct EventBusConfig {
    /// 브로드캐스트 채널 용량
    pub channel_capacity: usize,

    /// 이벤트 히스토리 보관 개수
    pub history_size: usize,
}

impl Default for EventBusConfig {
    fn default() -> Self {
        Self {
            channel_capacity: 256,
            history_size: 100,
        }
    }
}

/// 이벤트 버스
///
/// ```ignore
/// let bus = EventBus::new();
/// let mut rx = bus.receiver();
/// bus.publish(event::plugin::enabled("mentor.match"));
/// ```
pub struct EventBus {
    config: EventBusConfig,

    sender: broadcast::Sender<HostEvent>,

    /// 최근 이벤트 (오래된 것부터)
    history: Mutex<VecDeque<HostEvent>>,

    event_count: AtomicU64,
}

impl EventBus {
    /// 기본 설정으로 이벤트 버스 생성
    pub fn new() -> Self {
        Self::with_config(EventBusConfig::default())
    }

    /// 커스텀 설정으로 이벤트 버스 생성
    pub fn with_config(config: EventBusConfig) -> Self {
        let (sender, _) = broadcast::channel(config.channel_capacity.max(1));

        Self {
            history: Mutex::new(VecDeque::with_capacity(config.history_size)),
            config,
            sender,
            event_count: AtomicU64::new(0),
        }
    }

    /// 이벤트 발행
    pub fn publish(&self, event: HostEvent) {
        self.event_count.fetch_add(1, Ordering::SeqCst);

        trace!(
            event_id = %event.id,
            event_type = %event.event_type,
            category = %event.category,
            "Publishing event"
        );

        if self.config.history_size > 0 {
            let mut history = self.history.lock();
            if history.len() >= self.config.history_size {
                history.pop_front();
            }
            history.push_back(event.clone());
        }

        // 구독자가 없어도 OK
        let _ = self.sender.send(event);
    }

    /// 브로드캐스트 수신자 생성 (스트림 방식)
    pub fn receiver(&self) -> broadcast::Receiver<HostEvent> {
        self.sender.subscribe()
    }

    /// 최근 이벤트 히스토리 (최신순)
    pub fn history(&self, limit: Option<usize>) -> Vec<HostEvent> {
        let history = self.history.lock();
        let limit = limit.unwrap_or(history.len());
        history.iter().rev().take(limit).cloned().collect()
    }

    /// 특정 타입의 이벤트 히스토리 (오래된 순)
    pub fn history_by_type(&self, event_type: &str) -> Vec<HostEvent> {
        self.history
            .lock()
            .iter()
            .filter(|e| e.event_type == event_type)
            .cloned()
            .collect()
    }

    /// 총 발행된 이벤트 수
    pub fn event_count(&self) -> u64 {
        self.event_count.load(Ordering::SeqCst)
    }

    pub fn clear_history(&self) {
        self.history.lock().clear();
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::types::{host, plugin};

    #[test]
    fn test_event_count() {
        let bus = EventBus::new();
        bus.publish(plugin::enabled("p1"));
        bus.publish(plugin::disabled("p1"));

        assert_eq!(bus.event_count(), 2);
        bus.clear_history();
        assert!(bus.history(None).is_empty());
        assert_eq!(bus.event_count(), 2);
    }

    #[test]
    fn test_history_bounded() {
        let bus = EventBus::with_config(EventBusConfig {
            history_size: 3,
            ..Default::default()
        });

        for i in 0..10 {
            bus.publish(plugin::enabled(&format!("p{}", i)));
        }

        let history = bus.history(None);
        assert_eq!(history.len(), 3);
        assert_eq!(history[0].data["plugin_id"], "p9");
        assert_eq!(bus.history(Some(1)).len(), 1);
    }

    #[test]
    fn test_history_by_type() {
        let bus = EventBus::new();
        bus.publish(plugin::enabled("a"));
        bus.publish(plugin::disabled("a"));
        bus.publish(plugin::enabled("b"));

        let enabled = bus.history_by_type("plugin.enabled");
        assert_eq!(enabled.len(), 2);
        assert_eq!(enabled[1].data["plugin_id"], "b");
    }

    #[tokio::test]
    async fn test_receiver() {
        let bus = EventBus::new();
        let mut rx = bus.receiver();

        bus.publish(host::started(2, 3));

        let event = rx.recv().await.unwrap();
        assert_eq!(event.event_type, "host.started");
        assert_eq!(event.data["plugins"], 2);
    }
}
