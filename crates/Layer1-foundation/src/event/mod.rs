//! Event System - 이벤트 발행/구독 시스템
//!
//! ## 아키텍처
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        EventBus                              │
//! │  publish(event) ─┬─► history (최근 N개)                      │
//! │                  └─► broadcast channel ─► async receivers    │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## 사용법
//!
//! ```ignore
//! use alumnet_foundation::event::{EventBus, plugin};
//!
//! let bus = EventBus::new();
//! let mut rx = bus.receiver();
//! bus.publish(plugin::enabled("mentor.match"));
//! ```

pub mod bus;
pub mod types;

pub use bus::{EventBus, EventBusConfig};

pub use types::{
    // Event constructors
    extension,
    host,
    micro_frontend,
    plugin,
    // Core types
    EventCategory,
    EventId,
    HostEvent,
};
