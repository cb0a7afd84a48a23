//! # alumnet-foundation
//!
//! Foundation layer for AlumNet's extensibility layer:
//! - Error: 공통 에러 타입 (AlreadyExists, NotFound, PermissionDenied, ...)
//! - Permission: `resource:action` 권한 집합과 단일 판정 함수
//! - Ordering: `order` + 등록 순서 기반 안정 정렬
//! - Event: 라이프사이클 이벤트 버스
//!
//! ## 아키텍처
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  alumnet-core (Plugin / Extension / Micro-Frontend)     │
//! │                     │                                   │
//! │                     ▼                                   │
//! │  ┌──────────┬──────────────┬───────────┬──────────┐    │
//! │  │  Error   │  Permission  │  Ordering │  Event   │    │
//! │  └──────────┴──────────────┴───────────┴──────────┘    │
//! └─────────────────────────────────────────────────────────┘
//! ```

pub mod error;
pub mod event;
pub mod ordering;
pub mod permission;

// ============================================================================
// Error
// ============================================================================
pub use error::{Error, Result};

// ============================================================================
// Permission (권한)
// ============================================================================
pub use permission::{
    has_all_permissions, validate_permission, PermissionSet,
};

// ============================================================================
// Ordering (정렬)
// ============================================================================
pub use ordering::{sort_by_order, Ordered, Sequence};

// ============================================================================
// Event (이벤트 시스템)
// ============================================================================
pub use event::{EventBus, EventBusConfig, EventCategory, EventId, HostEvent};
