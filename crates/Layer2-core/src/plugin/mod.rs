//! # Plugin System
//!
//! AlumNet 기능 플러그인 시스템
//!
//! ## 개요
//!
//! 플러그인은 초기화 시 확장 포인트(메뉴, 위젯, 프로필 섹션, 스킬)에
//! 항목을 등록하고, 호스트 서비스는 `ServiceFacade`를 통해서만 사용합니다.
//!
//! ## 아키텍처
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     PluginManager                           │
//! │  ┌───────────────────────────────────────────────────────┐ │
//! │  │                   PluginRegistry                       │ │
//! │  │   Disabled ──enable──▶ Enabling ──ok──▶ Enabled        │ │
//! │  │      ▲                    │                │           │ │
//! │  │      └────────err─────────┘◀───disable─────┘           │ │
//! │  └───────────────────────────────────────────────────────┘ │
//! │                          │                                  │
//! │  ┌───────────────────────┼───────────────────────────────┐ │
//! │  │     PluginContext     │                               │ │
//! │  │  - ServiceFacade      │                               │ │
//! │  │  - 소유자 고정 확장 등록 │                               │ │
//! │  └───────────────────────────────────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## 예시
//!
//! ```ignore
//! struct JobBoard;
//!
//! impl Plugin for JobBoard {
//!     fn manifest(&self) -> PluginManifest {
//!         PluginManifest::new("jobs.board", "Job Board").requires("jobs:read")
//!     }
//!
//!     fn initialize(&self, ctx: &PluginContext) -> Result<()> {
//!         ctx.register_menu_item(MenuItem::new("jobs", "Jobs", "/apps/job-board"))
//!     }
//! }
//!
//! manager.install(Arc::new(JobBoard))?;
//! manager.enable("jobs.board")?;
//! ```

mod manager;
mod manifest;
mod registry;
mod traits;

pub use manager::{EnableReport, PluginManager, PluginSummary};
pub use manifest::PluginManifest;
pub use registry::{PluginInfo, PluginRegistry};
pub use traits::{Plugin, PluginContext, PluginState};
