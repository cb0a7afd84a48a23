//! # Micro-Frontends
//!
//! 독립적으로 배포되는 기능 모듈의 카탈로그와 로더.
//!
//! ```text
//! /apps/:id ──▶ MicroFrontendLoader::begin(id, held)
//!                 │  resolve: InvalidRequest / NotFound / PermissionDenied
//!                 ▼
//!               LoadHandle (watch)   Pending ──▶ Loaded | Failed(LoadFailure)
//!                 │
//!                 └─ ModuleLoader::load(entry_point) + FeatureModule::mount(facade)
//! ```
//!
//! 핸들을 버리면 진행 중인 로드는 중단됩니다.

mod loader;
mod manifest;
mod module;
mod registry;
mod route;
mod state;

pub use loader::{LoadHandle, MicroFrontendLoader, DEFAULT_LOAD_TIMEOUT};
pub use manifest::MicroFrontendManifest;
pub use module::{FeatureModule, ModuleFactory, ModuleLoader, StaticModule, StaticModuleLoader};
pub use registry::MicroFrontendRegistry;
pub use route::{app_route, parse_app_route, APP_ROUTE_PREFIX};
pub use state::{LoadFailure, LoadState, LoadedModule, Remedy};
