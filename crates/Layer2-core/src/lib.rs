//! alumnet-core: Extensibility runtime for AlumNet
//!
//! Layer2 - 플러그인 / 확장 포인트 / 마이크로 프론트엔드 레이어
//!
//! # 주요 모듈
//!
//! - `plugin`: 플러그인 설치/활성화 라이프사이클
//! - `extension`: 메뉴, 대시보드 위젯, 프로필 섹션, 스킬 확장 포인트
//! - `facade`: 확장 코드에 노출되는 호스트 서비스 (identity, navigation, notification, messaging)
//! - `mfe`: 마이크로 프론트엔드 카탈로그와 격리 로더
//! - `config`: 호스트 설정 (`alumnet.toml` / `alumnet.json`)
//! - `host`: 위 구성요소를 묶는 호스트 세션과 등록 핸들
//!
//! # 사용 예시
//!
//! ```ignore
//! use alumnet_core::{HostBuilder, HostConfig, UserProfile, UserRole};
//!
//! let host = HostBuilder::new()
//!     .with_config(HostConfig::default())
//!     .plugin(Arc::new(JobBoard))
//!     .build()?;
//!
//! host.start()?;
//! host.services().session.sign_in(UserProfile::new("u1", "Dana", UserRole::Alumni));
//!
//! // 페이지 셸: 현재 사용자 권한으로 필터링된 항목
//! let shell = host.snapshot();
//!
//! // /apps/:id 라우트
//! let state = host.open("/apps/job-board").wait().await;
//!
//! host.shutdown();
//! ```

// Core modules
pub mod config;
pub mod extension;
pub mod facade;
pub mod host;
pub mod mfe;
pub mod plugin;
pub mod version;

// Re-exports: Config
pub use config::{ConfigLoader, HostConfig};

// Re-exports: Extension points
pub use extension::{
    ComponentRef, DashboardWidget, ExtensionCounts, ExtensionItem, ExtensionKind,
    ExtensionRegistry, MenuItem, MenuZone, OwnedExtensions, ProfileSection, SkillTag, WidgetSize,
    HOST_OWNER,
};

// Re-exports: Service facade
pub use facade::{
    ChatMessage, HostServices, Notification, NotificationKind, ServiceFacade, UserProfile,
    UserRole,
};

// Re-exports: Host
pub use host::{Host, HostBuilder, RegistrationHandle, ShellSnapshot};

// Re-exports: Micro-frontends
pub use mfe::{
    FeatureModule, LoadFailure, LoadHandle, LoadState, LoadedModule, MicroFrontendLoader,
    MicroFrontendManifest, MicroFrontendRegistry, ModuleLoader, Remedy, StaticModule,
    StaticModuleLoader,
};

// Re-exports: Plugin
pub use plugin::{
    EnableReport, Plugin, PluginContext, PluginInfo, PluginManager, PluginManifest, PluginState,
    PluginSummary,
};

// Re-exports: Version
pub use version::Version;

// Re-exports from foundation
pub use alumnet_foundation::{
    has_all_permissions, Error, EventBus, HostEvent, PermissionSet, Result,
};
