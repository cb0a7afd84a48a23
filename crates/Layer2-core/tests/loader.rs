//! 마이크로 프론트엔드 로드 통합 테스트
//!
//! `cargo test -p alumnet-core --test loader`

use alumnet_core::{
    FeatureModule, HostBuilder, HostConfig, LoadFailure, LoadState, MicroFrontendManifest,
    Remedy, Result, ServiceFacade, StaticModule, StaticModuleLoader, UserProfile, UserRole,
};
use std::sync::Arc;
use std::time::Duration;

/// 마운트 시 홈으로 이동하는 모듈
struct Redirecting;

impl FeatureModule for Redirecting {
    fn component(&self) -> alumnet_core::ComponentRef {
        "StoriesApp".into()
    }

    fn mount(&self, services: &ServiceFacade) -> Result<()> {
        services.navigate("/apps/stories")
    }
}

fn builder() -> HostBuilder {
    let config = HostConfig::default().with_micro_frontend(
        MicroFrontendManifest::new("admin-panel", "Admin Panel", "admin/main")
            .requires("admin:read")
            .with_team("platform"),
    );

    HostBuilder::new()
        .with_config(config)
        .micro_frontend(MicroFrontendManifest::new("job-board", "Job Board", "jobs/main"))
        .micro_frontend(MicroFrontendManifest::new("stories", "Stories", "stories/main"))
        .module("jobs/main", Arc::new(StaticModule::new("JobBoardApp")))
        .module("admin/main", Arc::new(StaticModule::new("AdminApp")))
        .module("stories/main", Arc::new(Redirecting))
}

#[tokio::test]
async fn test_open_unrestricted_app() {
    let host = builder().build().unwrap();
    host.start().unwrap();

    let mut handle = host.open("/apps/job-board");
    assert_eq!(handle.state(), LoadState::Pending);

    match handle.wait().await {
        LoadState::Loaded(module) => {
            assert_eq!(module.component.as_str(), "JobBoardApp");
            assert_eq!(module.manifest.route, "/apps/job-board");
        }
        other => panic!("unexpected state: {:?}", other),
    }
}

#[tokio::test]
async fn test_restricted_app_needs_permission() {
    let host = builder().build().unwrap();
    host.start().unwrap();

    let state = host.load_app("admin-panel").await;
    let failure = state.failure().unwrap();
    assert!(matches!(failure, LoadFailure::PermissionDenied { .. }));
    assert_eq!(failure.remedy(), Remedy::RequestAccess);
    assert!(host
        .event_bus()
        .history_by_type("micro_frontend.load_failed")
        .is_empty());

    host.services()
        .session
        .sign_in(UserProfile::new("root", "Admin", UserRole::Admin));
    assert!(host.load_app("admin-panel").await.is_loaded());
}

#[tokio::test]
async fn test_unknown_app() {
    let host = builder().build().unwrap();
    host.start().unwrap();

    let mut handle = host.open("/apps/does-not-exist");
    let state = handle.wait().await;
    let failure = state.failure().unwrap();

    assert_eq!(
        failure,
        &LoadFailure::NotFound {
            id: "does-not-exist".into()
        }
    );
    assert_eq!(failure.remedy(), Remedy::NavigateAway);
    assert!(failure.user_message().contains("does-not-exist"));
}

#[tokio::test]
async fn test_mount_uses_facade() {
    let host = builder().build().unwrap();
    host.start().unwrap();

    assert!(host.load_app("stories").await.is_loaded());
    assert_eq!(host.facade().current_route(), "/apps/stories");
}

#[tokio::test]
async fn test_catalog_follows_permissions() {
    let host = builder().build().unwrap();
    host.start().unwrap();

    let ids: Vec<String> = host.snapshot().apps.into_iter().map(|m| m.id).collect();
    assert_eq!(ids, vec!["job-board", "stories"]);

    host.services()
        .session
        .sign_in(UserProfile::new("root", "Admin", UserRole::Admin));
    assert_eq!(host.snapshot().apps.len(), 3);
}

#[tokio::test]
async fn test_open_declared_route() {
    let host = HostBuilder::new()
        .micro_frontend(
            MicroFrontendManifest::new("stories", "Stories", "stories/main").with_route("/stories"),
        )
        .module("stories/main", Arc::new(StaticModule::new("StoriesApp")))
        .build()
        .unwrap();
    host.start().unwrap();

    let advertised = host.snapshot().apps[0].route.clone();
    assert_eq!(advertised, "/stories");

    let state = host.open(&advertised).wait().await;
    assert_eq!(state.loaded().unwrap().component.as_str(), "StoriesApp");
}

/// 컴포넌트 참조 조회 시 패닉하는 모듈
struct Fragile;

impl FeatureModule for Fragile {
    fn component(&self) -> alumnet_core::ComponentRef {
        panic!("renderer missing")
    }
}

#[tokio::test]
async fn test_panicking_module_does_not_reach_host() {
    let host = HostBuilder::new()
        .micro_frontend(MicroFrontendManifest::new("fragile", "Fragile", "fragile/main"))
        .module("fragile/main", Arc::new(Fragile))
        .build()
        .unwrap();
    host.start().unwrap();

    let state = host.open("/apps/fragile").wait().await;
    assert_eq!(state.failure().map(LoadFailure::remedy), Some(Remedy::Retry));

    let state = host.load_app("fragile").await;
    assert!(matches!(state.failure(), Some(LoadFailure::LoadFailed { .. })));
    assert!(host.is_running());
}

#[tokio::test(start_paused = true)]
async fn test_configured_timeout() {
    let modules = Arc::new(StaticModuleLoader::new());
    modules.insert("slow/main", || async {
        tokio::time::sleep(Duration::from_secs(120)).await;
        Ok(Arc::new(StaticModule::new("Slow")) as Arc<dyn FeatureModule>)
    });

    let host = HostBuilder::new()
        .with_config(HostConfig::default().with_load_timeout(Duration::from_secs(2)))
        .micro_frontend(MicroFrontendManifest::new("slow", "Slow", "slow/main"))
        .module_loader(modules)
        .build()
        .unwrap();
    host.start().unwrap();

    let state = host.load_app("slow").await;
    match state.failure() {
        Some(LoadFailure::LoadFailed { reason, .. }) => assert!(reason.contains("timed out")),
        other => panic!("unexpected failure: {:?}", other),
    }
    assert_eq!(state.failure().map(LoadFailure::remedy), Some(Remedy::Retry));
}
