//! Micro-Frontend Loader - 격리된 비동기 모듈 로드
//!
//! 1. 라우트 파라미터 검사 (`InvalidRequest`)
//! 2. 레지스트리 조회 (`NotFound`)
//! 3. 권한 검사 (`PermissionDenied`, 로드 시도 없음)
//! 4. `ModuleLoader`로 로드 (`Pending`) → 마운트 → `Loaded` / `Failed`
//!
//! 로드 실패, 시간 초과, 모듈 패닉은 모두 `LoadFailure`로 보고되며 호스트는 계속 동작합니다.

use super::manifest::MicroFrontendManifest;
use super::module::ModuleLoader;
use super::registry::MicroFrontendRegistry;
use super::route::parse_app_route;
use super::state::{LoadFailure, LoadState, LoadedModule};
use crate::extension::ComponentRef;
use crate::facade::ServiceFacade;
use alumnet_foundation::event::micro_frontend as events;
use alumnet_foundation::{has_all_permissions, Error, EventBus, PermissionSet, Result};
use futures::FutureExt;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, info, warn};

/// 기본 로드 제한 시간
pub const DEFAULT_LOAD_TIMEOUT: Duration = Duration::from_secs(10);

/// 마이크로 프론트엔드 로더
#[derive(Clone)]
pub struct MicroFrontendLoader {
    registry: Arc<MicroFrontendRegistry>,
    modules: Arc<dyn ModuleLoader>,
    services: Arc<ServiceFacade>,
    event_bus: Option<Arc<EventBus>>,
    timeout: Duration,
}

impl MicroFrontendLoader {
    pub fn new(
        registry: Arc<MicroFrontendRegistry>,
        modules: Arc<dyn ModuleLoader>,
        services: Arc<ServiceFacade>,
    ) -> Self {
        Self {
            registry,
            modules,
            services,
            event_bus: None,
            timeout: DEFAULT_LOAD_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_event_bus(mut self, event_bus: Arc<EventBus>) -> Self {
        self.event_bus = Some(event_bus);
        self
    }

    pub fn registry(&self) -> &Arc<MicroFrontendRegistry> {
        &self.registry
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    // ========================================================================
    // 해석 (동기)
    // ========================================================================

    /// 로드 전 검사. 실패하면 로드를 시도하지 않음
    pub fn resolve(
        &self,
        id: Option<&str>,
        held: &PermissionSet,
    ) -> std::result::Result<MicroFrontendManifest, LoadFailure> {
        let id = match id.map(str::trim) {
            Some(id) if !id.is_empty() => id,
            _ => {
                return Err(LoadFailure::InvalidRequest {
                    reason: "missing micro-frontend id".to_string(),
                })
            }
        };

        let manifest = self
            .registry
            .find_by_id(id)
            .map_err(|_| LoadFailure::NotFound { id: id.to_string() })?;

        if !has_all_permissions(&manifest.required_permissions, held) {
            return Err(LoadFailure::PermissionDenied {
                id: id.to_string(),
                missing: manifest
                    .required_permissions
                    .missing_from(held)
                    .into_iter()
                    .collect(),
            });
        }

        Ok(manifest)
    }

    // ========================================================================
    // 로드
    // ========================================================================

    /// 로드가 끝날 때까지 기다림
    pub async fn load(&self, id: Option<&str>, held: &PermissionSet) -> LoadState {
        match self.resolve(id, held) {
            Ok(manifest) => self.run(manifest).await,
            Err(failure) => {
                debug!(reason = %failure, "Micro-frontend rejected before load");
                LoadState::Failed(failure)
            }
        }
    }

    /// 경로로 로드 (선언된 라우트 우선, 그다음 `/apps/:id`)
    pub async fn load_route(&self, path: &str, held: &PermissionSet) -> LoadState {
        let id = self.route_id(path);
        self.load(id.as_deref(), held).await
    }

    /// 경로로 백그라운드 로드 시작
    pub fn begin_route(&self, path: &str, held: &PermissionSet) -> LoadHandle {
        let id = self.route_id(path);
        self.begin(id.as_deref(), held)
    }

    /// 경로에 해당하는 ID. 카탈로그에 없는 `/apps/:id`도 ID로 돌려주어 `NotFound`로 보고됨
    fn route_id(&self, path: &str) -> Option<String> {
        match self.registry.find_by_route(path) {
            Some(manifest) => Some(manifest.id),
            None => parse_app_route(path).map(str::to_string),
        }
    }

    /// 백그라운드 로드 시작
    ///
    /// 검사에 실패하면 즉시 `Failed` 상태인 핸들을 돌려줍니다.
    /// 핸들을 버리면 진행 중인 로드는 중단되고 결과는 폐기됩니다.
    pub fn begin(&self, id: Option<&str>, held: &PermissionSet) -> LoadHandle {
        let manifest = match self.resolve(id, held) {
            Ok(manifest) => manifest,
            Err(failure) => {
                debug!(reason = %failure, "Micro-frontend rejected before load");
                return LoadHandle::settled(id, LoadState::Failed(failure));
            }
        };

        let runtime = match tokio::runtime::Handle::try_current() {
            Ok(runtime) => runtime,
            Err(_) => {
                return LoadHandle::settled(
                    Some(&manifest.id),
                    LoadState::Failed(LoadFailure::LoadFailed {
                        id: manifest.id.clone(),
                        reason: "no async runtime available".to_string(),
                    }),
                )
            }
        };

        let id = manifest.id.clone();
        let (tx, rx) = watch::channel(LoadState::Pending);
        let loader = self.clone();
        let task = runtime.spawn(async move {
            let id = manifest.id.clone();
            let state = match AssertUnwindSafe(loader.run(manifest)).catch_unwind().await {
                Ok(state) => state,
                Err(_) => LoadState::Failed(LoadFailure::LoadFailed {
                    id,
                    reason: "load task panicked".to_string(),
                }),
            };
            // 수신 측이 없으면 결과 폐기
            let _ = tx.send(state);
        });

        LoadHandle {
            id,
            state: rx,
            task: Some(task),
        }
    }

    async fn run(&self, manifest: MicroFrontendManifest) -> LoadState {
        let started = Instant::now();
        debug!(id = %manifest.id, entry = %manifest.entry_point, "Loading micro-frontend");

        let outcome = self.fetch_and_mount(&manifest).await;
        let duration_ms = started.elapsed().as_millis() as u64;

        match outcome {
            Ok(component) => {
                info!(id = %manifest.id, duration_ms, "Micro-frontend loaded");
                self.publish(|| events::loaded(&manifest.id, duration_ms));
                LoadState::Loaded(LoadedModule {
                    manifest,
                    component,
                    duration_ms,
                })
            }
            Err(e) => {
                let reason = e.to_string();
                warn!(id = %manifest.id, error = %reason, "Micro-frontend failed to load");
                self.publish(|| events::load_failed(&manifest.id, &reason));
                LoadState::Failed(LoadFailure::LoadFailed {
                    id: manifest.id,
                    reason,
                })
            }
        }
    }

    async fn fetch_and_mount(&self, manifest: &MicroFrontendManifest) -> Result<ComponentRef> {
        let fetch = AssertUnwindSafe(self.modules.load(&manifest.entry_point)).catch_unwind();

        let module = match tokio::time::timeout(self.timeout, fetch).await {
            Ok(Ok(result)) => result?,
            Ok(Err(_)) => {
                return Err(Error::LoadFailure(format!(
                    "module loader panicked for '{}'",
                    manifest.entry_point
                )))
            }
            Err(_) => {
                return Err(Error::LoadFailure(format!(
                    "timed out after {} ms",
                    self.timeout.as_millis()
                )))
            }
        };

        std::panic::catch_unwind(AssertUnwindSafe(|| -> Result<ComponentRef> {
            module.mount(&self.services)?;
            Ok(module.component())
        }))
        .map_err(|_| Error::LoadFailure("module panicked while mounting".to_string()))?
    }

    fn publish(&self, event: impl FnOnce() -> alumnet_foundation::HostEvent) {
        if let Some(bus) = &self.event_bus {
            bus.publish(event());
        }
    }
}

// ============================================================================
// Load Handle
// ============================================================================

/// 진행 중인 로드에 대한 핸들
///
/// 페이지 셸이 들고 있다가 화면을 떠날 때 버립니다.
pub struct LoadHandle {
    id: String,
    state: watch::Receiver<LoadState>,
    task: Option<JoinHandle<()>>,
}

impl LoadHandle {
    fn settled(id: Option<&str>, state: LoadState) -> Self {
        let (_tx, rx) = watch::channel(state);
        Self {
            id: id.unwrap_or_default().to_string(),
            state: rx,
            task: None,
        }
    }

    /// 현재 상태
    pub fn state(&self) -> LoadState {
        self.state.borrow().clone()
    }

    /// 상태 변화 구독
    pub fn subscribe(&self) -> watch::Receiver<LoadState> {
        self.state.clone()
    }

    /// `Pending`이 아닐 때까지 대기
    ///
    /// 로드 작업이 결과 없이 끝나면(중단, 패닉) `LoadFailed`를 돌려줍니다.
    pub async fn wait(&mut self) -> LoadState {
        loop {
            let current = self.state.borrow_and_update().clone();
            if !current.is_pending() {
                return current;
            }
            if self.state.changed().await.is_err() {
                let last = self.state.borrow().clone();
                if !last.is_pending() {
                    return last;
                }
                return LoadState::Failed(LoadFailure::LoadFailed {
                    id: self.id.clone(),
                    reason: "load ended without a result".to_string(),
                });
            }
        }
    }

    /// 로드 대상 ID (라우트에 ID가 없으면 빈 문자열)
    pub fn id(&self) -> &str {
        &self.id
    }

    /// 로드 중단 (결과 폐기)
    pub fn cancel(mut self) {
        self.abort();
    }

    fn abort(&mut self) {
        if let Some(task) = self.task.take() {
            if !task.is_finished() {
                debug!("Aborting micro-frontend load");
            }
            task.abort();
        }
    }
}

impl Drop for LoadHandle {
    fn drop(&mut self) {
        self.abort();
    }
}

impl std::fmt::Debug for LoadHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadHandle")
            .field("id", &self.id)
            .field("state", &*self.state.borrow())
            .finish_non_exhaustive()
    }
}
