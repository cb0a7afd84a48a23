//! Host - 호스트 세션 라이프사이클

use super::global;
use super::handle::RegistrationHandle;
use super::shell::ShellSnapshot;
use crate::config::HostConfig;
use crate::extension::{ExtensionRegistry, HOST_OWNER};
use crate::facade::{HostServices, ServiceFacade};
use crate::mfe::{LoadHandle, LoadState, MicroFrontendLoader, MicroFrontendRegistry};
use crate::plugin::{EnableReport, PluginManager};
use alumnet_foundation::event::host as events;
use alumnet_foundation::{Error, EventBus, PermissionSet, Result};
use parking_lot::Mutex;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::{info, warn};

enum HostState {
    Ready,
    Running(RegistrationHandle),
    Stopped,
}

/// 호스트 세션
///
/// `HostBuilder::build`로 만들고 `start`로 시작 플러그인을 활성화합니다.
/// `shutdown` 이후에는 다시 시작할 수 없습니다.
pub struct Host {
    config: HostConfig,
    services: HostServices,
    facade: Arc<ServiceFacade>,
    event_bus: Arc<EventBus>,
    plugins: Arc<PluginManager>,
    micro_frontends: Arc<MicroFrontendRegistry>,
    loader: MicroFrontendLoader,
    /// 시작 시 활성화할 플러그인 (설치 순)
    startup_plugins: Vec<String>,
    state: Mutex<HostState>,
}

impl Host {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        config: HostConfig,
        services: HostServices,
        facade: Arc<ServiceFacade>,
        event_bus: Arc<EventBus>,
        plugins: Arc<PluginManager>,
        micro_frontends: Arc<MicroFrontendRegistry>,
        loader: MicroFrontendLoader,
        startup_plugins: Vec<String>,
    ) -> Self {
        Self {
            config,
            services,
            facade,
            event_bus,
            plugins,
            micro_frontends,
            loader,
            startup_plugins,
            state: Mutex::new(HostState::Ready),
        }
    }

    // ========================================================================
    // 라이프사이클
    // ========================================================================

    /// 시작 플러그인 활성화 + 등록 핸들 발급
    ///
    /// 초기화에 실패한 플러그인은 보고서에 기록되고 나머지는 계속 진행됩니다.
    pub fn start(&self) -> Result<EnableReport> {
        let handle = {
            let mut state = self.state.lock();
            match *state {
                HostState::Ready => {}
                HostState::Running(_) => {
                    return Err(Error::InvalidRequest("host is already running".into()))
                }
                HostState::Stopped => {
                    return Err(Error::Unavailable("host has shut down".into()))
                }
            }

            let handle = RegistrationHandle::new(
                Arc::new(AtomicBool::new(true)),
                Arc::clone(&self.plugins),
                Arc::clone(&self.micro_frontends),
            );
            *state = HostState::Running(handle.clone());
            handle
        };

        let report = self
            .plugins
            .enable_all(self.startup_plugins.iter().map(String::as_str));

        if self.config.exposes_global_handle() {
            global::publish(handle);
        }

        let summary = self.plugins.summary();
        info!(
            plugins = summary.total,
            enabled = summary.enabled,
            failed = report.failed.len(),
            micro_frontends = self.micro_frontends.len(),
            "Host started"
        );
        self.event_bus
            .publish(events::started(summary.enabled, self.micro_frontends.len()));

        Ok(report)
    }

    /// 핸들 무효화 + 호스트 등록 항목 회수 + 모든 플러그인 비활성화 (설치 역순). 멱등
    pub fn shutdown(&self) {
        let previous = std::mem::replace(&mut *self.state.lock(), HostState::Stopped);
        let HostState::Running(handle) = previous else {
            return;
        };

        handle.invalidate();
        global::withdraw(&handle);
        self.extensions().remove_by_owner(HOST_OWNER);

        for info in self.plugins.list_enabled().into_iter().rev() {
            if let Err(e) = self.plugins.disable(&info.manifest.id) {
                warn!(
                    plugin = %info.manifest.id,
                    error = %e,
                    "Failed to disable plugin during shutdown"
                );
            }
        }

        info!("Host stopped");
        self.event_bus.publish(events::stopped());
    }

    pub fn is_running(&self) -> bool {
        matches!(*self.state.lock(), HostState::Running(_))
    }

    /// 현재 세션의 등록 핸들
    pub fn handle(&self) -> Result<RegistrationHandle> {
        match &*self.state.lock() {
            HostState::Running(handle) => Ok(handle.clone()),
            HostState::Ready => Err(Error::Unavailable("host has not started".into())),
            HostState::Stopped => Err(Error::Unavailable("host has shut down".into())),
        }
    }

    // ========================================================================
    // 페이지 셸
    // ========================================================================

    /// 현재 사용자의 보유 권한 (익명이면 빈 집합)
    pub fn current_permissions(&self) -> PermissionSet {
        self.services.session.permissions()
    }

    /// 현재 사용자 기준 셸 구성
    pub fn snapshot(&self) -> ShellSnapshot {
        ShellSnapshot::collect(
            self.plugins.extensions(),
            &self.micro_frontends,
            &self.current_permissions(),
        )
    }

    /// 라우트 열기 (백그라운드 로드)
    ///
    /// 카탈로그에 선언된 라우트를 먼저 찾고, 없으면 `/apps/:id`로 해석합니다.
    pub fn open(&self, route: &str) -> LoadHandle {
        self.loader.begin_route(route, &self.current_permissions())
    }

    /// 마이크로 프론트엔드 로드 완료까지 대기
    pub async fn load_app(&self, id: &str) -> LoadState {
        self.loader.load(Some(id), &self.current_permissions()).await
    }

    // ========================================================================
    // 접근자
    // ========================================================================

    pub fn config(&self) -> &HostConfig {
        &self.config
    }

    /// 호스트 소유 서비스 컨테이너 (로그인/로그아웃 등)
    pub fn services(&self) -> &HostServices {
        &self.services
    }

    pub fn facade(&self) -> &Arc<ServiceFacade> {
        &self.facade
    }

    pub fn event_bus(&self) -> &Arc<EventBus> {
        &self.event_bus
    }

    pub fn plugins(&self) -> &Arc<PluginManager> {
        &self.plugins
    }

    pub fn extensions(&self) -> &Arc<ExtensionRegistry> {
        self.plugins.extensions()
    }

    pub fn micro_frontends(&self) -> &Arc<MicroFrontendRegistry> {
        &self.micro_frontends
    }

    pub fn loader(&self) -> &MicroFrontendLoader {
        &self.loader
    }
}

impl Drop for Host {
    fn drop(&mut self) {
        self.shutdown();
    }
}
