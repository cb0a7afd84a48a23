//! Plugin Manager - 플러그인 라이프사이클 관리
//!
//! - install / uninstall: 레지스트리 추가/제거
//! - enable: `initialize` 호출, 실패 시 이번 시도의 등록 항목 회수 후 비활성 복귀
//! - disable: `cleanup` 호출 후 플러그인 소유 확장 항목 회수
//!
//! 훅은 락 밖에서 실행되며 패닉도 오류로 변환되어 호스트를 멈추지 않습니다.

use super::manifest::PluginManifest;
use super::registry::{PluginInfo, PluginRegistry};
use super::traits::{Plugin, PluginContext};
use crate::extension::{ExtensionCounts, ExtensionRegistry};
use crate::facade::ServiceFacade;
use alumnet_foundation::event::plugin as events;
use alumnet_foundation::{has_all_permissions, Error, EventBus, PermissionSet, Result};
use serde::Serialize;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// 플러그인 시스템 요약
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PluginSummary {
    pub total: usize,
    pub enabled: usize,
    pub disabled: usize,
    pub extensions: ExtensionCounts,
}

/// `enable_all` 결과
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnableReport {
    pub enabled: Vec<String>,
    /// (플러그인 ID, 오류 메시지)
    pub failed: Vec<(String, String)>,
}

impl EnableReport {
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

/// 플러그인 매니저
pub struct PluginManager {
    /// 플러그인 레지스트리
    registry: Arc<PluginRegistry>,

    /// 확장 포인트 레지스트리 (플러그인 소유 항목 회수용)
    extensions: Arc<ExtensionRegistry>,

    /// 플러그인에 전달되는 서비스 퍼사드
    services: Arc<ServiceFacade>,

    /// 이벤트 버스
    event_bus: Arc<EventBus>,
}

impl PluginManager {
    pub fn new(
        extensions: Arc<ExtensionRegistry>,
        services: Arc<ServiceFacade>,
        event_bus: Arc<EventBus>,
    ) -> Self {
        Self {
            registry: Arc::new(PluginRegistry::new()),
            extensions,
            services,
            event_bus,
        }
    }

    fn cleanup_context(&self, plugin_id: &str) -> PluginContext {
        PluginContext::for_cleanup(
            plugin_id,
            Arc::clone(&self.services),
            Arc::clone(&self.extensions),
        )
    }

    // ========================================================================
    // 설치/제거
    // ========================================================================

    /// 플러그인 설치 (비활성 상태)
    pub fn install(&self, plugin: Arc<dyn Plugin>) -> Result<PluginManifest> {
        plugin.manifest().validate()?;
        let manifest = self.registry.insert(plugin)?;

        info!(plugin = %manifest.id, version = %manifest.version, "Installed plugin");
        self.event_bus
            .publish(events::installed(&manifest.id, &manifest.version));
        Ok(manifest)
    }

    /// 플러그인 제거 (활성 상태면 비활성화 과정을 먼저 수행)
    pub fn uninstall(&self, id: &str) -> Result<()> {
        self.disable(id)?;

        if self.registry.remove(id).is_none() {
            return Err(Error::NotFound(format!("plugin '{}' is not installed", id)));
        }

        info!(plugin = id, "Uninstalled plugin");
        self.event_bus.publish(events::uninstalled(id));
        Ok(())
    }

    // ========================================================================
    // 활성화/비활성화
    // ========================================================================

    /// 플러그인 활성화
    ///
    /// 이미 활성화된 플러그인은 다시 초기화하지 않습니다.
    /// 초기화 도중 비활성화되면 그 시도의 등록은 거부되고, 끝난 뒤 cleanup만 수행합니다.
    pub fn enable(&self, id: &str) -> Result<()> {
        let Some(attempt) = self.registry.begin_enable(id)? else {
            debug!(plugin = id, "Plugin already enabled");
            return Ok(());
        };

        let plugin = attempt.plugin;
        let ctx = PluginContext::for_attempt(
            id,
            Arc::clone(&self.services),
            Arc::clone(&self.extensions),
            Arc::clone(&self.registry),
            attempt.generation,
        );

        match contain_hook(id, "initialize", || plugin.initialize(&ctx)) {
            Ok(()) => {
                if self.registry.finish_enable(id, attempt.generation) {
                    info!(plugin = id, "Enabled plugin");
                    self.event_bus.publish(events::enabled(id));
                } else {
                    // 항목은 비활성화 시점에 이미 회수됨
                    warn!(plugin = id, "Plugin disabled while initializing, cleaning up");
                    self.run_cleanup(id, plugin.as_ref());
                }
                Ok(())
            }
            Err(e) => {
                let mut removed = ExtensionCounts::default();
                self.registry.abort_enable(id, attempt.generation, || {
                    removed = self.extensions.remove_by_owner(id);
                });

                let message = e.to_string();
                error!(
                    plugin = id,
                    error = %message,
                    retracted = removed.total(),
                    "Plugin initialization failed"
                );
                self.event_bus.publish(events::init_failed(id, &message));
                Err(Error::plugin_init(id, message))
            }
        }
    }

    /// 플러그인 비활성화 (멱등)
    ///
    /// 소유 항목 회수 후 cleanup 호출. cleanup 실패는 로그만 남김
    pub fn disable(&self, id: &str) -> Result<()> {
        let plugin = self.registry.begin_disable(id, || {
            self.extensions.remove_by_owner(id);
        })?;
        let Some(plugin) = plugin else {
            return Ok(());
        };

        self.run_cleanup(id, plugin.as_ref());

        info!(plugin = id, "Disabled plugin");
        self.event_bus.publish(events::disabled(id));
        Ok(())
    }

    fn run_cleanup(&self, id: &str, plugin: &dyn Plugin) {
        let ctx = self.cleanup_context(id);
        if let Err(e) = contain_hook(id, "cleanup", || plugin.cleanup(&ctx)) {
            warn!(plugin = id, error = %e, "Plugin cleanup failed");
        }
    }

    /// 여러 플러그인 활성화. 실패는 기록하고 나머지는 계속 진행
    pub fn enable_all<'a>(&self, ids: impl IntoIterator<Item = &'a str>) -> EnableReport {
        let mut report = EnableReport::default();

        for id in ids {
            match self.enable(id) {
                Ok(()) => report.enabled.push(id.to_string()),
                Err(e) => {
                    warn!(plugin = id, error = %e, "Skipping plugin");
                    report.failed.push((id.to_string(), e.to_string()));
                }
            }
        }

        report
    }

    // ========================================================================
    // 조회
    // ========================================================================

    /// 설치된 플러그인 (설치 순)
    pub fn list(&self) -> Vec<PluginInfo> {
        self.registry.list()
    }

    pub fn get(&self, id: &str) -> Option<PluginInfo> {
        self.registry.info(id)
    }

    pub fn is_enabled(&self, id: &str) -> bool {
        self.registry
            .state(id)
            .map(|state| state.is_enabled())
            .unwrap_or(false)
    }

    pub fn list_enabled(&self) -> Vec<PluginInfo> {
        self.registry.list_enabled()
    }

    /// 요구 권한을 모두 보유한 플러그인
    pub fn list_permitted(&self, held: &PermissionSet) -> Vec<PluginInfo> {
        self.registry
            .list()
            .into_iter()
            .filter(|info| has_all_permissions(&info.manifest.required_permissions, held))
            .collect()
    }

    pub fn summary(&self) -> PluginSummary {
        let plugins = self.registry.list();
        let enabled = plugins.iter().filter(|info| info.enabled).count();

        PluginSummary {
            total: plugins.len(),
            enabled,
            disabled: plugins.len() - enabled,
            extensions: self.extensions.counts(),
        }
    }

    // ========================================================================
    // 접근자
    // ========================================================================

    pub fn registry(&self) -> &Arc<PluginRegistry> {
        &self.registry
    }

    pub fn extensions(&self) -> &Arc<ExtensionRegistry> {
        &self.extensions
    }

    pub fn event_bus(&self) -> &Arc<EventBus> {
        &self.event_bus
    }
}

/// 플러그인 훅 실행. 패닉은 `Internal` 오류로 변환
fn contain_hook<F>(plugin_id: &str, hook: &str, f: F) -> Result<()>
where
    F: FnOnce() -> Result<()>,
{
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(result) => result,
        Err(payload) => {
            let reason = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic".to_string());
            Err(Error::Internal(format!(
                "plugin '{}' panicked in {}: {}",
                plugin_id, hook, reason
            )))
        }
    }
}
