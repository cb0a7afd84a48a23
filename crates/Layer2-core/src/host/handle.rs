//! Registration Handle - 외부 코드용 등록 API
//!
//! 호스트 시작 시 만들어지고 종료 시 무효화됩니다.
//! 무효화된 핸들의 모든 작업은 `Unavailable`로 실패합니다.

use crate::extension::{
    DashboardWidget, ExtensionRegistry, MenuItem, ProfileSection, SkillTag, HOST_OWNER,
};
use crate::mfe::{MicroFrontendManifest, MicroFrontendRegistry};
use crate::plugin::{Plugin, PluginManager, PluginManifest};
use alumnet_foundation::{Error, Result};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// 등록 핸들 (복제 가능, 모든 복제본이 같은 수명을 공유)
#[derive(Clone)]
pub struct RegistrationHandle {
    active: Arc<AtomicBool>,
    plugins: Arc<PluginManager>,
    extensions: Arc<ExtensionRegistry>,
    micro_frontends: Arc<MicroFrontendRegistry>,
}

impl RegistrationHandle {
    pub(crate) fn new(
        active: Arc<AtomicBool>,
        plugins: Arc<PluginManager>,
        micro_frontends: Arc<MicroFrontendRegistry>,
    ) -> Self {
        Self {
            active,
            extensions: Arc::clone(plugins.extensions()),
            plugins,
            micro_frontends,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    /// 모든 복제본 무효화
    pub(crate) fn invalidate(&self) {
        self.active.store(false, Ordering::SeqCst);
    }

    /// 같은 호스트 세션에서 나온 핸들인지
    pub fn same_session(&self, other: &RegistrationHandle) -> bool {
        Arc::ptr_eq(&self.active, &other.active)
    }

    fn ensure_active(&self) -> Result<()> {
        if self.is_active() {
            Ok(())
        } else {
            Err(Error::Unavailable(
                "host has shut down; registration handle is no longer valid".into(),
            ))
        }
    }

    // ========================================================================
    // 플러그인
    // ========================================================================

    /// 플러그인 설치 후 활성화
    ///
    /// 초기화에 실패하면 설치된 채 비활성 상태로 남고 `PluginInit`을 돌려줍니다.
    pub fn register_plugin(&self, plugin: Arc<dyn Plugin>) -> Result<PluginManifest> {
        self.ensure_active()?;
        let manifest = self.plugins.install(plugin)?;
        self.plugins.enable(&manifest.id)?;
        Ok(manifest)
    }

    pub fn unregister_plugin(&self, id: &str) -> Result<()> {
        self.ensure_active()?;
        self.plugins.uninstall(id)
    }

    // ========================================================================
    // 호스트 소유 확장 항목
    // ========================================================================

    pub fn register_menu_item(&self, item: MenuItem) -> Result<()> {
        self.ensure_active()?;
        self.extensions.register_menu_item(HOST_OWNER, item)
    }

    pub fn register_widget(&self, widget: DashboardWidget) -> Result<()> {
        self.ensure_active()?;
        self.extensions.register_widget(HOST_OWNER, widget)
    }

    pub fn register_profile_section(&self, section: ProfileSection) -> Result<()> {
        self.ensure_active()?;
        self.extensions.register_profile_section(HOST_OWNER, section)
    }

    pub fn register_skill(&self, skill: SkillTag) -> Result<()> {
        self.ensure_active()?;
        self.extensions.register_skill(HOST_OWNER, skill)
    }

    // ========================================================================
    // 마이크로 프론트엔드
    // ========================================================================

    pub fn register_micro_frontend(&self, manifest: MicroFrontendManifest) -> Result<()> {
        self.ensure_active()?;
        self.micro_frontends.register(manifest)
    }

    pub fn unregister_micro_frontend(&self, id: &str) -> Result<MicroFrontendManifest> {
        self.ensure_active()?;
        self.micro_frontends.unregister(id)
    }
}

impl std::fmt::Debug for RegistrationHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistrationHandle")
            .field("active", &self.is_active())
            .finish_non_exhaustive()
    }
}
