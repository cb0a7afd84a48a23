//! Plugin Traits - 플러그인 인터페이스 정의

use super::manifest::PluginManifest;
use super::registry::PluginRegistry;
use crate::extension::{
    DashboardWidget, ExtensionRegistry, MenuItem, OwnedExtensions, ProfileSection, SkillTag,
};
use crate::facade::ServiceFacade;
use alumnet_foundation::{Error, Result};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

// ============================================================================
// Plugin Trait
// ============================================================================

/// 플러그인 트레이트 - 모든 기능 플러그인이 구현
///
/// 라이프사이클 훅은 동기 호출입니다. 훅 실행 중에는 어떤 레지스트리
/// 락도 잡혀 있지 않으므로 컨텍스트를 통해 자유롭게 등록할 수 있습니다.
///
/// ```ignore
/// struct MentorMatch;
///
/// impl Plugin for MentorMatch {
///     fn manifest(&self) -> PluginManifest {
///         PluginManifest::new("mentor.match", "Mentor Match")
///     }
///
///     fn initialize(&self, ctx: &PluginContext) -> Result<()> {
///         ctx.register_widget(DashboardWidget::new("matches", "Matches", "MatchList"))
///     }
/// }
/// ```
pub trait Plugin: Send + Sync {
    /// 플러그인 매니페스트
    fn manifest(&self) -> PluginManifest;

    /// 활성화 시 호출. 실패하면 이번 시도에서 등록한 항목은 모두 회수됨
    fn initialize(&self, ctx: &PluginContext) -> Result<()>;

    /// 비활성화 시 호출. 실패는 로그만 남김
    fn cleanup(&self, _ctx: &PluginContext) -> Result<()> {
        Ok(())
    }
}

// ============================================================================
// Plugin State
// ============================================================================

/// 설치된 플러그인의 상태
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PluginState {
    Disabled,
    /// initialize 실행 중 (중복 초기화 방지)
    Enabling,
    Enabled,
}

impl PluginState {
    pub fn is_enabled(&self) -> bool {
        matches!(self, Self::Enabled)
    }
}

impl std::fmt::Display for PluginState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Disabled => write!(f, "disabled"),
            Self::Enabling => write!(f, "enabling"),
            Self::Enabled => write!(f, "enabled"),
        }
    }
}

// ============================================================================
// Plugin Context
// ============================================================================

/// 컨텍스트를 통한 등록 허용 범위
enum Registration {
    /// 제한 없음 (매니저 밖에서 만든 컨텍스트)
    Open,
    /// 해당 활성화 시도가 유효한 동안만
    Attempt {
        registry: Arc<PluginRegistry>,
        generation: u64,
    },
    /// cleanup 중에는 등록 불가
    Closed,
}

/// 플러그인에 전달되는 컨텍스트
///
/// 서비스 퍼사드와, 이 플러그인 소유로 기록되는 확장 등록만 노출합니다.
/// 다른 플러그인의 항목을 지우거나 호스트 내부에 접근할 방법은 없습니다.
pub struct PluginContext {
    plugin_id: String,
    services: Arc<ServiceFacade>,
    extensions: Arc<ExtensionRegistry>,
    registration: Registration,
}

impl PluginContext {
    pub fn new(
        plugin_id: impl Into<String>,
        services: Arc<ServiceFacade>,
        extensions: Arc<ExtensionRegistry>,
    ) -> Self {
        Self {
            plugin_id: plugin_id.into(),
            services,
            extensions,
            registration: Registration::Open,
        }
    }

    /// 활성화 시도용 컨텍스트. 시도가 비활성화되거나 대체되면 등록이 거부됨
    pub(crate) fn for_attempt(
        plugin_id: impl Into<String>,
        services: Arc<ServiceFacade>,
        extensions: Arc<ExtensionRegistry>,
        registry: Arc<PluginRegistry>,
        generation: u64,
    ) -> Self {
        Self {
            registration: Registration::Attempt {
                registry,
                generation,
            },
            ..Self::new(plugin_id, services, extensions)
        }
    }

    /// cleanup용 컨텍스트 (등록 불가)
    pub(crate) fn for_cleanup(
        plugin_id: impl Into<String>,
        services: Arc<ServiceFacade>,
        extensions: Arc<ExtensionRegistry>,
    ) -> Self {
        Self {
            registration: Registration::Closed,
            ..Self::new(plugin_id, services, extensions)
        }
    }

    pub fn plugin_id(&self) -> &str {
        &self.plugin_id
    }

    /// 호스트 서비스 퍼사드
    pub fn services(&self) -> &ServiceFacade {
        &self.services
    }

    pub fn register_menu_item(&self, item: MenuItem) -> Result<()> {
        self.register(|ext, owner| ext.register_menu_item(owner, item))
    }

    pub fn register_widget(&self, widget: DashboardWidget) -> Result<()> {
        self.register(|ext, owner| ext.register_widget(owner, widget))
    }

    pub fn register_profile_section(&self, section: ProfileSection) -> Result<()> {
        self.register(|ext, owner| ext.register_profile_section(owner, section))
    }

    pub fn register_skill(&self, skill: SkillTag) -> Result<()> {
        self.register(|ext, owner| ext.register_skill(owner, skill))
    }

    fn register<F>(&self, f: F) -> Result<()>
    where
        F: FnOnce(&ExtensionRegistry, &str) -> Result<()>,
    {
        let rejected = || -> Result<()> {
            Err(Error::Unavailable(format!(
                "plugin '{}' can no longer register extensions",
                self.plugin_id
            )))
        };

        match &self.registration {
            Registration::Open => f(&self.extensions, &self.plugin_id),
            Registration::Attempt {
                registry,
                generation,
            } => registry
                .with_live_attempt(&self.plugin_id, *generation, || {
                    f(&self.extensions, &self.plugin_id)
                })
                .unwrap_or_else(rejected),
            Registration::Closed => rejected(),
        }
    }

    /// 지금까지 이 플러그인이 등록한 항목
    pub fn registered(&self) -> OwnedExtensions {
        self.extensions.owned_by(&self.plugin_id)
    }
}

impl std::fmt::Debug for PluginContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluginContext")
            .field("plugin_id", &self.plugin_id)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facade::HostServices;

    fn context(id: &str) -> (PluginContext, Arc<ExtensionRegistry>) {
        let extensions = Arc::new(ExtensionRegistry::new());
        let services = Arc::new(HostServices::default().facade());
        (
            PluginContext::new(id, services, Arc::clone(&extensions)),
            extensions,
        )
    }

    #[test]
    fn test_context_registers_under_plugin_owner() {
        let (ctx, extensions) = context("stories.digest");

        ctx.register_widget(DashboardWidget::new("digest", "Digest", "DigestCard"))
            .unwrap();
        ctx.register_skill(SkillTag::new("writing", "Writing")).unwrap();

        let owned = ctx.registered();
        assert_eq!(owned.widgets, vec!["digest"]);
        assert_eq!(owned.skills, vec!["writing"]);

        assert_eq!(extensions.remove_by_owner("stories.digest").total(), 2);
        assert!(ctx.registered().is_empty());
    }

    #[test]
    fn test_context_exposes_services() {
        let (ctx, _) = context("p1");
        assert_eq!(ctx.plugin_id(), "p1");
        assert!(!ctx.services().is_authenticated());
        assert_eq!(ctx.services().current_route(), "/");
    }

    #[test]
    fn test_cleanup_context_cannot_register() {
        let extensions = Arc::new(ExtensionRegistry::new());
        let services = Arc::new(HostServices::default().facade());
        let ctx = PluginContext::for_cleanup("p1", services, Arc::clone(&extensions));

        let err = ctx
            .register_widget(DashboardWidget::new("late", "Late", "Card"))
            .unwrap_err();
        assert!(matches!(err, Error::Unavailable(_)));
        assert_eq!(extensions.counts().total(), 0);
    }

    #[test]
    fn test_state_display() {
        assert_eq!(PluginState::Enabling.to_string(), "enabling");
        assert!(PluginState::Enabled.is_enabled());
        assert!(!PluginState::Enabling.is_enabled());
    }
}
