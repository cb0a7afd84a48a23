//! Plugin Registry - 설치된 플러그인 저장소
//!
//! 상태 전이만 담당하며 플러그인 코드는 호출하지 않습니다.
//! 훅 호출과 확장 회수는 `PluginManager`가 락 밖에서 수행합니다.

use super::manifest::PluginManifest;
use super::traits::{Plugin, PluginState};
use alumnet_foundation::{Error, Result, Sequence};
use parking_lot::RwLock;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// 플러그인 정보 스냅샷
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginInfo {
    pub manifest: PluginManifest,
    pub state: PluginState,
    /// 레지스트리에 있는 동안 항상 true
    pub installed: bool,
    pub enabled: bool,
    pub install_order: u64,
}

struct PluginEntry {
    plugin: Arc<dyn Plugin>,
    manifest: PluginManifest,
    state: PluginState,
    install_order: u64,
    /// 마지막 활성화 시도 세대 (0 = 시도 없음)
    generation: u64,
}

/// `begin_enable`이 발급하는 활성화 시도
pub struct EnableAttempt {
    pub plugin: Arc<dyn Plugin>,
    /// 레지스트리 전체에서 고유한 시도 번호
    pub generation: u64,
}

impl PluginEntry {
    fn is_attempt(&self, generation: u64, state: PluginState) -> bool {
        self.generation == generation && self.state == state
    }

    fn info(&self) -> PluginInfo {
        PluginInfo {
            manifest: self.manifest.clone(),
            state: self.state,
            installed: true,
            enabled: self.state.is_enabled(),
            install_order: self.install_order,
        }
    }
}

/// 플러그인 레지스트리
pub struct PluginRegistry {
    /// ID -> 엔트리
    plugins: RwLock<HashMap<String, PluginEntry>>,

    /// 설치 순서 카운터
    sequence: Sequence,

    /// 활성화 시도 세대 카운터
    attempts: Sequence,
}

impl PluginRegistry {
    pub fn new() -> Self {
        Self {
            plugins: RwLock::new(HashMap::new()),
            sequence: Sequence::new(),
            attempts: Sequence::new(),
        }
    }

    /// 플러그인 추가 (비활성 상태). 같은 ID가 있으면 `AlreadyExists`
    pub fn insert(&self, plugin: Arc<dyn Plugin>) -> Result<PluginManifest> {
        let manifest = plugin.manifest();
        let mut plugins = self.plugins.write();

        if plugins.contains_key(&manifest.id) {
            return Err(Error::AlreadyExists(format!(
                "plugin '{}' is already installed",
                manifest.id
            )));
        }

        let install_order = self.sequence.next();
        plugins.insert(
            manifest.id.clone(),
            PluginEntry {
                plugin,
                manifest: manifest.clone(),
                state: PluginState::Disabled,
                install_order,
                generation: 0,
            },
        );

        Ok(manifest)
    }

    /// 플러그인 제거
    pub fn remove(&self, id: &str) -> Option<Arc<dyn Plugin>> {
        self.plugins.write().remove(id).map(|entry| entry.plugin)
    }

    pub fn get(&self, id: &str) -> Option<Arc<dyn Plugin>> {
        self.plugins.read().get(id).map(|e| Arc::clone(&e.plugin))
    }

    pub fn info(&self, id: &str) -> Option<PluginInfo> {
        self.plugins.read().get(id).map(PluginEntry::info)
    }

    pub fn state(&self, id: &str) -> Option<PluginState> {
        self.plugins.read().get(id).map(|e| e.state)
    }

    // ========================================================================
    // 상태 전이
    // ========================================================================

    /// Disabled -> Enabling
    ///
    /// 이미 Enabling/Enabled이면 `None` (초기화 불필요).
    pub fn begin_enable(&self, id: &str) -> Result<Option<EnableAttempt>> {
        let mut plugins = self.plugins.write();
        let entry = plugins
            .get_mut(id)
            .ok_or_else(|| Error::NotFound(format!("plugin '{}' is not installed", id)))?;

        match entry.state {
            PluginState::Disabled => {
                entry.state = PluginState::Enabling;
                entry.generation = self.attempts.next();
                debug!(
                    plugin = id,
                    generation = entry.generation,
                    "Plugin state: disabled -> enabling"
                );
                Ok(Some(EnableAttempt {
                    plugin: Arc::clone(&entry.plugin),
                    generation: entry.generation,
                }))
            }
            PluginState::Enabling | PluginState::Enabled => Ok(None),
        }
    }

    /// Enabling -> Enabled
    ///
    /// 시도가 그 사이 비활성화/제거/새 시도로 대체되었다면 아무것도 바꾸지 않고 `false`.
    pub fn finish_enable(&self, id: &str, generation: u64) -> bool {
        let mut plugins = self.plugins.write();
        match plugins.get_mut(id) {
            Some(entry) if entry.is_attempt(generation, PluginState::Enabling) => {
                entry.state = PluginState::Enabled;
                debug!(plugin = id, generation, "Plugin state: enabling -> enabled");
                true
            }
            _ => false,
        }
    }

    /// Enabling -> Disabled (초기화 실패)
    ///
    /// 현재 시도일 때만 전환하며, 락을 쥔 채 `retract`를 실행하므로
    /// 다음 시도가 등록한 항목과 섞이지 않습니다.
    pub fn abort_enable(&self, id: &str, generation: u64, retract: impl FnOnce()) -> bool {
        let mut plugins = self.plugins.write();
        match plugins.get_mut(id) {
            Some(entry) if entry.is_attempt(generation, PluginState::Enabling) => {
                entry.state = PluginState::Disabled;
                retract();
                debug!(plugin = id, generation, "Plugin state: enabling -> disabled");
                true
            }
            _ => false,
        }
    }

    /// Enabled/Enabling -> Disabled
    ///
    /// 이전 상태가 Disabled가 아니면 락을 쥔 채 `retract`를 실행합니다.
    /// cleanup이 필요한 경우(Enabled였던 경우)에만 플러그인을 돌려줍니다.
    /// Enabling 중이었다면 진행 중인 시도는 이후 등록이 거부되고 끝날 때 cleanup만 수행합니다.
    pub fn begin_disable(
        &self,
        id: &str,
        retract: impl FnOnce(),
    ) -> Result<Option<Arc<dyn Plugin>>> {
        let mut plugins = self.plugins.write();
        let entry = plugins
            .get_mut(id)
            .ok_or_else(|| Error::NotFound(format!("plugin '{}' is not installed", id)))?;

        let previous = entry.state;
        entry.state = PluginState::Disabled;
        if previous != PluginState::Disabled {
            retract();
        }

        match previous {
            PluginState::Enabled => Ok(Some(Arc::clone(&entry.plugin))),
            PluginState::Enabling | PluginState::Disabled => Ok(None),
        }
    }

    /// 시도가 아직 유효한 동안(현재 세대 + 비활성 아님) `f` 실행
    ///
    /// 읽기 락을 쥔 채 실행하므로 그 사이 비활성화나 새 시도가 끼어들 수 없습니다.
    pub fn with_live_attempt<R>(
        &self,
        id: &str,
        generation: u64,
        f: impl FnOnce() -> R,
    ) -> Option<R> {
        let plugins = self.plugins.read();
        match plugins.get(id) {
            Some(entry)
                if entry.generation == generation && entry.state != PluginState::Disabled =>
            {
                Some(f())
            }
            _ => None,
        }
    }

    // ========================================================================
    // 조회
    // ========================================================================

    /// 모든 플러그인 (설치 순)
    pub fn list(&self) -> Vec<PluginInfo> {
        let mut infos: Vec<PluginInfo> = self
            .plugins
            .read()
            .values()
            .map(PluginEntry::info)
            .collect();
        infos.sort_by_key(|info| info.install_order);
        infos
    }

    /// 활성화된 플러그인 (설치 순)
    pub fn list_enabled(&self) -> Vec<PluginInfo> {
        self.list().into_iter().filter(|info| info.enabled).collect()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.plugins.read().contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.plugins.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.read().is_empty()
    }
}

impl Default for PluginRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugin::traits::PluginContext;

    struct TestPlugin(&'static str);

    impl Plugin for TestPlugin {
        fn manifest(&self) -> PluginManifest {
            PluginManifest::new(self.0, self.0)
        }

        fn initialize(&self, _ctx: &PluginContext) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_insert_and_duplicate() {
        let registry = PluginRegistry::new();
        registry.insert(Arc::new(TestPlugin("p1"))).unwrap();

        let err = registry.insert(Arc::new(TestPlugin("p1"))).unwrap_err();
        assert!(matches!(err, Error::AlreadyExists(_)));

        let info = registry.info("p1").unwrap();
        assert!(info.installed);
        assert!(!info.enabled);
        assert_eq!(info.install_order, 1);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_list_in_install_order() {
        let registry = PluginRegistry::new();
        for id in ["zeta", "alpha", "mid"] {
            registry.insert(Arc::new(TestPlugin(id))).unwrap();
        }

        let ids: Vec<String> = registry.list().into_iter().map(|i| i.manifest.id).collect();
        assert_eq!(ids, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_enable_transitions() {
        let registry = PluginRegistry::new();
        registry.insert(Arc::new(TestPlugin("p1"))).unwrap();

        let attempt = registry.begin_enable("p1").unwrap().unwrap();
        assert_eq!(registry.state("p1"), Some(PluginState::Enabling));

        // 초기화 중 재진입
        assert!(registry.begin_enable("p1").unwrap().is_none());

        assert!(registry.finish_enable("p1", attempt.generation));
        assert_eq!(registry.state("p1"), Some(PluginState::Enabled));
        assert!(registry.begin_enable("p1").unwrap().is_none());
        assert_eq!(registry.list_enabled().len(), 1);
    }

    #[test]
    fn test_failed_enable_reverts() {
        let registry = PluginRegistry::new();
        registry.insert(Arc::new(TestPlugin("p1"))).unwrap();

        let attempt = registry.begin_enable("p1").unwrap().unwrap();
        let mut retracted = false;
        assert!(registry.abort_enable("p1", attempt.generation, || retracted = true));
        assert!(retracted);
        assert_eq!(registry.state("p1"), Some(PluginState::Disabled));
    }

    #[test]
    fn test_disable_during_enable() {
        let registry = PluginRegistry::new();
        registry.insert(Arc::new(TestPlugin("p1"))).unwrap();

        let attempt = registry.begin_enable("p1").unwrap().unwrap();
        let mut retracted = false;
        assert!(registry.begin_disable("p1", || retracted = true).unwrap().is_none());
        assert!(retracted);

        // enable 쪽이 늦게 끝나도 비활성 상태 유지
        assert!(!registry.finish_enable("p1", attempt.generation));
        assert_eq!(registry.state("p1"), Some(PluginState::Disabled));
        assert!(registry.with_live_attempt("p1", attempt.generation, || ()).is_none());
    }

    #[test]
    fn test_superseded_attempt_cannot_touch_newer_one() {
        let registry = PluginRegistry::new();
        registry.insert(Arc::new(TestPlugin("p1"))).unwrap();

        let stale = registry.begin_enable("p1").unwrap().unwrap();
        registry.begin_disable("p1", || {}).unwrap();
        let current = registry.begin_enable("p1").unwrap().unwrap();
        assert_ne!(stale.generation, current.generation);

        assert!(registry.with_live_attempt("p1", stale.generation, || ()).is_none());
        assert!(registry.with_live_attempt("p1", current.generation, || ()).is_some());
        assert!(!registry.abort_enable("p1", stale.generation, || panic!("must not retract")));
        assert!(!registry.finish_enable("p1", stale.generation));
        assert_eq!(registry.state("p1"), Some(PluginState::Enabling));

        assert!(registry.finish_enable("p1", current.generation));
        assert_eq!(registry.state("p1"), Some(PluginState::Enabled));
    }

    #[test]
    fn test_generation_survives_reinstall() {
        let registry = PluginRegistry::new();
        registry.insert(Arc::new(TestPlugin("p1"))).unwrap();
        let old = registry.begin_enable("p1").unwrap().unwrap();

        registry.remove("p1");
        registry.insert(Arc::new(TestPlugin("p1"))).unwrap();
        let new = registry.begin_enable("p1").unwrap().unwrap();

        assert!(registry.with_live_attempt("p1", old.generation, || ()).is_none());
        assert!(registry.with_live_attempt("p1", new.generation, || ()).is_some());
    }

    #[test]
    fn test_unknown_plugin() {
        let registry = PluginRegistry::new();
        assert!(matches!(registry.begin_enable("nope"), Err(Error::NotFound(_))));
        assert!(matches!(registry.begin_disable("nope", || {}), Err(Error::NotFound(_))));
        assert!(!registry.finish_enable("nope", 1));
        assert!(registry.remove("nope").is_none());
    }
}
