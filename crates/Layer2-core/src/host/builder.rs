//! HostBuilder - 호스트 조립

use super::lifecycle::Host;
use crate::config::HostConfig;
use crate::extension::ExtensionRegistry;
use crate::facade::HostServices;
use crate::mfe::{
    FeatureModule, MicroFrontendLoader, MicroFrontendManifest, MicroFrontendRegistry,
    ModuleLoader, StaticModuleLoader,
};
use crate::plugin::{Plugin, PluginManager};
use alumnet_foundation::{EventBus, Result};
use std::sync::Arc;
use tracing::debug;

/// 호스트 빌더
///
/// ```ignore
/// let host = HostBuilder::new()
///     .with_config(config)
///     .plugin(Arc::new(JobBoard))
///     .micro_frontend(MicroFrontendManifest::new("job-board", "Job Board", "jobs/main"))
///     .module("jobs/main", Arc::new(StaticModule::new("JobBoardApp")))
///     .build()?;
/// ```
pub struct HostBuilder {
    config: HostConfig,
    services: HostServices,
    /// (플러그인, 시작 시 활성화 여부)
    plugins: Vec<(Arc<dyn Plugin>, bool)>,
    micro_frontends: Vec<MicroFrontendManifest>,
    static_modules: StaticModuleLoader,
    module_loader: Option<Arc<dyn ModuleLoader>>,
}

impl HostBuilder {
    pub fn new() -> Self {
        Self {
            config: HostConfig::default(),
            services: HostServices::default(),
            plugins: Vec::new(),
            micro_frontends: Vec::new(),
            static_modules: StaticModuleLoader::new(),
            module_loader: None,
        }
    }

    pub fn with_config(mut self, config: HostConfig) -> Self {
        self.config = config;
        self
    }

    /// 호스트 서비스 컨테이너 교체
    pub fn services(mut self, services: HostServices) -> Self {
        self.services = services;
        self
    }

    /// 시작 시 활성화되는 플러그인
    pub fn plugin(mut self, plugin: Arc<dyn Plugin>) -> Self {
        self.plugins.push((plugin, true));
        self
    }

    /// 설치만 하고 활성화하지 않는 플러그인
    pub fn disabled_plugin(mut self, plugin: Arc<dyn Plugin>) -> Self {
        self.plugins.push((plugin, false));
        self
    }

    pub fn micro_frontend(mut self, manifest: MicroFrontendManifest) -> Self {
        self.micro_frontends.push(manifest);
        self
    }

    /// 기본 import map에 모듈 추가 (`module_loader`를 지정하면 무시됨)
    pub fn module(self, entry_point: impl Into<String>, module: Arc<dyn FeatureModule>) -> Self {
        self.static_modules.insert_module(entry_point, module);
        self
    }

    /// 커스텀 모듈 로더
    pub fn module_loader(mut self, loader: Arc<dyn ModuleLoader>) -> Self {
        self.module_loader = Some(loader);
        self
    }

    /// 레지스트리를 만들고 플러그인을 설치합니다 (활성화는 `Host::start`).
    pub fn build(self) -> Result<Host> {
        self.config.validate()?;

        let event_bus = Arc::new(EventBus::with_config(self.config.event_bus_config()));
        let facade = Arc::new(self.services.facade());

        let extensions = Arc::new(ExtensionRegistry::with_event_bus(Arc::clone(&event_bus)));
        let plugins = Arc::new(PluginManager::new(
            extensions,
            Arc::clone(&facade),
            Arc::clone(&event_bus),
        ));

        let micro_frontends = Arc::new(MicroFrontendRegistry::with_event_bus(Arc::clone(
            &event_bus,
        )));
        for manifest in self
            .config
            .micro_frontends
            .iter()
            .cloned()
            .chain(self.micro_frontends)
        {
            micro_frontends.register(manifest)?;
        }

        let modules: Arc<dyn ModuleLoader> = match self.module_loader {
            Some(loader) => loader,
            None => Arc::new(self.static_modules),
        };
        let loader = MicroFrontendLoader::new(Arc::clone(&micro_frontends), modules, facade.clone())
            .with_timeout(self.config.load_timeout())
            .with_event_bus(Arc::clone(&event_bus));

        let mut startup_plugins = Vec::new();
        for (plugin, enabled) in self.plugins {
            let manifest = plugins.install(plugin)?;
            if !enabled || self.config.is_plugin_disabled(&manifest.id) {
                debug!(plugin = %manifest.id, "Plugin will stay disabled at start-up");
                continue;
            }
            startup_plugins.push(manifest.id);
        }

        Ok(Host::new(
            self.config,
            self.services,
            facade,
            event_bus,
            plugins,
            micro_frontends,
            loader,
            startup_plugins,
        ))
    }
}

impl Default for HostBuilder {
    fn default() -> Self {
        Self::new()
    }
}
