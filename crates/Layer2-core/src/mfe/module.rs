//! Module Loader - 엔트리 포인트를 기능 모듈로 해석하는 계약

use crate::extension::ComponentRef;
use crate::facade::ServiceFacade;
use alumnet_foundation::{Error, Result};
use async_trait::async_trait;
use futures::future::{BoxFuture, FutureExt};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

// ============================================================================
// Feature Module
// ============================================================================

/// 로드된 기능 모듈
pub trait FeatureModule: Send + Sync {
    /// 셸이 렌더링할 루트 단위
    fn component(&self) -> ComponentRef;

    /// 마운트 시 호출. 실패하면 로드 실패로 처리됨
    fn mount(&self, _services: &ServiceFacade) -> Result<()> {
        Ok(())
    }
}

/// 루트 컴포넌트만 가진 모듈
#[derive(Debug, Clone)]
pub struct StaticModule {
    component: ComponentRef,
}

impl StaticModule {
    pub fn new(component: impl Into<ComponentRef>) -> Self {
        Self {
            component: component.into(),
        }
    }
}

impl FeatureModule for StaticModule {
    fn component(&self) -> ComponentRef {
        self.component.clone()
    }
}

// ============================================================================
// Module Loader
// ============================================================================

/// 엔트리 포인트 해석 계약
///
/// 로드는 호스트에서 유일한 비동기 지점입니다.
#[async_trait]
pub trait ModuleLoader: Send + Sync {
    async fn load(&self, entry_point: &str) -> Result<Arc<dyn FeatureModule>>;
}

/// 모듈을 만들어내는 비동기 팩토리
pub type ModuleFactory =
    Arc<dyn Fn() -> BoxFuture<'static, Result<Arc<dyn FeatureModule>>> + Send + Sync>;

/// 프로세스 내 import map 기반 로더
///
/// ```ignore
/// let loader = StaticModuleLoader::new()
///     .with_module("jobs/main", Arc::new(StaticModule::new("JobBoardApp")));
/// ```
#[derive(Default)]
pub struct StaticModuleLoader {
    modules: RwLock<HashMap<String, ModuleFactory>>,
}

impl StaticModuleLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// 팩토리 등록 (같은 엔트리 포인트면 교체)
    pub fn insert<F, Fut>(&self, entry_point: impl Into<String>, factory: F)
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: std::future::Future<Output = Result<Arc<dyn FeatureModule>>> + Send + 'static,
    {
        let factory: ModuleFactory = Arc::new(move || factory().boxed());
        self.modules.write().insert(entry_point.into(), factory);
    }

    /// 준비된 모듈 등록
    pub fn insert_module(&self, entry_point: impl Into<String>, module: Arc<dyn FeatureModule>) {
        self.insert(entry_point, move || {
            let module = Arc::clone(&module);
            async move { Ok(module) }
        });
    }

    /// 빌더 패턴: 준비된 모듈 등록
    pub fn with_module(self, entry_point: impl Into<String>, module: Arc<dyn FeatureModule>) -> Self {
        self.insert_module(entry_point, module);
        self
    }

    pub fn contains(&self, entry_point: &str) -> bool {
        self.modules.read().contains_key(entry_point)
    }

    pub fn len(&self) -> usize {
        self.modules.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.read().is_empty()
    }
}

#[async_trait]
impl ModuleLoader for StaticModuleLoader {
    async fn load(&self, entry_point: &str) -> Result<Arc<dyn FeatureModule>> {
        // 락은 팩토리 복제까지만
        let factory = self.modules.read().get(entry_point).cloned();
        match factory {
            Some(factory) => factory().await,
            None => Err(Error::LoadFailure(format!(
                "no module is published at entry point '{}'",
                entry_point
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_static_loader_resolves_module() {
        let loader = StaticModuleLoader::new()
            .with_module("jobs/main", Arc::new(StaticModule::new("JobBoardApp")));

        let module = loader.load("jobs/main").await.unwrap();
        assert_eq!(module.component().as_str(), "JobBoardApp");
        assert!(loader.contains("jobs/main"));
        assert_eq!(loader.len(), 1);
    }

    #[tokio::test]
    async fn test_static_loader_missing_entry() {
        let loader = StaticModuleLoader::new();
        let err = loader.load("nowhere").await.err().unwrap();
        assert!(matches!(err, Error::LoadFailure(_)));
        assert!(err.is_retryable());
    }

    #[tokio::test]
    async fn test_factory_error_propagates() {
        let loader = StaticModuleLoader::new();
        loader.insert("broken/main", || async {
            Err::<Arc<dyn FeatureModule>, _>(Error::LoadFailure("bundle corrupted".into()))
        });

        let err = loader.load("broken/main").await.err().unwrap();
        assert!(err.to_string().contains("bundle corrupted"));
    }
}
