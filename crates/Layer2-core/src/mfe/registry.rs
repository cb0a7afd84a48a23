//! Micro-Frontend Registry - 로드 가능한 기능 모듈 목록

use super::manifest::MicroFrontendManifest;
use super::route::parse_app_route;
use alumnet_foundation::event::micro_frontend as events;
use alumnet_foundation::{has_all_permissions, Error, EventBus, PermissionSet, Result};
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::{debug, info};

/// 마이크로 프론트엔드 레지스트리 (등록 순서 유지)
pub struct MicroFrontendRegistry {
    entries: RwLock<Vec<MicroFrontendManifest>>,
    event_bus: Option<Arc<EventBus>>,
}

impl MicroFrontendRegistry {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(Vec::new()),
            event_bus: None,
        }
    }

    pub fn with_event_bus(event_bus: Arc<EventBus>) -> Self {
        Self {
            entries: RwLock::new(Vec::new()),
            event_bus: Some(event_bus),
        }
    }

    /// 등록. 같은 ID가 있으면 `AlreadyExists`
    pub fn register(&self, manifest: MicroFrontendManifest) -> Result<()> {
        let manifest = manifest.normalized()?;
        let id = manifest.id.clone();

        {
            let mut entries = self.entries.write();
            if entries.iter().any(|m| m.id == id) {
                return Err(Error::AlreadyExists(format!(
                    "micro-frontend '{}' is already registered",
                    id
                )));
            }
            debug!(
                id = %id,
                route = %manifest.route,
                entry = %manifest.entry_point,
                "Registered micro-frontend"
            );
            entries.push(manifest);
        }

        if let Some(bus) = &self.event_bus {
            bus.publish(events::registered(&id));
        }
        Ok(())
    }

    /// 등록 해제. 없으면 `NotFound`
    pub fn unregister(&self, id: &str) -> Result<MicroFrontendManifest> {
        let removed = {
            let mut entries = self.entries.write();
            let index = entries
                .iter()
                .position(|m| m.id == id)
                .ok_or_else(|| not_found(id))?;
            entries.remove(index)
        };

        info!(id, "Unregistered micro-frontend");
        if let Some(bus) = &self.event_bus {
            bus.publish(events::unregistered(id));
        }
        Ok(removed)
    }

    /// 보유 권한으로 열 수 있는 항목
    pub fn list_available(&self, held: &PermissionSet) -> Vec<MicroFrontendManifest> {
        self.entries
            .read()
            .iter()
            .filter(|m| has_all_permissions(&m.required_permissions, held))
            .cloned()
            .collect()
    }

    pub fn find_by_id(&self, id: &str) -> Result<MicroFrontendManifest> {
        self.entries
            .read()
            .iter()
            .find(|m| m.id == id)
            .cloned()
            .ok_or_else(|| not_found(id))
    }

    /// 라우트로 조회 (선언된 라우트 우선, 그 다음 `/apps/:id`)
    pub fn find_by_route(&self, route: &str) -> Option<MicroFrontendManifest> {
        let path = route.split(['?', '#']).next().unwrap_or(route);
        let path = match path.trim_end_matches('/') {
            "" => "/",
            trimmed => trimmed,
        };

        let entries = self.entries.read();
        if let Some(found) = entries.iter().find(|m| m.route == path) {
            return Some(found.clone());
        }

        let id = parse_app_route(path)?;
        entries.iter().find(|m| m.id == id).cloned()
    }

    pub fn list(&self) -> Vec<MicroFrontendManifest> {
        self.entries.read().clone()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.read().iter().any(|m| m.id == id)
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl Default for MicroFrontendRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn not_found(id: &str) -> Error {
    Error::NotFound(format!("micro-frontend '{}' is not registered", id))
}
