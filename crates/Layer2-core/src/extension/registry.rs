//! Extension Point Registry - 네 가지 확장 포인트 저장소

use super::collection::ExtensionCollection;
use super::items::{
    DashboardWidget, ExtensionItem, ExtensionKind, MenuItem, MenuZone, ProfileSection, SkillTag,
};
use alumnet_foundation::event::extension as events;
use alumnet_foundation::{EventBus, Error, PermissionSet, Result};
use parking_lot::RwLock;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info};

/// 호스트가 직접 등록한 항목의 소유자
pub const HOST_OWNER: &str = "host";

/// 종류별 항목 개수 (조회 결과 또는 제거 결과)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ExtensionCounts {
    pub menu_items: usize,
    pub widgets: usize,
    pub profile_sections: usize,
    pub skills: usize,
}

impl ExtensionCounts {
    pub fn total(&self) -> usize {
        self.menu_items + self.widgets + self.profile_sections + self.skills
    }
}

/// 소유자별 등록 항목 ID 목록
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OwnedExtensions {
    pub menu_items: Vec<String>,
    pub widgets: Vec<String>,
    pub profile_sections: Vec<String>,
    pub skills: Vec<String>,
}

impl OwnedExtensions {
    pub fn is_empty(&self) -> bool {
        self.menu_items.is_empty()
            && self.widgets.is_empty()
            && self.profile_sections.is_empty()
            && self.skills.is_empty()
    }
}

/// 확장 포인트 레지스트리
///
/// 모든 항목은 등록한 플러그인 ID와 함께 저장되어,
/// 플러그인 비활성화/제거 시 `remove_by_owner`로 정확히 회수됩니다.
pub struct ExtensionRegistry {
    menu_items: RwLock<ExtensionCollection<MenuItem>>,
    widgets: RwLock<ExtensionCollection<DashboardWidget>>,
    profile_sections: RwLock<ExtensionCollection<ProfileSection>>,
    skills: RwLock<ExtensionCollection<SkillTag>>,
    event_bus: Option<Arc<EventBus>>,
}

impl ExtensionRegistry {
    pub fn new() -> Self {
        Self {
            menu_items: RwLock::new(ExtensionCollection::new()),
            widgets: RwLock::new(ExtensionCollection::new()),
            profile_sections: RwLock::new(ExtensionCollection::new()),
            skills: RwLock::new(ExtensionCollection::new()),
            event_bus: None,
        }
    }

    /// 등록/회수 이벤트를 발행하는 레지스트리
    pub fn with_event_bus(event_bus: Arc<EventBus>) -> Self {
        Self {
            event_bus: Some(event_bus),
            ..Self::new()
        }
    }

    // ========================================================================
    // 등록
    // ========================================================================

    pub fn register_menu_item(&self, owner: &str, item: MenuItem) -> Result<()> {
        self.register_into(&self.menu_items, owner, item)
    }

    pub fn register_widget(&self, owner: &str, widget: DashboardWidget) -> Result<()> {
        self.register_into(&self.widgets, owner, widget)
    }

    pub fn register_profile_section(&self, owner: &str, section: ProfileSection) -> Result<()> {
        self.register_into(&self.profile_sections, owner, section)
    }

    pub fn register_skill(&self, owner: &str, skill: SkillTag) -> Result<()> {
        self.register_into(&self.skills, owner, skill)
    }

    fn register_into<T: ExtensionItem>(
        &self,
        collection: &RwLock<ExtensionCollection<T>>,
        owner: &str,
        item: T,
    ) -> Result<()> {
        if owner.trim().is_empty() {
            return Err(Error::InvalidRequest(format!(
                "{} '{}' registered without an owner",
                T::KIND,
                item.id()
            )));
        }
        if item.id().trim().is_empty() {
            return Err(Error::InvalidRequest(format!("{} id is empty", T::KIND)));
        }
        item.required_permissions().validate()?;

        let kind = T::KIND;
        let id = item.id().to_string();
        collection.write().register(owner, item)?;

        debug!(%kind, id = %id, owner, "Registered extension");
        if let Some(bus) = &self.event_bus {
            bus.publish(events::registered(kind.as_str(), &id, owner));
        }
        Ok(())
    }

    // ========================================================================
    // 조회 (권한 필터 + 정렬)
    // ========================================================================

    /// 영역별 메뉴 항목
    pub fn query_menu_items(&self, held: &PermissionSet, zone: MenuZone) -> Vec<MenuItem> {
        self.menu_items
            .read()
            .query_visible(held, |item| item.zone == zone)
    }

    pub fn query_widgets(&self, held: &PermissionSet) -> Vec<DashboardWidget> {
        self.widgets.read().query_visible(held, |_| true)
    }

    pub fn query_profile_sections(&self, held: &PermissionSet) -> Vec<ProfileSection> {
        self.profile_sections.read().query_visible(held, |_| true)
    }

    pub fn query_skills(&self, held: &PermissionSet) -> Vec<SkillTag> {
        self.skills.read().query_visible(held, |_| true)
    }

    // ========================================================================
    // 단건 조회 (권한 필터 없음)
    // ========================================================================

    pub fn get_menu_item(&self, id: &str) -> Option<MenuItem> {
        self.menu_items.read().get(id).cloned()
    }

    pub fn get_widget(&self, id: &str) -> Option<DashboardWidget> {
        self.widgets.read().get(id).cloned()
    }

    pub fn get_profile_section(&self, id: &str) -> Option<ProfileSection> {
        self.profile_sections.read().get(id).cloned()
    }

    pub fn get_skill(&self, id: &str) -> Option<SkillTag> {
        self.skills.read().get(id).cloned()
    }

    // ========================================================================
    // 소유자 기반 회수
    // ========================================================================

    /// 소유자가 등록한 모든 항목 제거
    pub fn remove_by_owner(&self, owner: &str) -> ExtensionCounts {
        let removed = ExtensionCounts {
            menu_items: self.menu_items.write().remove_by_owner(owner),
            widgets: self.widgets.write().remove_by_owner(owner),
            profile_sections: self.profile_sections.write().remove_by_owner(owner),
            skills: self.skills.write().remove_by_owner(owner),
        };

        if removed.total() > 0 {
            info!(owner, removed = removed.total(), "Retracted extensions");
            if let Some(bus) = &self.event_bus {
                bus.publish(events::retracted(owner, removed.total()));
            }
        }
        removed
    }

    pub fn owned_by(&self, owner: &str) -> OwnedExtensions {
        OwnedExtensions {
            menu_items: self.menu_items.read().ids_owned_by(owner),
            widgets: self.widgets.read().ids_owned_by(owner),
            profile_sections: self.profile_sections.read().ids_owned_by(owner),
            skills: self.skills.read().ids_owned_by(owner),
        }
    }

    // ========================================================================
    // 유틸리티
    // ========================================================================

    pub fn contains(&self, kind: ExtensionKind, id: &str) -> bool {
        match kind {
            ExtensionKind::MenuItem => self.menu_items.read().contains(id),
            ExtensionKind::DashboardWidget => self.widgets.read().contains(id),
            ExtensionKind::ProfileSection => self.profile_sections.read().contains(id),
            ExtensionKind::SkillTag => self.skills.read().contains(id),
        }
    }

    pub fn owner_of(&self, kind: ExtensionKind, id: &str) -> Option<String> {
        match kind {
            ExtensionKind::MenuItem => self.menu_items.read().owner_of(id).map(str::to_string),
            ExtensionKind::DashboardWidget => self.widgets.read().owner_of(id).map(str::to_string),
            ExtensionKind::ProfileSection => {
                self.profile_sections.read().owner_of(id).map(str::to_string)
            }
            ExtensionKind::SkillTag => self.skills.read().owner_of(id).map(str::to_string),
        }
    }

    pub fn counts(&self) -> ExtensionCounts {
        ExtensionCounts {
            menu_items: self.menu_items.read().len(),
            widgets: self.widgets.read().len(),
            profile_sections: self.profile_sections.read().len(),
            skills: self.skills.read().len(),
        }
    }
}

impl Default for ExtensionRegistry {
    fn default() -> Self {
        Self::new()
    }
}
