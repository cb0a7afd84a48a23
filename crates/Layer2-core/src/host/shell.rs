//! Shell Snapshot - 현재 사용자 기준 페이지 셸 구성

use crate::extension::{
    DashboardWidget, ExtensionRegistry, MenuItem, MenuZone, ProfileSection, SkillTag,
};
use crate::mfe::{MicroFrontendManifest, MicroFrontendRegistry};
use alumnet_foundation::PermissionSet;
use serde::Serialize;

/// 페이지 셸이 렌더링할 항목 (모두 권한 필터 + 정렬 적용)
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShellSnapshot {
    pub header: Vec<MenuItem>,
    pub sidebar: Vec<MenuItem>,
    pub footer: Vec<MenuItem>,
    pub widgets: Vec<DashboardWidget>,
    pub profile_sections: Vec<ProfileSection>,
    pub skills: Vec<SkillTag>,
    pub apps: Vec<MicroFrontendManifest>,
}

impl ShellSnapshot {
    pub fn collect(
        extensions: &ExtensionRegistry,
        micro_frontends: &MicroFrontendRegistry,
        held: &PermissionSet,
    ) -> Self {
        Self {
            header: extensions.query_menu_items(held, MenuZone::Header),
            sidebar: extensions.query_menu_items(held, MenuZone::Sidebar),
            footer: extensions.query_menu_items(held, MenuZone::Footer),
            widgets: extensions.query_widgets(held),
            profile_sections: extensions.query_profile_sections(held),
            skills: extensions.query_skills(held),
            apps: micro_frontends.list_available(held),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.header.is_empty()
            && self.sidebar.is_empty()
            && self.footer.is_empty()
            && self.widgets.is_empty()
            && self.profile_sections.is_empty()
            && self.skills.is_empty()
            && self.apps.is_empty()
    }
}
