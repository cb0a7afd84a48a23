//! Extension items - 네 가지 확장 포인트 항목 정의

use alumnet_foundation::{Ordered, PermissionSet};
use serde::{Deserialize, Serialize};

/// 메뉴 항목 기본 렌더러
pub const DEFAULT_MENU_COMPONENT: &str = "MenuLink";

/// 스킬 태그 기본 렌더러
pub const DEFAULT_SKILL_COMPONENT: &str = "SkillBadge";

// ============================================================================
// ComponentRef - 렌더 단위 참조
// ============================================================================

/// 렌더 가능한 단위에 대한 불투명 참조
///
/// 레지스트리는 내용을 해석하지 않고, 페이지 셸이 실제 컴포넌트로 변환합니다.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComponentRef(String);

impl ComponentRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ComponentRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ComponentRef {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for ComponentRef {
    fn from(s: String) -> Self {
        Self(s)
    }
}

// ============================================================================
// ExtensionKind / ExtensionItem
// ============================================================================

/// 확장 포인트 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtensionKind {
    MenuItem,
    DashboardWidget,
    ProfileSection,
    SkillTag,
}

impl ExtensionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MenuItem => "menu_item",
            Self::DashboardWidget => "dashboard_widget",
            Self::ProfileSection => "profile_section",
            Self::SkillTag => "skill_tag",
        }
    }
}

impl std::fmt::Display for ExtensionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 확장 포인트 항목 공통 인터페이스
pub trait ExtensionItem: Ordered + Clone + Send + Sync + 'static {
    const KIND: ExtensionKind;

    /// 컬렉션 내 고유 ID
    fn id(&self) -> &str;

    /// 비어 있으면 제한 없음
    fn required_permissions(&self) -> &PermissionSet;

    fn component(&self) -> &ComponentRef;
}

macro_rules! impl_extension_item {
    ($ty:ty, $kind:expr) => {
        impl Ordered for $ty {
            fn order(&self) -> i32 {
                self.order
            }
        }

        impl ExtensionItem for $ty {
            const KIND: ExtensionKind = $kind;

            fn id(&self) -> &str {
                &self.id
            }

            fn required_permissions(&self) -> &PermissionSet {
                &self.required_permissions
            }

            fn component(&self) -> &ComponentRef {
                &self.component
            }
        }

        impl $ty {
            /// 빌더 패턴: 정렬 순서 (낮을수록 먼저)
            pub fn with_order(mut self, order: i32) -> Self {
                self.order = order;
                self
            }

            /// 빌더 패턴: 요구 권한 추가
            pub fn requires(mut self, permission: impl Into<String>) -> Self {
                self.required_permissions.insert(permission);
                self
            }

            /// 빌더 패턴: 렌더 단위 지정
            pub fn with_component(mut self, component: impl Into<String>) -> Self {
                self.component = ComponentRef::new(component);
                self
            }
        }
    };
}

// ============================================================================
// MenuItem
// ============================================================================

/// 메뉴 배치 영역
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MenuZone {
    Header,
    Sidebar,
    Footer,
}

impl Default for MenuZone {
    fn default() -> Self {
        Self::Sidebar
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub id: String,
    pub label: String,
    pub route: String,
    pub icon: Option<String>,
    pub zone: MenuZone,
    pub order: i32,
    #[serde(default)]
    pub required_permissions: PermissionSet,
    pub component: ComponentRef,
}

impl MenuItem {
    pub fn new(id: impl Into<String>, label: impl Into<String>, route: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            route: route.into(),
            icon: None,
            zone: MenuZone::default(),
            order: 0,
            required_permissions: PermissionSet::new(),
            component: ComponentRef::new(DEFAULT_MENU_COMPONENT),
        }
    }

    pub fn in_zone(mut self, zone: MenuZone) -> Self {
        self.zone = zone;
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }
}

impl_extension_item!(MenuItem, ExtensionKind::MenuItem);

// ============================================================================
// DashboardWidget
// ============================================================================

/// 위젯 크기 클래스
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WidgetSize {
    Small,
    Medium,
    Large,
    Full,
}

impl Default for WidgetSize {
    fn default() -> Self {
        Self::Medium
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardWidget {
    pub id: String,
    pub title: String,
    pub width: WidgetSize,
    pub height: WidgetSize,
    pub order: i32,
    #[serde(default)]
    pub required_permissions: PermissionSet,
    pub component: ComponentRef,
}

impl DashboardWidget {
    pub fn new(id: impl Into<String>, title: impl Into<String>, component: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            width: WidgetSize::default(),
            height: WidgetSize::default(),
            order: 0,
            required_permissions: PermissionSet::new(),
            component: ComponentRef::new(component),
        }
    }

    pub fn with_size(mut self, width: WidgetSize, height: WidgetSize) -> Self {
        self.width = width;
        self.height = height;
        self
    }
}

impl_extension_item!(DashboardWidget, ExtensionKind::DashboardWidget);

// ============================================================================
// ProfileSection
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileSection {
    pub id: String,
    pub title: String,
    pub order: i32,
    #[serde(default)]
    pub required_permissions: PermissionSet,
    pub component: ComponentRef,
}

impl ProfileSection {
    pub fn new(id: impl Into<String>, title: impl Into<String>, component: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            order: 0,
            required_permissions: PermissionSet::new(),
            component: ComponentRef::new(component),
        }
    }
}

impl_extension_item!(ProfileSection, ExtensionKind::ProfileSection);

// ============================================================================
// SkillTag
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillTag {
    pub id: String,
    pub name: String,
    pub category: Option<String>,
    pub order: i32,
    #[serde(default)]
    pub required_permissions: PermissionSet,
    pub component: ComponentRef,
}

impl SkillTag {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category: None,
            order: 0,
            required_permissions: PermissionSet::new(),
            component: ComponentRef::new(DEFAULT_SKILL_COMPONENT),
        }
    }

    pub fn in_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }
}

impl_extension_item!(SkillTag, ExtensionKind::SkillTag);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_item_builder() {
        let item = MenuItem::new("jobs", "Job Board", "/jobs")
            .in_zone(MenuZone::Header)
            .with_icon("briefcase")
            .with_order(3)
            .requires("jobs:read");

        assert_eq!(item.zone, MenuZone::Header);
        assert_eq!(item.order(), 3);
        assert!(item.required_permissions().contains("jobs:read"));
        assert_eq!(item.component().as_str(), DEFAULT_MENU_COMPONENT);
        assert_eq!(MenuItem::KIND, ExtensionKind::MenuItem);
    }

    #[test]
    fn test_widget_defaults() {
        let widget = DashboardWidget::new("upcoming", "Upcoming Sessions", "UpcomingSessions");
        assert_eq!(widget.width, WidgetSize::Medium);
        assert_eq!(widget.height, WidgetSize::Medium);
        assert!(widget.required_permissions().is_empty());

        let widget = widget.with_size(WidgetSize::Full, WidgetSize::Small);
        assert_eq!(widget.width, WidgetSize::Full);
    }

    #[test]
    fn test_item_serde() {
        let skill = SkillTag::new("rust", "Rust").in_category("languages");
        let json = serde_json::to_value(&skill).unwrap();
        assert_eq!(json["category"], "languages");
        assert_eq!(json["component"], DEFAULT_SKILL_COMPONENT);
        assert_eq!(json["requiredPermissions"], serde_json::json!([]));

        let zone: MenuZone = serde_json::from_str("\"footer\"").unwrap();
        assert_eq!(zone, MenuZone::Footer);
    }
}
