//! # Extension Point Registry
//!
//! 호스트 페이지 셸이 조회해서 렌더링하는 네 가지 확장 포인트:
//!
//! | 종류            | 추가 속성                       |
//! |-----------------|---------------------------------|
//! | MenuItem        | zone (header / sidebar / footer)|
//! | DashboardWidget | width, height                   |
//! | ProfileSection  | title                           |
//! | SkillTag        | name, category                  |
//!
//! 모든 항목은 `order`(낮을수록 먼저), 요구 권한, 렌더 단위 참조를 가지며,
//! 등록한 플러그인 ID와 함께 저장됩니다.
//!
//! ```ignore
//! let registry = ExtensionRegistry::new();
//! registry.register_widget("mentor.match", DashboardWidget::new("matches", "Matches", "MatchList"))?;
//!
//! let visible = registry.query_widgets(&user_permissions);
//! registry.remove_by_owner("mentor.match");
//! ```

mod collection;
mod items;
mod registry;

pub use collection::ExtensionCollection;
pub use items::{
    ComponentRef, DashboardWidget, ExtensionItem, ExtensionKind, MenuItem, MenuZone,
    ProfileSection, SkillTag, WidgetSize, DEFAULT_MENU_COMPONENT, DEFAULT_SKILL_COMPONENT,
};
pub use registry::{ExtensionCounts, ExtensionRegistry, OwnedExtensions, HOST_OWNER};
