//! Permission - 권한 모델
//!
//! 확장 레이어의 모든 게이트(메뉴, 위젯, 프로필 섹션, 스킬, 마이크로 프론트엔드)는
//! 같은 규칙을 씁니다: 요구 집합 ⊆ 보유 집합.
//!
//! ```ignore
//! use alumnet_foundation::permission::{has_all_permissions, PermissionSet};
//!
//! let held = PermissionSet::from(["profile:read", "jobs:read"]);
//! let required = PermissionSet::from(["jobs:read"]);
//! assert!(has_all_permissions(&required, &held));
//! ```

mod set;

pub use set::{
    has_all_permissions, validate_permission, PermissionSet,
    PERMISSION_SEPARATOR,
};
