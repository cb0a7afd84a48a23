//! PermissionSet - 권한 토큰 집합
//!
//! 권한은 `resource:action` 형태의 토큰 (예: `profile:write`)이며,
//! 평가는 계층 없이 정확한 문자열 일치로만 수행합니다.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// 권한 토큰 구분자
pub const PERMISSION_SEPARATOR: char = ':';

/// 권한 토큰 형식 검사 (`resource:action`)
pub fn validate_permission(token: &str) -> Result<()> {
    let mut parts = token.splitn(2, PERMISSION_SEPARATOR);
    let resource = parts.next().unwrap_or_default();
    let action = parts.next().unwrap_or_default();

    let well_formed = !resource.is_empty()
        && !action.is_empty()
        && !action.contains(PERMISSION_SEPARATOR)
        && !token.chars().any(char::is_whitespace);

    if well_formed {
        Ok(())
    } else {
        Err(Error::InvalidRequest(format!(
            "malformed permission '{}', expected resource:action",
            token
        )))
    }
}

/// 권한 집합
///
/// 정렬된 집합이라 직렬화 결과와 로그 출력이 항상 동일합니다.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PermissionSet(BTreeSet<String>);

impl PermissionSet {
    /// 빈 집합 (제한 없음 / 익명 사용자)
    pub fn new() -> Self {
        Self::default()
    }

    /// 빌더 패턴: 권한 추가
    pub fn with(mut self, permission: impl Into<String>) -> Self {
        self.0.insert(permission.into());
        self
    }

    pub fn insert(&mut self, permission: impl Into<String>) -> bool {
        self.0.insert(permission.into())
    }

    pub fn remove(&mut self, permission: &str) -> bool {
        self.0.remove(permission)
    }

    pub fn contains(&self, permission: &str) -> bool {
        self.0.contains(permission)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// 모든 토큰의 형식 검사
    pub fn validate(&self) -> Result<()> {
        self.iter().try_for_each(validate_permission)
    }

    /// `self`가 요구 집합일 때, `held`에 없는 권한 목록
    pub fn missing_from(&self, held: &PermissionSet) -> Vec<String> {
        self.0.difference(&held.0).cloned().collect()
    }

    /// 두 집합의 합집합
    pub fn union(&self, other: &PermissionSet) -> PermissionSet {
        Self(self.0.union(&other.0).cloned().collect())
    }
}

impl fmt::Display for PermissionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, p) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", p)?;
        }
        write!(f, "}}")
    }
}

impl<S: Into<String>> FromIterator<S> for PermissionSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl<S: Into<String>, const N: usize> From<[S; N]> for PermissionSet {
    fn from(tokens: [S; N]) -> Self {
        tokens.into_iter().collect()
    }
}

/// 요구 권한이 모두 보유 권한에 포함되는지 검사 (`required ⊆ held`)
///
/// 메뉴, 위젯, 프로필 섹션, 스킬, 마이크로 프론트엔드, 플러그인 조회가
/// 모두 이 함수 하나로 판정합니다. 요구 집합이 비어 있으면 항상 통과합니다.
pub fn has_all_permissions(required: &PermissionSet, held: &PermissionSet) -> bool {
    required.0.is_subset(&held.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_requirement_always_passes() {
        let required = PermissionSet::new();
        assert!(has_all_permissions(&required, &PermissionSet::new()));
        assert!(has_all_permissions(&required, &PermissionSet::from(["jobs:read"])));
    }

    #[test]
    fn test_subset_semantics() {
        let held = PermissionSet::from(["profile:read", "profile:write", "jobs:read"]);

        assert!(has_all_permissions(&PermissionSet::from(["profile:write"]), &held));
        assert!(has_all_permissions(
            &PermissionSet::from(["profile:read", "jobs:read"]),
            &held
        ));
        assert!(!has_all_permissions(
            &PermissionSet::from(["profile:write", "admin:read"]),
            &held
        ));
    }

    #[test]
    fn test_exact_match_not_hierarchical() {
        let held = PermissionSet::from(["admin:*", "admin"]);
        assert!(!has_all_permissions(&PermissionSet::from(["admin:read"]), &held));
    }

    #[test]
    fn test_validate_permission() {
        assert!(validate_permission("profile:write").is_ok());
        assert!(validate_permission("mentorship:request").is_ok());
        assert!(validate_permission("profile").is_err());
        assert!(validate_permission(":write").is_err());
        assert!(validate_permission("profile:").is_err());
        assert!(validate_permission("a:b:c").is_err());
        assert!(validate_permission("profile: write").is_err());
    }

    #[test]
    fn test_serde_as_array() {
        let set = PermissionSet::from(["jobs:read", "admin:read"]);
        let json = serde_json::to_string(&set).unwrap();
        assert_eq!(json, r#"["admin:read","jobs:read"]"#);

        let back: PermissionSet = serde_json::from_str(&json).unwrap();
        assert_eq!(back, set);
    }

    #[test]
    fn test_display() {
        let set = PermissionSet::from(["b:x", "a:y"]);
        assert_eq!(set.to_string(), "{a:y, b:x}");
        assert_eq!(PermissionSet::new().to_string(), "{}");
    }
}
