//! Load State - 마이크로 프론트엔드 로드 결과

use super::manifest::MicroFrontendManifest;
use crate::extension::ComponentRef;
use alumnet_foundation::{Error, PermissionSet};
use serde::Serialize;

/// 실패 화면에서 사용자에게 제시할 조치
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Remedy {
    /// 다른 화면으로 이동
    NavigateAway,
    /// 권한 요청
    RequestAccess,
    /// 다시 시도
    Retry,
}

/// 로드 실패 종류
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LoadFailure {
    /// 라우트 파라미터 없음
    InvalidRequest { reason: String },

    NotFound { id: String },

    /// 권한 부족. 로드는 시도되지 않음
    PermissionDenied { id: String, missing: PermissionSet },

    /// 모듈 로드/마운트 실패 또는 시간 초과
    LoadFailed { id: String, reason: String },
}

impl LoadFailure {
    pub fn remedy(&self) -> Remedy {
        match self {
            Self::InvalidRequest { .. } | Self::NotFound { .. } => Remedy::NavigateAway,
            Self::PermissionDenied { .. } => Remedy::RequestAccess,
            Self::LoadFailed { .. } => Remedy::Retry,
        }
    }

    /// 화면에 표시할 메시지
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidRequest { .. } => "No application was specified.".to_string(),
            Self::NotFound { id } => format!("The application '{}' does not exist.", id),
            Self::PermissionDenied { id, missing } => format!(
                "You do not have access to '{}'. Missing permissions: {}",
                id, missing
            ),
            Self::LoadFailed { id, .. } => format!(
                "The application '{}' could not be loaded. Please try again.",
                id
            ),
        }
    }
}

impl std::fmt::Display for LoadFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidRequest { reason } => write!(f, "invalid request: {}", reason),
            Self::NotFound { id } => write!(f, "micro-frontend '{}' not found", id),
            Self::PermissionDenied { id, missing } => {
                write!(f, "micro-frontend '{}' requires {}", id, missing)
            }
            Self::LoadFailed { id, reason } => {
                write!(f, "micro-frontend '{}' failed to load: {}", id, reason)
            }
        }
    }
}

impl From<LoadFailure> for Error {
    fn from(failure: LoadFailure) -> Self {
        match failure {
            LoadFailure::InvalidRequest { .. } => Error::InvalidRequest(failure.to_string()),
            LoadFailure::NotFound { .. } => Error::NotFound(failure.to_string()),
            LoadFailure::PermissionDenied { .. } => Error::PermissionDenied(failure.to_string()),
            LoadFailure::LoadFailed { .. } => Error::LoadFailure(failure.to_string()),
        }
    }
}

/// 마운트까지 끝난 모듈
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadedModule {
    pub manifest: MicroFrontendManifest,
    pub component: ComponentRef,
    pub duration_ms: u64,
}

/// 로드 상태
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", content = "detail", rename_all = "snake_case")]
pub enum LoadState {
    Pending,
    Loaded(LoadedModule),
    Failed(LoadFailure),
}

impl LoadState {
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded(_))
    }

    pub fn loaded(&self) -> Option<&LoadedModule> {
        match self {
            Self::Loaded(module) => Some(module),
            _ => None,
        }
    }

    pub fn failure(&self) -> Option<&LoadFailure> {
        match self {
            Self::Failed(failure) => Some(failure),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remedies() {
        let denied = LoadFailure::PermissionDenied {
            id: "admin-panel".into(),
            missing: PermissionSet::from(["admin:read"]),
        };
        assert_eq!(denied.remedy(), Remedy::RequestAccess);
        assert!(denied.user_message().contains("admin:read"));

        let missing = LoadFailure::NotFound {
            id: "does-not-exist".into(),
        };
        assert_eq!(missing.remedy(), Remedy::NavigateAway);
        assert!(missing.user_message().contains("does not exist"));

        let failed = LoadFailure::LoadFailed {
            id: "stories".into(),
            reason: "timed out".into(),
        };
        assert_eq!(failed.remedy(), Remedy::Retry);
    }

    #[test]
    fn test_into_error() {
        let err: Error = LoadFailure::LoadFailed {
            id: "x".into(),
            reason: "boom".into(),
        }
        .into();
        assert!(matches!(err, Error::LoadFailure(_)));

        let err: Error = LoadFailure::InvalidRequest {
            reason: "missing id".into(),
        }
        .into();
        assert!(matches!(err, Error::InvalidRequest(_)));
    }

    #[test]
    fn test_state_accessors() {
        assert!(LoadState::Pending.is_pending());
        let failed = LoadState::Failed(LoadFailure::NotFound { id: "x".into() });
        assert!(failed.failure().is_some());
        assert!(failed.loaded().is_none());
    }
}
