//! Error types for AlumNet
//!
//! 확장 레이어의 모든 에러를 중앙에서 관리

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// AlumNet 에러 타입
#[derive(Error, Debug)]
pub enum Error {
    // ========================================================================
    // 레지스트리 관련
    // ========================================================================
    #[error("Already exists: {0}")]
    AlreadyExists(String),

    #[error("Not found: {0}")]
    NotFound(String),

    // ========================================================================
    // 권한 관련
    // ========================================================================
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    // ========================================================================
    // 요청/로딩 관련
    // ========================================================================
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Load failure: {0}")]
    LoadFailure(String),

    // ========================================================================
    // 플러그인 관련
    // ========================================================================
    #[error("Plugin initialization failed: {plugin} - {message}")]
    PluginInit { plugin: String, message: String },

    /// 호스트가 종료되어 더 이상 사용할 수 없는 핸들
    #[error("Unavailable: {0}")]
    Unavailable(String),

    // ========================================================================
    // 설정 관련
    // ========================================================================
    #[error("Configuration error: {0}")]
    Config(String),

    // ========================================================================
    // 외부 에러 변환
    // ========================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    // ========================================================================
    // 기타
    // ========================================================================
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// 사용자에게 보여줄 수 있는 에러인지 확인
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            Error::NotFound(_)
                | Error::PermissionDenied(_)
                | Error::InvalidRequest(_)
                | Error::LoadFailure(_)
        )
    }

    /// 재시도로 해결될 수 있는 에러인지 확인
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::LoadFailure(_))
    }

    /// 플러그인 초기화 에러 생성 헬퍼
    pub fn plugin_init(plugin: impl Into<String>, message: impl Into<String>) -> Self {
        Error::PluginInit {
            plugin: plugin.into(),
            message: message.into(),
        }
    }
}

// ============================================================================
// From 구현 (추가 변환)
// ============================================================================

impl From<String> for Error {
    fn from(s: String) -> Self {
        Error::Internal(s)
    }
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Error::Internal(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_facing() {
        assert!(Error::NotFound("x".into()).is_user_facing());
        assert!(Error::PermissionDenied("x".into()).is_user_facing());
        assert!(!Error::Internal("x".into()).is_user_facing());
        assert!(!Error::plugin_init("p1", "boom").is_user_facing());
    }

    #[test]
    fn test_retryable() {
        assert!(Error::LoadFailure("network".into()).is_retryable());
        assert!(!Error::NotFound("x".into()).is_retryable());
    }

    #[test]
    fn test_display() {
        let err = Error::plugin_init("mentor.match", "missing route");
        assert_eq!(
            err.to_string(),
            "Plugin initialization failed: mentor.match - missing route"
        );
    }
}
