//! Facade types - 확장 코드에 노출되는 값 타입

use alumnet_foundation::PermissionSet;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// Identity
// ============================================================================

/// 사용자 역할
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Student,
    Alumni,
    Mentor,
    Admin,
}

impl UserRole {
    /// 역할별 기본 권한
    pub fn default_permissions(&self) -> PermissionSet {
        let base = PermissionSet::from([
            "profile:read",
            "profile:write",
            "jobs:read",
            "stories:read",
            "chat:write",
        ]);

        match self {
            Self::Student => base.with("mentorship:request"),
            Self::Alumni => base
                .with("jobs:write")
                .with("stories:write")
                .with("mentorship:offer"),
            Self::Mentor => base
                .with("stories:write")
                .with("mentorship:offer")
                .with("mentorship:manage"),
            Self::Admin => base
                .with("jobs:write")
                .with("stories:write")
                .with("mentorship:manage")
                .with("admin:read")
                .with("admin:write"),
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Student => write!(f, "student"),
            Self::Alumni => write!(f, "alumni"),
            Self::Mentor => write!(f, "mentor"),
            Self::Admin => write!(f, "admin"),
        }
    }
}

/// 현재 사용자 정보 (읽기 전용 스냅샷)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub permissions: PermissionSet,
}

impl UserProfile {
    /// 역할 기본 권한으로 생성
    pub fn new(id: impl Into<String>, name: impl Into<String>, role: UserRole) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: String::new(),
            role,
            permissions: role.default_permissions(),
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    /// 역할 기본 권한에 추가 권한 부여
    pub fn with_permission(mut self, permission: impl Into<String>) -> Self {
        self.permissions.insert(permission);
        self
    }
}

// ============================================================================
// Notification
// ============================================================================

/// 알림 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Info,
    Success,
    Warning,
    Error,
}

impl std::fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Success => write!(f, "success"),
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// 사용자에게 표시되는 알림
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: Uuid,
    pub kind: NotificationKind,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    pub fn new(kind: NotificationKind, message: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            message: message.into(),
            created_at: Utc::now(),
        }
    }
}

// ============================================================================
// Messaging
// ============================================================================

/// 채널 메시지
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub id: Uuid,
    pub channel: String,
    pub sender_id: String,
    pub body: String,
    pub sent_at: DateTime<Utc>,
}

impl ChatMessage {
    pub fn new(
        channel: impl Into<String>,
        sender_id: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            channel: channel.into(),
            sender_id: sender_id.into(),
            body: body.into(),
            sent_at: Utc::now(),
        }
    }
}
