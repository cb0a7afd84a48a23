//! # Service Facade
//!
//! 확장 코드가 호스트에 접근하는 유일한 통로입니다.
//!
//! 정확히 네 가지 기능 그룹만 노출합니다:
//! - identity: 현재 사용자, 로그인 여부
//! - navigation: 라우트 변경/조회
//! - notification: 사용자 알림
//! - messaging: 현재 사용자 이름으로 채널 메시지 전송
//!
//! 파사드는 호스트 세션마다 한 번 생성되어 모든 플러그인에 공유됩니다.
//! 내부 서비스 핸들은 비공개이며, 호출은 모두 동기입니다.

mod contracts;
mod memory;
mod types;

pub use contracts::{IdentityService, MessagingService, NavigationService, NotificationService};
pub use memory::{ChatService, HostServices, NotificationCenter, Router, SessionStore, HOME_ROUTE};
pub use types::{ChatMessage, Notification, NotificationKind, UserProfile, UserRole};

use alumnet_foundation::{Error, Result};
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

/// 확장 코드용 서비스 파사드
pub struct ServiceFacade {
    identity: Arc<dyn IdentityService>,
    navigation: Arc<dyn NavigationService>,
    notifications: Arc<dyn NotificationService>,
    messaging: Arc<dyn MessagingService>,
}

impl ServiceFacade {
    pub fn new(
        identity: Arc<dyn IdentityService>,
        navigation: Arc<dyn NavigationService>,
        notifications: Arc<dyn NotificationService>,
        messaging: Arc<dyn MessagingService>,
    ) -> Self {
        Self {
            identity,
            navigation,
            notifications,
            messaging,
        }
    }

    // ========================================================================
    // Identity
    // ========================================================================

    /// 현재 사용자 (복사본)
    pub fn current_user(&self) -> Option<UserProfile> {
        self.identity.current_user()
    }

    pub fn is_authenticated(&self) -> bool {
        self.identity.is_authenticated()
    }

    // ========================================================================
    // Navigation
    // ========================================================================

    pub fn navigate(&self, route: &str) -> Result<()> {
        self.navigation.navigate(route)
    }

    pub fn current_route(&self) -> String {
        self.navigation.current_route()
    }

    // ========================================================================
    // Notification
    // ========================================================================

    /// 사용자 알림 발행, 생성된 알림 ID 반환
    pub fn notify(&self, kind: NotificationKind, message: impl Into<String>) -> Result<Uuid> {
        let message = message.into();
        if message.trim().is_empty() {
            return Err(Error::InvalidRequest("notification message is empty".into()));
        }

        let notification = Notification::new(kind, message);
        let id = notification.id;
        debug!(%id, %kind, "Notification emitted");
        self.notifications.push(notification);
        Ok(id)
    }

    // ========================================================================
    // Messaging
    // ========================================================================

    /// 현재 사용자 이름으로 채널에 메시지 전송
    pub fn send_message(&self, channel: &str, body: &str) -> Result<ChatMessage> {
        let user = self.identity.current_user().ok_or_else(|| {
            Error::PermissionDenied("sending messages requires a signed-in user".into())
        })?;

        if channel.trim().is_empty() {
            return Err(Error::InvalidRequest("channel name is empty".into()));
        }
        if body.trim().is_empty() {
            return Err(Error::InvalidRequest("message body is empty".into()));
        }

        let message = ChatMessage::new(channel, user.id, body);
        self.messaging.send(message.clone())?;
        debug!(channel, message_id = %message.id, "Message sent");
        Ok(message)
    }
}

impl std::fmt::Debug for ServiceFacade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceFacade")
            .field("authenticated", &self.is_authenticated())
            .field("route", &self.current_route())
            .finish()
    }
}
