//! Host service contracts
//!
//! 호스트가 구현하고 파사드가 위임하는 네 가지 서비스 경계입니다.
//! 인증/알림/채팅의 실제 구현은 이 레이어 바깥에 있습니다.

use super::types::{ChatMessage, Notification, UserProfile};
use alumnet_foundation::Result;

/// 현재 사용자 조회
pub trait IdentityService: Send + Sync {
    fn current_user(&self) -> Option<UserProfile>;

    fn is_authenticated(&self) -> bool {
        self.current_user().is_some()
    }
}

/// 활성 라우트 변경/조회
pub trait NavigationService: Send + Sync {
    fn navigate(&self, route: &str) -> Result<()>;

    fn current_route(&self) -> String;
}

/// 사용자 알림 발행
pub trait NotificationService: Send + Sync {
    fn push(&self, notification: Notification);
}

/// 채널 메시지 전송
pub trait MessagingService: Send + Sync {
    fn send(&self, message: ChatMessage) -> Result<()>;
}
