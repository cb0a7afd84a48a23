//! In-memory host state containers
//!
//! 호스트 프로세스 하나 동안만 유효한 기본 구현입니다.
//! 파사드는 이 타입들을 trait object로만 보관합니다.

use super::contracts::{IdentityService, MessagingService, NavigationService, NotificationService};
use super::types::{ChatMessage, Notification, UserProfile};
use super::ServiceFacade;
use alumnet_foundation::{Error, PermissionSet, Result};
use parking_lot::RwLock;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

/// 기본 라우트
pub const HOME_ROUTE: &str = "/";

// ============================================================================
// SessionStore - 로그인 상태
// ============================================================================

#[derive(Default)]
pub struct SessionStore {
    user: RwLock<Option<UserProfile>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sign_in(&self, user: UserProfile) {
        debug!(user_id = %user.id, role = %user.role, "User signed in");
        *self.user.write() = Some(user);
    }

    pub fn sign_out(&self) {
        if let Some(user) = self.user.write().take() {
            debug!(user_id = %user.id, "User signed out");
        }
    }

    /// 현재 사용자의 보유 권한 (익명이면 빈 집합)
    pub fn permissions(&self) -> PermissionSet {
        self.user
            .read()
            .as_ref()
            .map(|u| u.permissions.clone())
            .unwrap_or_default()
    }
}

impl IdentityService for SessionStore {
    fn current_user(&self) -> Option<UserProfile> {
        self.user.read().clone()
    }
}

// ============================================================================
// Router - 활성 라우트
// ============================================================================

pub struct Router {
    current: RwLock<String>,
    history: RwLock<VecDeque<String>>,
    capacity: usize,
}

impl Router {
    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    /// 히스토리 최대 길이 지정 (가장 오래된 라우트부터 버림)
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            current: RwLock::new(HOME_ROUTE.to_string()),
            history: RwLock::new(VecDeque::new()),
            capacity: capacity.max(1),
        }
    }

    /// 이전 라우트로 이동. 히스토리가 없으면 None
    pub fn back(&self) -> Option<String> {
        let previous = self.history.write().pop_back()?;
        *self.current.write() = previous.clone();
        Some(previous)
    }

    /// 오래된 순
    pub fn history(&self) -> Vec<String> {
        self.history.read().iter().cloned().collect()
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

impl NavigationService for Router {
    fn navigate(&self, route: &str) -> Result<()> {
        if !route.starts_with('/') {
            return Err(Error::InvalidRequest(format!(
                "route '{}' must be absolute",
                route
            )));
        }

        let mut current = self.current.write();
        if *current != route {
            let mut history = self.history.write();
            if history.len() >= self.capacity {
                history.pop_front();
            }
            history.push_back(std::mem::replace(&mut *current, route.to_string()));
            debug!(route, "Navigated");
        }
        Ok(())
    }

    fn current_route(&self) -> String {
        self.current.read().clone()
    }
}

// ============================================================================
// NotificationCenter - 알림 목록
// ============================================================================

pub struct NotificationCenter {
    items: RwLock<VecDeque<Notification>>,
    capacity: usize,
}

impl NotificationCenter {
    pub fn new() -> Self {
        Self::with_capacity(50)
    }

    /// 최대 보관 개수 지정 (오래된 알림부터 버림)
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: RwLock::new(VecDeque::new()),
            capacity: capacity.max(1),
        }
    }

    /// 최신순 목록
    pub fn list(&self) -> Vec<Notification> {
        self.items.read().iter().rev().cloned().collect()
    }

    pub fn dismiss(&self, id: Uuid) -> bool {
        let mut items = self.items.write();
        let before = items.len();
        items.retain(|n| n.id != id);
        items.len() != before
    }

    pub fn len(&self) -> usize {
        self.items.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.read().is_empty()
    }
}

impl Default for NotificationCenter {
    fn default() -> Self {
        Self::new()
    }
}

impl NotificationService for NotificationCenter {
    fn push(&self, notification: Notification) {
        let mut items = self.items.write();
        if items.len() >= self.capacity {
            items.pop_front();
        }
        items.push_back(notification);
    }
}

// ============================================================================
// ChatService - 채널별 메시지
// ============================================================================

#[derive(Default)]
pub struct ChatService {
    channels: RwLock<HashMap<String, Vec<ChatMessage>>>,
}

impl ChatService {
    pub fn new() -> Self {
        Self::default()
    }

    /// 채널 메시지 (보낸 순서)
    pub fn messages(&self, channel: &str) -> Vec<ChatMessage> {
        self.channels
            .read()
            .get(channel)
            .cloned()
            .unwrap_or_default()
    }

    pub fn channels(&self) -> Vec<String> {
        let mut names: Vec<_> = self.channels.read().keys().cloned().collect();
        names.sort();
        names
    }
}

impl MessagingService for ChatService {
    fn send(&self, message: ChatMessage) -> Result<()> {
        self.channels
            .write()
            .entry(message.channel.clone())
            .or_default()
            .push(message);
        Ok(())
    }
}

// ============================================================================
// HostServices - 네 가지 컨테이너 묶음
// ============================================================================

/// 호스트가 소유하는 상태 컨테이너 묶음
#[derive(Clone, Default)]
pub struct HostServices {
    pub session: Arc<SessionStore>,
    pub router: Arc<Router>,
    pub notifications: Arc<NotificationCenter>,
    pub chat: Arc<ChatService>,
}

impl HostServices {
    pub fn new() -> Self {
        Self::default()
    }

    /// 이 컨테이너들에 위임하는 파사드 생성
    pub fn facade(&self) -> ServiceFacade {
        ServiceFacade::new(
            self.session.clone(),
            self.router.clone(),
            self.notifications.clone(),
            self.chat.clone(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facade::types::{NotificationKind, UserRole};

    #[test]
    fn test_session_permissions() {
        let session = SessionStore::new();
        assert!(session.permissions().is_empty());
        assert!(!session.is_authenticated());

        session.sign_in(UserProfile::new("u1", "Dana", UserRole::Admin));
        assert!(session.permissions().contains("admin:read"));

        session.sign_out();
        assert!(session.current_user().is_none());
    }

    #[test]
    fn test_router_history() {
        let router = Router::new();
        router.navigate("/jobs").unwrap();
        router.navigate("/jobs").unwrap();
        router.navigate("/apps/job-board").unwrap();

        assert_eq!(router.current_route(), "/apps/job-board");
        assert_eq!(router.history(), vec!["/", "/jobs"]);
        assert_eq!(router.back().as_deref(), Some("/jobs"));
        assert_eq!(router.current_route(), "/jobs");
    }

    #[test]
    fn test_router_history_is_bounded() {
        let router = Router::with_capacity(3);
        for i in 0..10 {
            router.navigate(&format!("/page/{}", i)).unwrap();
        }

        assert_eq!(router.history(), vec!["/page/6", "/page/7", "/page/8"]);
        assert_eq!(router.back().as_deref(), Some("/page/8"));
        assert_eq!(router.history().len(), 2);
    }

    #[test]
    fn test_router_rejects_relative() {
        let router = Router::new();
        assert!(matches!(
            router.navigate("jobs"),
            Err(Error::InvalidRequest(_))
        ));
        assert_eq!(router.current_route(), HOME_ROUTE);
    }

    #[test]
    fn test_notification_capacity() {
        let center = NotificationCenter::with_capacity(2);
        center.push(Notification::new(NotificationKind::Info, "one"));
        center.push(Notification::new(NotificationKind::Info, "two"));
        center.push(Notification::new(NotificationKind::Warning, "three"));

        let list = center.list();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].message, "three");

        assert!(center.dismiss(list[1].id));
        assert_eq!(center.len(), 1);
    }

    #[test]
    fn test_chat_channels() {
        let chat = ChatService::new();
        chat.send(ChatMessage::new("general", "u1", "hi")).unwrap();
        chat.send(ChatMessage::new("mentors", "u1", "hello")).unwrap();
        chat.send(ChatMessage::new("general", "u2", "hey")).unwrap();

        assert_eq!(chat.messages("general").len(), 2);
        assert_eq!(chat.channels(), vec!["general", "mentors"]);
        assert!(chat.messages("unknown").is_empty());
    }
}
