//! 프로세스 전역 등록 슬롯
//!
//! 호스트 설정(`expose_global_handle`)이 켜져 있을 때만 시작 시 채워지고,
//! 종료 시 비워집니다. 호스트 내부 코드는 이 슬롯을 읽지 않습니다.

use super::handle::RegistrationHandle;
use parking_lot::RwLock;

static SLOT: RwLock<Option<RegistrationHandle>> = RwLock::new(None);

/// 현재 게시된 핸들
pub fn current() -> Option<RegistrationHandle> {
    SLOT.read().clone()
}

pub fn is_published() -> bool {
    SLOT.read().is_some()
}

/// 핸들 게시 (이전 핸들은 교체)
pub(crate) fn publish(handle: RegistrationHandle) {
    *SLOT.write() = Some(handle);
}

/// 같은 세션의 핸들이 게시되어 있으면 비움
pub(crate) fn withdraw(handle: &RegistrationHandle) -> bool {
    let mut slot = SLOT.write();
    match slot.as_ref() {
        Some(current) if current.same_session(handle) => {
            *slot = None;
            true
        }
        _ => false,
    }
}
