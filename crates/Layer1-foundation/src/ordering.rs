//! Ordering - 등록 항목의 결정적 정렬
//!
//! `order` 오름차순, 같은 `order`는 등록 순서를 유지합니다.
//! 같은 입력이면 몇 번을 조회해도 같은 레이아웃이 나와야 합니다.

use std::sync::atomic::{AtomicU64, Ordering};

/// 정렬 가능한 항목
pub trait Ordered {
    /// 낮을수록 먼저 표시
    fn order(&self) -> i32;
}

/// 등록 순번 발급기
#[derive(Debug, Default)]
pub struct Sequence(AtomicU64);

impl Sequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// 다음 순번 (1부터 시작)
    pub fn next(&self) -> u64 {
        self.0.fetch_add(1, Ordering::SeqCst) + 1
    }
}

/// 등록 순서대로 들어 있는 목록을 `order` 기준으로 안정 정렬
///
/// `sort_by_key`는 안정 정렬이므로 동순위는 입력 순서를 유지합니다.
pub fn sort_by_order<T: Ordered>(items: &mut [T]) {
    items.sort_by_key(|item| item.order());
}
