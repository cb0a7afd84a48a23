//! ExtensionCollection - 한 종류의 확장 항목 저장소

use super::items::ExtensionItem;
use alumnet_foundation::{has_all_permissions, sort_by_order, Error, PermissionSet, Result};

/// 소유자와 함께 저장된 항목
#[derive(Debug, Clone)]
struct Registered<T> {
    owner: String,
    item: T,
}

/// 등록 순서를 보존하는 항목 목록
///
/// 삭제해도 남은 항목의 상대 순서는 바뀌지 않으므로,
/// 조회 시 안정 정렬만으로 (order, 등록 순서) 정렬이 됩니다.
#[derive(Debug, Clone)]
pub struct ExtensionCollection<T> {
    entries: Vec<Registered<T>>,
}

impl<T: ExtensionItem> ExtensionCollection<T> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// 항목 추가. 같은 ID가 있으면 `AlreadyExists`
    pub fn register(&mut self, owner: &str, item: T) -> Result<()> {
        if self.contains(item.id()) {
            return Err(Error::AlreadyExists(format!(
                "{} '{}' is already registered",
                T::KIND,
                item.id()
            )));
        }

        self.entries.push(Registered {
            owner: owner.to_string(),
            item,
        });
        Ok(())
    }

    /// 보유 권한으로 볼 수 있는 항목 (order 오름차순, 동순위는 등록 순)
    pub fn query_visible<F>(&self, held: &PermissionSet, filter: F) -> Vec<T>
    where
        F: Fn(&T) -> bool,
    {
        let mut visible: Vec<T> = self
            .entries
            .iter()
            .map(|e| &e.item)
            .filter(|item| has_all_permissions(item.required_permissions(), held))
            .filter(|item| filter(*item))
            .cloned()
            .collect();

        sort_by_order(&mut visible);
        visible
    }

    /// 소유자가 등록한 항목 모두 제거, 제거 개수 반환
    pub fn remove_by_owner(&mut self, owner: &str) -> usize {
        let before = self.entries.len();
        self.entries.retain(|e| e.owner != owner);
        before - self.entries.len()
    }

    pub fn get(&self, id: &str) -> Option<&T> {
        self.entries.iter().find(|e| e.item.id() == id).map(|e| &e.item)
    }

    pub fn owner_of(&self, id: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.item.id() == id)
            .map(|e| e.owner.as_str())
    }

    /// 소유자가 등록한 항목 ID (등록 순)
    pub fn ids_owned_by(&self, owner: &str) -> Vec<String> {
        self.entries
            .iter()
            .filter(|e| e.owner == owner)
            .map(|e| e.item.id().to_string())
            .collect()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.iter().any(|e| e.item.id() == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T: ExtensionItem> Default for ExtensionCollection<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extension::items::DashboardWidget;

    fn widget(id: &str, order: i32) -> DashboardWidget {
        DashboardWidget::new(id, id, "Widget").with_order(order)
    }

    fn ids(items: &[DashboardWidget]) -> Vec<&str> {
        items.iter().map(|w| w.id.as_str()).collect()
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let mut widgets = ExtensionCollection::new();
        widgets.register("p1", widget("a", 1)).unwrap();

        let err = widgets.register("p2", widget("a", 99)).unwrap_err();
        assert!(matches!(err, Error::AlreadyExists(_)));

        assert_eq!(widgets.len(), 1);
        assert_eq!(widgets.owner_of("a"), Some("p1"));
        assert_eq!(widgets.get("a").unwrap().order, 1);
    }

    #[test]
    fn test_query_sorted_and_stable() {
        let mut widgets = ExtensionCollection::new();
        widgets.register("p1", widget("ten", 10)).unwrap();
        widgets.register("p1", widget("five", 5)).unwrap();
        widgets.register("p1", widget("twenty", 20)).unwrap();
        widgets.register("p1", widget("five-again", 5)).unwrap();

        let visible = widgets.query_visible(&PermissionSet::new(), |_| true);
        assert_eq!(ids(&visible), vec!["five", "five-again", "ten", "twenty"]);
    }

    #[test]
    fn test_remove_by_owner_keeps_relative_order() {
        let mut widgets = ExtensionCollection::new();
        widgets.register("p1", widget("a", 0)).unwrap();
        widgets.register("p2", widget("b", 0)).unwrap();
        widgets.register("p1", widget("c", 0)).unwrap();
        widgets.register("p2", widget("d", 0)).unwrap();

        assert_eq!(widgets.ids_owned_by("p1"), vec!["a", "c"]);
        assert_eq!(widgets.remove_by_owner("p1"), 2);
        assert_eq!(widgets.remove_by_owner("p1"), 0);

        let visible = widgets.query_visible(&PermissionSet::new(), |_| true);
        assert_eq!(ids(&visible), vec!["b", "d"]);

        // 제거 후 같은 ID 재등록 가능
        widgets.register("p1", widget("a", 0)).unwrap();
        assert!(widgets.contains("a"));
    }

    #[test]
    fn test_permission_filter() {
        let mut widgets = ExtensionCollection::new();
        widgets.register("p1", widget("open", 0)).unwrap();
        widgets
            .register("p1", widget("admin", 0).requires("admin:read"))
            .unwrap();

        let anonymous = widgets.query_visible(&PermissionSet::new(), |_| true);
        assert_eq!(ids(&anonymous), vec!["open"]);

        let admin = widgets.query_visible(&PermissionSet::from(["admin:read"]), |_| true);
        assert_eq!(ids(&admin), vec!["open", "admin"]);
    }
}
