//! Tests for workspace module.

#[cfg(test)]
mod tests {
    use crate::domain::fixtures::{branch, file, stack, status};
    use crate::domain::{BranchStatus, ChangeType};
    use crate::workspace::StatusCache;
    use std::sync::Arc;

    #[test]
    fn test_new_cache_is_empty() {
        let cache = StatusCache::new();
        assert!(cache.current().is_none());
    }

    #[test]
    fn test_replace_is_total() {
        let cache = StatusCache::new();

        cache.replace(status(
            vec![file("a.txt", ChangeType::Added)],
            vec![stack(vec![branch("main", 1, BranchStatus::NothingToPush)])],
            0,
        ));
        cache.replace(status(Vec::new(), Vec::new(), 3));

        let current = cache.current().unwrap();
        assert!(current.unassigned_changes.is_empty());
        assert!(current.stacks.is_empty());
        assert_eq!(current.upstream_state.behind, 3);
    }

    #[test]
    fn test_readers_keep_their_snapshot() {
        let cache = StatusCache::new();
        cache.replace(status(Vec::new(), Vec::new(), 1));
        let before = cache.current().unwrap();

        cache.replace(status(Vec::new(), Vec::new(), 2));

        assert_eq!(before.upstream_state.behind, 1);
        assert_eq!(cache.current().unwrap().upstream_state.behind, 2);
        assert!(!Arc::ptr_eq(&before, &cache.current().unwrap()));
    }

    #[tokio::test]
    async fn test_listeners_notified_on_replace_and_clear() {
        let cache = StatusCache::new();
        let mut rx = cache.subscribe();

        cache.replace(status(Vec::new(), Vec::new(), 0));
        rx.changed().await.unwrap();
        assert!(rx.borrow_and_update().is_some());

        cache.clear();
        rx.changed().await.unwrap();
        assert!(rx.borrow_and_update().is_none());
        assert!(cache.current().is_none());
    }
}
