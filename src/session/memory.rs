//! In-memory session with explicit commit/rollback

use crate::core::types::{UserId, Watch};
use crate::session::Session;
use ahash::{AHashMap, AHashSet};

/// Watch store keyed by (user, url) with a pending-deletion set
#[derive(Debug, Default)]
pub struct MemorySession {
    watches: AHashMap<(UserId, String), Watch>,
    pending_deletes: AHashSet<(UserId, String)>,
}

impl MemorySession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the watch for its (user, url) pair
    pub fn insert(&mut self, watch: Watch) {
        let key = (watch.user_id, watch.url.clone());
        self.pending_deletes.remove(&key);
        self.watches.insert(key, watch);
    }

    /// Apply scheduled deletions, returning how many watches were removed
    pub fn commit(&mut self) -> usize {
        let mut removed = 0;
        for key in self.pending_deletes.drain() {
            if self.watches.remove(&key).is_some() {
                removed += 1;
            }
        }
        removed
    }

    /// Forget scheduled deletions
    pub fn rollback(&mut self) {
        self.pending_deletes.clear();
    }

    pub fn is_pending_delete(&self, watch: &Watch) -> bool {
        self.pending_deletes
            .contains(&(watch.user_id, watch.url.clone()))
    }

    pub fn pending_delete_count(&self) -> usize {
        self.pending_deletes.len()
    }

    pub fn watches_for(&self, user_id: UserId) -> impl Iterator<Item = &Watch> + '_ {
        self.watches.values().filter(move |w| w.user_id == user_id)
    }

    pub fn len(&self) -> usize {
        self.watches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.watches.is_empty()
    }
}

impl Session for MemorySession {
    fn find_watch(&self, url: &str, user_id: UserId) -> Option<Watch> {
        self.watches.get(&(user_id, url.to_string())).cloned()
    }

    fn delete_watch(&mut self, watch: &Watch) {
        self.pending_deletes
            .insert((watch.user_id, watch.url.clone()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delete_waits_for_commit() {
        let user = UserId::new();
        let mut session = MemorySession::new();
        session.insert(Watch::new("http://a", user));

        let watch = session.find_watch("http://a", user).unwrap();
        session.delete_watch(&watch);
        assert!(session.is_pending_delete(&watch));
        assert!(session.find_watch("http://a", user).is_some());

        assert_eq!(session.commit(), 1);
        assert!(session.find_watch("http://a", user).is_none());
        assert!(session.is_empty());
    }

    #[test]
    fn test_rollback_keeps_watch() {
        let user = UserId::new();
        let mut session = MemorySession::new();
        session.insert(Watch::new("http://a", user));
        session.insert(Watch::new("http://b", user));

        let watch = session.find_watch("http://a", user).unwrap();
        session.delete_watch(&watch);
        session.rollback();

        assert_eq!(session.commit(), 0);
        assert_eq!(session.watches_for(user).count(), 2);
    }
}
