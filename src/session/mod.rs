//! Persistence access used by the command layer
//!
//! The caller owns the session and its transaction boundary; commands only
//! look watches up and schedule deletions.

pub mod memory;

pub use memory::MemorySession;

use crate::core::types::{UserId, Watch};

pub trait Session {
    /// Exact match on (url, user_id); at most one watch exists per pair
    fn find_watch(&self, url: &str, user_id: UserId) -> Option<Watch>;

    /// Schedule `watch` for deletion when the caller commits
    fn delete_watch(&mut self, watch: &Watch);
}
