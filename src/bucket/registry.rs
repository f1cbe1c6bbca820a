//! Lock Registry
//!
//! One mutex per shard id, created lazily and shared for the lifetime of
//! the table.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;

/// Lazily populated map of shard id → shard lock
///
/// ## Concurrency:
/// - `locks`: guarded by a registry-wide mutex held only for the
///   lookup/insert, never while a shard lock is held
/// - Shard locks: serialize every read and write of one bucket file;
///   unrelated shards proceed in parallel
#[derive(Debug, Default)]
pub struct LockRegistry {
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl LockRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The lock for `shard_id`, inserting it on first request
    ///
    /// Concurrent first requests for the same id always receive the same
    /// lock object.
    pub fn lock_for(&self, shard_id: &str) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock();
        if let Some(lock) = locks.get(shard_id) {
            return Arc::clone(lock);
        }
        let lock = Arc::new(Mutex::new(()));
        locks.insert(shard_id.to_string(), Arc::clone(&lock));
        lock
    }

    /// Number of shard locks created so far
    pub fn len(&self) -> usize {
        self.locks.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.locks.lock().is_empty()
    }
}
