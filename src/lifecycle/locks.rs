//! Per-indice serialization of lifecycle transitions

use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

type LockMap = DashMap<String, Arc<Mutex<()>>>;

/// One async mutex per logical indice name
///
/// Only serializes callers sharing this value, i.e. one process. Writers in
/// other processes still need external coordination. An entry lives only
/// while some caller holds or waits on it.
#[derive(Debug, Default)]
pub struct IndiceLocks {
    enabled: bool,
    locks: Arc<LockMap>,
}

/// Exclusive access to one indice name, released on drop
#[derive(Debug)]
pub struct IndiceGuard {
    guard: Option<OwnedMutexGuard<()>>,
    indice: String,
    locks: Arc<LockMap>,
}

impl Drop for IndiceGuard {
    fn drop(&mut self) {
        // Unlock before the count check so the map's Arc is the last one
        self.guard.take();
        self.locks
            .remove_if(&self.indice, |_, lock| Arc::strong_count(lock) == 1);
    }
}

impl IndiceLocks {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            locks: Arc::new(DashMap::new()),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Wait for exclusive access to `indice`; `None` when serialization is off
    pub async fn acquire(&self, indice: &str) -> Option<IndiceGuard> {
        if !self.enabled {
            return None;
        }

        // Clone the Arc out so the map shard is not locked while waiting
        let lock = self
            .locks
            .entry(indice.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();

        let guard = lock.lock_owned().await;
        Some(IndiceGuard {
            guard: Some(guard),
            indice: indice.to_string(),
            locks: self.locks.clone(),
        })
    }

    /// Number of indice names currently held or awaited
    pub fn len(&self) -> usize {
        self.locks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }
}
