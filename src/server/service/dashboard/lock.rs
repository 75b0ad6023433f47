use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

type LockMap = Arc<Mutex<HashMap<String, Arc<AsyncMutex<()>>>>>;

/// Per-principal locks serializing read-modify-write of a principal's cache record.
///
/// Section fetches run outside the lock; only the reload, merge and save of the record
/// happen while it is held. A principal's entry lives only while someone holds or waits
/// for its lock.
#[derive(Clone, Default)]
pub struct PrincipalLocks {
    locks: LockMap,
}

/// Held lock for one principal; releasing it prunes the entry once nobody else needs it.
pub struct PrincipalGuard {
    guard: Option<OwnedMutexGuard<()>>,
    principal_id: String,
    locks: LockMap,
}

impl PrincipalLocks {
    pub async fn acquire(&self, principal_id: &str) -> PrincipalGuard {
        let lock = {
            let mut locks = self.locks.lock().unwrap_or_else(|e| e.into_inner());
            locks
                .entry(principal_id.to_string())
                .or_default()
                .clone()
        };

        PrincipalGuard {
            guard: Some(lock.lock_owned().await),
            principal_id: principal_id.to_string(),
            locks: self.locks.clone(),
        }
    }

    #[cfg(test)]
    fn tracked(&self) -> usize {
        self.locks.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}

impl Drop for PrincipalGuard {
    fn drop(&mut self) {
        drop(self.guard.take());

        // Waiters hold a clone of the mutex, so a count of one means the map holds the last reference
        let mut locks = self.locks.lock().unwrap_or_else(|e| e.into_inner());
        if locks
            .get(&self.principal_id)
            .is_some_and(|lock| Arc::strong_count(lock) == 1)
        {
            locks.remove(&self.principal_id);
        }
    }
}
