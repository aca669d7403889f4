//! Per-key async locks
//!
//! Serializes multi-statement writes on one wrestler within this process.
//! Slots are created on demand and dropped once nobody holds or waits on
//! them.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, OwnedMutexGuard};
use uuid::Uuid;

#[derive(Default)]
pub(crate) struct UpdateLocks {
    slots: Mutex<HashMap<Uuid, Arc<Mutex<()>>>>,
}

impl UpdateLocks {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Wait until no other holder of `id` remains
    pub(crate) async fn acquire(&self, id: Uuid) -> OwnedMutexGuard<()> {
        let slot = self.slots.lock().await.entry(id).or_default().clone();
        slot.lock_owned().await
    }

    /// Drop the guard and forget the slot if it is idle
    pub(crate) async fn release(&self, id: Uuid, guard: OwnedMutexGuard<()>) {
        drop(guard);
        let mut slots = self.slots.lock().await;
        if slots
            .get(&id)
            .is_some_and(|slot| Arc::strong_count(slot) == 1)
        {
            slots.remove(&id);
        }
    }

    #[cfg(test)]
    async fn len(&self) -> usize {
        self.slots.lock().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_second_holder_waits_for_release() {
        let locks = Arc::new(UpdateLocks::new());
        let id = Uuid::new_v4();

        let guard = locks.acquire(id).await;
        let waiter = {
            let locks = locks.clone();
            tokio::spawn(async move {
                let guard = locks.acquire(id).await;
                locks.release(id, guard).await;
            })
        };
        tokio::task::yield_now().await;
        assert!(!waiter.is_finished());

        locks.release(id, guard).await;
        waiter.await.unwrap();
        assert_eq!(locks.len().await, 0);
    }

    #[tokio::test]
    async fn test_distinct_keys_do_not_block() {
        let locks = UpdateLocks::new();
        let first = locks.acquire(Uuid::new_v4()).await;
        let second = locks.acquire(Uuid::new_v4()).await;
        assert_eq!(locks.len().await, 2);
        drop((first, second));
    }
}
