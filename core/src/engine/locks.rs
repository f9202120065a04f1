// custodia/src/engine/locks.rs

//! Per-order mutation locks.
//!
//! Every mutating engine operation on an existing order runs under that
//! order's lock, so two role-holders can never race a stage from Pending to
//! Completed or double-fire a notification. Reads never take these locks.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

use crate::order::model::OrderId;

/// Registry of one async mutex per order id, created lazily. The guards are
/// tokio mutexes because they are held across repository awaits.
#[derive(Default)]
pub(crate) struct OrderLocks {
  entries: Mutex<HashMap<OrderId, Arc<AsyncMutex<()>>>>,
}

impl OrderLocks {
  pub(crate) fn new() -> Self {
    Self::default()
  }

  pub(crate) async fn acquire(&self, id: &OrderId) -> OwnedMutexGuard<()> {
    let entry = {
      let mut entries = self.entries.lock();
      entries.entry(id.clone()).or_default().clone()
    };
    entry.lock_owned().await
  }

  /// Drops the registry entry after an order is deleted. A waiter already
  /// parked on the old mutex simply finds the order gone when it loads.
  pub(crate) fn discard(&self, id: &OrderId) {
    self.entries.lock().remove(id);
  }

  #[cfg(test)]
  pub(crate) fn len(&self) -> usize {
    self.entries.lock().len()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[tokio::test]
  async fn locks_are_created_lazily_and_discarded() {
    let locks = OrderLocks::new();
    assert_eq!(locks.len(), 0);

    let id = OrderId::from("ORD-0001");
    {
      let _guard = locks.acquire(&id).await;
      assert_eq!(locks.len(), 1);
    }

    locks.discard(&id);
    assert_eq!(locks.len(), 0);
  }

  #[tokio::test]
  async fn same_order_blocks_second_acquisition() {
    let locks = Arc::new(OrderLocks::new());
    let id = OrderId::from("ORD-0002");

    let guard = locks.acquire(&id).await;
    let contender = {
      let locks = Arc::clone(&locks);
      let id = id.clone();
      tokio::spawn(async move {
        let _guard = locks.acquire(&id).await;
      })
    };

    // The contender cannot finish while we hold the guard.
    tokio::time::sleep(std::time::Duration::from_millis(20)).await;
    assert!(!contender.is_finished());

    drop(guard);
    contender.await.unwrap();
  }
}
