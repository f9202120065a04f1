// custodia/src/store/memory.rs

//! In-memory reference implementations of the storage boundaries.
//!
//! Good for tests, examples, and the demo app. Thread-safe via
//! `parking_lot` locks; no persistence across process restarts.

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use parking_lot::RwLock;
use tracing::{event, Level};

use crate::error::{CustodiaError, CustodiaResult};
use crate::order::model::{Order, OrderId, ProductId};
use crate::store::repository::OrderRepository;
use crate::store::stock::StockStore;

/// Orders in a `BTreeMap` (iteration in id order) plus the sequence
/// counter behind the `ORD-0001` ids.
#[derive(Debug, Default)]
pub struct InMemoryOrderRepository {
  orders: RwLock<BTreeMap<OrderId, Order>>,
  sequence: AtomicU64,
}

impl InMemoryOrderRepository {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn len(&self) -> usize {
    self.orders.read().len()
  }

  pub fn is_empty(&self) -> bool {
    self.orders.read().is_empty()
  }
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
  async fn get(&self, id: &OrderId) -> CustodiaResult<Option<Order>> {
    Ok(self.orders.read().get(id).cloned())
  }

  async fn save(&self, order: &Order) -> CustodiaResult<()> {
    self.orders.write().insert(order.id.clone(), order.clone());
    Ok(())
  }

  async fn list(&self) -> CustodiaResult<Vec<Order>> {
    Ok(self.orders.read().values().cloned().collect())
  }

  async fn delete(&self, id: &OrderId) -> CustodiaResult<()> {
    self.orders.write().remove(id);
    Ok(())
  }

  async fn next_sequence(&self) -> CustodiaResult<u64> {
    Ok(self.sequence.fetch_add(1, Ordering::SeqCst) + 1)
  }
}

/// Stock levels in a `HashMap`. A product with no entry has zero stock.
#[derive(Debug, Default)]
pub struct InMemoryStockStore {
  levels: RwLock<HashMap<ProductId, u32>>,
}

impl InMemoryStockStore {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_stock(levels: impl IntoIterator<Item = (ProductId, u32)>) -> Self {
    InMemoryStockStore {
      levels: RwLock::new(levels.into_iter().collect()),
    }
  }

  /// Current level, `None` for an unknown product.
  pub fn level(&self, product_id: &ProductId) -> Option<u32> {
    self.levels.read().get(product_id).copied()
  }

  pub fn set_level(&self, product_id: ProductId, quantity: u32) {
    self.levels.write().insert(product_id, quantity);
  }
}

#[async_trait]
impl StockStore for InMemoryStockStore {
  async fn decrement(&self, product_id: &ProductId, quantity: u32) -> CustodiaResult<()> {
    let mut levels = self.levels.write();
    let available = levels.get(product_id).copied().unwrap_or(0);
    if available < quantity {
      event!(
        Level::WARN,
        product_id = %product_id,
        requested = quantity,
        available,
        "stock decrement refused"
      );
      return Err(CustodiaError::InsufficientStock {
        product_id: product_id.clone(),
      });
    }
    levels.insert(product_id.clone(), available - quantity);
    Ok(())
  }

  async fn restock(&self, product_id: &ProductId, quantity: u32) -> CustodiaResult<()> {
    let mut levels = self.levels.write();
    let entry = levels.entry(product_id.clone()).or_insert(0);
    *entry = entry.saturating_add(quantity);
    Ok(())
  }
}
