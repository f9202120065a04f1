// custodia/src/store/repository.rs

//! Order persistence boundary.
//!
//! The engine depends only on this interface; whether orders live in
//! memory, Postgres, or a file is an adapter concern. Implementations
//! surface their own failures through `CustodiaError::Backend`.

use async_trait::async_trait;

use crate::error::CustodiaResult;
use crate::order::model::{Order, OrderId};

#[async_trait]
pub trait OrderRepository: Send + Sync {
  /// Fetches one order. `Ok(None)` means the id is unknown; the engine
  /// turns that into `OrderNotFound` at its boundary.
  async fn get(&self, id: &OrderId) -> CustodiaResult<Option<Order>>;

  /// Inserts or overwrites the full order record.
  async fn save(&self, order: &Order) -> CustodiaResult<()>;

  /// All orders, unordered. Callers sort.
  async fn list(&self) -> CustodiaResult<Vec<Order>>;

  /// Removes the record. Deleting an unknown id is not an error.
  async fn delete(&self, id: &OrderId) -> CustodiaResult<()>;

  /// Next value of the monotonically increasing order counter, starting
  /// at 1. Each call consumes a number.
  async fn next_sequence(&self) -> CustodiaResult<u64>;
}
