// custodia/src/store/stock.rs

//! Product stock boundary.
//!
//! Order creation reserves stock through this interface. The engine only
//! ever decrements; `restock` exists so a creation that fails partway
//! through a multi-line decrement can put back what it already took.
//! Cancelling an order does NOT restock (documented policy).

use async_trait::async_trait;

use crate::error::CustodiaResult;
use crate::order::model::ProductId;

#[async_trait]
pub trait StockStore: Send + Sync {
  /// Takes `quantity` units of the product. Fails with
  /// `InsufficientStock` when fewer are available (an unknown product has
  /// zero available).
  async fn decrement(&self, product_id: &ProductId, quantity: u32) -> CustodiaResult<()>;

  /// Returns `quantity` units. Compensation path only.
  async fn restock(&self, product_id: &ProductId, quantity: u32) -> CustodiaResult<()>;
}
