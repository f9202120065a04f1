// custodia/src/engine/service.rs

//! The `Custodia` engine service and its read-side operations.
//!
//! The service owns nothing but handles: storage and notification
//! collaborators arrive as trait objects, so the same engine runs against
//! the in-memory adapters in tests and against real stores in an
//! application. Mutating operations live in the `lifecycle` and
//! `transition` modules; everything here is lock-free reads.

use std::sync::Arc;

use tracing::{event, instrument, Level};

use crate::access::{resolve_stage_access, Actor, Role, StageAccess};
use crate::engine::locks::OrderLocks;
use crate::error::{CustodiaError, CustodiaResult};
use crate::notify::NotificationSink;
use crate::order::model::{Order, OrderId};
use crate::stage::catalog::StageKey;
use crate::store::repository::OrderRepository;
use crate::store::stock::StockStore;

/// The workflow engine. Cheap to share behind an `Arc`; all methods take
/// `&self`.
pub struct Custodia {
  pub(crate) repository: Arc<dyn OrderRepository>,
  pub(crate) stock: Arc<dyn StockStore>,
  pub(crate) notifier: Arc<dyn NotificationSink>,
  pub(crate) locks: OrderLocks,
}

impl Custodia {
  pub fn new(
    repository: Arc<dyn OrderRepository>,
    stock: Arc<dyn StockStore>,
    notifier: Arc<dyn NotificationSink>,
  ) -> Self {
    Custodia {
      repository,
      stock,
      notifier,
      locks: OrderLocks::new(),
    }
  }

  /// Fetches an order or fails with `OrderNotFound`.
  pub(crate) async fn load_order(&self, id: &OrderId) -> CustodiaResult<Order> {
    self
      .repository
      .get(id)
      .await?
      .ok_or_else(|| CustodiaError::OrderNotFound(id.clone()))
  }

  /// Single-order fetch. Unfiltered: viewing is always permitted, only
  /// mutation is gated.
  pub async fn order(&self, id: &OrderId) -> CustodiaResult<Order> {
    self.load_order(id).await
  }

  /// Orders visible to `actor`, newest first. Staff roles see everything;
  /// an ordinary user sees only the orders they placed.
  #[instrument(name = "Custodia::orders_for", skip(self), fields(actor = %actor.identity, role = %actor.role))]
  pub async fn orders_for(&self, actor: &Actor) -> CustodiaResult<Vec<Order>> {
    let mut orders = self.repository.list().await?;
    if actor.role == Role::User {
      orders.retain(|order| order.is_owned_by(&actor.identity));
    }
    orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    event!(Level::DEBUG, count = orders.len(), "orders listed");
    Ok(orders)
  }

  /// Runs the authorization resolver against the current state of an
  /// order. Read-only; UIs use this to render permitted/denied state
  /// without re-deriving role rules.
  pub async fn stage_access(
    &self,
    id: &OrderId,
    stage: StageKey,
    actor: &Actor,
  ) -> CustodiaResult<StageAccess> {
    let order = self.load_order(id).await?;
    Ok(resolve_stage_access(&order, stage, actor))
  }
}
