// custodia/src/engine/lifecycle.rs

//! Order lifecycle operations: create, approve, cancel, delete.

use tracing::{event, instrument, Level};

use crate::access::{Actor, Role};
use crate::engine::service::Custodia;
use crate::error::{CustodiaError, CustodiaResult};
use crate::order::model::{NewOrder, Order, OrderId, OrderStatus, ProductId};

impl Custodia {
  /// Places a new order.
  ///
  /// Stock is reserved line by line; if any line cannot be covered (or the
  /// save itself fails), every decrement already applied is put back and
  /// the creation fails as a whole. The order id is drawn from the
  /// repository's sequence only after stock is secured, the acting
  /// identity becomes the order's owner, and all five stages start
  /// Pending with empty evidence. Any role may place an order.
  #[instrument(
    name = "Custodia::create_order",
    skip(self, request),
    fields(actor = %actor.identity, lines = request.items.len()),
    err(Display)
  )]
  pub async fn create_order(&self, actor: &Actor, request: NewOrder) -> CustodiaResult<Order> {
    if request.items.is_empty() {
      return Err(CustodiaError::Validation(
        "order must contain at least one line item".to_string(),
      ));
    }
    if let Some(item) = request.items.iter().find(|item| item.quantity == 0) {
      return Err(CustodiaError::Validation(format!(
        "line item '{}' has zero quantity",
        item.product_id
      )));
    }
    if request.end_date < request.start_date {
      return Err(CustodiaError::Validation(format!(
        "end date {} precedes start date {}",
        request.end_date, request.start_date
      )));
    }

    let mut reserved: Vec<(ProductId, u32)> = Vec::with_capacity(request.items.len());
    for item in &request.items {
      if let Err(err) = self.stock.decrement(&item.product_id, item.quantity).await {
        self.release_reserved(&reserved).await;
        return Err(err);
      }
      reserved.push((item.product_id.clone(), item.quantity));
    }

    let sequence = match self.repository.next_sequence().await {
      Ok(sequence) => sequence,
      Err(err) => {
        self.release_reserved(&reserved).await;
        return Err(err);
      }
    };

    let order = Order::new(OrderId::from_sequence(sequence), actor.identity.clone(), request);
    if let Err(err) = self.repository.save(&order).await {
      self.release_reserved(&reserved).await;
      return Err(err);
    }

    event!(Level::INFO, order_id = %order.id, "order created");
    Ok(order)
  }

  /// Puts back stock taken by a creation that could not finish.
  async fn release_reserved(&self, reserved: &[(ProductId, u32)]) {
    for (product_id, quantity) in reserved {
      if let Err(err) = self.stock.restock(product_id, *quantity).await {
        // Nothing sensible to do beyond flagging it for the operator.
        event!(
          Level::ERROR,
          product_id = %product_id,
          quantity = *quantity,
          error = %err,
          "stock compensation failed"
        );
      }
    }
  }

  /// Approves a pending order, moving it to `InProcess`. Admin only.
  #[instrument(name = "Custodia::approve_order", skip(self), fields(order_id = %id, actor = %actor.identity), err(Display))]
  pub async fn approve_order(&self, actor: &Actor, id: &OrderId) -> CustodiaResult<Order> {
    if actor.role != Role::Admin {
      return Err(CustodiaError::AuthorizationDenied {
        reason: "only Admin may approve orders".to_string(),
      });
    }

    let _guard = self.locks.acquire(id).await;
    let mut order = self.load_order(id).await?;
    if order.status != OrderStatus::Pending {
      return Err(CustodiaError::Validation(format!(
        "order '{}' is {} and cannot be approved",
        order.id, order.status
      )));
    }

    order.status = OrderStatus::InProcess;
    self.repository.save(&order).await?;
    event!(Level::INFO, "order approved");
    Ok(order)
  }

  /// Cancels an order from any non-terminal status. Permitted to Admin and
  /// to the order's owner. Irreversible, and reserved stock stays taken.
  #[instrument(name = "Custodia::cancel_order", skip(self), fields(order_id = %id, actor = %actor.identity), err(Display))]
  pub async fn cancel_order(&self, actor: &Actor, id: &OrderId) -> CustodiaResult<Order> {
    let _guard = self.locks.acquire(id).await;
    let mut order = self.load_order(id).await?;

    if actor.role != Role::Admin && !order.is_owned_by(&actor.identity) {
      return Err(CustodiaError::AuthorizationDenied {
        reason: "only Admin or the order's owner may cancel".to_string(),
      });
    }
    if order.status.is_terminal() {
      return Err(CustodiaError::Validation(format!(
        "order '{}' is {} and cannot be cancelled",
        order.id, order.status
      )));
    }

    order.status = OrderStatus::Cancelled;
    self.repository.save(&order).await?;
    event!(Level::INFO, "order cancelled, stock not restored");
    Ok(order)
  }

  /// Removes the order record entirely. Admin only. The per-order lock is
  /// held for the removal, so no stage write can interleave with it.
  #[instrument(name = "Custodia::delete_order", skip(self), fields(order_id = %id, actor = %actor.identity), err(Display))]
  pub async fn delete_order(&self, actor: &Actor, id: &OrderId) -> CustodiaResult<()> {
    if actor.role != Role::Admin {
      return Err(CustodiaError::AuthorizationDenied {
        reason: "only Admin may delete orders".to_string(),
      });
    }

    {
      let _guard = self.locks.acquire(id).await;
      self.load_order(id).await?;
      self.repository.delete(id).await?;
    }
    self.locks.discard(id);
    event!(Level::INFO, "order deleted");
    Ok(())
  }
}
