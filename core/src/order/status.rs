// custodia/src/order/status.rs

//! Aggregate order status derivation.
//!
//! The order's status is never set by a stage call; it is recomputed from
//! the workflow after every stage write. Only `approve_order` and
//! `cancel_order` move the status independently of stage completion.

use crate::order::model::{OrderStatus, Workflow};
use crate::stage::catalog::StageKey;

/// Recomputes the aggregate status from the five stage records.
///
/// Precedence, first match wins:
/// 1. `Cancelled` is sticky (stage writes are blocked upstream anyway).
/// 2. Warehouse return completed means the whole chain is done: `Finalized`.
/// 3. Client delivery completed: `Delivered`.
/// 4. A `Pending` order stays `Pending` until explicitly approved.
/// 5. Anything else is `InProcess`.
pub fn derive_status(current: OrderStatus, workflow: &Workflow) -> OrderStatus {
  if current == OrderStatus::Cancelled {
    return OrderStatus::Cancelled;
  }
  if workflow.stage(StageKey::CoordToBodega).is_completed() {
    return OrderStatus::Finalized;
  }
  if workflow.stage(StageKey::CoordToClient).is_completed() {
    return OrderStatus::Delivered;
  }
  if current == OrderStatus::Pending {
    return OrderStatus::Pending;
  }
  OrderStatus::InProcess
}
