// custodia/src/notify.rs

//! The notification boundary.
//!
//! The engine emits exactly one `StageCompleted` event per pending ->
//! completed edge and hands it to a `NotificationSink`. Composing and
//! delivering the actual message (e-mail, push, whatever) is entirely the
//! sink's business; the engine gets no delivery feedback and never retries.

use tracing::{event, Level};

use crate::order::model::OrderId;
use crate::stage::catalog::StageKey;

/// A stage crossed its completion edge. Fired once per edge, after the
/// mutation has committed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageCompleted {
  pub order_id: OrderId,
  pub stage_key: StageKey,
  /// Catalog display label for the stage, ready for message subjects.
  pub stage_label: String,
  /// Identity of the user who placed the order.
  pub destination_identity: String,
}

/// Receives completion events. Implementations must not block: hand the
/// event to a channel or queue and return. A slow or failing sink must
/// never be able to roll back an already-committed stage completion.
pub trait NotificationSink: Send + Sync {
  fn stage_completed(&self, event: StageCompleted);
}

/// Reference sink that just logs the event. Useful for examples and as the
/// default when no real dispatcher is wired.
#[derive(Debug, Default)]
pub struct TracingNotificationSink;

impl NotificationSink for TracingNotificationSink {
  fn stage_completed(&self, completed: StageCompleted) {
    event!(
      Level::INFO,
      order_id = %completed.order_id,
      stage = %completed.stage_key,
      label = %completed.stage_label,
      destination = %completed.destination_identity,
      "stage completed"
    );
  }
}

/// Sink that drops every event. For tests and wiring that opts out of
/// notifications entirely.
#[derive(Debug, Default)]
pub struct NullNotificationSink;

impl NotificationSink for NullNotificationSink {
  fn stage_completed(&self, _event: StageCompleted) {}
}
