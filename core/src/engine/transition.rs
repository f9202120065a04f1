// custodia/src/engine/transition.rs

//! Stage transition operations: draft saves and completions.
//!
//! Both run the same prelude under the per-order lock: load, authorize,
//! structural validation. A draft save overwrites evidence without touching
//! stage state; a completion additionally validates the evidence bar and
//! stamps the pending -> completed edge. The completion edge is the unit of
//! notification: exactly one event per edge, dispatched after the mutation
//! has committed and the lock is released.

use chrono::Utc;
use tracing::{event, instrument, Level};

use crate::access::{resolve_stage_access, AccessDenial, Actor, StageAccess};
use crate::engine::service::Custodia;
use crate::error::{CustodiaError, CustodiaResult, EvidenceField};
use crate::notify::StageCompleted;
use crate::order::model::{Order, OrderId};
use crate::order::status::derive_status;
use crate::stage::catalog::StageKey;
use crate::stage::data::{StageData, StageStatus};
use crate::stage::draft::StageDraft;

impl Custodia {
  /// Maps a resolver denial to the engine's error taxonomy. Sequencing
  /// failures get their own variant so callers can distinguish "wrong
  /// stage order" from "wrong role".
  fn authorize_mutation(order: &Order, stage: StageKey, actor: &Actor) -> CustodiaResult<()> {
    match resolve_stage_access(order, stage, actor) {
      StageAccess::Granted => Ok(()),
      StageAccess::Denied(AccessDenial::PredecessorIncomplete { predecessor }) => {
        Err(CustodiaError::InvalidSequencing { stage, predecessor })
      }
      StageAccess::Denied(denial) => Err(CustodiaError::AuthorizationDenied {
        reason: denial.reason(),
      }),
    }
  }

  /// The evidence bar for closing a stage: a complete primary signature
  /// always, plus a complete receiver signature where the catalog says so.
  fn validate_completion_evidence(stage: StageKey, data: &StageData) -> CustodiaResult<()> {
    if !data.has_primary_signature() {
      return Err(CustodiaError::MissingEvidence {
        field: EvidenceField::Signature,
      });
    }
    if stage.requires_received_by() && !data.has_receiver_signature() {
      return Err(CustodiaError::MissingEvidence {
        field: EvidenceField::ReceivedBy,
      });
    }
    Ok(())
  }

  /// Saves in-progress evidence for a stage without changing its status.
  ///
  /// On a still-pending stage any well-formed draft is accepted. On an
  /// already-completed stage the draft is an evidence correction and must
  /// still satisfy the stage's closing evidence bar; the completion
  /// timestamp is untouched either way.
  #[instrument(
    name = "Custodia::save_stage_draft",
    skip(self, draft),
    fields(order_id = %id, stage = %stage, actor = %actor.identity),
    err(Display)
  )]
  pub async fn save_stage_draft(
    &self,
    actor: &Actor,
    id: &OrderId,
    stage: StageKey,
    draft: StageDraft,
  ) -> CustodiaResult<Order> {
    let _guard = self.locks.acquire(id).await;
    let mut order = self.load_order(id).await?;
    Self::authorize_mutation(&order, stage, actor)?;
    draft.validate_against(&order)?;

    let mut updated = order.stage(stage).clone();
    draft.apply_to(&mut updated);
    if updated.is_completed() {
      Self::validate_completion_evidence(stage, &updated)?;
    }

    *order.workflow.stage_mut(stage) = updated;
    order.status = derive_status(order.status, &order.workflow);
    self.repository.save(&order).await?;
    event!(Level::DEBUG, status = %order.status, "stage draft saved");
    Ok(order)
  }

  /// Closes a stage, or corrects the evidence of an already-closed one.
  ///
  /// A fresh completion stamps the current time and fires one
  /// `StageCompleted` event; re-invoking completion on a closed stage
  /// updates evidence, keeps the original timestamp, and fires nothing.
  /// Validation failures leave the stage exactly as it was.
  #[instrument(
    name = "Custodia::complete_stage",
    skip(self, draft),
    fields(order_id = %id, stage = %stage, actor = %actor.identity),
    err(Display)
  )]
  pub async fn complete_stage(
    &self,
    actor: &Actor,
    id: &OrderId,
    stage: StageKey,
    draft: StageDraft,
  ) -> CustodiaResult<Order> {
    let (order, completion) = {
      let _guard = self.locks.acquire(id).await;
      let mut order = self.load_order(id).await?;
      Self::authorize_mutation(&order, stage, actor)?;
      draft.validate_against(&order)?;

      let mut updated = order.stage(stage).clone();
      let fresh_edge = !updated.is_completed();
      draft.apply_to(&mut updated);
      Self::validate_completion_evidence(stage, &updated)?;

      if fresh_edge {
        updated.status = StageStatus::Completed;
        updated.timestamp = Some(Utc::now());
      }

      *order.workflow.stage_mut(stage) = updated;
      order.status = derive_status(order.status, &order.workflow);
      self.repository.save(&order).await?;

      let completion = fresh_edge.then(|| StageCompleted {
        order_id: order.id.clone(),
        stage_key: stage,
        stage_label: stage.label().to_string(),
        destination_identity: order.user_identity.clone(),
      });
      (order, completion)
    };

    // The sink runs outside the critical section: a slow notifier cannot
    // stall other writers, and the committed completion can no longer be
    // rolled back by anything the sink does.
    if let Some(completed) = completion {
      event!(Level::INFO, label = %completed.stage_label, "stage completed");
      self.notifier.stage_completed(completed);
    } else {
      event!(Level::DEBUG, "evidence updated on completed stage, no event");
    }
    Ok(order)
  }
}
