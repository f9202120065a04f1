// custodia/src/stage/draft.rs

//! Caller-supplied stage edits.
//!
//! A `StageDraft` is the only shape through which callers hand evidence to
//! the engine. It deliberately has no `status` or `timestamp` fields, so a
//! draft save cannot move a stage's state no matter what the caller sends;
//! completion is a separate engine operation.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{CustodiaError, CustodiaResult};
use crate::order::model::{Order, ProductId};
use crate::stage::data::{ItemCheck, Signature, StageData};

/// In-progress evidence for one stage: signatures, checklist flags, media
/// references, and notes. Applied as a whole-value overwrite of the stage's
/// evidence fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageDraft {
  #[serde(default)]
  pub signature: Option<Signature>,
  #[serde(default)]
  pub received_by: Option<Signature>,
  #[serde(default)]
  pub item_checks: BTreeMap<ProductId, ItemCheck>,
  #[serde(default)]
  pub photos: Vec<String>,
  #[serde(default)]
  pub files: Vec<String>,
  #[serde(default)]
  pub general_notes: Option<String>,
}

impl StageDraft {
  /// Structural well-formedness: every checklist entry must reference one
  /// of the order's line items.
  pub fn validate_against(&self, order: &Order) -> CustodiaResult<()> {
    for product_id in self.item_checks.keys() {
      if !order.items.iter().any(|item| &item.product_id == product_id) {
        return Err(CustodiaError::Validation(format!(
          "item check references product '{}' which is not on order '{}'",
          product_id, order.id
        )));
      }
    }
    Ok(())
  }

  /// Overwrites the evidence fields of `target`, leaving `status` and
  /// `timestamp` untouched.
  pub fn apply_to(&self, target: &mut StageData) {
    target.signature = self.signature.clone();
    target.received_by = self.received_by.clone();
    target.item_checks = self.item_checks.clone();
    target.photos = self.photos.clone();
    target.files = self.files.clone();
    target.general_notes = self.general_notes.clone();
  }
}
