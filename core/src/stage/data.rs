// custodia/src/stage/data.rs

//! Evidence and state records attached to each stage of an order.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::order::model::ProductId;

/// Lifecycle state of a single stage. A stage only ever moves
/// `Pending -> Completed`; there is no transition back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StageStatus {
  #[default]
  Pending,
  Completed,
}

/// A responsible party's sign-off. Signatures are replaced as whole values,
/// never field-merged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Signature {
  pub name: String,
  pub location: String,
  /// Captured signature image reference (data URL or stored object key).
  pub data_url: String,
  pub timestamp: DateTime<Utc>,
}

impl Signature {
  /// A signature counts as evidence only when name, location, and image
  /// reference are all non-blank.
  pub fn is_complete(&self) -> bool {
    !self.name.trim().is_empty()
      && !self.location.trim().is_empty()
      && !self.data_url.trim().is_empty()
  }
}

/// Per-line-item verification flag plus an optional inspection note.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ItemCheck {
  pub verified: bool,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub notes: Option<String>,
}

/// The evidence and state of one stage of one order.
///
/// Invariant: `timestamp` is set if and only if `status` is `Completed`.
/// The engine is the only writer of `status`/`timestamp`; callers submit
/// evidence through `StageDraft`, which cannot touch either field.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageData {
  #[serde(default)]
  pub status: StageStatus,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub timestamp: Option<DateTime<Utc>>,
  /// Primary signature of the authorizing/delivering party.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub signature: Option<Signature>,
  /// Receiving party's countersignature, for stages that require one.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub received_by: Option<Signature>,
  #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
  pub item_checks: BTreeMap<ProductId, ItemCheck>,
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub photos: Vec<String>,
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub files: Vec<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub general_notes: Option<String>,
}

impl StageData {
  pub fn is_completed(&self) -> bool {
    self.status == StageStatus::Completed
  }

  /// True when the primary signature is present and usable as evidence.
  pub fn has_primary_signature(&self) -> bool {
    self.signature.as_ref().is_some_and(Signature::is_complete)
  }

  /// True when the receiver countersignature is present and usable.
  pub fn has_receiver_signature(&self) -> bool {
    self.received_by.as_ref().is_some_and(Signature::is_complete)
  }
}
