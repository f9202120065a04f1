// custodia/src/error.rs
use anyhow::Error as AnyhowError;
use thiserror::Error;

use crate::order::model::{OrderId, ProductId};
use crate::stage::catalog::StageKey;

/// Evidence a stage completion can be missing. Rendered with the wire-level
/// field names so callers can surface the offending field directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvidenceField {
  Signature,
  ReceivedBy,
}

impl EvidenceField {
  pub fn as_str(&self) -> &'static str {
    match self {
      EvidenceField::Signature => "signature",
      EvidenceField::ReceivedBy => "receivedBy",
    }
  }
}

impl std::fmt::Display for EvidenceField {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

#[derive(Debug, Error)]
pub enum CustodiaError {
  #[error("Authorization denied: {reason}")]
  AuthorizationDenied { reason: String },

  #[error("Stage '{stage}' cannot be worked before '{predecessor}' is completed")]
  InvalidSequencing {
    stage: StageKey,
    predecessor: StageKey,
  },

  #[error("Missing evidence: {field}")]
  MissingEvidence { field: EvidenceField },

  #[error("Insufficient stock for product: {product_id}")]
  InsufficientStock { product_id: ProductId },

  #[error("Order not found: {0}")]
  OrderNotFound(OrderId),

  #[error("Invalid stage key: '{0}'")]
  StageKeyInvalid(String),

  #[error("Validation failed: {0}")]
  Validation(String),

  #[error("Backend operation failed. Source: {source}")]
  Backend {
    #[source]
    source: AnyhowError,
  },
}

impl CustodiaError {
  /// True when the caller can fix the input and resubmit. Every variant
  /// except `Backend` is a caller-side problem.
  pub fn is_recoverable(&self) -> bool {
    !matches!(self, CustodiaError::Backend { .. })
  }
}

// Conversion for errors bubbling out of storage adapters.
impl From<AnyhowError> for CustodiaError {
  fn from(err: AnyhowError) -> Self {
    CustodiaError::Backend { source: err }
  }
}

pub type CustodiaResult<T, E = CustodiaError> = std::result::Result<T, E>;
