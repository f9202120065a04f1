// src/lib.rs

//! Custodia: a custody-chain workflow engine for rental-order handoffs.
//!
//! Every order moves through the same five physical handoff stages
//! (warehouse dispatch check, handoff to coordinator, delivery at the
//! client site, pickup, return to the warehouse). Custodia enforces:
//!  - Who may act on each stage (role map + admin self-service rule).
//!  - Strict sequential progression: a stage opens only once its
//!    predecessor is completed.
//!  - The evidence bar for closing a stage (signatures, per the catalog).
//!  - Derived aggregate order status, never set directly by stage calls.
//!  - Exactly one completion event per pending -> completed edge.
//!  - Per-order serialization of all mutating operations.
//!
//! Storage and notification are collaborator traits; in-memory reference
//! adapters ship in `store::memory` for tests, examples, and demos.

pub mod access;
pub mod engine;
pub mod error;
pub mod notify;
pub mod order;
pub mod stage;
pub mod store;

// --- Re-exports for the Public API ---

pub use crate::access::{resolve_stage_access, AccessDenial, Actor, Role, StageAccess};

pub use crate::stage::catalog::{StageInfo, StageKey, CATALOG};
pub use crate::stage::data::{ItemCheck, Signature, StageData, StageStatus};
pub use crate::stage::draft::StageDraft;

pub use crate::order::model::{
  LineItem, NewOrder, Order, OrderId, OrderStatus, ProductId, Workflow,
};
pub use crate::order::status::derive_status;

pub use crate::notify::{NotificationSink, NullNotificationSink, StageCompleted, TracingNotificationSink};

pub use crate::store::memory::{InMemoryOrderRepository, InMemoryStockStore};
pub use crate::store::repository::OrderRepository;
pub use crate::store::stock::StockStore;

pub use crate::error::{CustodiaError, CustodiaResult, EvidenceField};

// The engine service itself
pub use crate::engine::Custodia;
