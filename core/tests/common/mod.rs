// tests/common/mod.rs
#![allow(dead_code)] // Allow unused code in this common test module

use std::sync::{Arc, Mutex};

use chrono::{NaiveDate, Utc};
use custodia::{
  Actor, Custodia, InMemoryOrderRepository, InMemoryStockStore, LineItem, NewOrder,
  NotificationSink, Order, ProductId, Role, Signature, StageCompleted, StageDraft, StageKey,
};
use tracing::Level;

// --- Engine wiring with inspectable collaborators ---

/// Sink that records every event so tests can assert on edge counts.
#[derive(Debug, Default)]
pub struct RecordingSink {
  events: Mutex<Vec<StageCompleted>>,
}

impl RecordingSink {
  pub fn events(&self) -> Vec<StageCompleted> {
    self.events.lock().unwrap().clone()
  }

  pub fn count(&self) -> usize {
    self.events.lock().unwrap().len()
  }
}

impl NotificationSink for RecordingSink {
  fn stage_completed(&self, event: StageCompleted) {
    self.events.lock().unwrap().push(event);
  }
}

pub struct TestHarness {
  pub engine: Custodia,
  pub repository: Arc<InMemoryOrderRepository>,
  pub stock: Arc<InMemoryStockStore>,
  pub sink: Arc<RecordingSink>,
}

/// Engine wired to fresh in-memory stores, seeded with the demo catalog
/// stock levels (5 stands, 50 tables).
pub fn create_harness() -> TestHarness {
  let repository = Arc::new(InMemoryOrderRepository::new());
  let stock = Arc::new(InMemoryStockStore::with_stock([
    (ProductId::from("ae-1"), 5),
    (ProductId::from("mob-1"), 50),
  ]));
  let sink = Arc::new(RecordingSink::default());
  let engine = Custodia::new(repository.clone(), stock.clone(), sink.clone());
  TestHarness {
    engine,
    repository,
    stock,
    sink,
  }
}

// --- Actors matching the demo directory ---

pub fn admin() -> Actor {
  Actor::new("admin@absolute.com", Role::Admin)
}

pub fn logistics() -> Actor {
  Actor::new("logistics@absolute.com", Role::Logistics)
}

pub fn coordinator() -> Actor {
  Actor::new("coord@absolute.com", Role::Coordinator)
}

pub fn user() -> Actor {
  Actor::new("user@absolute.com", Role::User)
}

/// The actor whose department owns the given stage.
pub fn actor_for_stage(stage: StageKey) -> Actor {
  match stage {
    StageKey::BodegaCheck | StageKey::CoordToBodega => logistics(),
    _ => coordinator(),
  }
}

// --- Order and evidence builders ---

pub fn create_request(items: Vec<(&str, &str, u32)>) -> NewOrder {
  NewOrder {
    items: items
      .into_iter()
      .map(|(product_id, name, quantity)| LineItem {
        product_id: ProductId::from(product_id),
        name: name.to_string(),
        quantity,
      })
      .collect(),
    start_date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
    end_date: NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(),
    origin_location: "Bogotá, Colombia".to_string(),
    destination_location: "Medellín, Antioquia".to_string(),
  }
}

/// Places a standard two-stand order owned by `owner`.
pub async fn place_order(harness: &TestHarness, owner: &Actor) -> Order {
  harness
    .engine
    .create_order(owner, create_request(vec![("ae-1", "Stand básico", 2)]))
    .await
    .expect("order creation should succeed")
}

pub fn signature_by(name: &str) -> Signature {
  Signature {
    name: name.to_string(),
    location: "Bodega Central, Bogotá".to_string(),
    data_url: "data:image/png;base64,iVBORw0KGgo=".to_string(),
    timestamp: Utc::now(),
  }
}

/// Draft carrying only a primary signature.
pub fn draft_signed_by(name: &str) -> StageDraft {
  StageDraft {
    signature: Some(signature_by(name)),
    ..StageDraft::default()
  }
}

/// Draft carrying primary and receiver signatures, enough to close any
/// stage.
pub fn draft_fully_signed(name: &str, receiver: &str) -> StageDraft {
  StageDraft {
    signature: Some(signature_by(name)),
    received_by: Some(signature_by(receiver)),
    ..StageDraft::default()
  }
}

/// Completes stages from the first through `last` inclusive, each acted by
/// its owning department with full evidence.
pub async fn advance_through(harness: &TestHarness, order: &Order, last: StageKey) {
  for stage in StageKey::ALL {
    if stage > last {
      break;
    }
    let actor = actor_for_stage(stage);
    harness
      .engine
      .complete_stage(
        &actor,
        &order.id,
        stage,
        draft_fully_signed(&actor.identity, "Cliente Receptor"),
      )
      .await
      .unwrap_or_else(|err| panic!("completing {} should succeed: {}", stage, err));
  }
}

// --- Helper for Tracing Setup (call once per test run if needed) ---
use once_cell::sync::Lazy;
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer() // Important for tests to capture output
    .try_init()
    .ok(); // Allow multiple initializations in tests (ok if fails)
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}
