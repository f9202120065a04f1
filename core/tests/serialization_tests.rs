// tests/serialization_tests.rs
mod common; // Reference the common module

use common::*;
use custodia::{ItemCheck, Order, StageKey};
use serde_json::Value;
use serial_test::serial;

/// Builds an order with evidence on several stages, the closest thing to a
/// worst case for the persisted layout.
async fn build_rich_order(harness: &TestHarness) -> Order {
  let order = place_order(harness, &user()).await;

  let mut draft = draft_fully_signed("Encargado Logística", "Coordinador Nacional");
  draft.item_checks.insert(
    "ae-1".into(),
    ItemCheck {
      verified: true,
      notes: Some("un soporte rayado".to_string()),
    },
  );
  draft.photos = vec!["salida-01.jpg".to_string(), "salida-02.jpg".to_string()];
  draft.files = vec!["remision-0001.pdf".to_string()];
  draft.general_notes = Some("salida completa".to_string());

  harness
    .engine
    .complete_stage(&logistics(), &order.id, StageKey::BodegaCheck, draft)
    .await
    .unwrap();
  harness
    .engine
    .complete_stage(
      &coordinator(),
      &order.id,
      StageKey::BodegaToCoord,
      draft_signed_by("Coordinador Nacional"),
    )
    .await
    .unwrap();

  harness.engine.order(&order.id).await.unwrap()
}

#[tokio::test]
#[serial]
async fn test_order_round_trips_through_persisted_layout() {
  setup_tracing();
  let harness = create_harness();
  let order = build_rich_order(&harness).await;

  let json = serde_json::to_string(&order).expect("serializes");
  let parsed: Order = serde_json::from_str(&json).expect("parses back");

  // Everything survives: statuses, timestamps, signatures, checklists,
  // media references, notes.
  assert_eq!(parsed, order);
}

#[tokio::test]
#[serial]
async fn test_persisted_layout_uses_wire_field_names() {
  setup_tracing();
  let harness = create_harness();
  let order = build_rich_order(&harness).await;

  let value: Value = serde_json::to_value(&order).unwrap();
  let record = value.as_object().expect("order is an object");

  for key in [
    "id",
    "items",
    "userIdentity",
    "status",
    "startDate",
    "endDate",
    "createdAt",
    "originLocation",
    "destinationLocation",
    "workflow",
  ] {
    assert!(record.contains_key(key), "missing order key '{}'", key);
  }

  let item = value["items"][0].as_object().expect("line item object");
  assert!(item.contains_key("productId"));
  assert!(item.contains_key("name"));
  assert!(item.contains_key("quantity"));

  let workflow = value["workflow"].as_object().expect("workflow object");
  for key in [
    "bodega_check",
    "bodega_to_coord",
    "coord_to_client",
    "client_to_coord",
    "coord_to_bodega",
  ] {
    assert!(workflow.contains_key(key), "missing workflow key '{}'", key);
  }

  let completed = workflow["bodega_check"].as_object().unwrap();
  assert_eq!(completed["status"], "completed");
  assert!(completed.contains_key("timestamp"));
  assert!(completed.contains_key("receivedBy"));
  assert!(completed.contains_key("itemChecks"));
  assert!(completed.contains_key("generalNotes"));
  assert_eq!(completed["signature"]["name"], "Encargado Logística");
  assert!(completed["signature"].as_object().unwrap().contains_key("dataUrl"));
}

#[tokio::test]
#[serial]
async fn test_empty_evidence_fields_are_omitted() {
  setup_tracing();
  let harness = create_harness();
  let order = place_order(&harness, &user()).await;

  let value: Value = serde_json::to_value(&order).unwrap();
  let pending = value["workflow"]["coord_to_client"].as_object().unwrap();

  assert_eq!(pending["status"], "pending");
  assert!(!pending.contains_key("timestamp"));
  assert!(!pending.contains_key("signature"));
  assert!(!pending.contains_key("receivedBy"));
  assert!(!pending.contains_key("itemChecks"));
  assert!(!pending.contains_key("photos"));
  assert!(!pending.contains_key("files"));
  assert!(!pending.contains_key("generalNotes"));
}

#[tokio::test]
#[serial]
async fn test_status_and_stage_keys_use_fixed_wire_strings() {
  setup_tracing();
  let harness = create_harness();
  let order = place_order(&harness, &user()).await;

  let value: Value = serde_json::to_value(&order).unwrap();
  assert_eq!(value["status"], "pending");

  let approved = harness.engine.approve_order(&admin(), &order.id).await.unwrap();
  let value: Value = serde_json::to_value(&approved).unwrap();
  assert_eq!(value["status"], "in_process");

  assert_eq!(serde_json::to_value(StageKey::CoordToBodega).unwrap(), "coord_to_bodega");
  let parsed: StageKey = serde_json::from_value(Value::from("client_to_coord")).unwrap();
  assert_eq!(parsed, StageKey::ClientToCoord);
}

#[tokio::test]
#[serial]
async fn test_layout_accepts_records_with_sparse_stage_data() {
  setup_tracing();
  // A record written by an earlier system iteration: bare stage objects,
  // no optional evidence fields at all.
  let json = r#"{
    "id": "ORD-0007",
    "items": [{"productId": "ae-1", "name": "Stand básico", "quantity": 1}],
    "userIdentity": "user@absolute.com",
    "status": "pending",
    "startDate": "2024-06-01",
    "endDate": "2024-06-03",
    "createdAt": "2024-05-20T15:30:00Z",
    "originLocation": "Bogotá, Colombia",
    "destinationLocation": "Cartagena, Bolívar",
    "workflow": {
      "bodega_check": {"status": "pending"},
      "bodega_to_coord": {"status": "pending"},
      "coord_to_client": {"status": "pending"},
      "client_to_coord": {"status": "pending"},
      "coord_to_bodega": {"status": "pending"}
    }
  }"#;

  let order: Order = serde_json::from_str(json).expect("sparse record parses");
  assert_eq!(order.id.as_str(), "ORD-0007");
  assert!(order.workflow.stages().all(|(_, data)| !data.is_completed()));
}
