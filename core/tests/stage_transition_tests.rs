// tests/stage_transition_tests.rs
mod common; // Reference the common module

use common::*;
use custodia::{CustodiaError, StageDraft, StageKey, StageStatus};
use serial_test::serial;

#[tokio::test]
#[serial]
async fn test_completion_requires_primary_signature() {
  setup_tracing();
  let harness = create_harness();
  let order = place_order(&harness, &user()).await;

  let result = harness
    .engine
    .complete_stage(&logistics(), &order.id, StageKey::BodegaCheck, StageDraft::default())
    .await;

  match result {
    Err(CustodiaError::MissingEvidence { field }) => {
      assert_eq!(field.as_str(), "signature");
    }
    other => panic!("expected MissingEvidence, got {:?}", other),
  }
  assert_eq!(harness.sink.count(), 0);
}

#[tokio::test]
#[serial]
async fn test_blank_signature_fields_do_not_count_as_evidence() {
  setup_tracing();
  let harness = create_harness();
  let order = place_order(&harness, &user()).await;

  let mut draft = draft_signed_by("Encargado Logística");
  if let Some(signature) = draft.signature.as_mut() {
    signature.location = "   ".to_string();
  }

  let result = harness
    .engine
    .complete_stage(&logistics(), &order.id, StageKey::BodegaCheck, draft)
    .await;
  assert!(matches!(result, Err(CustodiaError::MissingEvidence { .. })));
}

#[tokio::test]
#[serial]
async fn test_receiver_signature_required_only_for_flagged_stages() {
  setup_tracing();
  let harness = create_harness();
  let order = place_order(&harness, &user()).await;
  advance_through(&harness, &order, StageKey::BodegaCheck).await;

  // Scenario: bodega_to_coord closes with a primary signature alone.
  harness
    .engine
    .complete_stage(
      &coordinator(),
      &order.id,
      StageKey::BodegaToCoord,
      draft_signed_by("Coordinador Nacional"),
    )
    .await
    .expect("no receiver required for the transit handoff");

  // coord_to_client must not.
  let result = harness
    .engine
    .complete_stage(
      &coordinator(),
      &order.id,
      StageKey::CoordToClient,
      draft_signed_by("Coordinador Nacional"),
    )
    .await;

  match result {
    Err(CustodiaError::MissingEvidence { field }) => {
      assert_eq!(field.as_str(), "receivedBy");
    }
    other => panic!("expected MissingEvidence(receivedBy), got {:?}", other),
  }
}

#[tokio::test]
#[serial]
async fn test_completion_stamps_timestamp_and_fires_once() {
  setup_tracing();
  let harness = create_harness();
  let order = place_order(&harness, &user()).await;

  let updated = harness
    .engine
    .complete_stage(
      &logistics(),
      &order.id,
      StageKey::BodegaCheck,
      draft_signed_by("Encargado Logística"),
    )
    .await
    .unwrap();

  let stage = updated.stage(StageKey::BodegaCheck);
  assert_eq!(stage.status, StageStatus::Completed);
  assert!(stage.timestamp.is_some());

  let events = harness.sink.events();
  assert_eq!(events.len(), 1);
  assert_eq!(events[0].order_id, order.id);
  assert_eq!(events[0].stage_key, StageKey::BodegaCheck);
  assert_eq!(events[0].stage_label, "Verificación en Bodega");
  assert_eq!(events[0].destination_identity, "user@absolute.com");
}

#[tokio::test]
#[serial]
async fn test_recompletion_updates_evidence_without_new_edge() {
  setup_tracing();
  let harness = create_harness();
  let order = place_order(&harness, &user()).await;

  let first = harness
    .engine
    .complete_stage(
      &logistics(),
      &order.id,
      StageKey::BodegaCheck,
      draft_signed_by("Encargado Logística"),
    )
    .await
    .unwrap();
  let first_timestamp = first.stage(StageKey::BodegaCheck).timestamp;

  tokio::time::sleep(std::time::Duration::from_millis(5)).await;

  let mut correction = draft_signed_by("Encargado Logística");
  correction.general_notes = Some("se corrige el conteo de cables".to_string());
  let second = harness
    .engine
    .complete_stage(&logistics(), &order.id, StageKey::BodegaCheck, correction)
    .await
    .expect("re-completion is an idempotent evidence update");

  let stage = second.stage(StageKey::BodegaCheck);
  assert_eq!(stage.status, StageStatus::Completed);
  assert_eq!(stage.timestamp, first_timestamp);
  assert_eq!(stage.general_notes.as_deref(), Some("se corrige el conteo de cables"));
  assert_eq!(harness.sink.count(), 1);
}

#[tokio::test]
#[serial]
async fn test_draft_save_never_changes_stage_status() {
  setup_tracing();
  let harness = create_harness();
  let order = place_order(&harness, &user()).await;

  let mut draft = draft_signed_by("Encargado Logística");
  draft.photos = vec!["photo-001.jpg".to_string()];
  draft.general_notes = Some("pendiente revisar cables".to_string());

  let updated = harness
    .engine
    .save_stage_draft(&logistics(), &order.id, StageKey::BodegaCheck, draft)
    .await
    .unwrap();

  let stage = updated.stage(StageKey::BodegaCheck);
  assert_eq!(stage.status, StageStatus::Pending);
  assert!(stage.timestamp.is_none());
  assert_eq!(stage.photos, vec!["photo-001.jpg".to_string()]);
  assert_eq!(harness.sink.count(), 0);
}

#[tokio::test]
#[serial]
async fn test_draft_rejects_checks_for_foreign_products() {
  setup_tracing();
  let harness = create_harness();
  let order = place_order(&harness, &user()).await;

  let mut draft = StageDraft::default();
  draft.item_checks.insert("mob-1".into(), custodia::ItemCheck {
    verified: true,
    notes: None,
  });

  let result = harness
    .engine
    .save_stage_draft(&logistics(), &order.id, StageKey::BodegaCheck, draft)
    .await;
  assert!(matches!(result, Err(CustodiaError::Validation(_))));
}

#[tokio::test]
#[serial]
async fn test_draft_cannot_hollow_out_a_completed_stage() {
  setup_tracing();
  let harness = create_harness();
  let order = place_order(&harness, &user()).await;
  advance_through(&harness, &order, StageKey::BodegaCheck).await;

  // An empty draft would strip the signature from a closed stage.
  let result = harness
    .engine
    .save_stage_draft(&logistics(), &order.id, StageKey::BodegaCheck, StageDraft::default())
    .await;
  assert!(matches!(result, Err(CustodiaError::MissingEvidence { .. })));

  // The stage keeps its original evidence.
  let reloaded = harness.engine.order(&order.id).await.unwrap();
  assert!(reloaded.stage(StageKey::BodegaCheck).has_primary_signature());
}

#[tokio::test]
#[serial]
async fn test_failed_completion_leaves_stage_untouched() {
  setup_tracing();
  let harness = create_harness();
  let order = place_order(&harness, &user()).await;

  let mut draft = draft_signed_by("Encargado Logística");
  draft.general_notes = Some("intento fallido".to_string());
  if let Some(signature) = draft.signature.as_mut() {
    signature.name = String::new();
  }

  let result = harness
    .engine
    .complete_stage(&logistics(), &order.id, StageKey::BodegaCheck, draft)
    .await;
  assert!(matches!(result, Err(CustodiaError::MissingEvidence { .. })));

  let reloaded = harness.engine.order(&order.id).await.unwrap();
  let stage = reloaded.stage(StageKey::BodegaCheck);
  assert_eq!(stage.status, StageStatus::Pending);
  assert!(stage.general_notes.is_none());
}

#[tokio::test]
#[serial]
async fn test_unknown_stage_key_parses_to_error() {
  setup_tracing();
  let result = "bodega_checkk".parse::<StageKey>();
  match result {
    Err(CustodiaError::StageKeyInvalid(key)) => assert_eq!(key, "bodega_checkk"),
    other => panic!("expected StageKeyInvalid, got {:?}", other),
  }
}
