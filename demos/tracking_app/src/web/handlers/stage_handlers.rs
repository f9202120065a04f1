// demos/tracking_app/src/web/handlers/stage_handlers.rs

//! Per-stage workflow endpoints: the access probe UIs render buttons
//! from, draft saves, and completion.

use actix_web::{web, HttpResponse};
use serde_json::json;
use tracing::{info, instrument};

use custodia::{OrderId, StageDraft, StageKey};

use crate::errors::ApiError;
use crate::state::AppState;
use crate::web::handlers::ActingUser;

/// Parses the `{stage_key}` path segment into a catalog key. Unknown
/// keys surface as the engine's own error so the HTTP mapping stays in
/// one place.
fn parse_stage_key(raw: &str) -> Result<StageKey, ApiError> {
  Ok(StageKey::try_from(raw)?)
}

#[instrument(
  name = "handler::stage_access",
  skip(app_state, path, acting),
  fields(actor = %acting.actor.identity)
)]
pub async fn stage_access_handler(
  app_state: web::Data<AppState>,
  path: web::Path<(String, String)>,
  acting: ActingUser,
) -> Result<HttpResponse, ApiError> {
  let (raw_order_id, raw_stage_key) = path.into_inner();
  let order_id = OrderId::from(raw_order_id.as_str());
  let stage = parse_stage_key(&raw_stage_key)?;

  let access = app_state.engine.stage_access(&order_id, stage, &acting.actor).await?;

  Ok(HttpResponse::Ok().json(json!({
      "orderId": order_id,
      "stage": stage,
      "permitted": access.permitted(),
      "reason": access.reason()
  })))
}

#[instrument(
  name = "handler::save_stage",
  skip(app_state, path, draft, acting),
  fields(actor = %acting.actor.identity)
)]
pub async fn save_stage_handler(
  app_state: web::Data<AppState>,
  path: web::Path<(String, String)>,
  draft: web::Json<StageDraft>,
  acting: ActingUser,
) -> Result<HttpResponse, ApiError> {
  let (raw_order_id, raw_stage_key) = path.into_inner();
  let order_id = OrderId::from(raw_order_id.as_str());
  let stage = parse_stage_key(&raw_stage_key)?;

  let order = app_state
    .engine
    .save_stage_draft(&acting.actor, &order_id, stage, draft.into_inner())
    .await?;
  info!("Stage {} of {} saved by {}.", stage, order.id, acting.actor.identity);

  Ok(HttpResponse::Ok().json(json!({
      "message": "Stage progress saved.",
      "order": order
  })))
}

#[instrument(
  name = "handler::complete_stage",
  skip(app_state, path, draft, acting),
  fields(actor = %acting.actor.identity)
)]
pub async fn complete_stage_handler(
  app_state: web::Data<AppState>,
  path: web::Path<(String, String)>,
  draft: web::Json<StageDraft>,
  acting: ActingUser,
) -> Result<HttpResponse, ApiError> {
  let (raw_order_id, raw_stage_key) = path.into_inner();
  let order_id = OrderId::from(raw_order_id.as_str());
  let stage = parse_stage_key(&raw_stage_key)?;

  let order = app_state
    .engine
    .complete_stage(&acting.actor, &order_id, stage, draft.into_inner())
    .await?;
  info!("Stage {} of {} completed by {}.", stage, order.id, acting.actor.identity);

  Ok(HttpResponse::Ok().json(json!({
      "message": "Stage completed.",
      "order": order
  })))
}
