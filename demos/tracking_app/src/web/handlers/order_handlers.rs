// demos/tracking_app/src/web/handlers/order_handlers.rs

//! Order lifecycle endpoints. Thin: every rule lives in the engine, the
//! handlers only translate between HTTP and `custodia` types.

use actix_web::{web, HttpResponse};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;
use tracing::{info, instrument, warn};

use custodia::{LineItem, NewOrder, OrderId, ProductId};

use crate::errors::ApiError;
use crate::state::AppState;
use crate::web::handlers::ActingUser;

// --- Request DTOs ---

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct OrderLinePayload {
  pub product_id: ProductId,
  pub quantity: u32,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderPayload {
  pub items: Vec<OrderLinePayload>,
  pub start_date: NaiveDate,
  pub end_date: NaiveDate,
  /// Defaults to the configured warehouse location when omitted.
  #[serde(default)]
  pub origin_location: Option<String>,
  pub destination_location: String,
}

// --- Handler Implementations ---

#[instrument(
  name = "handler::create_order",
  skip(app_state, payload, acting),
  fields(actor = %acting.actor.identity, lines = payload.items.len())
)]
pub async fn create_order_handler(
  app_state: web::Data<AppState>,
  payload: web::Json<CreateOrderPayload>,
  acting: ActingUser,
) -> Result<HttpResponse, ApiError> {
  let payload = payload.into_inner();

  // Snapshot display names at intake; the catalog may change later, the
  // order keeps the names it was placed with.
  let mut items = Vec::with_capacity(payload.items.len());
  for line in payload.items {
    let name = app_state.catalog.name_of(&line.product_id).ok_or_else(|| {
      warn!("Order intake refused: product {} is not in the catalog.", line.product_id);
      ApiError::NotFound(format!("Product with ID {} not found.", line.product_id))
    })?;
    items.push(LineItem {
      product_id: line.product_id,
      name,
      quantity: line.quantity,
    });
  }

  let request = NewOrder {
    items,
    start_date: payload.start_date,
    end_date: payload.end_date,
    origin_location: payload
      .origin_location
      .unwrap_or_else(|| app_state.config.default_origin_location.clone()),
    destination_location: payload.destination_location,
  };

  let order = app_state.engine.create_order(&acting.actor, request).await?;
  info!("Order {} created for {}.", order.id, acting.actor.identity);

  Ok(HttpResponse::Created().json(json!({
      "message": "Order created successfully.",
      "order": order
  })))
}

#[instrument(name = "handler::list_orders", skip(app_state, acting), fields(actor = %acting.actor.identity))]
pub async fn list_orders_handler(
  app_state: web::Data<AppState>,
  acting: ActingUser,
) -> Result<HttpResponse, ApiError> {
  let orders = app_state.engine.orders_for(&acting.actor).await?;
  info!("Listed {} orders for {}.", orders.len(), acting.actor.identity);

  Ok(HttpResponse::Ok().json(json!({
      "message": "Orders fetched successfully.",
      "orders": orders
  })))
}

#[instrument(
  name = "handler::get_order",
  skip(app_state, path, acting),
  fields(order_id = %path.as_ref(), actor = %acting.actor.identity)
)]
pub async fn get_order_handler(
  app_state: web::Data<AppState>,
  path: web::Path<String>,
  acting: ActingUser,
) -> Result<HttpResponse, ApiError> {
  let order_id = OrderId::from(path.into_inner().as_str());
  let order = app_state.engine.order(&order_id).await?;

  Ok(HttpResponse::Ok().json(json!({
      "message": "Order fetched successfully.",
      "order": order
  })))
}

#[instrument(
  name = "handler::approve_order",
  skip(app_state, path, acting),
  fields(order_id = %path.as_ref(), actor = %acting.actor.identity)
)]
pub async fn approve_order_handler(
  app_state: web::Data<AppState>,
  path: web::Path<String>,
  acting: ActingUser,
) -> Result<HttpResponse, ApiError> {
  let order_id = OrderId::from(path.into_inner().as_str());
  let order = app_state.engine.approve_order(&acting.actor, &order_id).await?;
  info!("Order {} approved by {}.", order.id, acting.actor.identity);

  Ok(HttpResponse::Ok().json(json!({
      "message": "Order approved.",
      "order": order
  })))
}

#[instrument(
  name = "handler::cancel_order",
  skip(app_state, path, acting),
  fields(order_id = %path.as_ref(), actor = %acting.actor.identity)
)]
pub async fn cancel_order_handler(
  app_state: web::Data<AppState>,
  path: web::Path<String>,
  acting: ActingUser,
) -> Result<HttpResponse, ApiError> {
  let order_id = OrderId::from(path.into_inner().as_str());
  let order = app_state.engine.cancel_order(&acting.actor, &order_id).await?;
  info!("Order {} cancelled by {}.", order.id, acting.actor.identity);

  Ok(HttpResponse::Ok().json(json!({
      "message": "Order cancelled. Reserved stock is not returned.",
      "order": order
  })))
}

#[instrument(
  name = "handler::delete_order",
  skip(app_state, path, acting),
  fields(order_id = %path.as_ref(), actor = %acting.actor.identity)
)]
pub async fn delete_order_handler(
  app_state: web::Data<AppState>,
  path: web::Path<String>,
  acting: ActingUser,
) -> Result<HttpResponse, ApiError> {
  let order_id = OrderId::from(path.into_inner().as_str());
  app_state.engine.delete_order(&acting.actor, &order_id).await?;
  info!("Order {} deleted by {}.", order_id, acting.actor.identity);

  Ok(HttpResponse::Ok().json(json!({
      "message": "Order deleted."
  })))
}
