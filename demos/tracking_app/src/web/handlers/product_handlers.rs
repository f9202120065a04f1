// demos/tracking_app/src/web/handlers/product_handlers.rs

use actix_web::{web, HttpResponse};
use serde_json::json;
use tracing::{info, instrument, warn};

use custodia::ProductId;

use crate::errors::ApiError;
use crate::state::AppState;

#[instrument(name = "handler::list_products", skip(app_state))]
pub async fn list_products_handler(app_state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
  let products = app_state.catalog.list();
  info!("Successfully fetched {} products.", products.len());

  Ok(HttpResponse::Ok().json(json!({
      "message": "Products fetched successfully.",
      "products": products
  })))
}

#[instrument(name = "handler::get_product", skip(app_state, path), fields(product_id = %path.as_ref()))]
pub async fn get_product_handler(
  app_state: web::Data<AppState>,
  path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
  let product_id = ProductId::from(path.into_inner().as_str());

  match app_state.catalog.find(&product_id) {
    Some(product) => Ok(HttpResponse::Ok().json(json!({
        "message": "Product fetched successfully.",
        "product": product
    }))),
    None => {
      warn!("Product with ID {} not found.", product_id);
      Err(ApiError::NotFound(format!(
        "Product with ID {} not found.",
        product_id
      )))
    }
  }
}
