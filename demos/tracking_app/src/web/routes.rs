// demos/tracking_app/src/web/routes.rs

use actix_web::web;

// Simple liveness probe. The demo holds everything in memory, so there is
// no downstream dependency worth checking here.
async fn health_check_handler() -> actix_web::HttpResponse {
  actix_web::HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}

// Called from `main.rs` to configure services for the Actix App.
pub fn configure_app_routes(cfg: &mut web::ServiceConfig) {
  cfg.service(
    web::scope("/api/v1") // Base path for API version 1
      // Health Check Route
      .route("/health", web::get().to(health_check_handler))
      // Identity echo (the demo's stand-in for a session endpoint)
      .route(
        "/me",
        web::get().to(crate::web::handlers::identity::me_handler),
      )
      // Catalog Routes (read-only; stock reflects live reservations)
      .service(
        web::scope("/products")
          .route(
            "",
            web::get().to(crate::web::handlers::product_handlers::list_products_handler),
          )
          .route(
            "/{product_id}",
            web::get().to(crate::web::handlers::product_handlers::get_product_handler),
          ),
      )
      // Order lifecycle and the per-stage workflow surface
      .service(
        web::scope("/orders")
          .route(
            "",
            web::post().to(crate::web::handlers::order_handlers::create_order_handler),
          )
          .route(
            "",
            web::get().to(crate::web::handlers::order_handlers::list_orders_handler),
          )
          .route(
            "/{order_id}",
            web::get().to(crate::web::handlers::order_handlers::get_order_handler),
          )
          .route(
            "/{order_id}",
            web::delete().to(crate::web::handlers::order_handlers::delete_order_handler),
          )
          .route(
            "/{order_id}/approve",
            web::post().to(crate::web::handlers::order_handlers::approve_order_handler),
          )
          .route(
            "/{order_id}/cancel",
            web::post().to(crate::web::handlers::order_handlers::cancel_order_handler),
          )
          .route(
            "/{order_id}/stages/{stage_key}/access",
            web::get().to(crate::web::handlers::stage_handlers::stage_access_handler),
          )
          .route(
            "/{order_id}/stages/{stage_key}",
            web::put().to(crate::web::handlers::stage_handlers::save_stage_handler),
          )
          .route(
            "/{order_id}/stages/{stage_key}/complete",
            web::post().to(crate::web::handlers::stage_handlers::complete_stage_handler),
          ),
      ),
  );
}
