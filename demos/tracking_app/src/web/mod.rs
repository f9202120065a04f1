// demos/tracking_app/src/web/mod.rs

// Declare child modules
pub mod handlers;
pub mod routes;

// Re-export so main.rs can reach the route configuration directly.
pub use routes::configure_app_routes;
