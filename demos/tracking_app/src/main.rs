// demos/tracking_app/src/main.rs

// Declare modules for the application
mod config;
mod errors;
mod services;
mod state;
mod web;

use crate::config::ServerConfig;
use crate::services::{EmailNotifier, ProductCatalog, UserDirectory};
use crate::state::AppState;

use actix_web::{web as actix_data, App, HttpServer}; // Renamed web to avoid clashing with our own module
use custodia::{Custodia, InMemoryOrderRepository};
use std::sync::Arc;
use tracing::Level;
use tracing_subscriber::fmt::format::FmtSpan; // For span events in tracing

#[actix_web::main]
async fn main() -> std::io::Result<()> {
  // Initialize tracing subscriber for logging
  tracing_subscriber::fmt()
    .with_max_level(Level::INFO) // Default level
    .with_env_filter(tracing_subscriber::EnvFilter::from_default_env()) // Allow RUST_LOG override
    .with_span_events(FmtSpan::CLOSE) // Log when spans close, showing duration
    .init();

  tracing::info!("Starting equipment tracking server...");

  // Load application configuration
  let app_config = match ServerConfig::from_env() {
    Ok(cfg) => Arc::new(cfg), // Arc the config for sharing
    Err(e) => {
      tracing::error!(error = %e, "Failed to load application configuration.");
      // For a demo, panic is okay. In prod, might exit gracefully.
      panic!("Configuration error: {}", e);
    }
  };

  // All state is in-memory and seeded: orders start empty, the catalog
  // and the user directory ship with the demo data.
  let repository = Arc::new(InMemoryOrderRepository::new());
  let catalog = Arc::new(ProductCatalog::seeded());
  let directory = Arc::new(UserDirectory::seeded());
  let notifier = Arc::new(EmailNotifier::spawn(app_config.mock_email_sender.clone()));

  let engine = Arc::new(Custodia::new(repository, catalog.clone(), notifier));
  tracing::info!("Workflow engine wired with in-memory stores.");

  // Create AppState
  let app_state = AppState {
    engine,
    directory,
    catalog,
    config: app_config.clone(),
  };

  // Configure and Start Actix Web Server
  let server_address = format!("{}:{}", app_config.server_host, app_config.server_port);
  tracing::info!("Attempting to bind server to {}...", server_address);

  HttpServer::new(move || {
    App::new()
      .app_data(actix_data::Data::new(app_state.clone())) // Share AppState with handlers
      .wrap(tracing_actix_web::TracingLogger::default()) // Actix middleware for tracing requests
      .configure(web::configure_app_routes)
  })
  .bind(&server_address)?
  .run()
  .await
}
