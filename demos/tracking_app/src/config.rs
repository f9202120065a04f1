// demos/tracking_app/src/config.rs

use crate::errors::{ApiError, Result}; // Use ApiError specific Result
use dotenvy::dotenv;
use std::env;

#[derive(Debug, Clone)]
pub struct ServerConfig {
  pub server_host: String,
  pub server_port: u16,

  /// Where equipment departs from when the client does not say otherwise.
  pub default_origin_location: String,

  // Mock email config
  pub mock_email_sender: String,
}

impl ServerConfig {
  pub fn from_env() -> Result<Self> {
    dotenv().ok(); // Load .env file if present

    let get_env = |var_name: &str| {
      env::var(var_name).map_err(|e| ApiError::Config(format!("Missing environment variable '{}': {}", var_name, e)))
    };

    let server_host = get_env("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let server_port = get_env("SERVER_PORT")
      .unwrap_or_else(|_| "8080".to_string())
      .parse::<u16>()
      .map_err(|e| ApiError::Config(format!("Invalid SERVER_PORT: {}", e)))?;

    let default_origin_location =
      get_env("DEFAULT_ORIGIN_LOCATION").unwrap_or_else(|_| "Bogotá, Colombia".to_string());
    let mock_email_sender =
      get_env("MOCK_EMAIL_SENDER").unwrap_or_else(|_| "notificaciones@absolute-eventos.co".to_string());

    tracing::info!("Application configuration loaded successfully.");

    Ok(Self {
      server_host,
      server_port,
      default_origin_location,
      mock_email_sender,
    })
  }
}
