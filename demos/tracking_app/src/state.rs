// demos/tracking_app/src/state.rs

use crate::config::ServerConfig;
use crate::services::{ProductCatalog, UserDirectory};
use custodia::Custodia;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
  pub engine: Arc<Custodia>,
  pub directory: Arc<UserDirectory>,
  pub catalog: Arc<ProductCatalog>,
  pub config: Arc<ServerConfig>, // Share loaded config
}
