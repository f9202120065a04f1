// demos/tracking_app/src/web/handlers/mod.rs

// Declare handler modules
pub mod identity;
pub mod order_handlers;
pub mod product_handlers;
pub mod stage_handlers;

pub use identity::ActingUser;
