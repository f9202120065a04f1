// demos/tracking_app/src/services/mod.rs

//! In-process stand-ins for the collaborators a production deployment
//! would back with real infrastructure (user store, inventory DB, mailer).

pub mod catalog;
pub mod directory;
pub mod notifier;

pub use catalog::{Product, ProductCatalog};
pub use directory::UserDirectory;
pub use notifier::EmailNotifier;
