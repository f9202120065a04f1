// custodia/src/engine/mod.rs

//! The engine service: reads, lifecycle operations, and stage transitions.

pub(crate) mod locks;
pub mod lifecycle;
pub mod service;
pub mod transition;

pub use service::Custodia;
