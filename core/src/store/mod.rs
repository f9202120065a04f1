// custodia/src/store/mod.rs

//! Storage collaborator boundaries and in-memory reference adapters.

pub mod memory;
pub mod repository;
pub mod stock;
