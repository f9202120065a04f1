// custodia/src/stage/mod.rs

//! Stage catalog, per-stage evidence records, and draft payloads.

pub mod catalog;
pub mod data;
pub mod draft;
