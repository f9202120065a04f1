// custodia/src/order/mod.rs

//! The order aggregate and its derived status.

pub mod model;
pub mod status;
