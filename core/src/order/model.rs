// custodia/src/order/model.rs

//! The order aggregate: identity, line-item snapshot, date bounds, derived
//! status, and the five-stage workflow map.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::stage::catalog::StageKey;
use crate::stage::data::StageData;

/// Human-readable sequential order identifier, e.g. `ORD-0001`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(pub String);

impl OrderId {
  /// Renders the id for the given sequence number. The counter starts at 1
  /// and is zero-padded to four digits; it keeps growing past 9999.
  pub fn from_sequence(sequence: u64) -> Self {
    OrderId(format!("ORD-{:04}", sequence))
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl std::fmt::Display for OrderId {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(&self.0)
  }
}

impl From<&str> for OrderId {
  fn from(value: &str) -> Self {
    OrderId(value.to_string())
  }
}

/// Catalog product reference. The engine never dereferences it; it is an
/// opaque key into the external product/stock collaborator.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub String);

impl ProductId {
  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl std::fmt::Display for ProductId {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(&self.0)
  }
}

impl From<&str> for ProductId {
  fn from(value: &str) -> Self {
    ProductId(value.to_string())
  }
}

/// One rented product line, frozen at order creation. `name` is a display
/// snapshot so the order stays readable if the catalog entry changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
  pub product_id: ProductId,
  pub name: String,
  pub quantity: u32,
}

/// Aggregate order status. Never set directly by stage calls; recomputed
/// from stage completion (see `order::status::derive_status`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
  Pending,
  InProcess,
  Delivered,
  Finalized,
  Cancelled,
}

impl OrderStatus {
  /// Terminal states admit no further transitions of any kind.
  pub fn is_terminal(&self) -> bool {
    matches!(self, OrderStatus::Finalized | OrderStatus::Cancelled)
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      OrderStatus::Pending => "pending",
      OrderStatus::InProcess => "in_process",
      OrderStatus::Delivered => "delivered",
      OrderStatus::Finalized => "finalized",
      OrderStatus::Cancelled => "cancelled",
    }
  }
}

impl std::fmt::Display for OrderStatus {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

/// The per-order workflow map. One named field per fixed stage key, so
/// every order always carries all five records and the serialized form is
/// an object keyed by the stage keys.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Workflow {
  #[serde(default)]
  pub bodega_check: StageData,
  #[serde(default)]
  pub bodega_to_coord: StageData,
  #[serde(default)]
  pub coord_to_client: StageData,
  #[serde(default)]
  pub client_to_coord: StageData,
  #[serde(default)]
  pub coord_to_bodega: StageData,
}

impl Workflow {
  pub fn stage(&self, key: StageKey) -> &StageData {
    match key {
      StageKey::BodegaCheck => &self.bodega_check,
      StageKey::BodegaToCoord => &self.bodega_to_coord,
      StageKey::CoordToClient => &self.coord_to_client,
      StageKey::ClientToCoord => &self.client_to_coord,
      StageKey::CoordToBodega => &self.coord_to_bodega,
    }
  }

  pub fn stage_mut(&mut self, key: StageKey) -> &mut StageData {
    match key {
      StageKey::BodegaCheck => &mut self.bodega_check,
      StageKey::BodegaToCoord => &mut self.bodega_to_coord,
      StageKey::CoordToClient => &mut self.coord_to_client,
      StageKey::ClientToCoord => &mut self.client_to_coord,
      StageKey::CoordToBodega => &mut self.coord_to_bodega,
    }
  }

  /// Stages in pipeline order.
  pub fn stages(&self) -> impl Iterator<Item = (StageKey, &StageData)> {
    StageKey::ALL.iter().map(move |key| (*key, self.stage(*key)))
  }
}

/// Parameters for creating an order. The id, owner, creation timestamp, and
/// workflow seed are assigned by the engine, not the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrder {
  pub items: Vec<LineItem>,
  pub start_date: NaiveDate,
  pub end_date: NaiveDate,
  pub origin_location: String,
  pub destination_location: String,
}

/// A rental order. The id and line-item snapshot are immutable after
/// creation; `status` and `workflow` are the only fields the engine mutates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
  pub id: OrderId,
  pub items: Vec<LineItem>,
  pub user_identity: String,
  pub status: OrderStatus,
  pub start_date: NaiveDate,
  pub end_date: NaiveDate,
  pub created_at: DateTime<Utc>,
  pub origin_location: String,
  pub destination_location: String,
  pub workflow: Workflow,
}

impl Order {
  /// Builds a freshly-placed order: status `Pending`, all five stages
  /// seeded `Pending` with empty evidence.
  pub fn new(id: OrderId, user_identity: impl Into<String>, request: NewOrder) -> Self {
    Order {
      id,
      items: request.items,
      user_identity: user_identity.into(),
      status: OrderStatus::Pending,
      start_date: request.start_date,
      end_date: request.end_date,
      created_at: Utc::now(),
      origin_location: request.origin_location,
      destination_location: request.destination_location,
      workflow: Workflow::default(),
    }
  }

  pub fn stage(&self, key: StageKey) -> &StageData {
    self.workflow.stage(key)
  }

  /// Whether `identity` is the user who placed this order.
  pub fn is_owned_by(&self, identity: &str) -> bool {
    self.user_identity == identity
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn sequential_ids_are_zero_padded() {
    assert_eq!(OrderId::from_sequence(1).as_str(), "ORD-0001");
    assert_eq!(OrderId::from_sequence(42).as_str(), "ORD-0042");
    assert_eq!(OrderId::from_sequence(10001).as_str(), "ORD-10001");
  }

  #[test]
  fn new_order_seeds_all_stages_pending() {
    let order = Order::new(
      OrderId::from_sequence(1),
      "user@absolute.com",
      NewOrder {
        items: vec![LineItem {
          product_id: ProductId::from("ae-1"),
          name: "Stand básico".to_string(),
          quantity: 2,
        }],
        start_date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
        end_date: NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(),
        origin_location: "Bogotá, Colombia".to_string(),
        destination_location: "Medellín, Antioquia".to_string(),
      },
    );

    assert_eq!(order.status, OrderStatus::Pending);
    assert!(order.workflow.stages().all(|(_, data)| !data.is_completed()));
    assert!(order.is_owned_by("user@absolute.com"));
    assert!(!order.is_owned_by("admin@absolute.com"));
  }
}
