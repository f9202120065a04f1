// custodia/src/access.rs

//! The stage authorization resolver.
//!
//! Single source of truth for "may this actor mutate this stage of this
//! order right now". Callers (HTTP handlers, UIs) only render the outcome;
//! they never re-derive role rules. A write denial still permits read-only
//! viewing of the stage.

use serde::{Deserialize, Serialize};

use crate::order::model::{Order, OrderStatus};
use crate::stage::catalog::StageKey;

/// Authorization class of an acting identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
  Admin,
  Logistics,
  Coordinator,
  User,
}

impl std::fmt::Display for Role {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    let name = match self {
      Role::Admin => "Admin",
      Role::Logistics => "Logistics",
      Role::Coordinator => "Coordinator",
      Role::User => "User",
    };
    f.write_str(name)
  }
}

/// The identity/role claim the engine consumes. How the claim was obtained
/// (login, token, header) is the identity collaborator's business; the
/// engine only authorizes against it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
  pub identity: String,
  pub role: Role,
}

impl Actor {
  pub fn new(identity: impl Into<String>, role: Role) -> Self {
    Actor {
      identity: identity.into(),
      role,
    }
  }
}

/// Why a stage mutation was denied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDenial {
  /// The order is cancelled; no stage may be touched.
  OrderCancelled,
  /// The stage before the target is not yet completed.
  PredecessorIncomplete { predecessor: StageKey },
  /// The actor's role has no authority over this stage; carries the
  /// department that does.
  StageOwnedBy { owner: Role },
}

impl AccessDenial {
  pub fn reason(&self) -> String {
    match self {
      AccessDenial::OrderCancelled => "order cancelled".to_string(),
      AccessDenial::PredecessorIncomplete { .. } => "predecessor stage incomplete".to_string(),
      AccessDenial::StageOwnedBy { owner } => format!("stage owned by {}", owner),
    }
  }
}

/// Outcome of an authorization check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageAccess {
  Granted,
  Denied(AccessDenial),
}

impl StageAccess {
  pub fn permitted(&self) -> bool {
    matches!(self, StageAccess::Granted)
  }

  pub fn reason(&self) -> Option<String> {
    match self {
      StageAccess::Granted => None,
      StageAccess::Denied(denial) => Some(denial.reason()),
    }
  }
}

/// Decides whether `actor` may mutate `stage` of `order` right now.
///
/// Rules, in order, first failure wins:
/// 1. A cancelled order blocks everything.
/// 2. The predecessor stage must be completed (vacuous for the first
///    stage). Progression is strictly sequential regardless of role.
/// 3. Role map: Admin manages any stage but only on orders they placed
///    themselves; Logistics manages the two warehouse-facing ends;
///    Coordinator manages the three field stages; User manages nothing.
/// 4. Otherwise denied, naming the department that owns the stage.
pub fn resolve_stage_access(order: &Order, stage: StageKey, actor: &Actor) -> StageAccess {
  if order.status == OrderStatus::Cancelled {
    return StageAccess::Denied(AccessDenial::OrderCancelled);
  }

  if let Some(predecessor) = stage.predecessor() {
    if !order.stage(predecessor).is_completed() {
      return StageAccess::Denied(AccessDenial::PredecessorIncomplete { predecessor });
    }
  }

  let role_permits = match actor.role {
    Role::Admin => order.is_owned_by(&actor.identity),
    Role::Logistics => stage.owning_role() == Role::Logistics,
    Role::Coordinator => stage.owning_role() == Role::Coordinator,
    Role::User => false,
  };

  if role_permits {
    StageAccess::Granted
  } else {
    StageAccess::Denied(AccessDenial::StageOwnedBy {
      owner: stage.owning_role(),
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::order::model::{LineItem, NewOrder, Order, OrderId, ProductId};
  use crate::stage::data::StageStatus;
  use chrono::{NaiveDate, Utc};

  fn order_for(owner: &str) -> Order {
    Order::new(
      OrderId::from_sequence(7),
      owner,
      NewOrder {
        items: vec![LineItem {
          product_id: ProductId::from("ae-1"),
          name: "Stand básico".to_string(),
          quantity: 1,
        }],
        start_date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
        end_date: NaiveDate::from_ymd_opt(2024, 6, 2).unwrap(),
        origin_location: "Bogotá, Colombia".to_string(),
        destination_location: "Cali, Valle".to_string(),
      },
    )
  }

  fn complete_stages_through(order: &mut Order, last: StageKey) {
    for key in StageKey::ALL {
      if key > last {
        break;
      }
      let stage = order.workflow.stage_mut(key);
      stage.status = StageStatus::Completed;
      stage.timestamp = Some(Utc::now());
    }
  }

  #[test]
  fn logistics_owns_the_warehouse_ends_only() {
    let mut order = order_for("user@absolute.com");
    let logistics = Actor::new("logistics@absolute.com", Role::Logistics);

    assert!(resolve_stage_access(&order, StageKey::BodegaCheck, &logistics).permitted());

    complete_stages_through(&mut order, StageKey::ClientToCoord);
    assert!(resolve_stage_access(&order, StageKey::CoordToBodega, &logistics).permitted());

    let denial = resolve_stage_access(&order, StageKey::ClientToCoord, &logistics);
    assert_eq!(denial.reason().as_deref(), Some("stage owned by Coordinator"));
  }

  #[test]
  fn coordinator_owns_the_field_stages_only() {
    let mut order = order_for("user@absolute.com");
    complete_stages_through(&mut order, StageKey::BodegaCheck);
    let coordinator = Actor::new("coord@absolute.com", Role::Coordinator);

    assert!(resolve_stage_access(&order, StageKey::BodegaToCoord, &coordinator).permitted());

    complete_stages_through(&mut order, StageKey::ClientToCoord);
    let denial = resolve_stage_access(&order, StageKey::CoordToBodega, &coordinator);
    assert_eq!(denial.reason().as_deref(), Some("stage owned by Logistics"));
  }

  #[test]
  fn admin_self_service_is_limited_to_own_orders() {
    let own = order_for("admin@absolute.com");
    let foreign = order_for("user@absolute.com");
    let admin = Actor::new("admin@absolute.com", Role::Admin);

    assert!(resolve_stage_access(&own, StageKey::BodegaCheck, &admin).permitted());
    assert!(!resolve_stage_access(&foreign, StageKey::BodegaCheck, &admin).permitted());
  }

  #[test]
  fn plain_users_manage_nothing() {
    let order = order_for("user@absolute.com");
    let user = Actor::new("user@absolute.com", Role::User);
    assert!(!resolve_stage_access(&order, StageKey::BodegaCheck, &user).permitted());
  }

  #[test]
  fn cancellation_outranks_every_other_rule() {
    let mut order = order_for("admin@absolute.com");
    order.status = OrderStatus::Cancelled;
    let admin = Actor::new("admin@absolute.com", Role::Admin);

    let denial = resolve_stage_access(&order, StageKey::BodegaCheck, &admin);
    assert_eq!(denial.reason().as_deref(), Some("order cancelled"));
  }

  #[test]
  fn sequencing_outranks_the_role_map() {
    let order = order_for("user@absolute.com");
    // Coordinator owns coord_to_client, but bodega_to_coord is still open.
    let coordinator = Actor::new("coord@absolute.com", Role::Coordinator);

    match resolve_stage_access(&order, StageKey::CoordToClient, &coordinator) {
      StageAccess::Denied(AccessDenial::PredecessorIncomplete { predecessor }) => {
        assert_eq!(predecessor, StageKey::BodegaToCoord);
      }
      other => panic!("expected predecessor denial, got {:?}", other),
    }
  }
}
