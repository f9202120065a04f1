// custodia/src/stage/catalog.rs

//! The fixed five-stage handoff catalog.
//!
//! Every order moves through the same five physical custody handoffs, in
//! declaration order: warehouse dispatch check, handoff to the coordinator,
//! delivery at the client site, pickup from the client, and return to the
//! central warehouse. The catalog is static data; orders never add, remove,
//! or reorder stages.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::access::Role;
use crate::error::CustodiaError;

/// Key of one of the five fixed handoff stages. Declaration order is the
/// catalog order, so derived `Ord` compares by pipeline position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum StageKey {
  #[serde(rename = "bodega_check")]
  BodegaCheck,
  #[serde(rename = "bodega_to_coord")]
  BodegaToCoord,
  #[serde(rename = "coord_to_client")]
  CoordToClient,
  #[serde(rename = "client_to_coord")]
  ClientToCoord,
  #[serde(rename = "coord_to_bodega")]
  CoordToBodega,
}

impl StageKey {
  /// All stage keys in pipeline order.
  pub const ALL: [StageKey; 5] = [
    StageKey::BodegaCheck,
    StageKey::BodegaToCoord,
    StageKey::CoordToClient,
    StageKey::ClientToCoord,
    StageKey::CoordToBodega,
  ];

  pub fn as_str(&self) -> &'static str {
    match self {
      StageKey::BodegaCheck => "bodega_check",
      StageKey::BodegaToCoord => "bodega_to_coord",
      StageKey::CoordToClient => "coord_to_client",
      StageKey::ClientToCoord => "client_to_coord",
      StageKey::CoordToBodega => "coord_to_bodega",
    }
  }

  /// Zero-based position in the pipeline.
  pub fn index(&self) -> usize {
    match self {
      StageKey::BodegaCheck => 0,
      StageKey::BodegaToCoord => 1,
      StageKey::CoordToClient => 2,
      StageKey::ClientToCoord => 3,
      StageKey::CoordToBodega => 4,
    }
  }

  /// The stage immediately before this one, `None` for the first stage.
  pub fn predecessor(&self) -> Option<StageKey> {
    let idx = self.index();
    if idx == 0 {
      None
    } else {
      Some(StageKey::ALL[idx - 1])
    }
  }

  /// Static catalog entry for this stage.
  pub fn info(&self) -> &'static StageInfo {
    &CATALOG[self.index()]
  }

  /// Display label carried on outbound notifications.
  pub fn label(&self) -> &'static str {
    self.info().label
  }

  /// Whether closing this stage needs a receiver countersignature in
  /// addition to the primary signature.
  pub fn requires_received_by(&self) -> bool {
    self.info().requires_received_by
  }

  /// The department that manages this stage: Logistics owns the two
  /// warehouse-facing ends, the Coordinator owns the three field stages.
  pub fn owning_role(&self) -> Role {
    match self {
      StageKey::BodegaCheck | StageKey::CoordToBodega => Role::Logistics,
      _ => Role::Coordinator,
    }
  }
}

impl std::fmt::Display for StageKey {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for StageKey {
  type Err = CustodiaError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    StageKey::ALL
      .iter()
      .copied()
      .find(|key| key.as_str() == s)
      .ok_or_else(|| CustodiaError::StageKeyInvalid(s.to_string()))
  }
}

impl TryFrom<&str> for StageKey {
  type Error = CustodiaError;

  fn try_from(s: &str) -> Result<Self, Self::Error> {
    s.parse()
  }
}

/// Static definition of one handoff stage: its key, human-facing labels,
/// and whether closing it requires the receiving party's countersignature.
#[derive(Debug, Clone, Copy)]
pub struct StageInfo {
  pub key: StageKey,
  pub label: &'static str,
  pub description: &'static str,
  pub requires_received_by: bool,
}

/// The five stages in pipeline order. Labels match the operation's
/// Spanish-language paperwork.
pub const CATALOG: [StageInfo; 5] = [
  StageInfo {
    key: StageKey::BodegaCheck,
    label: "Verificación en Bodega",
    description: "Verificación inicial de salida",
    requires_received_by: false,
  },
  StageInfo {
    key: StageKey::BodegaToCoord,
    label: "Salida a Tránsito",
    description: "Entrega a Coordinador",
    requires_received_by: false,
  },
  StageInfo {
    key: StageKey::CoordToClient,
    label: "Entrega en el Evento",
    description: "Entrega en sitio",
    requires_received_by: true,
  },
  StageInfo {
    key: StageKey::ClientToCoord,
    label: "Recogida de Equipos",
    description: "Recogida del evento",
    requires_received_by: true,
  },
  StageInfo {
    key: StageKey::CoordToBodega,
    label: "Retorno a Bodega Central",
    description: "Retorno a bodega",
    requires_received_by: true,
  },
];
