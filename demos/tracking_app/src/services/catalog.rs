// demos/tracking_app/src/services/catalog.rs

//! Seeded rental inventory.
//!
//! Plays two parts: the read side the product endpoints serve (name,
//! category, live stock level) and the `StockStore` the workflow engine
//! reserves against when orders are created. Both views share one set of
//! levels so a reservation is immediately visible in the listing.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;
use serde::Serialize;
use tracing::{event, Level};

use custodia::{CustodiaError, CustodiaResult, ProductId, StockStore};

/// Catalog entry as served to clients. `stock` is the live level, after
/// any reservations.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
  pub id: ProductId,
  pub name: String,
  pub category: String,
  pub description: String,
  pub stock: u32,
}

struct CatalogEntry {
  id: ProductId,
  name: &'static str,
  category: &'static str,
  description: &'static str,
}

pub struct ProductCatalog {
  entries: Vec<CatalogEntry>,
  levels: RwLock<HashMap<ProductId, u32>>,
}

impl ProductCatalog {
  /// The Absolute Eventos rental inventory the demo ships with.
  pub fn seeded() -> Self {
    let seed: [(&'static str, &'static str, &'static str, &'static str, u32); 16] = [
      // Arquitectura Efímera
      ("ae-1", "Stand básico", "Arquitectura Efímera", "Estructura modular estándar 3x3m para ferias.", 5),
      ("ae-2", "Stand 4x3", "Arquitectura Efímera", "Estructura modular amplia 4x3m.", 2),
      ("ae-3", "Stand 5x3", "Arquitectura Efímera", "Estructura premium 5x3m.", 5),
      // Mobiliario
      ("mob-1", "Mesa Blanca Rectangular", "Mobiliario", "Mesa plegable para eventos.", 50),
      ("mob-2", "Sillas Rattan Sintético Mesedoras", "Mobiliario", "Silla de diseño ergonómico.", 100),
      ("mob-3", "Counter de Recepción", "Mobiliario", "Mueble para registro de asistentes.", 10),
      ("mob-4", "Mueble de Exhibición", "Mobiliario", "Vitrina con iluminación LED.", 8),
      // Electrónica
      ("elec-1", "Pantalla LED 55\"", "Electrónica", "Smart TV 4K para presentaciones.", 15),
      ("elec-2", "Computador Portátil", "Electrónica", "Laptop i7 16GB RAM para control.", 10),
      ("elec-3", "Impresora Multifuncional", "Electrónica", "Impresora láser color.", 5),
      // Decoración
      ("dec-1", "Roll Up Publicitario", "Decoración", "Estructura de aluminio 85x200cm.", 30),
      ("dec-2", "Vinilo Adhesivo (m²)", "Decoración", "Impresión de alta calidad por metro cuadrado.", 1000),
      ("dec-3", "Crispetera", "Decoración", "Máquina de palomitas estilo vintage.", 4),
      ("dec-4", "Cafetera Industrial", "Decoración", "Cafetera para catering de eventos.", 6),
      // Servicios
      ("serv-1", "Diseño de Stand", "Servicios", "Servicio de diseño 3D personalizado.", 999),
      ("serv-2", "Transporte", "Servicios", "Logística de entrega y recogida.", 999),
    ];

    let mut entries = Vec::with_capacity(seed.len());
    let mut levels = HashMap::with_capacity(seed.len());
    for (id, name, category, description, stock) in seed {
      let product_id = ProductId::from(id);
      levels.insert(product_id.clone(), stock);
      entries.push(CatalogEntry {
        id: product_id,
        name,
        category,
        description,
      });
    }

    ProductCatalog {
      entries,
      levels: RwLock::new(levels),
    }
  }

  /// Every catalog entry with its current stock level, in seed order.
  pub fn list(&self) -> Vec<Product> {
    let levels = self.levels.read();
    self
      .entries
      .iter()
      .map(|entry| self.materialize(entry, &levels))
      .collect()
  }

  pub fn find(&self, product_id: &ProductId) -> Option<Product> {
    let levels = self.levels.read();
    self
      .entries
      .iter()
      .find(|entry| &entry.id == product_id)
      .map(|entry| self.materialize(entry, &levels))
  }

  /// Display name lookup, used to enrich order line items at intake.
  pub fn name_of(&self, product_id: &ProductId) -> Option<String> {
    self
      .entries
      .iter()
      .find(|entry| &entry.id == product_id)
      .map(|entry| entry.name.to_string())
  }

  fn materialize(&self, entry: &CatalogEntry, levels: &HashMap<ProductId, u32>) -> Product {
    Product {
      id: entry.id.clone(),
      name: entry.name.to_string(),
      category: entry.category.to_string(),
      description: entry.description.to_string(),
      stock: levels.get(&entry.id).copied().unwrap_or(0),
    }
  }
}

#[async_trait]
impl StockStore for ProductCatalog {
  async fn decrement(&self, product_id: &ProductId, quantity: u32) -> CustodiaResult<()> {
    let mut levels = self.levels.write();
    let available = levels.get(product_id).copied().unwrap_or(0);
    if available < quantity {
      event!(
        Level::WARN,
        product_id = %product_id,
        requested = quantity,
        available,
        "catalog refused stock decrement"
      );
      return Err(CustodiaError::InsufficientStock {
        product_id: product_id.clone(),
      });
    }
    levels.insert(product_id.clone(), available - quantity);
    Ok(())
  }

  async fn restock(&self, product_id: &ProductId, quantity: u32) -> CustodiaResult<()> {
    let mut levels = self.levels.write();
    let entry = levels.entry(product_id.clone()).or_insert(0);
    *entry = entry.saturating_add(quantity);
    Ok(())
  }
}
