// custodia/examples/full_handoff.rs

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use custodia::{
  Actor, Custodia, CustodiaError, InMemoryOrderRepository, InMemoryStockStore, LineItem,
  NewOrder, ProductId, Role, Signature, StageDraft, StageKey, TracingNotificationSink,
};
use tracing::info;

fn signature(name: &str, location: &str) -> Signature {
  Signature {
    name: name.to_string(),
    location: location.to_string(),
    data_url: "data:image/png;base64,iVBORw0KGgo=".to_string(),
    timestamp: Utc::now(),
  }
}

#[tokio::main]
async fn main() -> Result<(), CustodiaError> {
  // Initialize tracing (optional, for demonstration)
  tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();

  info!("--- Full Handoff Example ---");

  // 1. Wire the engine to in-memory collaborators.
  let repository = Arc::new(InMemoryOrderRepository::new());
  let stock = Arc::new(InMemoryStockStore::with_stock([
    (ProductId::from("ae-1"), 5),
    (ProductId::from("mob-1"), 50),
  ]));
  let engine = Custodia::new(repository, stock, Arc::new(TracingNotificationSink));

  // 2. Define the people involved.
  let customer = Actor::new("user@absolute.com", Role::User);
  let admin = Actor::new("admin@absolute.com", Role::Admin);
  let logistics = Actor::new("logistics@absolute.com", Role::Logistics);
  let coordinator = Actor::new("coord@absolute.com", Role::Coordinator);

  // 3. The customer places an order and the admin approves it.
  let order = engine
    .create_order(
      &customer,
      NewOrder {
        items: vec![
          LineItem {
            product_id: ProductId::from("ae-1"),
            name: "Stand básico".to_string(),
            quantity: 2,
          },
          LineItem {
            product_id: ProductId::from("mob-1"),
            name: "Mesa Blanca Rectangular".to_string(),
            quantity: 4,
          },
        ],
        start_date: NaiveDate::from_ymd_opt(2024, 6, 1).expect("valid date"),
        end_date: NaiveDate::from_ymd_opt(2024, 6, 3).expect("valid date"),
        origin_location: "Bogotá, Colombia".to_string(),
        destination_location: "Medellín, Antioquia".to_string(),
      },
    )
    .await?;
  info!(order_id = %order.id, "order placed, status {}", order.status);

  let order = engine.approve_order(&admin, &order.id).await?;
  info!(order_id = %order.id, "order approved, status {}", order.status);

  // 4. Walk all five stages with the right actor for each.
  for stage in StageKey::ALL {
    let actor = match stage.owning_role() {
      Role::Logistics => &logistics,
      _ => &coordinator,
    };

    let draft = StageDraft {
      signature: Some(signature(&actor.identity, "Bodega Central, Bogotá")),
      received_by: stage
        .requires_received_by()
        .then(|| signature("Cliente Receptor", "Sitio del evento")),
      general_notes: Some(format!("{} sin novedades", stage.label())),
      ..StageDraft::default()
    };

    let updated = engine.complete_stage(actor, &order.id, stage, draft).await?;
    info!(
      stage = %stage,
      label = stage.label(),
      status = %updated.status,
      "stage closed"
    );
  }

  let final_order = engine.order(&order.id).await?;
  info!(order_id = %final_order.id, "final status: {}", final_order.status);

  Ok(())
}
