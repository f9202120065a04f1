// demos/tracking_app/src/services/notifier.rs

//! Mock e-mail dispatcher behind the engine's notification boundary.
//!
//! The sink contract is fire-and-forget: `stage_completed` must not block
//! and gets no delivery feedback. Events are queued on an unbounded
//! channel; a spawned task drains it and "sends" each mail by logging it,
//! with a short sleep standing in for SMTP latency.

use tokio::sync::mpsc;
use tracing::{info, warn};

use custodia::{NotificationSink, StageCompleted};

pub struct EmailNotifier {
  queue: mpsc::UnboundedSender<StageCompleted>,
}

impl EmailNotifier {
  /// Spawns the dispatcher task and returns the sink handle. The task
  /// exits once every handle is dropped and the queue has drained.
  pub fn spawn(sender_address: String) -> Self {
    let (queue, mut inbox) = mpsc::unbounded_channel::<StageCompleted>();
    tokio::spawn(async move {
      let mut sent: u64 = 0;
      while let Some(event) = inbox.recv().await {
        sent += 1;
        deliver_mock_email(&sender_address, &event, sent).await;
      }
    });
    EmailNotifier { queue }
  }
}

impl NotificationSink for EmailNotifier {
  fn stage_completed(&self, event: StageCompleted) {
    if self.queue.send(event).is_err() {
      warn!("Email dispatcher task is gone; stage notification dropped.");
    }
  }
}

async fn deliver_mock_email(sender: &str, event: &StageCompleted, message_number: u64) {
  let subject = format!(
    "Actualización ABSOLUTE: Pedido {} - {}",
    event.order_id, event.stage_label
  );
  let body = format!(
    "Su pedido ha cambiado al estado: {}. Por favor verifique el seguimiento en la plataforma.",
    event.stage_label
  );

  info!(
    "Simulating sending email: To='{}', From='{}', Subject='{}'",
    event.destination_identity, sender, subject
  );
  tokio::time::sleep(std::time::Duration::from_millis(20)).await; // Simulate network latency

  let body_preview = body.chars().take(50).collect::<String>() + "...";
  let message_id = format!("mock_email_{:06}", message_number);
  info!(
    to = %event.destination_identity,
    message_id = %message_id,
    %body_preview,
    "Mock email sent successfully."
  );
}
