// demos/tracking_app/src/web/handlers/identity.rs

//! Header-based mock authentication.
//!
//! A real deployment would verify a session or token here. The demo
//! trusts the `X-User-Email` header and only checks that the address is
//! one of the seeded directory accounts, mirroring the kind of demo login
//! this app exists to exercise.

use actix_web::{web, FromRequest, HttpRequest, HttpResponse};
use serde_json::json;
use tracing::{instrument, warn};

use custodia::Actor;

use crate::errors::ApiError;
use crate::state::AppState;

/// The resolved identity/role claim of the calling user.
#[derive(Debug)]
pub struct ActingUser {
  pub actor: Actor,
}

impl FromRequest for ActingUser {
  type Error = ApiError;
  type Future = futures_util::future::Ready<Result<Self, Self::Error>>;

  fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
    let header_email = req
      .headers()
      .get("X-User-Email")
      .and_then(|value| value.to_str().ok());

    let Some(email) = header_email else {
      warn!("ActingUser extractor: missing or unreadable X-User-Email header.");
      return futures_util::future::ready(Err(ApiError::UnknownUser(
        "Missing or invalid X-User-Email header for mock auth.".to_string(),
      )));
    };

    let claim = req
      .app_data::<web::Data<AppState>>()
      .and_then(|state| state.directory.claim(email));

    match claim {
      Some(actor) => futures_util::future::ready(Ok(ActingUser { actor })),
      None => {
        warn!(email, "ActingUser extractor: address not in the user directory.");
        futures_util::future::ready(Err(ApiError::UnknownUser(email.to_string())))
      }
    }
  }
}

/// Echoes the full directory record behind the presented header, the way a
/// login screen would resolve an address to a profile.
#[instrument(name = "handler::me", skip(app_state, acting), fields(actor = %acting.actor.identity))]
pub async fn me_handler(
  app_state: web::Data<AppState>,
  acting: ActingUser,
) -> Result<HttpResponse, ApiError> {
  let user = app_state
    .directory
    .find(&acting.actor.identity)
    .ok_or_else(|| ApiError::UnknownUser(acting.actor.identity.clone()))?;

  Ok(HttpResponse::Ok().json(json!({ "user": user })))
}
