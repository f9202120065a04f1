// demos/tracking_app/src/services/directory.rs

//! Seeded user directory standing in for a real identity provider.
//!
//! The demo authenticates by e-mail alone (the `X-User-Email` header); the
//! directory resolves that address to a display name and a workflow role.

use custodia::{Actor, Role};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryUser {
  pub email: String,
  pub name: String,
  pub role: Role,
  pub phone: String,
}

pub struct UserDirectory {
  users: Vec<DirectoryUser>,
}

impl UserDirectory {
  /// The four demo accounts, one per role.
  pub fn seeded() -> Self {
    let seed = |email: &str, name: &str, role: Role, phone: &str| DirectoryUser {
      email: email.to_string(),
      name: name.to_string(),
      role,
      phone: phone.to_string(),
    };

    UserDirectory {
      users: vec![
        seed("admin@absolute.com", "Administrador Principal", Role::Admin, "3101234567"),
        seed("logistics@absolute.com", "Encargado Logística", Role::Logistics, "3119876543"),
        seed("coord@absolute.com", "Coordinador Nacional", Role::Coordinator, "3200001122"),
        seed("user@absolute.com", "Usuario Demo", Role::User, "3000000000"),
      ],
    }
  }

  pub fn find(&self, email: &str) -> Option<&DirectoryUser> {
    self.users.iter().find(|user| user.email.eq_ignore_ascii_case(email))
  }

  /// Resolves an e-mail to the engine-facing actor claim.
  pub fn claim(&self, email: &str) -> Option<Actor> {
    self.find(email).map(|user| Actor::new(&user.email, user.role))
  }
}
