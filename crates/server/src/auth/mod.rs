pub mod identity;
pub mod middleware;
pub mod password;

use std::collections::HashMap;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

pub use identity::{Owner, owner_id_for_email};
pub use middleware::AuthLayer;

use crate::config::UserConfig;

/// Verifies HTTP Basic credentials against the configured users.
#[derive(Debug, Default)]
pub struct AuthProvider {
    /// email -> argon2 PHC string
    users: HashMap<String, String>,
}

impl AuthProvider {
    pub fn new(users: &[UserConfig]) -> Self {
        Self {
            users: users
                .iter()
                .map(|u| (u.email.clone(), u.password_hash.clone()))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Return the owner for `email` if `password` matches its stored hash.
    pub fn authenticate(&self, email: &str, password: &str) -> Option<Owner> {
        let phc = self.users.get(email)?;
        password::verify_password(phc, password).then(|| Owner::from_email(email))
    }
}

/// Split an `Authorization: Basic ...` header value into `(user, password)`.
pub fn parse_basic(header: &str) -> Option<(String, String)> {
    let (scheme, encoded) = header.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("basic") {
        return None;
    }
    let decoded = STANDARD.decode(encoded.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (user, password) = decoded.split_once(':')?;
    if user.is_empty() {
        return None;
    }
    Some((user.to_owned(), password.to_owned()))
}
