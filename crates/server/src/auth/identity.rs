use sha2::{Digest, Sha256};

use fragments_core::OwnerId;

/// The authenticated caller, inserted into request extensions by
/// [`AuthLayer`](super::AuthLayer).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Owner {
    pub email: String,
    pub id: OwnerId,
}

impl Owner {
    pub fn from_email(email: &str) -> Self {
        Self {
            email: email.to_owned(),
            id: owner_id_for_email(email),
        }
    }
}

/// Owner ids are the lowercase hex SHA-256 of the email, so raw addresses
/// never reach the stores.
pub fn owner_id_for_email(email: &str) -> OwnerId {
    OwnerId::new(hex::encode(Sha256::digest(email.as_bytes())))
}
