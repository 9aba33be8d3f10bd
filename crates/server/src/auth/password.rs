use argon2::Argon2;
use argon2::password_hash::{PasswordHash, PasswordVerifier};

/// Check `candidate` against a stored argon2 PHC string.
///
/// A hash that does not parse never matches.
pub fn verify_password(phc: &str, candidate: &str) -> bool {
    PasswordHash::new(phc).is_ok_and(|parsed| {
        Argon2::default()
            .verify_password(candidate.as_bytes(), &parsed)
            .is_ok()
    })
}
