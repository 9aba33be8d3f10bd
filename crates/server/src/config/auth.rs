use serde::Deserialize;

/// Authentication configuration.
#[derive(Debug, Deserialize)]
pub struct AuthConfig {
    /// When false, the Basic username is trusted without a password check.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default)]
    pub users: Vec<UserConfig>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            users: Vec::new(),
        }
    }
}

/// A user allowed to sign in with HTTP Basic.
#[derive(Debug, Clone, Deserialize)]
pub struct UserConfig {
    pub email: String,
    /// Argon2 PHC string, e.g. `$argon2id$v=19$...`.
    pub password_hash: String,
}

fn default_enabled() -> bool {
    true
}
