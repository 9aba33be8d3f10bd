mod auth;
mod logging;
mod server;
mod store;

#[cfg(test)]
mod tests;

pub use auth::{AuthConfig, UserConfig};
pub use logging::{LogFormat, LoggingConfig};
pub use server::ServerConfig;
pub use store::{DataBackend, DataConfig, MetadataBackend, MetadataConfig, S3Settings};

use serde::Deserialize;

/// Top-level configuration for the fragments server, loaded from a TOML file.
#[derive(Debug, Default, Deserialize)]
pub struct FragmentsConfig {
    /// HTTP server bind configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Metadata store configuration.
    #[serde(default)]
    pub metadata: MetadataConfig,
    /// Data store configuration.
    #[serde(default)]
    pub data: DataConfig,
    /// Authentication configuration.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Log output configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}
