use serde::{Deserialize, Serialize};

/// Configuration for the S3 byte store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct S3Config {
    /// AWS region (e.g. `"us-east-1"`).
    #[serde(default = "default_region")]
    pub region: String,

    /// Bucket holding fragment data.
    pub bucket: String,

    /// Optional key prefix for all objects (e.g. `"fragments/"`).
    #[serde(default)]
    pub prefix: Option<String>,

    /// Optional endpoint URL override for local development (e.g. `LocalStack`).
    #[serde(default)]
    pub endpoint_url: Option<String>,

    /// Address buckets by path instead of virtual host. Most self-hosted
    /// S3-compatible servers need this.
    #[serde(default)]
    pub force_path_style: bool,
}

impl S3Config {
    /// Create a new `S3Config` for `bucket` in the given region.
    pub fn new(region: impl Into<String>, bucket: impl Into<String>) -> Self {
        Self {
            region: region.into(),
            bucket: bucket.into(),
            prefix: None,
            endpoint_url: None,
            force_path_style: false,
        }
    }

    /// Set the key prefix.
    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// Set the endpoint URL override.
    #[must_use]
    pub fn with_endpoint_url(mut self, endpoint_url: impl Into<String>) -> Self {
        self.endpoint_url = Some(endpoint_url.into());
        self
    }

    #[must_use]
    pub fn with_force_path_style(mut self, force: bool) -> Self {
        self.force_path_style = force;
        self
    }

    /// Render the object key for a canonical `owner/id` store key.
    pub fn object_key(&self, canonical: &str) -> String {
        match &self.prefix {
            Some(prefix) => format!("{prefix}{canonical}"),
            None => canonical.to_owned(),
        }
    }
}

fn default_region() -> String {
    "us-east-1".to_owned()
}
