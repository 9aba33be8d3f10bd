use serde::Deserialize;

/// Metadata backend selection.
#[derive(Debug, Default, Deserialize)]
pub struct MetadataConfig {
    #[serde(default)]
    pub backend: MetadataBackend,
}

/// Available metadata backends.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetadataBackend {
    #[default]
    Memory,
}

/// Data backend selection plus the settings a remote backend needs.
#[derive(Debug, Default, Deserialize)]
pub struct DataConfig {
    #[serde(default)]
    pub backend: DataBackend,
    /// Settings for `backend = "s3"`.
    #[serde(default)]
    pub s3: S3Settings,
}

/// Available data backends.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataBackend {
    #[default]
    Memory,
    S3,
}

/// `[data.s3]` table.
#[derive(Debug, Deserialize)]
pub struct S3Settings {
    #[serde(default = "default_region")]
    pub region: String,
    /// Bucket name. Required when the S3 backend is selected.
    pub bucket: Option<String>,
    /// Key prefix prepended to every object key.
    pub prefix: Option<String>,
    /// Custom endpoint for S3-compatible services.
    pub endpoint_url: Option<String>,
    #[serde(default)]
    pub force_path_style: bool,
}

impl Default for S3Settings {
    fn default() -> Self {
        Self {
            region: default_region(),
            bucket: None,
            prefix: None,
            endpoint_url: None,
            force_path_style: false,
        }
    }
}

fn default_region() -> String {
    "us-east-1".to_owned()
}
