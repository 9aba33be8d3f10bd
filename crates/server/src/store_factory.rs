use std::sync::Arc;

use tracing::info;

use fragments_model::Fragments;
use fragments_store::{ByteStore, MetadataStore};
use fragments_store_memory::{MemoryByteStore, MemoryMetadataStore};
use fragments_store_s3::{S3ByteStore, S3Config};

use crate::config::{DataBackend, DataConfig, FragmentsConfig, MetadataBackend, MetadataConfig};
use crate::error::ServerError;

/// Create the metadata store from the given configuration.
pub fn create_metadata_store(config: &MetadataConfig) -> Arc<dyn MetadataStore> {
    match config.backend {
        MetadataBackend::Memory => Arc::new(MemoryMetadataStore::new()),
    }
}

/// Create the data store from the given configuration.
pub async fn create_byte_store(config: &DataConfig) -> Result<Arc<dyn ByteStore>, ServerError> {
    let store: Arc<dyn ByteStore> = match config.backend {
        DataBackend::Memory => Arc::new(MemoryByteStore::new()),
        DataBackend::S3 => {
            let settings = &config.s3;
            let bucket = settings.bucket.as_deref().ok_or_else(|| {
                ServerError::Config("s3 data backend requires [data.s3] bucket".into())
            })?;

            let mut s3_config = S3Config::new(&settings.region, bucket)
                .with_force_path_style(settings.force_path_style);
            if let Some(prefix) = &settings.prefix {
                s3_config = s3_config.with_prefix(prefix);
            }
            if let Some(endpoint) = &settings.endpoint_url {
                s3_config = s3_config.with_endpoint_url(endpoint);
            }

            let store = S3ByteStore::new(s3_config).await;
            store
                .health_check()
                .await
                .map_err(|e| ServerError::Config(format!("s3 data backend: {e}")))?;
            Arc::new(store)
        }
    };
    Ok(store)
}

/// Build the [`Fragments`] handle over both configured stores.
pub async fn create_fragments(config: &FragmentsConfig) -> Result<Fragments, ServerError> {
    let metadata = create_metadata_store(&config.metadata);
    let data = create_byte_store(&config.data).await?;
    info!(
        metadata = ?config.metadata.backend,
        data = ?config.data.backend,
        "stores initialized"
    );
    Ok(Fragments::new(metadata, data))
}
