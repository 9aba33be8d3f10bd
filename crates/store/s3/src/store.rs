use async_trait::async_trait;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;
use bytes::Bytes;
use tracing::{debug, error, instrument};

use fragments_store::data::ByteStore;
use fragments_store::error::StoreError;
use fragments_store::key::StoreKey;

use crate::client::build_client;
use crate::config::S3Config;
use crate::error::classify_sdk_error;

/// [`ByteStore`] that keeps each fragment's data as one S3 object.
pub struct S3ByteStore {
    config: S3Config,
    client: aws_sdk_s3::Client,
}

impl std::fmt::Debug for S3ByteStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("S3ByteStore")
            .field("config", &self.config)
            .field("client", &"<S3Client>")
            .finish()
    }
}

impl S3ByteStore {
    /// Create a new `S3ByteStore` by building an AWS SDK client.
    pub async fn new(config: S3Config) -> Self {
        let client = build_client(&config).await;
        Self { config, client }
    }

    /// Create an `S3ByteStore` with a pre-built client (for testing).
    pub fn with_client(config: S3Config, client: aws_sdk_s3::Client) -> Self {
        Self { config, client }
    }

    /// Verify the bucket is reachable.
    #[instrument(skip(self), fields(bucket = %self.config.bucket))]
    pub async fn health_check(&self) -> Result<(), StoreError> {
        self.client
            .head_bucket()
            .bucket(&self.config.bucket)
            .send()
            .await
            .map_err(|e| {
                let err_str = DisplayErrorContext(&e).to_string();
                error!(error = %err_str, "S3 health check failed");
                StoreError::Io(format!("S3 health check failed: {err_str}"))
            })?;
        Ok(())
    }

    fn object_key(&self, key: &StoreKey) -> String {
        self.config.object_key(&key.canonical())
    }
}

#[async_trait]
impl ByteStore for S3ByteStore {
    #[instrument(skip(self, data), fields(key = %key, size = data.len()))]
    async fn write(&self, key: &StoreKey, data: Bytes) -> Result<(), StoreError> {
        let object_key = self.object_key(key);

        self.client
            .put_object()
            .bucket(&self.config.bucket)
            .key(&object_key)
            .body(ByteStream::from(data))
            .send()
            .await
            .map_err(|e| {
                let err_str = DisplayErrorContext(&e).to_string();
                error!(bucket = %self.config.bucket, key = %object_key, error = %err_str, "S3 put_object failed");
                StoreError::Io(format!("S3 upload failed: {err_str}"))
            })?;

        debug!(bucket = %self.config.bucket, key = %object_key, "S3 object uploaded");
        Ok(())
    }

    #[instrument(skip(self), fields(key = %key))]
    async fn read(&self, key: &StoreKey) -> Result<Bytes, StoreError> {
        let object_key = self.object_key(key);

        let output = self
            .client
            .get_object()
            .bucket(&self.config.bucket)
            .key(&object_key)
            .send()
            .await
            .map_err(|e| {
                if e.as_service_error().is_some_and(|se| se.is_no_such_key()) {
                    return StoreError::NotFound(key.canonical());
                }
                let err_str = DisplayErrorContext(&e).to_string();
                error!(bucket = %self.config.bucket, key = %object_key, error = %err_str, "S3 get_object failed");
                classify_sdk_error(&key.canonical(), &err_str)
            })?;

        let data = output
            .body
            .collect()
            .await
            .map_err(|e| StoreError::Io(format!("failed to read S3 body: {e}")))?
            .into_bytes();

        debug!(bucket = %self.config.bucket, key = %object_key, size = data.len(), "S3 object downloaded");
        Ok(data)
    }

    #[instrument(skip(self), fields(key = %key))]
    async fn delete(&self, key: &StoreKey) -> Result<(), StoreError> {
        let object_key = self.object_key(key);

        // S3 deletes are idempotent; probe first so a missing object is
        // reported as NotFound like every other backend.
        self.client
            .head_object()
            .bucket(&self.config.bucket)
            .key(&object_key)
            .send()
            .await
            .map_err(|e| {
                if e.as_service_error().is_some_and(|se| se.is_not_found()) {
                    return StoreError::NotFound(key.canonical());
                }
                let err_str = DisplayErrorContext(&e).to_string();
                classify_sdk_error(&key.canonical(), &err_str)
            })?;

        self.client
            .delete_object()
            .bucket(&self.config.bucket)
            .key(&object_key)
            .send()
            .await
            .map_err(|e| {
                let err_str = DisplayErrorContext(&e).to_string();
                error!(bucket = %self.config.bucket, key = %object_key, error = %err_str, "S3 delete_object failed");
                StoreError::Io(format!("S3 delete failed: {err_str}"))
            })?;

        debug!(bucket = %self.config.bucket, key = %object_key, "S3 object deleted");
        Ok(())
    }
}
