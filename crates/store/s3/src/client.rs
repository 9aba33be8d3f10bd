use tracing::debug;

use crate::config::S3Config;

/// Build an S3 client from the standard AWS credential chain plus the
/// overrides in `config`.
pub async fn build_client(config: &S3Config) -> aws_sdk_s3::Client {
    let mut loader = aws_config::from_env().region(aws_config::Region::new(config.region.clone()));

    if let Some(endpoint) = &config.endpoint_url {
        debug!(endpoint = %endpoint, "using custom S3 endpoint");
        loader = loader.endpoint_url(endpoint);
    }

    let sdk_config = loader.load().await;
    let s3_config = aws_sdk_s3::config::Builder::from(&sdk_config)
        .force_path_style(config.force_path_style)
        .build();

    aws_sdk_s3::Client::from_conf(s3_config)
}
