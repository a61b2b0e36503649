use crate::config::RelayConfig;
use crate::services::storage::{MemoryObjectStore, ObjectStore, S3ObjectStore};
use aws_sdk_s3::config::Region;
use std::env;
use std::sync::Arc;
use tracing::{info, warn};

/// Builds the object store selected by the config.
pub async fn setup_store(config: &RelayConfig) -> Arc<dyn ObjectStore> {
    match config.storage_backend.as_str() {
        "memory" => {
            info!("🗃️  Storage: in-memory (bucket: {})", config.bucket);
            Arc::new(MemoryObjectStore::new(config.bucket.clone()))
        }
        "s3" => setup_s3(config).await,
        other => {
            warn!("Unknown storage backend '{}', using s3", other);
            setup_s3(config).await
        }
    }
}

async fn setup_s3(config: &RelayConfig) -> Arc<dyn ObjectStore> {
    info!(
        "☁️  Storage: S3 bucket {} in {}{}",
        config.bucket,
        config.region,
        config
            .endpoint_url
            .as_deref()
            .map(|e| format!(" via {}", e))
            .unwrap_or_default()
    );

    let mut loader = aws_config::from_env().region(Region::new(config.region.clone()));
    if let Some(endpoint) = &config.endpoint_url {
        loader = loader.endpoint_url(endpoint);
    }

    // Static credentials for MinIO-style deployments; the default provider
    // chain covers everything else.
    if let (Ok(access_key), Ok(secret_key)) =
        (env::var("S3_ACCESS_KEY"), env::var("S3_SECRET_KEY"))
    {
        loader = loader.credentials_provider(aws_sdk_s3::config::Credentials::new(
            access_key, secret_key, None, None, "static",
        ));
    }

    let aws_config = loader.load().await;

    // Path-style addressing is required by MinIO endpoints.
    let s3_config = aws_sdk_s3::config::Builder::from(&aws_config)
        .force_path_style(config.endpoint_url.is_some())
        .build();

    let client = aws_sdk_s3::Client::from_conf(s3_config);
    Arc::new(S3ObjectStore::new(
        client,
        config.bucket.clone(),
        config.region.clone(),
        config.endpoint_url.clone(),
    ))
}
