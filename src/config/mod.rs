use std::env;

/// Relay configuration, sourced from the environment.
#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// Destination bucket (default: "uploads")
    pub bucket: String,

    /// Bucket region (default: "us-east-1")
    pub region: String,

    /// Custom S3 endpoint for MinIO-style deployments (default: none)
    pub endpoint_url: Option<String>,

    /// Storage backend: "s3" or "memory" (default: "s3")
    pub storage_backend: String,

    /// Maximum accepted request body size in bytes (default: 10 MB)
    pub max_body_size: usize,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            bucket: "uploads".to_string(),
            region: "us-east-1".to_string(),
            endpoint_url: None,
            storage_backend: "s3".to_string(),
            max_body_size: 10 * 1024 * 1024, // 10 MB
        }
    }
}

impl RelayConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let default = Self::default();

        Self {
            bucket: env::var("UPLOAD_BUCKET").unwrap_or(default.bucket),

            region: env::var("UPLOAD_REGION").unwrap_or(default.region),

            endpoint_url: env::var("S3_ENDPOINT").ok().filter(|v| !v.is_empty()),

            storage_backend: env::var("STORAGE_BACKEND").unwrap_or(default.storage_backend),

            max_body_size: env::var("MAX_BODY_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(default.max_body_size),
        }
    }

    /// Create config for development (in-memory storage, no AWS account)
    pub fn development() -> Self {
        Self {
            storage_backend: "memory".to_string(),
            ..Self::default()
        }
    }
}
