use anyhow::Result;
use async_trait::async_trait;
use aws_sdk_s3::Client;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::ObjectCannedAcl;
use bytes::Bytes;
use dashmap::DashMap;

/// Storage seam for the relay: write bytes under a key with public-read
/// access and return the object's public location URL. Failures are opaque
/// to callers.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    async fn put(&self, key: &str, data: Bytes) -> Result<String>;
}

pub struct S3ObjectStore {
    client: Client,
    bucket: String,
    region: String,
    endpoint_url: Option<String>,
}

impl S3ObjectStore {
    pub fn new(
        client: Client,
        bucket: String,
        region: String,
        endpoint_url: Option<String>,
    ) -> Self {
        Self {
            client,
            bucket,
            region,
            endpoint_url,
        }
    }

    fn location(&self, key: &str) -> String {
        match &self.endpoint_url {
            // Custom endpoints (MinIO and friends) serve path-style URLs.
            Some(endpoint) => format!(
                "{}/{}/{}",
                endpoint.trim_end_matches('/'),
                self.bucket,
                key
            ),
            None => format!(
                "https://{}.s3.{}.amazonaws.com/{}",
                self.bucket, self.region, key
            ),
        }
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn put(&self, key: &str, data: Bytes) -> Result<String> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .acl(ObjectCannedAcl::PublicRead)
            .body(ByteStream::from(data))
            .send()
            .await?;
        Ok(self.location(key))
    }
}

/// In-process store for development and tests. Objects live in a
/// concurrent map and locations use a `memory://` scheme.
pub struct MemoryObjectStore {
    bucket: String,
    objects: DashMap<String, Bytes>,
}

impl MemoryObjectStore {
    pub fn new(bucket: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            objects: DashMap::new(),
        }
    }

    pub fn object(&self, key: &str) -> Option<Bytes> {
        self.objects.get(key).map(|entry| entry.value().clone())
    }

    pub fn keys(&self) -> Vec<String> {
        self.objects
            .iter()
            .map(|entry| entry.key().clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

#[async_trait]
impl ObjectStore for MemoryObjectStore {
    async fn put(&self, key: &str, data: Bytes) -> Result<String> {
        self.objects.insert(key.to_string(), data);
        Ok(format!("memory://{}/{}", self.bucket, key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_s3::config::{BehaviorVersion, Region};

    fn offline_client() -> Client {
        let config = aws_sdk_s3::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new("us-east-1"))
            .build();
        Client::from_conf(config)
    }

    #[tokio::test]
    async fn test_memory_store_roundtrip() {
        let store = MemoryObjectStore::new("uploads");
        assert!(store.is_empty());

        let location = store
            .put("image_abc.png", Bytes::from_static(b"pngbytes"))
            .await
            .unwrap();

        assert_eq!(location, "memory://uploads/image_abc.png");
        assert_eq!(store.len(), 1);
        assert_eq!(
            store.object("image_abc.png").unwrap().as_ref(),
            b"pngbytes"
        );
        assert!(store.object("missing").is_none());
    }

    #[test]
    fn test_s3_location_virtual_hosted() {
        let store = S3ObjectStore::new(
            offline_client(),
            "uploads".to_string(),
            "us-east-1".to_string(),
            None,
        );
        assert_eq!(
            store.location("image_abc.png"),
            "https://uploads.s3.us-east-1.amazonaws.com/image_abc.png"
        );
    }

    #[test]
    fn test_s3_location_path_style_for_custom_endpoint() {
        let store = S3ObjectStore::new(
            offline_client(),
            "uploads".to_string(),
            "us-east-1".to_string(),
            Some("http://127.0.0.1:9000/".to_string()),
        );
        assert_eq!(
            store.location("image_abc.png"),
            "http://127.0.0.1:9000/uploads/image_abc.png"
        );
    }
}
