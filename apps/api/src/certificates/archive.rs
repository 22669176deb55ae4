//! Storage for rendered certificate pages.
//!
//! Carried in `AppState` as `Arc<dyn PageArchive>`; S3 (or MinIO locally) in production.

use async_trait::async_trait;
use aws_sdk_s3::primitives::ByteStream;
use tracing::info;

use crate::errors::AppError;

#[async_trait]
pub trait PageArchive: Send + Sync {
    /// Stores a rendered HTML page under `key`.
    async fn store(&self, key: &str, html: String) -> Result<(), AppError>;
}

pub struct S3PageArchive {
    client: aws_sdk_s3::Client,
    bucket: String,
}

impl S3PageArchive {
    pub fn new(client: aws_sdk_s3::Client, bucket: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
        }
    }
}

#[async_trait]
impl PageArchive for S3PageArchive {
    async fn store(&self, key: &str, html: String) -> Result<(), AppError> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(ByteStream::from(html.into_bytes()))
            .content_type("text/html; charset=utf-8")
            .send()
            .await
            .map_err(|e| AppError::Storage(format!("S3 upload failed: {e}")))?;

        info!("Uploaded certificate page to s3://{}/{}", self.bucket, key);
        Ok(())
    }
}

/// Object key for a newly issued certificate page.
pub fn certificate_key(id: uuid::Uuid) -> String {
    format!("certificates/{id}.html")
}
