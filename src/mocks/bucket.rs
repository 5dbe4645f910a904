//! Mock bucket, upload URL and file.

use super::Script;
use crate::backend::{RawBucket, RawFile, RawUploadUrl};
use crate::error::B2Error;
use crate::types::{BucketType, UploadFileRequest};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Mock bucket.
///
/// Every `get_upload_url` call hands out the same [`MockUploadUrl`].
pub struct MockBucket {
    name: String,
    bucket_type: BucketType,
    delete: Script,
    get_upload_url: Script,
    upload_url: Arc<MockUploadUrl>,
}

impl MockBucket {
    /// Create a mock bucket.
    pub fn new(name: impl Into<String>, bucket_type: BucketType) -> Self {
        Self {
            name: name.into(),
            bucket_type,
            delete: Script::default(),
            get_upload_url: Script::default(),
            upload_url: Arc::new(MockUploadUrl::new()),
        }
    }

    /// Type the bucket was created with.
    pub fn bucket_type(&self) -> BucketType {
        self.bucket_type
    }

    /// Fail the next `delete_bucket` call.
    pub fn fail_delete(&self, error: B2Error) {
        self.delete.push(error);
    }

    /// Fail the next `get_upload_url` call.
    pub fn fail_get_upload_url(&self, error: B2Error) {
        self.get_upload_url.push(error);
    }

    /// Number of `delete_bucket` calls.
    pub fn delete_calls(&self) -> usize {
        self.delete.calls()
    }

    /// Number of `get_upload_url` calls.
    pub fn get_upload_url_calls(&self) -> usize {
        self.get_upload_url.calls()
    }

    /// The upload URL this bucket hands out.
    pub fn upload_url(&self) -> Arc<MockUploadUrl> {
        self.upload_url.clone()
    }
}

#[async_trait]
impl RawBucket for MockBucket {
    fn name(&self) -> &str {
        &self.name
    }

    async fn delete_bucket(&self, _ctx: &CancellationToken) -> Result<(), B2Error> {
        self.delete.next()
    }

    async fn get_upload_url(
        &self,
        _ctx: &CancellationToken,
    ) -> Result<Arc<dyn RawUploadUrl>, B2Error> {
        self.get_upload_url.next()?;
        Ok(self.upload_url.clone())
    }
}

/// Mock upload URL.
///
/// Records every request it receives, failed attempts included.
pub struct MockUploadUrl {
    upload: Script,
    requests: Mutex<Vec<UploadFileRequest>>,
    file: Arc<MockFile>,
}

impl MockUploadUrl {
    /// Create a mock upload URL.
    pub fn new() -> Self {
        Self {
            upload: Script::default(),
            requests: Mutex::new(Vec::new()),
            file: Arc::new(MockFile::new()),
        }
    }

    /// Fail the next `upload_file` call.
    pub fn fail_upload(&self, error: B2Error) {
        self.upload.push(error);
    }

    /// Number of `upload_file` calls.
    pub fn upload_calls(&self) -> usize {
        self.upload.calls()
    }

    /// Every request received, oldest first.
    pub fn requests(&self) -> Vec<UploadFileRequest> {
        self.requests.lock().clone()
    }

    /// The file every successful upload returns.
    pub fn file(&self) -> Arc<MockFile> {
        self.file.clone()
    }
}

impl Default for MockUploadUrl {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RawUploadUrl for MockUploadUrl {
    async fn upload_file(
        &self,
        _ctx: &CancellationToken,
        request: &UploadFileRequest,
    ) -> Result<Arc<dyn RawFile>, B2Error> {
        self.requests.lock().push(request.clone());
        self.upload.next()?;
        Ok(self.file.clone())
    }
}

/// Mock file version.
#[derive(Default)]
pub struct MockFile {
    delete: Script,
}

impl MockFile {
    /// Create a mock file.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail the next `delete_file_version` call.
    pub fn fail_delete(&self, error: B2Error) {
        self.delete.push(error);
    }

    /// Number of `delete_file_version` calls.
    pub fn delete_calls(&self) -> usize {
        self.delete.calls()
    }
}

#[async_trait]
impl RawFile for MockFile {
    async fn delete_file_version(&self, _ctx: &CancellationToken) -> Result<(), B2Error> {
        self.delete.next()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mocks::TestFixtures;

    #[tokio::test]
    async fn test_upload_records_failed_attempts() {
        let url = MockUploadUrl::new();
        let ctx = CancellationToken::new();
        let request = TestFixtures::sample_upload();

        url.fail_upload(TestFixtures::expired_token());
        assert!(url.upload_file(&ctx, &request).await.is_err());
        url.upload_file(&ctx, &request).await.unwrap();

        assert_eq!(url.upload_calls(), 2);
        assert_eq!(url.requests().len(), 2);
        assert_eq!(url.requests()[1].content, request.content);
    }

    #[tokio::test]
    async fn test_bucket_shares_upload_url() {
        let bucket = MockBucket::new("b", BucketType::AllPrivate);
        let ctx = CancellationToken::new();

        let raw = bucket.get_upload_url(&ctx).await.unwrap();
        let request = TestFixtures::sample_upload();
        raw.upload_file(&ctx, &request).await.unwrap();

        assert_eq!(bucket.upload_url().upload_calls(), 1);
        assert_eq!(bucket.get_upload_url_calls(), 1);
    }
}
