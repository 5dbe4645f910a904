//! Raw client contract wrapped by the resilient handles.
//!
//! These traits describe the un-retried B2 client: one call, one request.
//! Implementations own the transport, signing and (de)serialization, and
//! decide how their own errors are classified through the hooks on
//! [`RawRoot`]. The classification hooks default to the B2 error taxonomy
//! implemented on [`B2Error`].

use crate::error::B2Error;
use crate::types::{BucketType, UploadFileRequest};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Root of the raw client: account authorization and bucket listing.
#[async_trait]
pub trait RawRoot: Send + Sync {
    /// Whether `err` is likely to succeed if retried.
    fn transient(&self, err: &B2Error) -> bool {
        err.is_transient()
    }

    /// Whether `err` means the authorization token must be refreshed.
    fn reauth(&self, err: &B2Error) -> bool {
        err.is_auth_expired()
    }

    /// A wait dictated by the service for this error, overriding backoff.
    fn backoff(&self, err: &B2Error) -> Option<Duration> {
        err.retry_after()
    }

    /// Authorize the account, replacing any token the client holds.
    async fn authorize_account(
        &self,
        ctx: &CancellationToken,
        account: &str,
        key: &str,
    ) -> Result<(), B2Error>;

    /// Create a bucket.
    async fn create_bucket(
        &self,
        ctx: &CancellationToken,
        name: &str,
        bucket_type: BucketType,
    ) -> Result<Arc<dyn RawBucket>, B2Error>;

    /// List the account's buckets.
    async fn list_buckets(
        &self,
        ctx: &CancellationToken,
    ) -> Result<Vec<Arc<dyn RawBucket>>, B2Error>;
}

/// A raw bucket reference.
#[async_trait]
pub trait RawBucket: Send + Sync {
    /// Bucket name.
    fn name(&self) -> &str;

    /// Delete the bucket.
    async fn delete_bucket(&self, ctx: &CancellationToken) -> Result<(), B2Error>;

    /// Obtain an upload URL for this bucket.
    async fn get_upload_url(
        &self,
        ctx: &CancellationToken,
    ) -> Result<Arc<dyn RawUploadUrl>, B2Error>;
}

/// A raw upload URL and its upload authorization token.
#[async_trait]
pub trait RawUploadUrl: Send + Sync {
    /// Upload one file.
    async fn upload_file(
        &self,
        ctx: &CancellationToken,
        request: &UploadFileRequest,
    ) -> Result<Arc<dyn RawFile>, B2Error>;
}

/// A raw reference to one uploaded file version.
#[async_trait]
pub trait RawFile: Send + Sync {
    /// Delete this file version.
    async fn delete_file_version(&self, ctx: &CancellationToken) -> Result<(), B2Error>;
}
