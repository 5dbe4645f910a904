//! Resilient bucket handle.

use super::UploadUrl;
use crate::backend::RawBucket;
use crate::client::Session;
use crate::error::B2Error;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// A bucket bound to the session it was created or listed from.
///
/// After [`delete_bucket`](Bucket::delete_bucket) succeeds the handle refers
/// to nothing and must not be used again.
#[derive(Clone)]
pub struct Bucket {
    raw: Arc<dyn RawBucket>,
    session: Session,
}

impl Bucket {
    pub(crate) fn new(raw: Arc<dyn RawBucket>, session: Session) -> Self {
        Self { raw, session }
    }

    /// Bucket name.
    pub fn name(&self) -> &str {
        self.raw.name()
    }

    /// The session this bucket belongs to.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Delete the bucket.
    pub async fn delete_bucket(&self, ctx: &CancellationToken) -> Result<(), B2Error> {
        let raw = &self.raw;
        self.session
            .resilient(ctx, move || raw.delete_bucket(ctx))
            .await
    }

    /// Obtain an upload URL for this bucket.
    pub async fn get_upload_url(&self, ctx: &CancellationToken) -> Result<UploadUrl, B2Error> {
        let raw = &self.raw;
        let url = self
            .session
            .resilient(ctx, move || raw.get_upload_url(ctx))
            .await?;
        Ok(UploadUrl::new(url, self.session.clone()))
    }
}

impl std::fmt::Debug for Bucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bucket")
            .field("name", &self.name())
            .finish_non_exhaustive()
    }
}
