//! Resilient upload URL handle.

use super::File;
use crate::backend::RawUploadUrl;
use crate::client::Session;
use crate::error::B2Error;
use crate::types::UploadFileRequest;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// An upload URL obtained from a bucket.
///
/// The same URL may serve several uploads until B2 expires it. An expired
/// URL surfaces as whatever error the raw client reports and is handled like
/// any other failure; the handle does not fetch a replacement URL.
#[derive(Clone)]
pub struct UploadUrl {
    raw: Arc<dyn RawUploadUrl>,
    session: Session,
}

impl UploadUrl {
    pub(crate) fn new(raw: Arc<dyn RawUploadUrl>, session: Session) -> Self {
        Self { raw, session }
    }

    /// The session this upload URL belongs to.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Upload one file. Every retry re-sends the full content.
    pub async fn upload_file(
        &self,
        ctx: &CancellationToken,
        request: &UploadFileRequest,
    ) -> Result<File, B2Error> {
        let raw = &self.raw;
        let file = self
            .session
            .resilient(ctx, move || raw.upload_file(ctx, request))
            .await?;
        Ok(File::new(file, self.clone()))
    }
}

impl std::fmt::Debug for UploadUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UploadUrl").finish_non_exhaustive()
    }
}
