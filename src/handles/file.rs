//! Resilient file handle.

use super::UploadUrl;
use crate::backend::RawFile;
use crate::client::Session;
use crate::error::B2Error;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// One uploaded file version and the upload URL it went through.
#[derive(Clone)]
pub struct File {
    raw: Arc<dyn RawFile>,
    upload_url: UploadUrl,
}

impl File {
    pub(crate) fn new(raw: Arc<dyn RawFile>, upload_url: UploadUrl) -> Self {
        Self { raw, upload_url }
    }

    /// The upload URL this file was uploaded through.
    pub fn upload_url(&self) -> &UploadUrl {
        &self.upload_url
    }

    /// The session this file belongs to.
    pub fn session(&self) -> &Session {
        self.upload_url.session()
    }

    /// Delete this file version.
    pub async fn delete_file_version(&self, ctx: &CancellationToken) -> Result<(), B2Error> {
        let raw = &self.raw;
        self.session()
            .resilient(ctx, move || raw.delete_file_version(ctx))
            .await
    }
}

impl std::fmt::Debug for File {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("File").finish_non_exhaustive()
    }
}
