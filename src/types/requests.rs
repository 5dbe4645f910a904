//! Request types handed to the raw client.

use bytes::Bytes;
use std::collections::HashMap;

/// Content type asking B2 to pick one from the file name.
pub const AUTO_CONTENT_TYPE: &str = "b2/x-auto";

/// SHA-1 placeholder telling B2 to skip checksum verification.
pub const DO_NOT_VERIFY: &str = "do_not_verify";

/// Request to upload a single file through an upload URL.
///
/// The content is held as [`Bytes`] so a retried upload re-sends the whole
/// body from the start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFileRequest {
    /// File name within the bucket.
    pub name: String,
    /// File content.
    pub content: Bytes,
    /// Declared content length in bytes.
    pub size: u64,
    /// MIME type.
    pub content_type: String,
    /// Hex SHA-1 of the content, or [`DO_NOT_VERIFY`].
    pub content_sha1: String,
    /// Custom file info (`X-Bz-Info-*` headers).
    pub info: HashMap<String, String>,
}

impl UploadFileRequest {
    /// Create a new upload request; the size is taken from the content.
    pub fn new(name: impl Into<String>, content: impl Into<Bytes>) -> Self {
        let content = content.into();
        Self {
            name: name.into(),
            size: content.len() as u64,
            content,
            content_type: AUTO_CONTENT_TYPE.to_string(),
            content_sha1: DO_NOT_VERIFY.to_string(),
            info: HashMap::new(),
        }
    }

    /// Override the declared size.
    pub fn with_size(mut self, size: u64) -> Self {
        self.size = size;
        self
    }

    /// Set the content type.
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = content_type.into();
        self
    }

    /// Set the SHA-1 of the content.
    pub fn with_sha1(mut self, sha1: impl Into<String>) -> Self {
        self.content_sha1 = sha1.into();
        self
    }

    /// Add a custom file info entry.
    pub fn with_info(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.info.insert(key.into(), value.into());
        self
    }
}
