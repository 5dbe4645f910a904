//! Resilient handles derived from a [`Session`](crate::Session).
//!
//! Each handle wraps one raw reference and the shared session:
//! - Bucket: Delete, Get upload URL
//! - UploadUrl: Upload file
//! - File: Delete file version

mod bucket;
mod file;
mod upload_url;

pub use bucket::Bucket;
pub use file::File;
pub use upload_url::UploadUrl;
