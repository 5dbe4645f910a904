//! Backblaze B2 Resilience Module
//!
//! Resilient wrapper around a raw, un-retried B2 client.
//!
//! # Features
//!
//! - **Retry**: Transient failures retried with near-exponential, jittered backoff
//! - **Reauthorization**: Expired tokens refreshed transparently, once per attempt
//! - **Cancellation**: Every operation takes a [`CancellationToken`](tokio_util::sync::CancellationToken)
//! - **Shared State**: Handles derived from a [`Session`] see the same authorization
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use b2::{B2Config, BucketType, Session, UploadFileRequest};
//! use std::sync::Arc;
//! use tokio_util::sync::CancellationToken;
//!
//! # async fn run(raw: Arc<dyn b2::RawRoot>) -> Result<(), b2::B2Error> {
//! let session = Session::builder(raw)
//!     .config(B2Config::builder().from_env().build()?)
//!     .build();
//! let ctx = CancellationToken::new();
//!
//! session.authorize_from_config(&ctx).await?;
//!
//! let bucket = session.create_bucket(&ctx, "my-bucket", BucketType::AllPrivate).await?;
//! let url = bucket.get_upload_url(&ctx).await?;
//! let file = url
//!     .upload_file(&ctx, &UploadFileRequest::new("hello.txt", "Hello, B2!"))
//!     .await?;
//! file.delete_file_version(&ctx).await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![deny(unsafe_code)]

pub mod backend;
pub mod client;
pub mod config;
pub mod credentials;
pub mod error;
pub mod handles;
pub mod mocks;
pub mod resilience;
pub mod types;

// Re-export main types at crate root
pub use backend::{RawBucket, RawFile, RawRoot, RawUploadUrl};
pub use client::{Session, SessionBuilder};
pub use config::{B2Config, B2ConfigBuilder};
pub use credentials::Credentials;
pub use error::{ApiError, B2Error, ConfigurationError, CredentialsError, NetworkError};
pub use handles::{Bucket, File, UploadUrl};
pub use resilience::{
    BackoffPolicy, Classifier, FixedJitter, JitterSource, Outcome, RandomJitter, ReauthExecutor,
    Reauthorize, RetryExecutor,
};
pub use types::{BucketType, UploadFileRequest};

/// Result type alias for B2 operations.
pub type Result<T> = std::result::Result<T, B2Error>;
