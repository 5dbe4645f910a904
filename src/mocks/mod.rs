//! Mock implementations for testing.
//!
//! This module provides scripted implementations of the raw client traits.
//! Each operation pops queued failures first and succeeds once the queue is
//! empty, counting every call.

mod bucket;
mod root;

pub use bucket::{MockBucket, MockFile, MockUploadUrl};
pub use root::MockRoot;

use crate::error::{ApiError, B2Error, CredentialsError, NetworkError};
use crate::resilience::JitterSource;
use crate::types::UploadFileRequest;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Queue of failures for one mocked operation, plus a call counter.
#[derive(Default)]
pub(crate) struct Script {
    failures: Mutex<VecDeque<B2Error>>,
    calls: AtomicUsize,
}

impl Script {
    pub(crate) fn push(&self, error: B2Error) {
        self.failures.lock().push_back(error);
    }

    /// Count a call and return the next queued failure, if any.
    pub(crate) fn next(&self) -> Result<(), B2Error> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.failures.lock().pop_front() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub(crate) fn reset_calls(&self) {
        self.calls.store(0, Ordering::SeqCst);
    }
}

/// Jitter source that cycles through fixed draws.
#[derive(Debug)]
pub struct SequenceJitter {
    draws: Vec<f64>,
    position: AtomicUsize,
}

impl SequenceJitter {
    /// Create a source returning `draws` in order, wrapping around.
    ///
    /// An empty list behaves like a constant draw of `0.5`.
    pub fn new(draws: Vec<f64>) -> Self {
        Self {
            draws,
            position: AtomicUsize::new(0),
        }
    }
}

impl JitterSource for SequenceJitter {
    fn draw(&self) -> f64 {
        if self.draws.is_empty() {
            return 0.5;
        }
        let i = self.position.fetch_add(1, Ordering::SeqCst);
        self.draws[i % self.draws.len()]
    }
}

/// Test fixtures for B2 operations.
pub struct TestFixtures;

impl TestFixtures {
    /// `401 expired_auth_token`.
    pub fn expired_token() -> B2Error {
        B2Error::Api(ApiError::new(
            401,
            "expired_auth_token",
            "Authorization token has expired",
        ))
    }

    /// `503 service_unavailable`.
    pub fn service_unavailable() -> B2Error {
        B2Error::Api(ApiError::new(
            503,
            "service_unavailable",
            "c001_v0001000_t0000 is too busy",
        ))
    }

    /// `429 too_many_requests` carrying a Retry-After hint.
    pub fn too_many_requests(retry_after: Duration) -> B2Error {
        B2Error::Api(
            ApiError::new(429, "too_many_requests", "Too many requests")
                .with_retry_after(retry_after),
        )
    }

    /// A reset connection.
    pub fn connection_reset() -> B2Error {
        B2Error::Network(NetworkError::ConnectionReset)
    }

    /// `400 bad_request`.
    pub fn bad_request() -> B2Error {
        B2Error::Api(ApiError::new(400, "bad_request", "Invalid bucket name"))
    }

    /// A rejected application key.
    pub fn unauthorized() -> B2Error {
        B2Error::Credentials(CredentialsError::Invalid {
            message: "Invalid applicationKeyId or applicationKey".to_string(),
        })
    }

    /// A small text upload.
    pub fn sample_upload() -> UploadFileRequest {
        UploadFileRequest::new("hello.txt", "Hello, B2!")
            .with_content_type("text/plain")
            .with_info("author", "tests")
    }
}
