//! Resilience layer for B2 operations.
//!
//! Every resilient operation is a [`RetryExecutor`] loop whose attempt runs
//! the raw call inside a [`ReauthExecutor`]: auth expiry is repaired once per
//! attempt, transient failures are retried with [`BackoffPolicy`] waits, and
//! the wait is the only place cancellation is observed.

mod backoff;
mod reauth;
mod retry;

pub use backoff::{BackoffPolicy, FixedJitter, JitterSource, RandomJitter};
pub use reauth::{ReauthExecutor, Reauthorize};
pub use retry::{Classifier, Outcome, RetryExecutor};
