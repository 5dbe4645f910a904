//! Retry loop with backoff and cooperative cancellation.

use super::backoff::BackoffPolicy;
use crate::error::B2Error;
use std::future::Future;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Result of one attempt handed back to the retry loop.
#[derive(Debug)]
pub enum Outcome<T> {
    /// The attempt settled the operation; return this result as is.
    Final(Result<T, B2Error>),
    /// The attempt failed; let the classifier decide whether to try again.
    Retry(B2Error),
}

impl<T> From<Result<T, B2Error>> for Outcome<T> {
    /// Successes are final, failures are retry candidates.
    fn from(result: Result<T, B2Error>) -> Self {
        match result {
            Ok(value) => Outcome::Final(Ok(value)),
            Err(err) => Outcome::Retry(err),
        }
    }
}

/// Decides which errors are retried and how long to wait.
pub trait Classifier: Send + Sync {
    /// Whether `err` should be retried.
    fn transient(&self, err: &B2Error) -> bool;

    /// A wait that overrides the computed backoff for `err`.
    fn backoff(&self, err: &B2Error) -> Option<Duration>;
}

/// Runs an attempt until it is final, fails permanently, or is cancelled.
///
/// There is no attempt ceiling. A caller that needs a deadline cancels the
/// token; that is the only way to stop a loop that keeps seeing transient
/// errors.
#[derive(Debug, Clone)]
pub struct RetryExecutor {
    policy: BackoffPolicy,
}

impl RetryExecutor {
    /// Create a new executor.
    pub fn new(policy: BackoffPolicy) -> Self {
        Self { policy }
    }

    /// The backoff policy in use.
    pub fn policy(&self) -> &BackoffPolicy {
        &self.policy
    }

    /// Execute `attempt` with retry logic.
    ///
    /// The wait between attempts races `ctx`; if the token fires first the
    /// pending error is dropped and [`B2Error::Cancelled`] is returned.
    pub async fn execute<C, F, Fut, T>(
        &self,
        ctx: &CancellationToken,
        classifier: &C,
        mut attempt: F,
    ) -> Result<T, B2Error>
    where
        C: Classifier + ?Sized,
        F: FnMut() -> Fut,
        Fut: Future<Output = Outcome<T>>,
    {
        let mut backoff = self.policy.initial();
        let mut retries: u32 = 0;

        loop {
            let error = match attempt().await {
                Outcome::Final(result) => {
                    if retries > 0 && result.is_ok() {
                        debug!(retries = retries, "Operation succeeded after retry");
                    }
                    return result;
                }
                Outcome::Retry(error) => error,
            };

            if !classifier.transient(&error) {
                if retries > 0 {
                    warn!(
                        retries = retries,
                        error = %error,
                        "Operation failed with non-transient error after retries"
                    );
                }
                return Err(error);
            }

            backoff = match classifier.backoff(&error) {
                Some(wait) => wait,
                None => self.policy.next(backoff),
            };
            retries += 1;

            debug!(
                retry = retries,
                backoff_ms = backoff.as_millis(),
                error = %error,
                "Retrying operation after backoff"
            );

            tokio::select! {
                biased;
                _ = ctx.cancelled() => {
                    debug!(retry = retries, error = %error, "Retry wait cancelled");
                    return Err(B2Error::Cancelled);
                }
                _ = tokio::time::sleep(backoff) => {}
            }
        }
    }
}

impl Default for RetryExecutor {
    fn default() -> Self {
        Self::new(BackoffPolicy::default())
    }
}
