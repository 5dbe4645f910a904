//! Single-shot reauthorization around one call.

use crate::error::B2Error;
use async_trait::async_trait;
use std::future::Future;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Detects expired authorization and refreshes it.
#[async_trait]
pub trait Reauthorize: Send + Sync {
    /// Whether `err` means the authorization must be refreshed.
    fn reauth(&self, err: &B2Error) -> bool;

    /// Counter bumped by every successful authorization.
    fn generation(&self) -> u64;

    /// Refresh the authorization.
    ///
    /// `seen` is the generation observed before the call that failed;
    /// implementations may skip the refresh when a newer one already
    /// happened.
    async fn reauthorize(&self, ctx: &CancellationToken, seen: u64) -> Result<(), B2Error>;
}

/// Runs an operation once, reauthorizing and running it once more when the
/// first result says the authorization expired.
///
/// This never loops: a second failure, expired or not, is returned as is and
/// left to the surrounding retry loop.
pub struct ReauthExecutor<'a, R: ?Sized> {
    reauthorizer: &'a R,
}

impl<'a, R> ReauthExecutor<'a, R>
where
    R: Reauthorize + ?Sized,
{
    /// Create a new executor.
    pub fn new(reauthorizer: &'a R) -> Self {
        Self { reauthorizer }
    }

    /// Execute `op`, reauthorizing at most once.
    ///
    /// A failed reauthorization is returned in place of the error that
    /// triggered it.
    pub async fn execute<F, Fut, T>(&self, ctx: &CancellationToken, op: F) -> Result<T, B2Error>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<T, B2Error>>,
    {
        let seen = self.reauthorizer.generation();

        match op().await {
            Err(err) if self.reauthorizer.reauth(&err) => {
                debug!(error = %err, "Authorization expired, reauthorizing");
                self.reauthorizer.reauthorize(ctx, seen).await?;
                op().await
            }
            result => result,
        }
    }
}
