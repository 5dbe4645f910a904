//! Resilient B2 session.
//!
//! The [`Session`] is the root handle. It owns the raw root client and the
//! credential pair the account was last authorized with, and every handle
//! derived from it shares that state, so a reauthorization performed through
//! any handle is seen by all of them.

use crate::backend::RawRoot;
use crate::config::B2Config;
use crate::credentials::Credentials;
use crate::error::{B2Error, ConfigurationError, CredentialsError};
use crate::handles::Bucket;
use crate::resilience::{
    BackoffPolicy, Classifier, JitterSource, Outcome, ReauthExecutor, Reauthorize, RetryExecutor,
};
use crate::types::BucketType;
use async_trait::async_trait;
use parking_lot::RwLock;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Root handle of the resilient client.
///
/// Cloning is cheap; every clone refers to the same session state.
#[derive(Clone)]
pub struct Session {
    inner: Arc<SessionInner>,
}

struct SessionInner {
    raw: Arc<dyn RawRoot>,
    config: B2Config,
    retry: RetryExecutor,
    credentials: RwLock<Option<Credentials>>,
    generation: AtomicU64,
    reauth_lock: tokio::sync::Mutex<()>,
}

impl Session {
    /// Create a session with the default configuration.
    pub fn new(raw: Arc<dyn RawRoot>) -> Self {
        SessionBuilder::new(raw).build()
    }

    /// Create a builder for a session around `raw`.
    pub fn builder(raw: Arc<dyn RawRoot>) -> SessionBuilder {
        SessionBuilder::new(raw)
    }

    /// The session configuration.
    pub fn config(&self) -> &B2Config {
        &self.inner.config
    }

    /// The credentials of the last successful authorization.
    pub fn credentials(&self) -> Option<Credentials> {
        self.inner.credentials.read().clone()
    }

    /// The account of the last successful authorization.
    pub fn account(&self) -> Option<String> {
        self.inner
            .credentials
            .read()
            .as_ref()
            .map(|c| c.account().to_string())
    }

    /// Whether both values refer to the same session state.
    pub fn same_session(&self, other: &Session) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Authorize the account.
    ///
    /// Transient failures are retried. The pair is stored only after the raw
    /// call succeeds.
    pub async fn authorize_account(
        &self,
        ctx: &CancellationToken,
        account: &str,
        key: &str,
    ) -> Result<(), B2Error> {
        let inner = &*self.inner;
        inner
            .retry
            .execute(ctx, self, move || async move {
                match inner.raw.authorize_account(ctx, account, key).await {
                    Ok(()) => {
                        self.store_credentials(Credentials::new(account, key));
                        Outcome::Final(Ok(()))
                    }
                    Err(err) => Outcome::Retry(err),
                }
            })
            .await
    }

    /// Authorize again with the stored credentials.
    pub async fn reauthorize_account(&self, ctx: &CancellationToken) -> Result<(), B2Error> {
        let credentials = self
            .credentials()
            .ok_or(B2Error::Credentials(CredentialsError::NotAuthorized))?;
        self.authorize_account(ctx, credentials.account(), credentials.key())
            .await
    }

    /// Authorize with the credentials from the session configuration.
    pub async fn authorize_from_config(&self, ctx: &CancellationToken) -> Result<(), B2Error> {
        let credentials = self
            .inner
            .config
            .credentials()
            .ok_or(B2Error::Configuration(ConfigurationError::MissingCredentials))?;
        self.authorize_account(ctx, credentials.account(), credentials.key())
            .await
    }

    /// Create a bucket.
    pub async fn create_bucket(
        &self,
        ctx: &CancellationToken,
        name: &str,
        bucket_type: BucketType,
    ) -> Result<Bucket, B2Error> {
        let raw = &self.inner.raw;
        let bucket = self
            .resilient(ctx, move || raw.create_bucket(ctx, name, bucket_type))
            .await?;
        Ok(Bucket::new(bucket, self.clone()))
    }

    /// List the account's buckets.
    pub async fn list_buckets(&self, ctx: &CancellationToken) -> Result<Vec<Bucket>, B2Error> {
        let raw = &self.inner.raw;
        let buckets = self.resilient(ctx, move || raw.list_buckets(ctx)).await?;
        Ok(buckets
            .into_iter()
            .map(|bucket| Bucket::new(bucket, self.clone()))
            .collect())
    }

    /// Run a raw call with reauthorization inside a retry loop.
    ///
    /// Shared by every handle level: an `Ok` from the reauth-wrapped call is
    /// final, an `Err` is classified by the retry loop.
    pub(crate) async fn resilient<F, Fut, T>(
        &self,
        ctx: &CancellationToken,
        op: F,
    ) -> Result<T, B2Error>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<T, B2Error>>,
    {
        let reauth = ReauthExecutor::new(self);
        let (reauth, op) = (&reauth, &op);
        self.inner
            .retry
            .execute(ctx, self, move || async move {
                Outcome::from(reauth.execute(ctx, op).await)
            })
            .await
    }

    fn store_credentials(&self, credentials: Credentials) {
        let account = credentials.account().to_string();
        *self.inner.credentials.write() = Some(credentials);
        let generation = self.inner.generation.fetch_add(1, Ordering::SeqCst) + 1;
        info!(account = %account, generation = generation, "Authorized B2 account");
    }
}

impl Classifier for Session {
    fn transient(&self, err: &B2Error) -> bool {
        self.inner.raw.transient(err)
    }

    fn backoff(&self, err: &B2Error) -> Option<Duration> {
        self.inner.raw.backoff(err)
    }
}

#[async_trait]
impl Reauthorize for Session {
    fn reauth(&self, err: &B2Error) -> bool {
        self.inner.raw.reauth(err)
    }

    fn generation(&self) -> u64 {
        self.inner.generation.load(Ordering::SeqCst)
    }

    async fn reauthorize(&self, ctx: &CancellationToken, seen: u64) -> Result<(), B2Error> {
        if !self.inner.config.serialize_reauth {
            return self.reauthorize_account(ctx).await;
        }

        // cancellation only matters while another caller holds the lock
        let _guard = match self.inner.reauth_lock.try_lock() {
            Ok(guard) => guard,
            Err(_) => tokio::select! {
                biased;
                _ = ctx.cancelled() => return Err(B2Error::Cancelled),
                guard = self.inner.reauth_lock.lock() => guard,
            },
        };

        if self.generation() != seen {
            debug!(seen = seen, "Authorization already refreshed by another caller");
            return Ok(());
        }

        self.reauthorize_account(ctx).await
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("account", &self.account())
            .field("generation", &self.generation())
            .field("config", &self.inner.config)
            .finish_non_exhaustive()
    }
}

/// Builder for a session.
pub struct SessionBuilder {
    raw: Arc<dyn RawRoot>,
    config: Option<B2Config>,
    jitter: Option<Arc<dyn JitterSource>>,
}

impl SessionBuilder {
    /// Create a new builder.
    pub fn new(raw: Arc<dyn RawRoot>) -> Self {
        Self {
            raw,
            config: None,
            jitter: None,
        }
    }

    /// Use the provided configuration.
    pub fn config(mut self, config: B2Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Use a custom jitter source for backoff.
    pub fn jitter(mut self, jitter: Arc<dyn JitterSource>) -> Self {
        self.jitter = Some(jitter);
        self
    }

    /// Build the session.
    pub fn build(self) -> Session {
        let config = self.config.unwrap_or_default();

        let mut policy = BackoffPolicy::from_config(&config);
        if let Some(jitter) = self.jitter {
            policy = policy.with_jitter(jitter);
        }

        Session {
            inner: Arc::new(SessionInner {
                raw: self.raw,
                config,
                retry: RetryExecutor::new(policy),
                credentials: RwLock::new(None),
                generation: AtomicU64::new(0),
                reauth_lock: tokio::sync::Mutex::new(()),
            }),
        }
    }
}
