//! Mock root client.

use super::{MockBucket, Script};
use crate::backend::{RawBucket, RawRoot};
use crate::error::B2Error;
use crate::types::BucketType;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Mock root client for testing.
///
/// Buckets created through the mock are kept and returned by
/// [`list_buckets`](RawRoot::list_buckets), so a test can reach the
/// [`MockBucket`] behind any handle with [`MockRoot::bucket`].
#[derive(Default)]
pub struct MockRoot {
    authorize: Script,
    create_bucket: Script,
    list_buckets: Script,
    authorized_with: Mutex<Vec<(String, String)>>,
    authorize_delay: Mutex<Option<Duration>>,
    buckets: Mutex<Vec<Arc<MockBucket>>>,
}

impl MockRoot {
    /// Create a new mock with no buckets.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an existing bucket.
    pub fn with_bucket(self, name: impl Into<String>) -> Self {
        self.buckets
            .lock()
            .push(Arc::new(MockBucket::new(name, BucketType::AllPrivate)));
        self
    }

    /// Fail the next `authorize_account` call with `error`.
    ///
    /// Calls queue up; each one fails a single call.
    pub fn fail_authorize(&self, error: B2Error) {
        self.authorize.push(error);
    }

    /// Fail the next `create_bucket` call with `error`.
    pub fn fail_create_bucket(&self, error: B2Error) {
        self.create_bucket.push(error);
    }

    /// Fail the next `list_buckets` call with `error`.
    pub fn fail_list_buckets(&self, error: B2Error) {
        self.list_buckets.push(error);
    }

    /// Make every `authorize_account` call take `delay` before answering.
    pub fn set_authorize_delay(&self, delay: Duration) {
        *self.authorize_delay.lock() = Some(delay);
    }

    /// Number of `authorize_account` calls.
    pub fn authorize_calls(&self) -> usize {
        self.authorize.calls()
    }

    /// Number of `create_bucket` calls.
    pub fn create_bucket_calls(&self) -> usize {
        self.create_bucket.calls()
    }

    /// Number of `list_buckets` calls.
    pub fn list_buckets_calls(&self) -> usize {
        self.list_buckets.calls()
    }

    /// Pairs of every successful authorization, oldest first.
    pub fn authorized_with(&self) -> Vec<(String, String)> {
        self.authorized_with.lock().clone()
    }

    /// The bucket named `name`, if it exists.
    pub fn bucket(&self, name: &str) -> Option<Arc<MockBucket>> {
        self.buckets
            .lock()
            .iter()
            .find(|b| b.name() == name)
            .cloned()
    }

    /// Reset the root call counters. Bucket counters are left alone.
    pub fn reset_counts(&self) {
        self.authorize.reset_calls();
        self.create_bucket.reset_calls();
        self.list_buckets.reset_calls();
    }
}

#[async_trait]
impl RawRoot for MockRoot {
    async fn authorize_account(
        &self,
        _ctx: &CancellationToken,
        account: &str,
        key: &str,
    ) -> Result<(), B2Error> {
        let delay = *self.authorize_delay.lock();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        self.authorize.next()?;
        self.authorized_with
            .lock()
            .push((account.to_string(), key.to_string()));
        Ok(())
    }

    async fn create_bucket(
        &self,
        _ctx: &CancellationToken,
        name: &str,
        bucket_type: BucketType,
    ) -> Result<Arc<dyn RawBucket>, B2Error> {
        self.create_bucket.next()?;

        let bucket = Arc::new(MockBucket::new(name, bucket_type));
        self.buckets.lock().push(bucket.clone());
        Ok(bucket)
    }

    async fn list_buckets(
        &self,
        _ctx: &CancellationToken,
    ) -> Result<Vec<Arc<dyn RawBucket>>, B2Error> {
        self.list_buckets.next()?;

        Ok(self
            .buckets
            .lock()
            .iter()
            .map(|b| b.clone() as Arc<dyn RawBucket>)
            .collect())
    }
}

impl std::fmt::Debug for MockRoot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockRoot")
            .field("authorize_calls", &self.authorize_calls())
            .field("buckets", &self.buckets.lock().len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mocks::TestFixtures;

    #[tokio::test]
    async fn test_mock_root_records_authorizations() {
        let root = MockRoot::new();
        let ctx = CancellationToken::new();

        root.fail_authorize(TestFixtures::unauthorized());
        assert!(root.authorize_account(&ctx, "a", "b").await.is_err());
        root.authorize_account(&ctx, "acct", "key").await.unwrap();

        assert_eq!(root.authorize_calls(), 2);
        assert_eq!(root.authorized_with(), vec![("acct".to_string(), "key".to_string())]);
    }

    #[tokio::test]
    async fn test_mock_root_lists_created_buckets() {
        let root = MockRoot::new().with_bucket("existing");
        let ctx = CancellationToken::new();

        let created = root
            .create_bucket(&ctx, "fresh", BucketType::AllPublic)
            .await
            .unwrap();
        assert_eq!(created.name(), "fresh");
        assert_eq!(root.bucket("fresh").unwrap().bucket_type(), BucketType::AllPublic);

        let names: Vec<String> = root
            .list_buckets(&ctx)
            .await
            .unwrap()
            .iter()
            .map(|b| b.name().to_string())
            .collect();
        assert_eq!(names, vec!["existing", "fresh"]);

        root.reset_counts();
        assert_eq!(root.create_bucket_calls(), 0);
        assert_eq!(root.list_buckets_calls(), 0);
    }
}
