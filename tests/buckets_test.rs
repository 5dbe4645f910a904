//! Integration tests for bucket operations.

use b2::mocks::{MockRoot, TestFixtures};
use b2::{B2Error, BucketType, FixedJitter, Session};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

async fn authorized_session(root: &Arc<MockRoot>) -> Session {
    let session = Session::builder(root.clone())
        .jitter(Arc::new(FixedJitter(0.5)))
        .build();
    session
        .authorize_account(&CancellationToken::new(), "account", "key")
        .await
        .unwrap();
    session
}

#[tokio::test(start_paused = true)]
async fn test_create_bucket_success() {
    let root = Arc::new(MockRoot::new());
    let session = authorized_session(&root).await;
    let ctx = CancellationToken::new();

    let bucket = session
        .create_bucket(&ctx, "photos", BucketType::AllPublic)
        .await
        .unwrap();

    assert_eq!(bucket.name(), "photos");
    assert_eq!(root.bucket("photos").unwrap().bucket_type(), BucketType::AllPublic);
    assert_eq!(root.create_bucket_calls(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_create_bucket_retries_transient_failures() {
    let root = Arc::new(MockRoot::new());
    let session = authorized_session(&root).await;
    root.fail_create_bucket(TestFixtures::service_unavailable());
    root.fail_create_bucket(TestFixtures::connection_reset());
    let ctx = CancellationToken::new();
    let start = Instant::now();

    let bucket = session
        .create_bucket(&ctx, "photos", BucketType::AllPrivate)
        .await
        .unwrap();

    assert_eq!(root.create_bucket_calls(), 3);
    // 1s then 2s without jitter
    assert_eq!(start.elapsed(), Duration::from_secs(3));
    assert!(bucket.session().same_session(&session));
    assert_eq!(root.authorize_calls(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_create_bucket_honors_retry_after() {
    let root = Arc::new(MockRoot::new());
    let session = authorized_session(&root).await;
    root.fail_create_bucket(TestFixtures::too_many_requests(Duration::from_secs(7)));
    let ctx = CancellationToken::new();
    let start = Instant::now();

    session
        .create_bucket(&ctx, "photos", BucketType::AllPrivate)
        .await
        .unwrap();

    assert_eq!(start.elapsed(), Duration::from_secs(7));
}

#[tokio::test(start_paused = true)]
async fn test_create_bucket_permanent_error() {
    let root = Arc::new(MockRoot::new());
    let session = authorized_session(&root).await;
    root.fail_create_bucket(TestFixtures::bad_request());
    let ctx = CancellationToken::new();
    let start = Instant::now();

    let result = session
        .create_bucket(&ctx, "bad name", BucketType::AllPrivate)
        .await;

    match result {
        Err(B2Error::Api(api)) => {
            assert_eq!(api.status, 400);
            assert_eq!(api.code, "bad_request");
        }
        other => panic!("Expected bad_request, got {:?}", other),
    }
    assert_eq!(root.create_bucket_calls(), 1);
    assert_eq!(start.elapsed(), Duration::ZERO);
}

#[tokio::test(start_paused = true)]
async fn test_list_buckets_wraps_every_bucket() {
    let root = Arc::new(MockRoot::new().with_bucket("alpha").with_bucket("beta"));
    let session = authorized_session(&root).await;
    root.fail_list_buckets(TestFixtures::service_unavailable());
    let ctx = CancellationToken::new();

    let buckets = session.list_buckets(&ctx).await.unwrap();

    let names: Vec<&str> = buckets.iter().map(|b| b.name()).collect();
    assert_eq!(names, vec!["alpha", "beta"]);
    assert!(buckets.iter().all(|b| b.session().same_session(&session)));
    assert_eq!(root.list_buckets_calls(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_list_buckets_empty() {
    let root = Arc::new(MockRoot::new());
    let session = authorized_session(&root).await;

    let buckets = session.list_buckets(&CancellationToken::new()).await.unwrap();
    assert!(buckets.is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_delete_bucket_retries_then_succeeds() {
    let root = Arc::new(MockRoot::new().with_bucket("old"));
    let session = authorized_session(&root).await;
    let ctx = CancellationToken::new();

    let bucket = session.list_buckets(&ctx).await.unwrap().remove(0);
    let mock = root.bucket("old").unwrap();
    mock.fail_delete(TestFixtures::service_unavailable());

    bucket.delete_bucket(&ctx).await.unwrap();
    assert_eq!(mock.delete_calls(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_delete_bucket_reauthorizes_on_expired_token() {
    let root = Arc::new(MockRoot::new().with_bucket("old"));
    let session = authorized_session(&root).await;
    let ctx = CancellationToken::new();

    let bucket = session.list_buckets(&ctx).await.unwrap().remove(0);
    let mock = root.bucket("old").unwrap();
    mock.fail_delete(TestFixtures::expired_token());

    bucket.delete_bucket(&ctx).await.unwrap();
    assert_eq!(mock.delete_calls(), 2);
    assert_eq!(root.authorize_calls(), 2);
}
