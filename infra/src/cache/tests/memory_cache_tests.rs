//! Unit tests for the in-memory passcode cache

use std::time::Duration;

use crate::cache::MemoryOtpCache;
use om_core::services::OtpCacheTrait;

#[tokio::test]
async fn test_store_get_delete() {
    let cache = MemoryOtpCache::new();

    cache.store_code("otp:a@x.com:login", "123456", 300).await.unwrap();
    assert_eq!(
        cache.get_code("otp:a@x.com:login").await.unwrap(),
        Some("123456".to_string())
    );
    assert_eq!(cache.get_code("otp:a@x.com:signup").await.unwrap(), None);

    cache.delete_code("otp:a@x.com:login").await.unwrap();
    assert_eq!(cache.get_code("otp:a@x.com:login").await.unwrap(), None);

    // Deleting a missing key is not an error
    cache.delete_code("otp:a@x.com:login").await.unwrap();
}

#[tokio::test]
async fn test_store_overwrites_previous_code() {
    let cache = MemoryOtpCache::new();

    cache.store_code("k", "111111", 300).await.unwrap();
    cache.store_code("k", "222222", 300).await.unwrap();

    assert_eq!(cache.get_code("k").await.unwrap(), Some("222222".to_string()));
    assert_eq!(cache.len().await, 1);
}

#[tokio::test(start_paused = true)]
async fn test_entries_expire() {
    let cache = MemoryOtpCache::new();

    cache.store_code("k", "123456", 5).await.unwrap();
    tokio::time::advance(Duration::from_secs(4)).await;
    assert!(cache.get_code("k").await.unwrap().is_some());

    tokio::time::advance(Duration::from_secs(2)).await;
    assert!(cache.get_code("k").await.unwrap().is_none());

    // Expired entries are swept on the next write
    cache.store_code("other", "654321", 5).await.unwrap();
    assert_eq!(cache.len().await, 1);
}
