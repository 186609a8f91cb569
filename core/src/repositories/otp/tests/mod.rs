//! Tests for the in-memory passcode repository

use chrono::{Duration, Utc};
use std::sync::Arc;

use crate::domain::entities::{OtpRecord, Purpose};
use crate::repositories::otp::{InMemoryOtpRepository, OtpFilter, OtpRepository};

fn record(email: &str, purpose: Purpose) -> OtpRecord {
    OtpRecord::new(email.to_string(), purpose, Duration::minutes(5))
}

#[tokio::test]
async fn test_upsert_replaces_unconsumed_record_for_pair() {
    let repo = InMemoryOtpRepository::new();

    let first = repo.upsert_active(record("a@x.com", Purpose::Login)).await.unwrap();
    let second = repo.upsert_active(record("a@x.com", Purpose::Login)).await.unwrap();

    let active = repo
        .find(&OtpFilter::active("a@x.com", Purpose::Login), None)
        .await
        .unwrap();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].id, second.id);
    assert!(repo.find_by_id(first.id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_upsert_keeps_other_pairs_and_consumed_records() {
    let repo = InMemoryOtpRepository::new();

    let consumed = repo.upsert_active(record("a@x.com", Purpose::Login)).await.unwrap();
    assert!(repo.mark_consumed(consumed.id, Utc::now()).await.unwrap());

    let signup = repo.upsert_active(record("a@x.com", Purpose::Signup)).await.unwrap();
    let other = repo.upsert_active(record("b@x.com", Purpose::Login)).await.unwrap();
    repo.upsert_active(record("a@x.com", Purpose::Login)).await.unwrap();

    assert_eq!(repo.len().await, 4);
    assert!(repo.find_by_id(consumed.id).await.unwrap().unwrap().consumed);
    assert!(repo.find_by_id(signup.id).await.unwrap().is_some());
    assert!(repo.find_by_id(other.id).await.unwrap().is_some());
}

#[tokio::test]
async fn test_find_active_matches_code_and_purpose() {
    let repo = InMemoryOtpRepository::new();
    let stored = repo.upsert_active(record("a@x.com", Purpose::Login)).await.unwrap();

    let found = repo
        .find_active("a@x.com", &stored.code, Purpose::Login)
        .await
        .unwrap();
    assert_eq!(found.map(|r| r.id), Some(stored.id));

    let wrong_purpose = repo
        .find_active("a@x.com", &stored.code, Purpose::Signup)
        .await
        .unwrap();
    assert!(wrong_purpose.is_none());

    let wrong_email = repo
        .find_active("b@x.com", &stored.code, Purpose::Login)
        .await
        .unwrap();
    assert!(wrong_email.is_none());
}

#[tokio::test]
async fn test_find_returns_newest_first_with_limit() {
    let repo = InMemoryOtpRepository::new();

    let mut older = record("a@x.com", Purpose::Login);
    older.created_at = older.created_at - Duration::minutes(1);
    let older = repo.upsert_active(older).await.unwrap();
    repo.mark_consumed(older.id, Utc::now()).await.unwrap();
    let newer = repo.upsert_active(record("a@x.com", Purpose::Login)).await.unwrap();

    let filter = OtpFilter::new().email("a@x.com");
    let all = repo.find(&filter, None).await.unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].id, newer.id);

    let limited = repo.find(&filter, Some(1)).await.unwrap();
    assert_eq!(limited.len(), 1);
    assert_eq!(limited[0].id, newer.id);
}

#[tokio::test]
async fn test_mark_consumed_only_once() {
    let repo = InMemoryOtpRepository::new();
    let stored = repo.upsert_active(record("a@x.com", Purpose::Login)).await.unwrap();

    assert!(repo.mark_consumed(stored.id, Utc::now()).await.unwrap());
    assert!(!repo.mark_consumed(stored.id, Utc::now()).await.unwrap());
    assert!(!repo.mark_consumed(uuid::Uuid::new_v4(), Utc::now()).await.unwrap());

    let consumed = repo.find_by_id(stored.id).await.unwrap().unwrap();
    assert!(consumed.consumed);
    assert!(consumed.consumed_at.is_some());
}

#[tokio::test]
async fn test_concurrent_mark_consumed_has_single_winner() {
    let repo = Arc::new(InMemoryOtpRepository::new());
    let stored = repo.upsert_active(record("a@x.com", Purpose::Login)).await.unwrap();

    let mut handles = Vec::new();
    for _ in 0..16 {
        let repo = repo.clone();
        let id = stored.id;
        handles.push(tokio::spawn(async move {
            repo.mark_consumed(id, Utc::now()).await.unwrap()
        }));
    }

    let mut winners = 0;
    for handle in handles {
        if handle.await.unwrap() {
            winners += 1;
        }
    }
    assert_eq!(winners, 1);
}

#[tokio::test]
async fn test_delete_by_filter() {
    let repo = InMemoryOtpRepository::new();
    repo.upsert_active(record("a@x.com", Purpose::Login)).await.unwrap();
    repo.upsert_active(record("a@x.com", Purpose::Signup)).await.unwrap();
    repo.upsert_active(record("b@x.com", Purpose::Login)).await.unwrap();

    let deleted = repo.delete(&OtpFilter::new().email("a@x.com")).await.unwrap();
    assert_eq!(deleted, 2);
    assert_eq!(repo.len().await, 1);

    let deleted = repo.delete(&OtpFilter::new().email("nobody@x.com")).await.unwrap();
    assert_eq!(deleted, 0);
}
