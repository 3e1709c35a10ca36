// ABOUTME: Integration tests for user registration and credential verification
// ABOUTME: Covers email normalization, duplicate detection and bcrypt verification
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod helpers;

use helpers::fixtures::memory_database;
use pantry_recipes::errors::ErrorKind;

#[tokio::test]
async fn test_register_stores_hash_not_password() {
    let users = memory_database().await.users();

    let user = users.create_user("  Baker@Example.COM ", "flour-power").await.unwrap();
    assert_eq!(user.email, "baker@example.com");
    assert_ne!(user.password_hash, "flour-power");
    assert!(user.password_hash.starts_with("$2"));

    let fetched = users.get(user.id).await.unwrap().unwrap();
    assert_eq!(fetched.email, user.email);
    let serialized = serde_json::to_value(&fetched).unwrap();
    assert!(serialized.get("password_hash").is_none());
}

#[tokio::test]
async fn test_duplicate_email_conflicts() {
    let users = memory_database().await.users();
    users.create_user("cook@example.com", "one").await.unwrap();

    let err = users.create_user("COOK@example.com", "two").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Conflict);
}

#[tokio::test]
async fn test_invalid_registration_input() {
    let users = memory_database().await.users();

    let err = users.create_user("cook@example.com", "").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidInput);

    let err = users.create_user("not-an-email", "secret").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidInput);
}

#[tokio::test]
async fn test_verify_credentials() {
    let users = memory_database().await.users();
    let user = users.create_user("chef@example.com", "s3cret").await.unwrap();

    let verified = users.verify_credentials("Chef@Example.com", "s3cret").await.unwrap();
    assert_eq!(verified.id, user.id);

    let err = users.verify_credentials("chef@example.com", "nope").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Unauthorized);

    let err = users.verify_credentials("ghost@example.com", "s3cret").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Unauthorized);
}
