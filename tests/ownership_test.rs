//! Integration tests for per-user isolation of entries, listings and quota.

mod helpers;

use axum::http::StatusCode;

use drivehub_core::config::AppConfig;

#[tokio::test]
async fn test_other_users_entries_are_not_found() {
    let alice = helpers::TestApp::new();
    let bob = alice.other_user();

    let folder = alice.create_folder("Private", None).await;
    let file = alice.upload_one(Some(&folder), "diary.txt", b"secret").await;

    let root = bob.request("GET", "/api/root", None).await;
    assert_eq!(root.status, StatusCode::OK);
    assert_eq!(root.data()["folders"].as_array().unwrap().len(), 0);
    assert_eq!(root.data()["files"].as_array().unwrap().len(), 0);

    let hits = bob.request("GET", "/api/search?q=diary", None).await;
    assert_eq!(hits.data().as_array().unwrap().len(), 0);

    for path in [
        format!("/api/entries/{file}"),
        format!("/api/folders/{folder}"),
        format!("/api/files/{file}/download"),
    ] {
        let response = bob.request("GET", &path, None).await;
        assert_eq!(response.status, StatusCode::NOT_FOUND, "{path}");
    }

    let trash = bob
        .request("POST", &format!("/api/entries/{folder}/trash"), None)
        .await;
    assert_eq!(trash.status, StatusCode::NOT_FOUND);
    let share = bob
        .request("POST", &format!("/api/files/{file}/share"), None)
        .await;
    assert_eq!(share.status, StatusCode::NOT_FOUND);

    // Bob's failed attempts left Alice's data untouched.
    assert!(!alice.is_trashed(&folder).await);

    // The same root folder name is free for Bob.
    bob.create_folder("Private", None).await;
}

#[tokio::test]
async fn test_quota_is_per_user() {
    let mut config = AppConfig::default();
    config.storage.total_quota_bytes = 10;
    let alice = helpers::TestApp::with_config(config);
    let bob = alice.other_user();

    alice.upload_one(None, "full.bin", &[0u8; 10]).await;

    let usage = bob.request("GET", "/api/storage/usage", None).await;
    assert_eq!(usage.status, StatusCode::OK);
    assert_eq!(usage.data()["used_bytes"], 0);

    bob.upload_one(None, "tiny.txt", b"x").await;

    let response = alice.upload(None, &[("more.txt", b"x")]).await;
    let status = &response.data()["items"][0]["status"];
    assert_eq!(status["state"], "failed");
    assert_eq!(status["kind"], "Validation");
    assert_eq!(status["retryable"], false);
}
