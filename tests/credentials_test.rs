mod common;

use tempfile::TempDir;
use trueshuffle::{context::AppContext, error::Error, management::CredentialStore, types::Credentials};

fn store(dir: &TempDir) -> CredentialStore {
    CredentialStore::new(dir.path().join("config.conf"))
}

#[tokio::test]
async fn test_save_then_load_round_trip() {
    let dir = TempDir::new().unwrap();
    let store = store(&dir);
    let credentials = Credentials::new(common::CLIENT_ID, common::CLIENT_SECRET).unwrap();

    store.save(&credentials).await.unwrap();

    assert_eq!(store.load().await, Some(credentials));
}

#[tokio::test]
async fn test_save_writes_exactly_two_lines() {
    let dir = TempDir::new().unwrap();
    let store = store(&dir);
    let credentials = Credentials::new(common::CLIENT_ID, common::CLIENT_SECRET).unwrap();

    store.save(&credentials).await.unwrap();

    let content = std::fs::read_to_string(store.path()).unwrap();
    assert_eq!(
        content,
        format!("{}\n{}\n", common::CLIENT_ID, common::CLIENT_SECRET)
    );
}

#[tokio::test]
async fn test_save_overwrites_previous_values() {
    let dir = TempDir::new().unwrap();
    let store = store(&dir);

    let first = Credentials::new("a".repeat(32), "b".repeat(32)).unwrap();
    let second = Credentials::new("c".repeat(32), "d".repeat(32)).unwrap();
    store.save(&first).await.unwrap();
    store.save(&second).await.unwrap();

    assert_eq!(store.load().await, Some(second));
}

#[tokio::test]
async fn test_save_creates_parent_directory() {
    let dir = TempDir::new().unwrap();
    let store = CredentialStore::new(dir.path().join("nested/app/config.conf"));
    let credentials = Credentials::new(common::CLIENT_ID, common::CLIENT_SECRET).unwrap();

    store.save(&credentials).await.unwrap();

    assert!(store.load().await.is_some());
}

#[tokio::test]
async fn test_load_missing_file_is_none() {
    let dir = TempDir::new().unwrap();
    assert_eq!(store(&dir).load().await, None);
}

#[tokio::test]
async fn test_load_rejects_wrong_length() {
    let dir = TempDir::new().unwrap();
    let store = store(&dir);

    for (id, secret) in [
        ("a".repeat(31), "b".repeat(32)),
        ("a".repeat(32), "b".repeat(33)),
        (String::new(), "b".repeat(32)),
    ] {
        std::fs::write(store.path(), format!("{}\n{}\n", id, secret)).unwrap();
        assert_eq!(store.load().await, None, "id={} secret={}", id, secret);
    }
}

#[tokio::test]
async fn test_load_rejects_single_line() {
    let dir = TempDir::new().unwrap();
    let store = store(&dir);
    std::fs::write(store.path(), format!("{}\n", common::CLIENT_ID)).unwrap();

    assert_eq!(store.load().await, None);
}

#[tokio::test]
async fn test_load_tolerates_windows_line_endings() {
    let dir = TempDir::new().unwrap();
    let store = store(&dir);
    std::fs::write(
        store.path(),
        format!("{}\r\n{}\r\n", common::CLIENT_ID, common::CLIENT_SECRET),
    )
    .unwrap();

    let loaded = store.load().await.unwrap();
    assert_eq!(loaded.client_id, common::CLIENT_ID);
    assert_eq!(loaded.client_secret, common::CLIENT_SECRET);
}

#[tokio::test]
async fn test_context_loads_saved_credentials() {
    let dir = TempDir::new().unwrap();
    let settings = common::settings("http://127.0.0.1:9", dir.path());
    let credentials = Credentials::new(common::CLIENT_ID, common::CLIENT_SECRET).unwrap();
    CredentialStore::new(settings.credentials_path.clone())
        .save(&credentials)
        .await
        .unwrap();

    let ctx = AppContext::load(settings).await.unwrap();

    assert_eq!(ctx.credentials().await, Some(credentials));
}

#[tokio::test]
async fn test_context_without_credentials_file() {
    let dir = TempDir::new().unwrap();
    let ctx = AppContext::load(common::settings("http://127.0.0.1:9", dir.path()))
        .await
        .unwrap();

    assert_eq!(ctx.credentials().await, None);
}

#[tokio::test]
async fn test_update_credentials_rejects_invalid_and_keeps_old() {
    let (ctx, _dir) = common::context("http://127.0.0.1:9").await;

    let result = ctx.update_credentials("too-short", common::CLIENT_SECRET).await;
    assert!(matches!(result, Err(Error::InvalidCredentials)));

    let current = ctx.credentials().await.unwrap();
    assert_eq!(current.client_id, common::CLIENT_ID);
    assert_eq!(
        ctx.credential_store().load().await.unwrap().client_id,
        common::CLIENT_ID
    );
}
