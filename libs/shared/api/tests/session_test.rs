use shared_api::SessionStore;
use shared_models::AuthTokens;

#[tokio::test]
async fn in_memory_store_starts_signed_out() {
    let store = SessionStore::in_memory();
    assert!(!store.is_authenticated().await);
    assert_eq!(store.access_token().await, None);
}

#[tokio::test]
async fn tokens_survive_a_restart_through_the_backing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");

    let store = SessionStore::from_file(path.clone()).await;
    assert!(!store.is_authenticated().await);
    store
        .set(AuthTokens { access_token: "abc".to_string(), refresh_token: Some("ref".to_string()) })
        .await;

    let restored = SessionStore::from_file(path).await;
    assert_eq!(restored.access_token().await.as_deref(), Some("abc"));
}

#[tokio::test]
async fn corrupt_session_file_is_treated_as_signed_out() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");
    tokio::fs::write(&path, "not json at all").await.unwrap();

    let store = SessionStore::from_file(path).await;
    assert!(!store.is_authenticated().await);
}

#[tokio::test]
async fn clear_removes_the_backing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");

    let store = SessionStore::from_file(path.clone()).await;
    store.set(AuthTokens::bearer("abc")).await;
    assert!(path.exists());

    store.clear().await;
    assert!(!store.is_authenticated().await);
    assert!(!path.exists());
}

#[tokio::test]
async fn clones_share_one_session() {
    let store = SessionStore::in_memory();
    let twin = store.clone();
    store.set(AuthTokens::bearer("abc")).await;
    assert!(twin.is_authenticated().await);
    twin.clear().await;
    assert!(!store.is_authenticated().await);
}
