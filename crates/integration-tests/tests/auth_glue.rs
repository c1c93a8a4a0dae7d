//! Auth session glue against the directory provider.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use scuderia_admin::services::auth::{
    AuthError, AuthSession, DirectoryProvider, Identity, IdentityProvider, ProviderError,
};
use scuderia_core::{JsonStore, keys};

const DIRECTORY: &str = "boss@scuderia.example:pit-lane-9:Boss;sales@scuderia.example:paddock-4:Sales Desk";

fn glue(dir: &tempfile::TempDir, interactive: bool) -> AuthSession {
    let provider = DirectoryProvider::from_spec(
        DIRECTORY,
        Some("scuderia.example".to_string()),
        interactive,
    )
    .unwrap();
    let provider: Arc<dyn IdentityProvider> = Arc::new(provider);
    AuthSession::new(provider, JsonStore::open(dir.path()).unwrap()).unwrap()
}

#[tokio::test]
async fn test_sign_in_mirrors_identity_to_shared_storage() {
    let dir = tempfile::tempdir().unwrap();
    let glue = glue(&dir, true);

    let identity = glue.sign_in("boss@scuderia.example", "pit-lane-9").await.unwrap();
    assert_eq!(identity.display_name, "Boss");
    assert!(glue.is_authenticated().await);

    // Another reader of the same data directory sees the mirrored copy.
    let persisted: Identity = JsonStore::open(dir.path())
        .unwrap()
        .load(keys::IDENTITY)
        .unwrap()
        .unwrap();
    assert_eq!(persisted, identity);
}

#[tokio::test]
async fn test_blocked_interactive_flow_falls_back() {
    let dir = tempfile::tempdir().unwrap();
    // interactive = false: the popup-style flow reports Blocked.
    let glue = glue(&dir, false);

    let identity = glue.sign_in("boss@scuderia.example", "pit-lane-9").await.unwrap();
    assert_eq!(identity.email, "boss@scuderia.example");
    assert!(glue.is_authenticated().await);
}

#[tokio::test]
async fn test_failures_are_classified_and_leave_no_state() {
    let dir = tempfile::tempdir().unwrap();
    let glue = glue(&dir, true);

    let wrong_password = glue
        .sign_in("boss@scuderia.example", "nope")
        .await
        .unwrap_err();
    assert!(matches!(
        wrong_password,
        AuthError::Provider(ProviderError::Unauthorized)
    ));

    let wrong_domain = glue
        .sign_in("boss@rivals.example", "pit-lane-9")
        .await
        .unwrap_err();
    assert!(matches!(
        wrong_domain,
        AuthError::Provider(ProviderError::UnauthorizedDomain)
    ));

    assert!(!glue.is_authenticated().await);
    let persisted: Option<Identity> = JsonStore::open(dir.path())
        .unwrap()
        .load(keys::IDENTITY)
        .unwrap();
    assert!(persisted.is_none());
}

#[tokio::test]
async fn test_sign_out_clears_the_mirrored_copy() {
    let dir = tempfile::tempdir().unwrap();
    let glue = glue(&dir, true);

    glue.sign_in("sales@scuderia.example", "paddock-4").await.unwrap();
    glue.sign_out().await.unwrap();

    assert!(!glue.is_authenticated().await);
    let persisted: Option<Identity> = JsonStore::open(dir.path())
        .unwrap()
        .load(keys::IDENTITY)
        .unwrap();
    assert!(persisted.is_none());
}

#[tokio::test]
async fn test_identity_survives_glue_restart() {
    let dir = tempfile::tempdir().unwrap();

    glue(&dir, true)
        .sign_in("boss@scuderia.example", "pit-lane-9")
        .await
        .unwrap();

    // A new glue instance over the same directory re-adopts the identity.
    let restarted = glue(&dir, true);
    assert!(restarted.is_authenticated().await);
    assert_eq!(
        restarted.current().await.unwrap().email,
        "boss@scuderia.example"
    );
}
