//! Auth session glue.
//!
//! Mirrors the external identity provider's session state into local
//! persisted state: on sign-in the normalized identity is written to the
//! `identity` key and kept in memory behind an `is_authenticated` flag; on
//! sign-out both copies are cleared. A blocked interactive sign-in falls
//! back to the provider's redirect-style flow automatically; if both flows
//! fail the error is surfaced and local state is left untouched.

mod error;
mod provider;

pub use error::AuthError;
pub use provider::{
    DirectoryProvider, Identity, IdentityProvider, ProviderError, ProviderSession, SessionEvent,
};

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{info, warn};

use scuderia_core::{JsonStore, StorageError, keys};

/// The auth session glue service.
pub struct AuthSession {
    provider: Arc<dyn IdentityProvider>,
    storage: JsonStore,
    current: RwLock<Option<ProviderSession>>,
}

impl AuthSession {
    /// Create the glue, re-adopting a previously persisted identity.
    ///
    /// A session restored this way has no provider token; sign-out still
    /// clears it locally.
    ///
    /// # Errors
    ///
    /// Returns an error if the persisted identity exists but cannot be read.
    pub fn new(
        provider: Arc<dyn IdentityProvider>,
        storage: JsonStore,
    ) -> Result<Self, StorageError> {
        let persisted: Option<Identity> = storage.load(keys::IDENTITY)?;
        let current = persisted.map(|identity| ProviderSession {
            identity,
            access_token: String::new(),
        });

        Ok(Self {
            provider,
            storage,
            current: RwLock::new(current),
        })
    }

    /// Sign in through the provider.
    ///
    /// Tries the interactive flow first; a blocked popup automatically
    /// retries through the redirect-style fallback. On success the
    /// normalized identity is persisted and mirrored into memory.
    ///
    /// # Errors
    ///
    /// Returns the classified provider failure when both flows fail, or a
    /// storage error if the identity cannot be persisted. In either case
    /// local state is unchanged.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Identity, AuthError> {
        let session = match self.provider.sign_in(email, password).await {
            Ok(session) => session,
            Err(ProviderError::Blocked) => {
                warn!("interactive sign-in blocked, falling back to redirect flow");
                self.provider.sign_in_redirect(email, password).await?
            }
            Err(e) => return Err(e.into()),
        };

        // Persist before committing to memory so a write failure leaves no
        // partial session behind.
        self.storage.save(keys::IDENTITY, &session.identity)?;
        let identity = session.identity.clone();
        *self.current.write().await = Some(session);

        info!(email = %identity.email, "signed in");
        Ok(identity)
    }

    /// Sign out and clear the mirrored identity.
    ///
    /// A provider failure is logged but does not keep the local session
    /// alive; the local copies are cleared regardless.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::NotSignedIn`] when no session is active, or a
    /// storage error if the persisted copy cannot be removed.
    pub async fn sign_out(&self) -> Result<(), AuthError> {
        let mut current = self.current.write().await;
        let session = current.take().ok_or(AuthError::NotSignedIn)?;

        if let Err(e) = self.provider.sign_out(&session.access_token).await {
            warn!(error = %e, "provider sign-out failed, clearing local session anyway");
        }

        self.storage.remove(keys::IDENTITY)?;
        info!(email = %session.identity.email, "signed out");
        Ok(())
    }

    /// The currently mirrored identity, if any.
    pub async fn current(&self) -> Option<Identity> {
        self.current
            .read()
            .await
            .as_ref()
            .map(|session| session.identity.clone())
    }

    /// Whether a session is currently mirrored.
    pub async fn is_authenticated(&self) -> bool {
        self.current.read().await.is_some()
    }

    /// Spawn a task mirroring out-of-band provider session events.
    ///
    /// Covers session changes that do not pass through [`sign_in`] /
    /// [`sign_out`] on this instance (e.g. the provider expiring a session).
    ///
    /// [`sign_in`]: Self::sign_in
    /// [`sign_out`]: Self::sign_out
    pub fn spawn_watch(self: &Arc<Self>) {
        let glue = Arc::clone(self);
        let mut events = glue.provider.subscribe();

        tokio::spawn(async move {
            loop {
                match events.recv().await {
                    Ok(event) => {
                        if let Err(e) = glue.apply_event(event).await {
                            warn!(error = %e, "failed to mirror session event");
                        }
                    }
                    Err(tokio::sync::broadcast::error::RecvError::Lagged(skipped)) => {
                        warn!(skipped, "session event stream lagged");
                    }
                    Err(tokio::sync::broadcast::error::RecvError::Closed) => break,
                }
            }
        });
    }

    /// Mirror one provider event into local state.
    async fn apply_event(&self, event: SessionEvent) -> Result<(), StorageError> {
        match event {
            SessionEvent::SignedIn(identity) => {
                self.storage.save(keys::IDENTITY, &identity)?;
                let mut current = self.current.write().await;
                let keep_token = current
                    .as_ref()
                    .filter(|session| session.identity == identity)
                    .map(|session| session.access_token.clone());
                *current = Some(ProviderSession {
                    identity,
                    access_token: keep_token.unwrap_or_default(),
                });
            }
            SessionEvent::SignedOut => {
                self.storage.remove(keys::IDENTITY)?;
                *self.current.write().await = None;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use tokio::sync::broadcast;

    /// Scriptable provider for exercising the glue.
    struct MockProvider {
        primary: Mutex<Result<ProviderSession, ProviderError>>,
        fallback: Mutex<Result<ProviderSession, ProviderError>>,
        fallback_calls: AtomicUsize,
        events: broadcast::Sender<SessionEvent>,
    }

    impl MockProvider {
        fn new(
            primary: Result<ProviderSession, ProviderError>,
            fallback: Result<ProviderSession, ProviderError>,
        ) -> Arc<Self> {
            let (events, _) = broadcast::channel(4);
            Arc::new(Self {
                primary: Mutex::new(primary),
                fallback: Mutex::new(fallback),
                fallback_calls: AtomicUsize::new(0),
                events,
            })
        }
    }

    #[async_trait]
    impl IdentityProvider for MockProvider {
        async fn sign_in(
            &self,
            _email: &str,
            _password: &str,
        ) -> Result<ProviderSession, ProviderError> {
            self.primary.lock().unwrap().clone()
        }

        async fn sign_in_redirect(
            &self,
            _email: &str,
            _password: &str,
        ) -> Result<ProviderSession, ProviderError> {
            self.fallback_calls.fetch_add(1, Ordering::SeqCst);
            self.fallback.lock().unwrap().clone()
        }

        async fn sign_out(&self, _access_token: &str) -> Result<(), ProviderError> {
            Ok(())
        }

        fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
            self.events.subscribe()
        }
    }

    fn identity(email: &str) -> Identity {
        Identity {
            id: email.to_string(),
            email: email.to_string(),
            display_name: "Test User".to_string(),
            avatar_url: None,
        }
    }

    fn session(email: &str) -> ProviderSession {
        ProviderSession {
            identity: identity(email),
            access_token: "token-123".to_string(),
        }
    }

    fn storage(dir: &tempfile::TempDir) -> JsonStore {
        JsonStore::open(dir.path()).unwrap()
    }

    #[tokio::test]
    async fn test_sign_in_mirrors_identity_into_storage() {
        let dir = tempfile::tempdir().unwrap();
        let provider = MockProvider::new(Ok(session("boss@scuderia.example")), Ok(session("x@y")));
        let glue = AuthSession::new(provider, storage(&dir)).unwrap();

        let signed_in = glue.sign_in("boss@scuderia.example", "pw").await.unwrap();
        assert_eq!(signed_in.email, "boss@scuderia.example");
        assert!(glue.is_authenticated().await);

        let persisted: Identity = storage(&dir).load(keys::IDENTITY).unwrap().unwrap();
        assert_eq!(persisted, signed_in);
    }

    #[tokio::test]
    async fn test_blocked_popup_falls_back_to_redirect_flow() {
        let dir = tempfile::tempdir().unwrap();
        let provider = MockProvider::new(
            Err(ProviderError::Blocked),
            Ok(session("boss@scuderia.example")),
        );
        let glue = AuthSession::new(Arc::clone(&provider) as _, storage(&dir)).unwrap();

        glue.sign_in("boss@scuderia.example", "pw").await.unwrap();

        assert_eq!(provider.fallback_calls.load(Ordering::SeqCst), 1);
        assert!(glue.is_authenticated().await);
    }

    #[tokio::test]
    async fn test_both_flows_failing_leaves_state_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let provider = MockProvider::new(
            Err(ProviderError::Blocked),
            Err(ProviderError::Network("timeout".to_string())),
        );
        let glue = AuthSession::new(provider, storage(&dir)).unwrap();

        let err = glue.sign_in("boss@scuderia.example", "pw").await.unwrap_err();
        assert!(matches!(
            err,
            AuthError::Provider(ProviderError::Network(_))
        ));
        assert!(!glue.is_authenticated().await);

        let persisted: Option<Identity> = storage(&dir).load(keys::IDENTITY).unwrap();
        assert!(persisted.is_none());
    }

    #[tokio::test]
    async fn test_non_blocked_failures_do_not_try_the_fallback() {
        let dir = tempfile::tempdir().unwrap();
        let provider = MockProvider::new(
            Err(ProviderError::Unauthorized),
            Ok(session("boss@scuderia.example")),
        );
        let glue = AuthSession::new(Arc::clone(&provider) as _, storage(&dir)).unwrap();

        let err = glue.sign_in("boss@scuderia.example", "pw").await.unwrap_err();
        assert!(matches!(
            err,
            AuthError::Provider(ProviderError::Unauthorized)
        ));
        assert_eq!(provider.fallback_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_sign_out_clears_both_copies() {
        let dir = tempfile::tempdir().unwrap();
        let provider = MockProvider::new(Ok(session("boss@scuderia.example")), Ok(session("x@y")));
        let glue = AuthSession::new(provider, storage(&dir)).unwrap();

        glue.sign_in("boss@scuderia.example", "pw").await.unwrap();
        glue.sign_out().await.unwrap();

        assert!(!glue.is_authenticated().await);
        let persisted: Option<Identity> = storage(&dir).load(keys::IDENTITY).unwrap();
        assert!(persisted.is_none());

        // A second sign-out has nothing to clear.
        assert!(matches!(
            glue.sign_out().await.unwrap_err(),
            AuthError::NotSignedIn
        ));
    }

    #[tokio::test]
    async fn test_out_of_band_events_are_mirrored() {
        let dir = tempfile::tempdir().unwrap();
        let provider = MockProvider::new(Ok(session("boss@scuderia.example")), Ok(session("x@y")));
        let glue = AuthSession::new(provider, storage(&dir)).unwrap();

        glue.apply_event(SessionEvent::SignedIn(identity("sales@scuderia.example")))
            .await
            .unwrap();
        assert_eq!(
            glue.current().await.unwrap().email,
            "sales@scuderia.example"
        );

        glue.apply_event(SessionEvent::SignedOut).await.unwrap();
        assert!(!glue.is_authenticated().await);
    }

    #[tokio::test]
    async fn test_persisted_identity_is_readopted_on_boot() {
        let dir = tempfile::tempdir().unwrap();
        let store = storage(&dir);
        store
            .save(keys::IDENTITY, &identity("boss@scuderia.example"))
            .unwrap();

        let provider = MockProvider::new(Ok(session("boss@scuderia.example")), Ok(session("x@y")));
        let glue = AuthSession::new(provider, store).unwrap();

        assert!(glue.is_authenticated().await);
        assert_eq!(glue.current().await.unwrap().email, "boss@scuderia.example");
    }
}
