//! Identity provider boundary.
//!
//! The platform depends on an external identity capability exposing an
//! interactive (popup-style) sign-in, a redirect-style fallback, sign-out,
//! and a subscription to session-change events. [`IdentityProvider`] is
//! that boundary; [`DirectoryProvider`] is the env-configured directory
//! implementation used by the binary, and tests drive the glue through a
//! scriptable mock.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::broadcast;
use uuid::Uuid;

/// Capacity of the session-event channel.
const EVENT_CHANNEL_CAPACITY: usize = 16;

/// Normalized identity yielded by the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Provider-scoped stable id.
    pub id: String,
    pub email: String,
    pub display_name: String,
    pub avatar_url: Option<String>,
}

/// A provider session: who signed in, and the token to sign them out with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderSession {
    pub identity: Identity,
    pub access_token: String,
}

/// Classified provider failures.
///
/// Each variant maps to a distinct user-facing message; `Blocked` on the
/// interactive flow additionally triggers the automatic fallback flow
/// instead of immediate failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    /// The user dismissed the sign-in dialog.
    #[error("sign-in was cancelled")]
    Cancelled,

    /// The interactive flow is unavailable in this environment.
    #[error("interactive sign-in was blocked")]
    Blocked,

    /// The account's email domain is not authorized for this panel.
    #[error("account domain is not authorized")]
    UnauthorizedDomain,

    /// Unknown account or wrong password.
    #[error("invalid credentials")]
    Unauthorized,

    /// The provider could not be reached.
    #[error("identity provider unreachable: {0}")]
    Network(String),
}

/// A session-change event.
#[derive(Debug, Clone)]
pub enum SessionEvent {
    SignedIn(Identity),
    SignedOut,
}

/// External identity capability.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Interactive (popup-style) sign-in.
    async fn sign_in(
        &self,
        email: &str,
        password: &str,
    ) -> Result<ProviderSession, ProviderError>;

    /// Redirect-style fallback sign-in.
    async fn sign_in_redirect(
        &self,
        email: &str,
        password: &str,
    ) -> Result<ProviderSession, ProviderError>;

    /// Invalidate the session behind `access_token`.
    async fn sign_out(&self, access_token: &str) -> Result<(), ProviderError>;

    /// Subscribe to session-change events.
    fn subscribe(&self) -> broadcast::Receiver<SessionEvent>;
}

/// One account in the configured directory.
#[derive(Debug, Clone)]
struct DirectoryUser {
    email: String,
    password: String,
    display_name: String,
}

/// Env-configured directory provider.
///
/// Stands in for the third-party identity service: accounts come from the
/// `ADMIN_AUTH_USERS` spec, and the "popup blocked" condition is modeled by
/// disabling the interactive flow in configuration.
pub struct DirectoryProvider {
    users: Vec<DirectoryUser>,
    allowed_domain: Option<String>,
    interactive: bool,
    events: broadcast::Sender<SessionEvent>,
}

impl DirectoryProvider {
    /// Build a provider from a directory string.
    ///
    /// Entries are `email:password:Display Name`, separated by `;`.
    ///
    /// # Errors
    ///
    /// Returns a description of the first malformed entry.
    pub fn from_spec(
        spec: &str,
        allowed_domain: Option<String>,
        interactive: bool,
    ) -> Result<Self, String> {
        let mut users = Vec::new();

        for entry in spec.split(';').filter(|e| !e.trim().is_empty()) {
            let mut parts = entry.splitn(3, ':');
            let email = parts.next().unwrap_or("").trim();
            let password = parts.next().unwrap_or("").trim();
            let display_name = parts.next().unwrap_or("").trim();

            if email.is_empty() || password.is_empty() || display_name.is_empty() {
                return Err(format!(
                    "malformed directory entry '{entry}': expected email:password:Display Name"
                ));
            }

            users.push(DirectoryUser {
                email: email.to_string(),
                password: password.to_string(),
                display_name: display_name.to_string(),
            });
        }

        if users.is_empty() {
            return Err("directory spec contains no accounts".to_string());
        }

        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Ok(Self {
            users,
            allowed_domain,
            interactive,
            events,
        })
    }

    fn authenticate(&self, email: &str, password: &str) -> Result<ProviderSession, ProviderError> {
        // An empty submission is the dialog being dismissed.
        if email.trim().is_empty() && password.is_empty() {
            return Err(ProviderError::Cancelled);
        }

        if let Some(domain) = &self.allowed_domain {
            let account_domain = email.rsplit('@').next().unwrap_or("");
            if !account_domain.eq_ignore_ascii_case(domain) {
                return Err(ProviderError::UnauthorizedDomain);
            }
        }

        let user = self
            .users
            .iter()
            .find(|user| user.email.eq_ignore_ascii_case(email.trim()))
            .ok_or(ProviderError::Unauthorized)?;
        if user.password != password {
            return Err(ProviderError::Unauthorized);
        }

        let identity = Identity {
            id: user.email.clone(),
            email: user.email.clone(),
            display_name: user.display_name.clone(),
            avatar_url: None,
        };
        let session = ProviderSession {
            identity: identity.clone(),
            access_token: Uuid::new_v4().to_string(),
        };

        let _ = self.events.send(SessionEvent::SignedIn(identity));
        Ok(session)
    }
}

#[async_trait]
impl IdentityProvider for DirectoryProvider {
    async fn sign_in(
        &self,
        email: &str,
        password: &str,
    ) -> Result<ProviderSession, ProviderError> {
        if !self.interactive {
            return Err(ProviderError::Blocked);
        }
        self.authenticate(email, password)
    }

    async fn sign_in_redirect(
        &self,
        email: &str,
        password: &str,
    ) -> Result<ProviderSession, ProviderError> {
        self.authenticate(email, password)
    }

    async fn sign_out(&self, _access_token: &str) -> Result<(), ProviderError> {
        let _ = self.events.send(SessionEvent::SignedOut);
        Ok(())
    }

    fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }
}
