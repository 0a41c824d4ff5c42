//! Identity provider abstraction.

use std::future::Future;

use thiserror::Error;
use tokio::sync::broadcast;
use tracing::debug;

/// Portal user profile as reported by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub full_name: String,
    pub username: String,
    pub thumbnail_url: Option<String>,
}

/// Result of a session check.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionStatus {
    pub signed_in: bool,
    pub profile: Option<UserProfile>,
}

impl SessionStatus {
    pub fn signed_out() -> Self {
        Self::default()
    }

    pub fn signed_in(profile: UserProfile) -> Self {
        Self {
            signed_in: true,
            profile: Some(profile),
        }
    }
}

/// Notification pushed by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialEvent {
    /// A credential was stored for `server`.
    Created { server: String },
}

/// Errors reported by an identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("sign-in was rejected: {0}")]
    Rejected(String),

    #[error("identity provider unavailable: {0}")]
    Unavailable(String),

    #[error("failed to load user profile: {0}")]
    Profile(String),
}

/// Source of portal identity.
pub trait IdentityProvider {
    /// Checks for an existing session without prompting.
    fn check_session(&self) -> impl Future<Output = Result<SessionStatus, SessionError>>;

    /// Runs an interactive sign-in and returns the signed-in profile.
    fn begin_sign_in(&self) -> impl Future<Output = Result<UserProfile, SessionError>>;

    /// Destroys stored credentials.
    fn end_sign_in(&self) -> impl Future<Output = ()>;

    /// Subscribes to credential notifications.
    fn credential_events(&self) -> broadcast::Receiver<CredentialEvent>;
}

/// Identity provider for a portal that cannot be reached from here.
///
/// Never has a session and rejects every sign-in, naming the portal it
/// stands in for.
#[derive(Debug)]
pub struct OfflineIdentity {
    portal_url: String,
    events: broadcast::Sender<CredentialEvent>,
}

impl OfflineIdentity {
    pub fn new(portal_url: impl Into<String>) -> Self {
        let (events, _) = broadcast::channel(1);
        Self {
            portal_url: portal_url.into(),
            events,
        }
    }

    pub fn portal_url(&self) -> &str {
        &self.portal_url
    }
}

impl IdentityProvider for OfflineIdentity {
    async fn check_session(&self) -> Result<SessionStatus, SessionError> {
        debug!(portal = %self.portal_url, "Offline, no session");
        Ok(SessionStatus::signed_out())
    }

    async fn begin_sign_in(&self) -> Result<UserProfile, SessionError> {
        Err(SessionError::Unavailable(format!(
            "no sign-in client for {}",
            self.portal_url
        )))
    }

    async fn end_sign_in(&self) {}

    fn credential_events(&self) -> broadcast::Receiver<CredentialEvent> {
        self.events.subscribe()
    }
}
