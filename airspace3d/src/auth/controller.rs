//! Sign-in state machine.
//!
//! # State Machine
//!
//! ```text
//! SignedOut --[sign_in: pending, provider confirms]--> SignedIn
//! SignedOut --[sign_in: provider rejects]-----------> SignedOut
//! SignedIn  --[sign_out]----------------------------> SignedOut
//! any       --[credential created]------------------> SignedIn | SignedOut
//! ```
//!
//! Every transition runs under one async lock, writes the new [`AuthState`]
//! and only then syncs the view, exactly once. Session errors are logged and
//! settle as signed out.

use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;
use tokio::sync::broadcast::error::RecvError;
use tokio::sync::{broadcast, mpsc, watch};
use tracing::{debug, info, warn};

use super::identity::{CredentialEvent, IdentityProvider, SessionError, SessionStatus};
use super::state::{AuthState, SignInPanels, UserSummary};
use super::view::SignInView;

/// User requests handled by [`SignInController::run`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignInCommand {
    SignIn,
    SignOut,
    /// Re-check the session without prompting.
    Refresh,
}

/// Owns the [`AuthState`] and keeps the sign-in UI in step with it.
pub struct SignInController<I, V> {
    identity: I,
    view: V,
    state: watch::Sender<AuthState>,
    transition: tokio::sync::Mutex<()>,
    pending: AtomicBool,
    events: Mutex<Option<broadcast::Receiver<CredentialEvent>>>,
}

impl<I, V> SignInController<I, V>
where
    I: IdentityProvider,
    V: SignInView,
{
    /// Creates a signed-out controller and subscribes to credential events.
    ///
    /// Nothing is synced until [`start`](Self::start) runs.
    pub fn new(identity: I, view: V) -> Self {
        let events = identity.credential_events();
        let (state, _) = watch::channel(AuthState::signed_out());
        Self {
            identity,
            view,
            state,
            transition: tokio::sync::Mutex::new(()),
            pending: AtomicBool::new(false),
            events: Mutex::new(Some(events)),
        }
    }

    pub fn state(&self) -> AuthState {
        self.state.borrow().clone()
    }

    /// Whether an interactive sign-in is in progress.
    pub fn is_pending(&self) -> bool {
        self.pending.load(Ordering::Acquire)
    }

    /// Observes every settled state.
    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.state.subscribe()
    }

    pub fn identity(&self) -> &I {
        &self.identity
    }

    /// Sets the initial state from the provider's current session.
    pub async fn start(&self) -> AuthState {
        let _guard = self.transition.lock().await;
        debug!("Checking sign-in status");
        let status = self.identity.check_session().await;
        self.settle(state_from_session(status))
    }

    /// Runs an interactive sign-in.
    ///
    /// Already signed in is a no-op. A rejected sign-in settles as signed out.
    pub async fn sign_in(&self) -> AuthState {
        let _guard = self.transition.lock().await;
        if self.state.borrow().is_signed_in() {
            return self.state();
        }

        let result = {
            let _pending = PendingFlag::raise(&self.pending);
            self.identity.begin_sign_in().await
        };

        let state = match result {
            Ok(profile) => AuthState::signed_in(UserSummary::from(profile)),
            Err(e) => {
                warn!(error = %e, "Sign-in failed");
                AuthState::signed_out()
            }
        };
        self.settle(state)
    }

    /// Destroys credentials and settles as signed out.
    pub async fn sign_out(&self) -> AuthState {
        let _guard = self.transition.lock().await;
        self.identity.end_sign_in().await;
        self.settle(AuthState::signed_out())
    }

    /// Re-evaluates the session after a credential was created.
    pub async fn on_credential_created(&self) -> AuthState {
        let _guard = self.transition.lock().await;
        let status = self.identity.check_session().await;
        self.settle(state_from_session(status))
    }

    /// Serves user commands and credential notifications until the command
    /// channel closes.
    ///
    /// Credential notifications are handled before pending commands.
    pub async fn run(&self, mut commands: mpsc::Receiver<SignInCommand>) {
        let mut events = self
            .events
            .lock()
            .take()
            .unwrap_or_else(|| self.identity.credential_events());
        let mut events_open = true;

        loop {
            tokio::select! {
                biased;

                event = events.recv(), if events_open => match event {
                    Ok(CredentialEvent::Created { server }) => {
                        debug!(server = %server, "Credential created");
                        self.on_credential_created().await;
                    }
                    Err(RecvError::Lagged(skipped)) => {
                        warn!(skipped, "Missed credential notifications");
                        self.on_credential_created().await;
                    }
                    Err(RecvError::Closed) => {
                        debug!("Credential notifications closed");
                        events_open = false;
                    }
                },
                command = commands.recv() => match command {
                    Some(SignInCommand::SignIn) => {
                        self.sign_in().await;
                    }
                    Some(SignInCommand::SignOut) => {
                        self.sign_out().await;
                    }
                    Some(SignInCommand::Refresh) => {
                        self.on_credential_created().await;
                    }
                    None => break,
                },
            }
        }
    }

    fn settle(&self, state: AuthState) -> AuthState {
        self.state.send_replace(state.clone());
        info!(signed_in = state.is_signed_in(), "Sign-in state settled");
        self.view.sync(&SignInPanels::from_state(&state));
        state
    }
}

/// Holds the pending flag up until dropped, including when the sign-in
/// future is dropped mid-request.
struct PendingFlag<'a>(&'a AtomicBool);

impl<'a> PendingFlag<'a> {
    fn raise(flag: &'a AtomicBool) -> Self {
        flag.store(true, Ordering::Release);
        Self(flag)
    }
}

impl Drop for PendingFlag<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

fn state_from_session(status: Result<SessionStatus, SessionError>) -> AuthState {
    match status {
        Ok(SessionStatus {
            signed_in: true,
            profile: Some(profile),
        }) => AuthState::signed_in(UserSummary::from(profile)),
        Ok(SessionStatus {
            signed_in: true,
            profile: None,
        }) => {
            warn!("Session reported without a user profile");
            AuthState::signed_out()
        }
        Ok(_) => AuthState::signed_out(),
        Err(e) => {
            warn!(error = %e, "Session check failed");
            AuthState::signed_out()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::identity::tests::{profile, MockIdentityProvider};
    use crate::auth::view::tests::RecordingView;

    fn controller() -> SignInController<MockIdentityProvider, RecordingView> {
        SignInController::new(MockIdentityProvider::new(), RecordingView::default())
    }

    #[tokio::test]
    async fn test_start_signed_out() {
        let c = controller();
        let state = c.start().await;

        assert!(!state.is_signed_in());
        assert_eq!(c.view.count(), 1);
        assert!(c.view.last().unwrap().sign_in_visible);
    }

    #[tokio::test]
    async fn test_start_with_existing_session() {
        let c = controller();
        c.identity
            .set_session(Ok(SessionStatus::signed_in(profile("Pat Example", "pat"))));

        let state = c.start().await;

        assert_eq!(state.user().unwrap().username, "pat");
        let panels = c.view.last().unwrap();
        assert!(panels.user_visible);
        assert_eq!(panels.first_name, "Pat");
    }

    #[tokio::test]
    async fn test_sign_in_confirmed() {
        let c = controller();
        c.start().await;
        c.identity.set_sign_in(Ok(profile("Pat Example", "pat")));

        let state = c.sign_in().await;

        assert!(state.is_signed_in());
        assert!(!c.is_pending());
        assert_eq!(c.view.count(), 2);
        assert_eq!(c.state(), state);
    }

    #[tokio::test]
    async fn test_abandoned_sign_in_clears_pending() {
        let c = controller();
        c.start().await;
        c.identity.set_sign_in(Ok(profile("Pat Example", "pat")));

        let mut request = Box::pin(c.sign_in());
        assert!(futures::poll!(request.as_mut()).is_pending());
        assert!(c.is_pending());

        drop(request);

        assert!(!c.is_pending());
        assert!(!c.state().is_signed_in());
        assert_eq!(c.view.count(), 1);

        // The transition lock was released with the dropped request.
        assert!(c.sign_in().await.is_signed_in());
    }

    #[tokio::test]
    async fn test_sign_in_rejected_stays_signed_out() {
        let c = controller();
        c.start().await;

        let state = c.sign_in().await;

        assert!(!state.is_signed_in());
        assert_eq!(c.view.count(), 2);
        assert!(c.view.last().unwrap().sign_in_visible);
    }

    #[tokio::test]
    async fn test_sign_in_when_signed_in_is_noop() {
        let c = controller();
        c.identity
            .set_session(Ok(SessionStatus::signed_in(profile("Pat Example", "pat"))));
        c.start().await;

        c.sign_in().await;

        assert_eq!(c.view.count(), 1);
    }

    #[tokio::test]
    async fn test_sign_out_destroys_credentials() {
        let c = controller();
        c.identity
            .set_session(Ok(SessionStatus::signed_in(profile("Pat Example", "pat"))));
        c.start().await;

        let state = c.sign_out().await;

        assert!(!state.is_signed_in());
        assert_eq!(c.identity.end_calls.get(), 1);
        let panels = c.view.last().unwrap();
        assert!(panels.sign_in_visible);
        assert!(panels.username.is_empty());
    }

    #[tokio::test]
    async fn test_credential_created_without_session() {
        let c = controller();
        c.start().await;

        let state = c.on_credential_created().await;

        assert!(!state.is_signed_in());
        assert_eq!(c.view.count(), 2);
    }

    #[tokio::test]
    async fn test_credential_created_with_confirmed_session() {
        let c = controller();
        c.start().await;
        c.identity
            .set_session(Ok(SessionStatus::signed_in(profile("Pat Example", "pat"))));

        let state = c.on_credential_created().await;

        assert!(state.is_signed_in());
        assert_eq!(c.view.count(), 2);
    }

    #[tokio::test]
    async fn test_session_error_settles_signed_out() {
        let c = controller();
        c.identity
            .set_session(Err(SessionError::Unavailable("offline".to_string())));

        let state = c.start().await;

        assert!(!state.is_signed_in());
        assert_eq!(c.view.count(), 1);
    }

    #[tokio::test]
    async fn test_session_without_profile_is_signed_out() {
        let c = controller();
        c.identity.set_session(Ok(SessionStatus {
            signed_in: true,
            profile: None,
        }));

        assert!(!c.start().await.is_signed_in());
    }

    #[tokio::test]
    async fn test_subscribers_see_settled_state() {
        let c = controller();
        let mut rx = c.subscribe();
        c.identity.set_sign_in(Ok(profile("Pat Example", "pat")));

        c.sign_in().await;

        assert!(rx.has_changed().unwrap());
        assert!(rx.borrow_and_update().is_signed_in());
    }

    #[tokio::test]
    async fn test_run_handles_commands_in_order() {
        let c = controller();
        c.identity.set_sign_in(Ok(profile("Pat Example", "pat")));
        let (tx, rx) = mpsc::channel(4);
        tx.send(SignInCommand::SignIn).await.unwrap();
        tx.send(SignInCommand::SignOut).await.unwrap();
        drop(tx);

        c.run(rx).await;

        assert!(!c.state().is_signed_in());
        assert_eq!(c.view.count(), 2);
        assert!(c.view.syncs.borrow()[0].user_visible);
    }

    #[tokio::test]
    async fn test_run_reacts_to_credential_event() {
        let c = controller();
        c.start().await;
        c.identity
            .set_session(Ok(SessionStatus::signed_in(profile("Pat Example", "pat"))));
        c.identity.emit_credential();
        let (tx, rx) = mpsc::channel(1);
        drop(tx);

        c.run(rx).await;

        assert!(c.state().is_signed_in());
        assert_eq!(c.view.count(), 2);
    }
}
