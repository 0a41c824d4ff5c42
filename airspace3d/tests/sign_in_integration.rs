//! Integration tests for the sign-in controller.
//!
//! These tests verify the controller against a scripted identity provider:
//! - Startup session check and UI sync
//! - Credential notifications while signed out
//! - The command loop driven alongside a subscriber
//!
//! Run with: `cargo test --test sign_in_integration`

use std::cell::RefCell;
use std::rc::Rc;

use tokio::sync::{broadcast, mpsc};

use airspace3d::auth::{
    CredentialEvent, IdentityProvider, SessionError, SessionStatus, SignInCommand,
    SignInController, SignInPanels, SignInView, UserProfile,
};

// ============================================================================
// Helper Types
// ============================================================================

/// Identity provider whose session is set by the test.
struct ScriptedIdentity {
    session: RefCell<Option<UserProfile>>,
    accept_sign_in: RefCell<Option<UserProfile>>,
    events: broadcast::Sender<CredentialEvent>,
}

impl ScriptedIdentity {
    fn new() -> Self {
        let (events, _) = broadcast::channel(4);
        Self {
            session: RefCell::new(None),
            accept_sign_in: RefCell::new(None),
            events,
        }
    }

    /// Simulates a credential stored out of band, e.g. by another window.
    fn store_credential(&self, profile: UserProfile) {
        *self.session.borrow_mut() = Some(profile);
        let _ = self.events.send(CredentialEvent::Created {
            server: "https://www.arcgis.com".to_string(),
        });
    }
}

impl IdentityProvider for ScriptedIdentity {
    async fn check_session(&self) -> Result<SessionStatus, SessionError> {
        tokio::task::yield_now().await;
        Ok(match self.session.borrow().clone() {
            Some(profile) => SessionStatus::signed_in(profile),
            None => SessionStatus::signed_out(),
        })
    }

    async fn begin_sign_in(&self) -> Result<UserProfile, SessionError> {
        tokio::task::yield_now().await;
        let profile = self
            .accept_sign_in
            .borrow()
            .clone()
            .ok_or_else(|| SessionError::Rejected("user cancelled".to_string()))?;
        *self.session.borrow_mut() = Some(profile.clone());
        Ok(profile)
    }

    async fn end_sign_in(&self) {
        *self.session.borrow_mut() = None;
    }

    fn credential_events(&self) -> broadcast::Receiver<CredentialEvent> {
        self.events.subscribe()
    }
}

/// View sharing its sync log with the test.
#[derive(Clone, Default)]
struct SharedView(Rc<RefCell<Vec<SignInPanels>>>);

impl SharedView {
    fn count(&self) -> usize {
        self.0.borrow().len()
    }

    fn last(&self) -> SignInPanels {
        self.0.borrow().last().cloned().expect("view was synced")
    }
}

impl SignInView for SharedView {
    fn sync(&self, panels: &SignInPanels) {
        self.0.borrow_mut().push(panels.clone());
    }
}

fn pat() -> UserProfile {
    UserProfile {
        full_name: "Pat Example".to_string(),
        username: "pexample".to_string(),
        thumbnail_url: Some("https://example.com/pat.png".to_string()),
    }
}

// ============================================================================
// Integration Tests
// ============================================================================

/// Credential created while signed out signs in only once the session is
/// confirmed, syncing the UI once per settled transition.
#[tokio::test]
async fn test_credential_created_while_signed_out() {
    let view = SharedView::default();
    let controller = SignInController::new(ScriptedIdentity::new(), view.clone());

    controller.start().await;
    assert_eq!(view.count(), 1);
    assert!(view.last().sign_in_visible);

    // Notification without a confirmed session settles signed out again.
    let state = controller.on_credential_created().await;
    assert!(!state.is_signed_in());
    assert_eq!(view.count(), 2);

    controller.identity().store_credential(pat());
    let state = controller.on_credential_created().await;

    assert!(state.is_signed_in());
    assert_eq!(view.count(), 3);
    let panels = view.last();
    assert!(panels.user_visible);
    assert!(!panels.sign_in_visible);
    assert_eq!(panels.first_name, "Pat");
    assert_eq!(panels.full_name, "Pat Example");
    assert_eq!(panels.username, "pexample");
    assert_eq!(
        panels.thumbnail_url.as_deref(),
        Some("https://example.com/pat.png")
    );
}

/// The command loop serves user commands and credential notifications while
/// a subscriber follows along.
#[tokio::test]
async fn test_run_loop_with_subscriber() {
    let view = SharedView::default();
    let controller = SignInController::new(ScriptedIdentity::new(), view.clone());
    *controller.identity().accept_sign_in.borrow_mut() = Some(pat());
    controller.start().await;

    let mut states = controller.subscribe();
    let (tx, rx) = mpsc::channel(4);

    let driver = async {
        tx.send(SignInCommand::SignIn).await.unwrap();
        states.changed().await.unwrap();
        assert!(states.borrow_and_update().is_signed_in());

        tx.send(SignInCommand::SignOut).await.unwrap();
        states.changed().await.unwrap();
        assert!(!states.borrow_and_update().is_signed_in());

        controller.identity().store_credential(pat());
        states.changed().await.unwrap();
        assert!(states.borrow_and_update().is_signed_in());

        drop(tx);
    };

    tokio::join!(controller.run(rx), driver);

    // start + sign in + sign out + credential
    assert_eq!(view.count(), 4);
    assert!(controller.state().is_signed_in());
}

/// A rejected sign-in leaves the user signed out with the prompt visible.
#[tokio::test]
async fn test_rejected_sign_in() {
    let view = SharedView::default();
    let controller = SignInController::new(ScriptedIdentity::new(), view.clone());
    controller.start().await;

    let state = controller.sign_in().await;

    assert!(!state.is_signed_in());
    assert!(!controller.is_pending());
    assert_eq!(view.count(), 2);
    assert!(view.last().sign_in_visible);
}
