//! Portal sign-in.
//!
//! [`SignInController`] owns the [`AuthState`], reacts to user commands and
//! credential notifications from an [`IdentityProvider`], and drives a
//! [`SignInView`] from the settled state.

mod controller;
mod identity;
mod state;
mod view;

pub use controller::{SignInCommand, SignInController};
pub use identity::{
    CredentialEvent, IdentityProvider, OfflineIdentity, SessionError, SessionStatus, UserProfile,
};
pub use state::{AuthState, SignInPanels, UserSummary};
pub use view::{LogView, SignInView};

#[cfg(test)]
pub use identity::tests::MockIdentityProvider;
#[cfg(test)]
pub use view::tests::RecordingView;
