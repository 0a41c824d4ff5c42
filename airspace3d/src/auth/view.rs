//! Sign-in UI sinks.

use tracing::info;

use super::state::SignInPanels;

/// Receives the sign-in panel state after every settled transition.
pub trait SignInView {
    fn sync(&self, panels: &SignInPanels);
}

/// View that reports panel changes through the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogView;

impl SignInView for LogView {
    fn sync(&self, panels: &SignInPanels) {
        if panels.user_visible {
            info!(
                user = %panels.username,
                name = %panels.full_name,
                "Signed in"
            );
        } else {
            info!("Signed out");
        }
    }
}
