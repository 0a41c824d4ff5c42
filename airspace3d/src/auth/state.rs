//! Authentication state and its UI projection.

use serde::Serialize;

use super::identity::UserProfile;

/// Summary of the signed-in portal user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserSummary {
    pub display_name: String,
    pub username: String,
    pub thumbnail_url: Option<String>,
}

impl UserSummary {
    /// First word of the display name, or the username when it is blank.
    pub fn first_name(&self) -> &str {
        self.display_name
            .split_whitespace()
            .next()
            .unwrap_or(&self.username)
    }
}

impl From<UserProfile> for UserSummary {
    fn from(profile: UserProfile) -> Self {
        Self {
            display_name: profile.full_name,
            username: profile.username,
            thumbnail_url: profile.thumbnail_url,
        }
    }
}

/// Whether a user is signed in, and who.
///
/// Only constructible as [`signed_out`](Self::signed_out) or
/// [`signed_in`](Self::signed_in), so `is_signed_in()` always agrees with
/// `user()`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AuthState {
    user: Option<UserSummary>,
}

impl AuthState {
    pub fn signed_out() -> Self {
        Self { user: None }
    }

    pub fn signed_in(user: UserSummary) -> Self {
        Self { user: Some(user) }
    }

    pub fn is_signed_in(&self) -> bool {
        self.user.is_some()
    }

    pub fn user(&self) -> Option<&UserSummary> {
        self.user.as_ref()
    }
}

/// What the sign-in area of the UI should show.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignInPanels {
    /// The "sign in" prompt.
    pub sign_in_visible: bool,
    /// The signed-in user card.
    pub user_visible: bool,
    pub first_name: String,
    pub full_name: String,
    pub username: String,
    pub thumbnail_url: Option<String>,
}

impl SignInPanels {
    /// Projects `state` onto the panels. Signed out clears every user field.
    pub fn from_state(state: &AuthState) -> Self {
        match state.user() {
            Some(user) => Self {
                sign_in_visible: false,
                user_visible: true,
                first_name: user.first_name().to_string(),
                full_name: user.display_name.clone(),
                username: user.username.clone(),
                thumbnail_url: user.thumbnail_url.clone(),
            },
            None => Self {
                sign_in_visible: true,
                ..Self::default()
            },
        }
    }
}
