//! # Session Holder
//!
//! Authentication state as a two-state machine.
//!
//! ```text
//!                 set_user_details(Some(profile))
//!   ┌───────────┐ ─────────────────────────────► ┌──────────┐
//!   │ LoggedOut │                                │ LoggedIn │ ◄─┐ set_user_details(Some)
//!   └───────────┘ ◄───────────────────────────── └──────────┘ ──┘ (profile replaced)
//!                 logout() / set_user_details(None)
//! ```
//!
//! The holder only tracks identity. Clearing the cart on logout is done by
//! the store facade, which owns both.

use brewcart_core::UserProfile;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Current authentication state. `LoggedIn` always carries a profile.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SessionState {
    #[default]
    LoggedOut,
    LoggedIn(UserProfile),
}

/// What a session action did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionTransition {
    LoggedIn,
    ProfileReplaced,
    LoggedOut,
    /// Logout while already logged out.
    Unchanged,
}

/// Screens reachable in the current session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScreenSet {
    /// Login and Register.
    Unauthenticated,
    /// Tabs, Details and Payment.
    Authenticated,
}

#[derive(Debug, Clone, Default)]
pub struct SessionHolder {
    state: SessionState,
}

impl SessionHolder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores the profile from a successful login/registration.
    ///
    /// `None` is the explicit logout path.
    pub fn set_user_details(&mut self, profile: Option<UserProfile>) -> SessionTransition {
        let Some(profile) = profile else {
            return self.logout();
        };

        let transition = match self.state {
            SessionState::LoggedOut => SessionTransition::LoggedIn,
            SessionState::LoggedIn(_) => SessionTransition::ProfileReplaced,
        };
        info!(email = %profile.email, ?transition, "Session profile set");
        self.state = SessionState::LoggedIn(profile);
        transition
    }

    pub fn logout(&mut self) -> SessionTransition {
        match std::mem::take(&mut self.state) {
            SessionState::LoggedOut => SessionTransition::Unchanged,
            SessionState::LoggedIn(profile) => {
                info!(email = %profile.email, "Session logged out");
                SessionTransition::LoggedOut
            }
        }
    }

    pub fn is_logged_in(&self) -> bool {
        matches!(self.state, SessionState::LoggedIn(_))
    }

    pub fn user(&self) -> Option<&UserProfile> {
        match &self.state {
            SessionState::LoggedIn(profile) => Some(profile),
            SessionState::LoggedOut => None,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn screen_set(&self) -> ScreenSet {
        if self.is_logged_in() {
            ScreenSet::Authenticated
        } else {
            ScreenSet::Unauthenticated
        }
    }
}

/// Read-only view of the session published in snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    pub is_logged_in: bool,
    pub user_details: Option<UserProfile>,
}

impl From<&SessionHolder> for SessionView {
    fn from(session: &SessionHolder) -> Self {
        SessionView {
            is_logged_in: session.is_logged_in(),
            user_details: session.user().cloned(),
        }
    }
}
