//! Session lifecycle for the administrative area.
//!
//! The session's authentication status is a three-state value: a fresh
//! session is `Unset`, a successful login moves it to `LoggedIn`, and
//! only an explicit logout moves it to `LoggedOut`. Transitions are
//! value-in/value-out so they compose with any session store and are
//! testable without one.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::decision::SessionOutcome;

/// Where the browser is sent after a session operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RedirectTarget {
    /// The administrative dashboard.
    AdminHome,
    /// The public site root.
    SiteRoot,
}

impl RedirectTarget {
    /// Returns the request path for this target.
    #[must_use]
    pub fn path(&self) -> &'static str {
        match self {
            Self::AdminHome => "/admin",
            Self::SiteRoot => "/",
        }
    }
}

impl fmt::Display for RedirectTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path())
    }
}

/// What the presentation layer should do after a login decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoginDisposition {
    /// Navigate to the target.
    Redirect(RedirectTarget),
    /// Re-render the login form with a transient notice. Rendering
    /// rather than redirecting keeps the notice on the response.
    RenderLoginForm {
        /// The user-visible notice.
        notice: String,
    },
}

/// Authentication status of an administrative session.
///
/// `Unset` and `LoggedOut` are distinct states: a fresh session has
/// never seen a login, while `LoggedOut` records an explicit logout.
/// A failed login never moves the state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    /// Fresh session; no login decision has been applied.
    #[default]
    Unset,
    /// An authorized login established this session.
    LoggedIn,
    /// The session was explicitly logged out.
    LoggedOut,
}

impl SessionState {
    /// Returns true when the session is authenticated.
    #[must_use]
    pub fn is_logged_in(&self) -> bool {
        matches!(self, Self::LoggedIn)
    }

    /// Applies a login decision to the session.
    ///
    /// An authorized outcome logs the session in and redirects to the
    /// admin home. A rejected outcome leaves the state exactly as it
    /// was and re-renders the login form with the rejection notice;
    /// in particular it does not record a logout.
    #[must_use]
    pub fn apply(self, outcome: &SessionOutcome) -> (Self, LoginDisposition) {
        match outcome {
            SessionOutcome::Authorized => (
                Self::LoggedIn,
                LoginDisposition::Redirect(RedirectTarget::AdminHome),
            ),
            SessionOutcome::Rejected { reason } => (
                self,
                LoginDisposition::RenderLoginForm {
                    notice: reason.to_string(),
                },
            ),
        }
    }

    /// Logs the session out.
    ///
    /// Always lands on `LoggedOut` and always sends the browser to
    /// the site root; prior state is irrelevant and no policy is
    /// consulted.
    #[must_use]
    pub fn logout(self) -> (Self, RedirectTarget) {
        (Self::LoggedOut, RedirectTarget::SiteRoot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decision::RejectionReason;

    #[test]
    fn fresh_sessions_start_unset() {
        assert_eq!(SessionState::default(), SessionState::Unset);
        assert!(!SessionState::Unset.is_logged_in());
    }

    #[test]
    fn authorized_outcome_logs_in_and_redirects_to_admin_home() {
        let (state, disposition) = SessionState::Unset.apply(&SessionOutcome::Authorized);

        assert_eq!(state, SessionState::LoggedIn);
        assert!(state.is_logged_in());
        assert_eq!(
            disposition,
            LoginDisposition::Redirect(RedirectTarget::AdminHome)
        );
    }

    #[test]
    fn logged_out_session_can_log_back_in() {
        let (state, _) = SessionState::LoggedOut.apply(&SessionOutcome::Authorized);
        assert_eq!(state, SessionState::LoggedIn);
    }

    #[test]
    fn rejected_outcome_leaves_state_unchanged_and_renders_the_notice() {
        let outcome = SessionOutcome::Rejected {
            reason: RejectionReason::IdentityNotRecognized,
        };

        let (state, disposition) = SessionState::Unset.apply(&outcome);
        assert_eq!(state, SessionState::Unset);
        assert_eq!(
            disposition,
            LoginDisposition::RenderLoginForm {
                notice: "identity not recognized".to_string(),
            }
        );
    }

    #[test]
    fn rejected_outcome_does_not_log_out_an_authenticated_session() {
        let outcome = SessionOutcome::Rejected {
            reason: RejectionReason::InvalidAuthenticationResponse,
        };

        let (state, _) = SessionState::LoggedIn.apply(&outcome);
        assert_eq!(state, SessionState::LoggedIn);
    }

    #[test]
    fn logout_always_lands_on_logged_out_and_site_root() {
        for state in [
            SessionState::Unset,
            SessionState::LoggedIn,
            SessionState::LoggedOut,
        ] {
            let (next, target) = state.logout();
            assert_eq!(next, SessionState::LoggedOut);
            assert_eq!(target, RedirectTarget::SiteRoot);
        }
    }

    #[test]
    fn logout_is_idempotent() {
        let (once, first_target) = SessionState::LoggedIn.logout();
        let (twice, second_target) = once.logout();

        assert_eq!(once, twice);
        assert_eq!(first_target, second_target);
    }

    #[test]
    fn redirect_targets_render_as_paths() {
        assert_eq!(RedirectTarget::AdminHome.to_string(), "/admin");
        assert_eq!(RedirectTarget::SiteRoot.to_string(), "/");
    }

    #[test]
    fn unset_and_logged_out_serialize_distinctly() {
        let unset = serde_json::to_string(&SessionState::Unset).expect("serialize");
        let logged_out = serde_json::to_string(&SessionState::LoggedOut).expect("serialize");
        assert_ne!(unset, logged_out);

        let parsed: SessionState = serde_json::from_str(&logged_out).expect("deserialize");
        assert_eq!(parsed, SessionState::LoggedOut);
    }
}
