//! The session decision engine.
//!
//! One linear, short-circuiting decision per login attempt: consider
//! bypass first, then extract an identity assertion from the provider
//! callback and check it against the policy. The engine holds only
//! read-only policy data, so a single instance serves concurrent
//! requests without synchronization.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, instrument};

use pressgate_core::Environment;

use crate::callback::ProviderCallback;
use crate::error::AssertionError;
use crate::policy::{AuthorizationPolicy, allow_login_bypass, bypass_requested};

/// An inbound administrator login attempt.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    /// The `bypass_login` request parameter, when present.
    #[serde(default)]
    pub bypass_login: Option<String>,
    /// The verified provider callback payload, when a handshake ran.
    #[serde(default)]
    pub callback: Option<ProviderCallback>,
}

impl LoginRequest {
    /// A request carrying a verified provider callback.
    #[must_use]
    pub fn from_callback(callback: ProviderCallback) -> Self {
        Self {
            bypass_login: None,
            callback: Some(callback),
        }
    }

    /// A request asking to bypass federated login.
    #[must_use]
    pub fn with_bypass(value: &str) -> Self {
        Self {
            bypass_login: Some(value.to_string()),
            callback: None,
        }
    }
}

/// Why a login attempt was rejected.
///
/// The `Display` rendering is the transient notice shown to the user.
/// It is deliberately generic: rejections never reveal which check
/// failed, and never hint that a bypass was attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectionReason {
    /// The callback payload was missing or malformed.
    InvalidAuthenticationResponse,
    /// The asserted identity is not a configured administrator.
    IdentityNotRecognized,
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidAuthenticationResponse => write!(f, "invalid authentication response"),
            Self::IdentityNotRecognized => write!(f, "identity not recognized"),
        }
    }
}

/// The result of a login decision.
///
/// Produced once per attempt and immediately consumed by the session
/// lifecycle; never retained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionOutcome {
    /// The attempt is authorized; a session may be established.
    Authorized,
    /// The attempt is rejected; no session is established.
    Rejected {
        /// The user-visible rejection reason.
        reason: RejectionReason,
    },
}

impl SessionOutcome {
    /// Returns true if the attempt was authorized.
    #[must_use]
    pub fn is_authorized(&self) -> bool {
        matches!(self, Self::Authorized)
    }
}

/// Decides whether a login attempt establishes an administrator
/// session.
#[derive(Debug, Clone)]
pub struct SessionDecisionEngine {
    /// The whitelist the engine decides against.
    policy: AuthorizationPolicy,
}

impl SessionDecisionEngine {
    /// Creates an engine over a validated authorization policy.
    #[must_use]
    pub fn new(policy: AuthorizationPolicy) -> Self {
        Self { policy }
    }

    /// Returns the policy the engine decides against.
    #[must_use]
    pub fn policy(&self) -> &AuthorizationPolicy {
        &self.policy
    }

    /// Decides a single login attempt.
    ///
    /// Bypass is considered first and, when granted, no assertion is
    /// required or consulted. Otherwise the callback payload is
    /// converted into an identity assertion and checked against the
    /// policy. A denied bypass silently falls through to assertion
    /// evaluation so the outcome never betrays that the feature
    /// exists.
    #[instrument(skip(self, request), fields(environment = %environment))]
    #[must_use]
    pub fn decide(&self, request: &LoginRequest, environment: Environment) -> SessionOutcome {
        if allow_login_bypass(environment, bypass_requested(request.bypass_login.as_deref())) {
            debug!("login bypass granted");
            return SessionOutcome::Authorized;
        }

        let Some(callback) = &request.callback else {
            debug!("login attempt without a provider callback");
            return SessionOutcome::Rejected {
                reason: RejectionReason::InvalidAuthenticationResponse,
            };
        };

        let assertion = match callback.to_assertion() {
            Ok(assertion) => assertion,
            Err(AssertionError::UnsupportedProvider) => {
                debug!("callback from an unrecognized provider");
                return SessionOutcome::Rejected {
                    reason: RejectionReason::IdentityNotRecognized,
                };
            }
            Err(error) => {
                debug!(%error, "malformed provider callback");
                return SessionOutcome::Rejected {
                    reason: RejectionReason::InvalidAuthenticationResponse,
                };
            }
        };

        if self.policy.is_authorized(&assertion) {
            debug!("administrator identity authorized");
            SessionOutcome::Authorized
        } else {
            debug!("asserted identity is not a configured administrator");
            SessionOutcome::Rejected {
                reason: RejectionReason::IdentityNotRecognized,
            }
        }
    }
}
