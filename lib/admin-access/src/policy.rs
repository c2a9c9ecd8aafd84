//! Authorization and bypass policies for administrator login.
//!
//! [`AuthorizationPolicy`] answers whether a federated identity
//! assertion belongs to a configured administrator. The bypass
//! predicates answer whether a login may skip federated identity
//! entirely; that can only be true outside production.

use std::collections::HashSet;

use pressgate_core::Environment;

use crate::identity::{IdentityAssertion, NormalizedUri};

/// The set of identities permitted to administer the application.
///
/// Loaded once from trusted configuration before any request is served
/// and read-only for the life of the process; safe to share across
/// request handlers without synchronization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizationPolicy {
    /// Normalized OpenID identifiers of the administrators.
    authorized_open_ids: HashSet<NormalizedUri>,
    /// The single authorized Google OAuth2 email, lowercased.
    authorized_google_email: String,
}

impl AuthorizationPolicy {
    /// Creates a policy from already-normalized identities.
    ///
    /// The email is lowercased here so every later comparison is byte
    /// equality. Prefer
    /// [`AdminAccessConfig::into_policy`](crate::AdminAccessConfig::into_policy)
    /// when starting from raw configuration; it validates as well as
    /// normalizes.
    #[must_use]
    pub fn new(authorized_open_ids: HashSet<NormalizedUri>, authorized_google_email: &str) -> Self {
        Self {
            authorized_open_ids,
            authorized_google_email: authorized_google_email.to_lowercase(),
        }
    }

    /// Returns the authorized OpenID identifiers.
    #[must_use]
    pub fn authorized_open_ids(&self) -> &HashSet<NormalizedUri> {
        &self.authorized_open_ids
    }

    /// Returns the authorized Google OAuth2 email, lowercased.
    #[must_use]
    pub fn authorized_google_email(&self) -> &str {
        &self.authorized_google_email
    }

    /// Returns true if the asserted identity is a configured
    /// administrator.
    ///
    /// Each provider kind has its own comparison rule: OpenID is set
    /// membership over normalized URIs, Google OAuth2 is equality
    /// against the single configured email. Both sides of each
    /// comparison were normalized at construction, so no further
    /// massaging happens here. Pure and infallible.
    #[must_use]
    pub fn is_authorized(&self, assertion: &IdentityAssertion) -> bool {
        match assertion {
            IdentityAssertion::OpenId { uri } => self.authorized_open_ids.contains(uri),
            IdentityAssertion::GoogleOauth2 { email } => {
                email.eq_ignore_ascii_case(&self.authorized_google_email)
            }
        }
    }
}

/// Returns true when a login may bypass federated identity checks.
///
/// Bypass requires both a truthy request flag and a non-production
/// environment. In production the answer is false no matter what the
/// request says; the escape hatch does not exist there.
#[must_use]
pub fn allow_login_bypass(environment: Environment, requested: bool) -> bool {
    requested && !environment.is_production()
}

/// Returns true when a request parameter asks for login bypass.
///
/// Any non-empty value counts as a request.
#[must_use]
pub fn bypass_requested(param: Option<&str>) -> bool {
    param.is_some_and(|value| !value.is_empty())
}
