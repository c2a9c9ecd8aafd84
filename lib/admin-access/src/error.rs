//! Error types for the admin-access crate.
//!
//! Two failure domains exist here and they propagate differently:
//! - `AssertionError`: a callback payload that cannot become an
//!   identity assertion. Always recovered into an unauthorized
//!   decision, never surfaced as a fault.
//! - `ConfigError`: an unusable administrator whitelist. Fatal at
//!   startup; the application must not serve requests without a
//!   validated whitelist.

use std::fmt;

/// Errors from converting a provider callback into an assertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssertionError {
    /// An OpenID callback arrived without a `uid`.
    MissingUid,
    /// The OpenID `uid` is not a usable identifier.
    InvalidUid { reason: String },
    /// A Google OAuth2 callback arrived without an email claim.
    MissingEmail,
    /// The callback names a provider this application does not use.
    UnsupportedProvider,
}

impl fmt::Display for AssertionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingUid => {
                write!(f, "OpenID callback is missing its uid")
            }
            Self::InvalidUid { reason } => {
                write!(f, "OpenID uid is not a usable identifier: {reason}")
            }
            Self::MissingEmail => {
                write!(f, "Google OAuth2 callback is missing an email claim")
            }
            Self::UnsupportedProvider => {
                write!(f, "callback names an unsupported provider")
            }
        }
    }
}

impl std::error::Error for AssertionError {}

/// Errors from loading or validating the administrator whitelist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Configuration could not be read from its source.
    LoadFailed { reason: String },
    /// No authorized OpenID identifiers were configured.
    EmptyWhitelist,
    /// No authorized Google OAuth2 email was configured.
    MissingGoogleEmail,
    /// A whitelist entry is not an absolute URI.
    InvalidWhitelistEntry { entry: String, reason: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LoadFailed { reason } => {
                write!(f, "failed to load admin access configuration: {reason}")
            }
            Self::EmptyWhitelist => {
                write!(f, "no authorized OpenID identifiers are configured")
            }
            Self::MissingGoogleEmail => {
                write!(f, "no authorized Google OAuth2 email is configured")
            }
            Self::InvalidWhitelistEntry { entry, reason } => {
                write!(f, "whitelist entry '{entry}' is not an absolute URI: {reason}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
