//! Verified provider callback payloads.
//!
//! The protocol handshake itself (redirects, signature and token
//! verification) happens upstream; what arrives here is the verified
//! callback hash the handshake produced: `{provider, uid}` for OpenID,
//! `{provider, info: {email}}` for Google OAuth2.

use serde::{Deserialize, Serialize};

use crate::error::AssertionError;
use crate::identity::{IdentityAssertion, NormalizedUri};

/// The federated identity provider named in a callback payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Provider {
    /// The OpenID strategy used for administrator login.
    OpenIdAdmin,
    /// Google's OAuth2-based identity layer.
    GoogleOauth2,
    /// Any provider this application does not recognize.
    #[serde(other)]
    Other,
}

/// The `info` sub-hash of a callback payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallbackInfo {
    /// Verified email claim, when the provider supplies one.
    #[serde(default)]
    pub email: Option<String>,
}

/// A verified federated login callback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderCallback {
    /// The provider that completed the handshake.
    pub provider: Provider,
    /// Provider-assigned identifier; a URI for OpenID strategies.
    #[serde(default)]
    pub uid: Option<String>,
    /// Additional verified claims.
    #[serde(default)]
    pub info: CallbackInfo,
}

impl ProviderCallback {
    /// Converts the raw callback into a typed identity assertion.
    ///
    /// # Errors
    ///
    /// Returns an error when the payload is missing the field its
    /// provider requires, when an OpenID identifier does not parse as
    /// an absolute URI, or when the provider is unrecognized.
    pub fn to_assertion(&self) -> Result<IdentityAssertion, AssertionError> {
        match self.provider {
            Provider::OpenIdAdmin => {
                let uid = self.uid.as_deref().ok_or(AssertionError::MissingUid)?;
                let uri =
                    NormalizedUri::parse(uid).map_err(|e| AssertionError::InvalidUid {
                        reason: e.reason,
                    })?;
                Ok(IdentityAssertion::OpenId { uri })
            }
            Provider::GoogleOauth2 => {
                let email = self
                    .info
                    .email
                    .as_deref()
                    .ok_or(AssertionError::MissingEmail)?;
                Ok(IdentityAssertion::google_oauth2(email))
            }
            Provider::Other => Err(AssertionError::UnsupportedProvider),
        }
    }
}
