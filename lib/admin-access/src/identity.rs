//! Federated identity assertions.
//!
//! An assertion is the verified output of a federated login attempt:
//! which provider vouched for the user, and the identity it vouched
//! for. Assertions are built fresh per login attempt and are never
//! persisted.

use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

/// Error returned when a string cannot be normalized into a URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidUriError {
    /// The input that failed to normalize.
    pub uri: String,
    /// The reason for the failure.
    pub reason: String,
}

impl fmt::Display for InvalidUriError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to normalize '{}': {}", self.uri, self.reason)
    }
}

impl std::error::Error for InvalidUriError {}

/// An absolute URI reduced to its canonical `scheme://host/path` form.
///
/// OpenID identifiers are URIs, and the same identity can arrive with
/// the host cased differently or with a query string attached.
/// Normalization keeps the scheme, the host (lowercased by the URL
/// parser), an explicit port when one is given, and the path; query
/// strings, fragments, and userinfo are discarded. An empty path
/// renders as `/`, so `http://example.com` and `http://example.com/`
/// are the same identity. Two identifiers match iff their canonical
/// renderings are byte-equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NormalizedUri(String);

impl NormalizedUri {
    /// Parses and normalizes an absolute URI.
    ///
    /// # Errors
    ///
    /// Returns an error when the input is not an absolute URI or has
    /// no host component.
    pub fn parse(input: &str) -> Result<Self, InvalidUriError> {
        let url = Url::parse(input).map_err(|e| InvalidUriError {
            uri: input.to_string(),
            reason: e.to_string(),
        })?;

        let host = url.host_str().ok_or_else(|| InvalidUriError {
            uri: input.to_string(),
            reason: "no host component".to_string(),
        })?;

        let mut canonical = format!("{}://{host}", url.scheme());
        if let Some(port) = url.port() {
            canonical.push(':');
            canonical.push_str(&port.to_string());
        }
        canonical.push_str(url.path());

        Ok(Self(canonical))
    }

    /// Returns the canonical rendering as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NormalizedUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for NormalizedUri {
    type Error = InvalidUriError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<NormalizedUri> for String {
    fn from(uri: NormalizedUri) -> Self {
        uri.0
    }
}

/// A verified federated identity assertion.
///
/// Each provider kind carries exactly the identity payload its
/// protocol yields, so the "one payload, matching the provider"
/// invariant is structural. Adding a provider means adding a variant
/// here and a match arm in
/// [`AuthorizationPolicy::is_authorized`](crate::AuthorizationPolicy::is_authorized);
/// nothing else changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentityAssertion {
    /// The user proved ownership of a URI-shaped OpenID identifier.
    OpenId {
        /// The normalized identifier.
        uri: NormalizedUri,
    },
    /// Google's OAuth2 identity layer vouched for an email claim.
    GoogleOauth2 {
        /// The asserted email address, lowercased.
        email: String,
    },
}

impl IdentityAssertion {
    /// Creates an OpenID assertion from a raw identifier.
    ///
    /// # Errors
    ///
    /// Returns an error when the identifier is not an absolute URI.
    pub fn open_id(uri: &str) -> Result<Self, InvalidUriError> {
        Ok(Self::OpenId {
            uri: NormalizedUri::parse(uri)?,
        })
    }

    /// Creates a Google OAuth2 assertion.
    ///
    /// The email is lowercased so comparisons against the configured
    /// administrator email are byte equality.
    #[must_use]
    pub fn google_oauth2(email: &str) -> Self {
        Self::GoogleOauth2 {
            email: email.to_lowercase(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalization_lowercases_scheme_and_host() {
        let uri = NormalizedUri::parse("HTTP://EnkiBlog.COM").expect("should parse");
        assert_eq!(uri.as_str(), "http://enkiblog.com/");
    }

    #[test]
    fn normalization_drops_query_and_fragment() {
        let uri =
            NormalizedUri::parse("http://enkiblog.com/archives?page=2#top").expect("should parse");
        assert_eq!(uri.as_str(), "http://enkiblog.com/archives");
    }

    #[test]
    fn normalization_keeps_explicit_port_and_path() {
        let uri = NormalizedUri::parse("https://blog.example.com:8443/id").expect("should parse");
        assert_eq!(uri.as_str(), "https://blog.example.com:8443/id");
    }

    #[test]
    fn empty_path_and_root_path_are_the_same_identity() {
        let bare = NormalizedUri::parse("http://enkiblog.com").expect("should parse");
        let slashed = NormalizedUri::parse("http://enkiblog.com/").expect("should parse");
        assert_eq!(bare, slashed);
    }

    #[test]
    fn relative_input_is_rejected() {
        let err = NormalizedUri::parse("enkiblog.com").expect_err("should fail");
        assert_eq!(err.uri, "enkiblog.com");
    }

    #[test]
    fn hostless_input_is_rejected() {
        let err = NormalizedUri::parse("mailto:admin@enkiblog.com").expect_err("should fail");
        assert!(err.to_string().contains("no host"));
    }

    #[test]
    fn serde_round_trip_preserves_canonical_form() {
        let uri = NormalizedUri::parse("http://EnkiBlog.com?tracking=1").expect("should parse");
        let json = serde_json::to_string(&uri).expect("serialize");
        assert_eq!(json, "\"http://enkiblog.com/\"");

        let parsed: NormalizedUri = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(parsed, uri);
    }

    #[test]
    fn deserialization_rejects_non_uris() {
        let result = serde_json::from_str::<NormalizedUri>("\"not a uri\"");
        assert!(result.is_err());
    }

    #[test]
    fn open_id_assertion_normalizes_its_identifier() {
        let assertion = IdentityAssertion::open_id("HTTP://EnkiBlog.com").expect("should parse");
        let IdentityAssertion::OpenId { uri } = &assertion else {
            panic!("expected an OpenID assertion");
        };
        assert_eq!(uri.as_str(), "http://enkiblog.com/");
    }

    #[test]
    fn google_assertion_lowercases_its_email() {
        let assertion = IdentityAssertion::google_oauth2("You@Example.COM");
        let IdentityAssertion::GoogleOauth2 { email } = &assertion else {
            panic!("expected a Google OAuth2 assertion");
        };
        assert_eq!(email, "you@example.com");
    }
}
