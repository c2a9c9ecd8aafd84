//! Whitelist configuration for administrator access.
//!
//! Raw configuration arrives as strings; conversion into an
//! [`AuthorizationPolicy`] normalizes and validates them. Validation
//! failures are fatal: the application must abort startup rather than
//! serve requests against an empty or partly-loaded whitelist.

use serde::Deserialize;
use std::collections::HashSet;

use pressgate_core::Result;

use crate::error::ConfigError;
use crate::identity::NormalizedUri;
use crate::policy::AuthorizationPolicy;

/// Raw administrator whitelist configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AdminAccessConfig {
    /// OpenID identifiers of the administrators.
    #[serde(default)]
    pub authorized_open_ids: Vec<String>,
    /// The single Google OAuth2 email granted administration.
    pub authorized_google_email: String,
}

impl AdminAccessConfig {
    /// Loads configuration from `PRESSGATE`-prefixed environment
    /// variables, e.g. `PRESSGATE_AUTHORIZED_GOOGLE_EMAIL`. The
    /// whitelist is a comma-separated list.
    ///
    /// # Errors
    ///
    /// Returns an error if required configuration is missing or
    /// cannot be deserialized.
    pub fn from_env() -> std::result::Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(
                config::Environment::with_prefix("PRESSGATE")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(","),
            )
            .build()?
            .try_deserialize()
    }

    /// Converts raw configuration into a validated policy.
    ///
    /// Every whitelist entry is normalized; an entry that is not an
    /// absolute URI is an error, never silently skipped. The email is
    /// lowercased.
    ///
    /// # Errors
    ///
    /// Returns an error when the whitelist is empty, when any entry
    /// fails to normalize, or when the email is blank. Callers must
    /// treat any of these as fatal and abort startup.
    pub fn into_policy(self) -> Result<AuthorizationPolicy, ConfigError> {
        Ok(self.validate()?)
    }

    fn validate(self) -> std::result::Result<AuthorizationPolicy, ConfigError> {
        if self.authorized_open_ids.is_empty() {
            return Err(ConfigError::EmptyWhitelist);
        }

        let email = self.authorized_google_email.trim();
        if email.is_empty() {
            return Err(ConfigError::MissingGoogleEmail);
        }

        let mut authorized = HashSet::with_capacity(self.authorized_open_ids.len());
        for entry in &self.authorized_open_ids {
            let uri =
                NormalizedUri::parse(entry).map_err(|e| ConfigError::InvalidWhitelistEntry {
                    entry: entry.clone(),
                    reason: e.reason,
                })?;
            authorized.insert(uri);
        }

        Ok(AuthorizationPolicy::new(authorized, email))
    }
}

/// Loads and validates the administrator whitelist from the process
/// environment in one step.
///
/// # Errors
///
/// Returns an error when loading or validation fails; both are fatal
/// to startup.
pub fn load_policy_from_env() -> Result<AuthorizationPolicy, ConfigError> {
    let config = AdminAccessConfig::from_env().map_err(|e| ConfigError::LoadFailed {
        reason: e.to_string(),
    })?;
    config.into_policy()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::IdentityAssertion;

    fn test_config() -> AdminAccessConfig {
        AdminAccessConfig {
            authorized_open_ids: vec![
                "http://enkiblog.com".to_string(),
                "http://secondaryopenid.com".to_string(),
            ],
            authorized_google_email: "you@your-openid-connect-domain.com".to_string(),
        }
    }

    #[test]
    fn validation_normalizes_whitelist_entries() {
        let mut config = test_config();
        config.authorized_open_ids = vec!["HTTP://EnkiBlog.COM/?ref=1".to_string()];

        let policy = config.validate().expect("should validate");
        let assertion = IdentityAssertion::open_id("http://enkiblog.com").expect("should parse");
        assert!(policy.is_authorized(&assertion));
    }

    #[test]
    fn validation_lowercases_the_email() {
        let mut config = test_config();
        config.authorized_google_email = "  You@Your-OpenID-Connect-Domain.COM ".to_string();

        let policy = config.validate().expect("should validate");
        assert_eq!(
            policy.authorized_google_email(),
            "you@your-openid-connect-domain.com"
        );
    }

    #[test]
    fn empty_whitelist_is_fatal() {
        let mut config = test_config();
        config.authorized_open_ids = Vec::new();

        assert_eq!(
            config.validate().expect_err("should fail"),
            ConfigError::EmptyWhitelist
        );
    }

    #[test]
    fn blank_email_is_fatal() {
        let mut config = test_config();
        config.authorized_google_email = "   ".to_string();

        assert_eq!(
            config.validate().expect_err("should fail"),
            ConfigError::MissingGoogleEmail
        );
    }

    #[test]
    fn malformed_whitelist_entry_is_fatal_not_skipped() {
        let mut config = test_config();
        config
            .authorized_open_ids
            .push("not-an-absolute-uri".to_string());

        let err = config.validate().expect_err("should fail");
        assert!(matches!(
            err,
            ConfigError::InvalidWhitelistEntry { ref entry, .. } if entry == "not-an-absolute-uri"
        ));
    }

    #[test]
    fn into_policy_reports_validation_failures() {
        let config = AdminAccessConfig {
            authorized_open_ids: Vec::new(),
            authorized_google_email: String::new(),
        };
        assert!(config.into_policy().is_err());
    }

    #[test]
    fn deserializes_from_config_values() {
        let config: AdminAccessConfig = serde_json::from_str(
            r#"{
                "authorized_open_ids": ["http://enkiblog.com"],
                "authorized_google_email": "you@your-openid-connect-domain.com"
            }"#,
        )
        .expect("deserialize");

        assert_eq!(config.authorized_open_ids, vec!["http://enkiblog.com"]);
        config.into_policy().expect("should validate");
    }
}
