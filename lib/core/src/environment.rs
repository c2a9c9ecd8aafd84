//! Runtime environment detection for the pressgate platform.
//!
//! The environment gates development-only behavior, most notably the
//! login bypass in the admin-access crate. Resolution fails closed:
//! a missing or unrecognized environment name is treated as production.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::warn;

/// Environment variable consulted by [`Environment::detect`].
pub const ENVIRONMENT_VAR: &str = "PRESSGATE_ENV";

/// Error returned when parsing an environment name fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownEnvironment {
    /// The name that failed to parse.
    pub name: String,
}

impl fmt::Display for UnknownEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown environment name: {}", self.name)
    }
}

impl std::error::Error for UnknownEnvironment {}

/// The environment the platform is running in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development.
    Development,
    /// Automated test runs.
    Test,
    /// The live site.
    Production,
}

impl Environment {
    /// Returns true if this is the production environment.
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    /// Resolves an optional environment name, failing closed.
    ///
    /// A missing name resolves to `Production`, as does a name that
    /// does not parse. Callers that look the name up from their own
    /// source (process environment, config file) should funnel it
    /// through here rather than defaulting by hand.
    #[must_use]
    pub fn resolve(name: Option<&str>) -> Self {
        match name {
            Some(name) => name.parse().unwrap_or_else(|_| {
                warn!(name, "unrecognized environment name, assuming production");
                Self::Production
            }),
            None => Self::Production,
        }
    }

    /// Detects the environment from `PRESSGATE_ENV`.
    ///
    /// Unset, unreadable, or unrecognized values all resolve to
    /// `Production`.
    #[must_use]
    pub fn detect() -> Self {
        Self::resolve(std::env::var(ENVIRONMENT_VAR).ok().as_deref())
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Test => write!(f, "test"),
            Self::Production => write!(f, "production"),
        }
    }
}

impl FromStr for Environment {
    type Err = UnknownEnvironment;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "development" => Ok(Self::Development),
            "test" => Ok(Self::Test),
            "production" => Ok(Self::Production),
            _ => Err(UnknownEnvironment {
                name: s.to_string(),
            }),
        }
    }
}
