//! Administrator authentication and session decisions for pressgate.
//!
//! This crate provides:
//! - Federated identity assertions (`IdentityAssertion`, `NormalizedUri`)
//! - The administrator whitelist (`AuthorizationPolicy`)
//! - The login decision engine (`SessionDecisionEngine`)
//! - Pure session lifecycle transitions (`SessionState`)
//!
//! # Decision Model
//!
//! Administrators authenticate with federated identity, not passwords:
//! OpenID proves ownership of a URI-shaped identifier, and Google's
//! OAuth2 identity layer yields a verified email claim. A login attempt
//! is decided in one short-circuiting pass: a development-only bypass is
//! considered first, then the verified provider callback is converted
//! into an identity assertion and checked against the whitelist. The
//! outcome drives a pure session transition — log in and redirect to the
//! admin home, or re-render the login form with a notice and leave the
//! session untouched.
//!
//! # Example
//!
//! ```
//! use pressgate_admin_access::{
//!     AdminAccessConfig, LoginRequest, Provider, ProviderCallback, RedirectTarget,
//!     SessionDecisionEngine, SessionState,
//! };
//! use pressgate_core::Environment;
//!
//! // Build the engine from validated whitelist configuration
//! let config = AdminAccessConfig {
//!     authorized_open_ids: vec!["http://enkiblog.com".to_string()],
//!     authorized_google_email: "you@your-openid-connect-domain.com".to_string(),
//! };
//! let engine = SessionDecisionEngine::new(config.into_policy().expect("usable whitelist"));
//!
//! // Decide a verified OpenID callback
//! let request = LoginRequest::from_callback(ProviderCallback {
//!     provider: Provider::OpenIdAdmin,
//!     uid: Some("http://enkiblog.com".to_string()),
//!     info: Default::default(),
//! });
//! let outcome = engine.decide(&request, Environment::Production);
//!
//! // Apply the outcome to the session
//! let (session, _disposition) = SessionState::Unset.apply(&outcome);
//! assert!(session.is_logged_in());
//!
//! // Logout always lands on the site root
//! let (session, target) = session.logout();
//! assert!(!session.is_logged_in());
//! assert_eq!(target, RedirectTarget::SiteRoot);
//! ```

pub mod callback;
pub mod config;
pub mod decision;
pub mod error;
pub mod identity;
pub mod policy;
pub mod session;

// Re-export main types at crate root
pub use callback::{CallbackInfo, Provider, ProviderCallback};
pub use config::{AdminAccessConfig, load_policy_from_env};
pub use decision::{LoginRequest, RejectionReason, SessionDecisionEngine, SessionOutcome};
pub use error::{AssertionError, ConfigError};
pub use identity::{IdentityAssertion, InvalidUriError, NormalizedUri};
pub use policy::{AuthorizationPolicy, allow_login_bypass, bypass_requested};
pub use session::{LoginDisposition, RedirectTarget, SessionState};
