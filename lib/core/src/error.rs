//! Error handling foundation for the pressgate platform.
//!
//! Only the `Result` alias lives here. Domain error types belong to the
//! crate that produces them; layers add context with rootcause's
//! `.context()` as failures propagate toward startup code, where the
//! accumulated report is what gets surfaced.

use rootcause::Report;

/// A Result type alias using rootcause's `Report` for error handling.
///
/// The context parameter is the domain error type of the layer that
/// produced the failure.
pub type Result<T, C = ()> = std::result::Result<T, Report<C>>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alias_accepts_a_domain_context_type() {
        fn parse_port() -> Result<u16, std::num::ParseIntError> {
            Ok("8080".parse()?)
        }

        assert_eq!(parse_port().expect("should parse"), 8080);
    }
}
