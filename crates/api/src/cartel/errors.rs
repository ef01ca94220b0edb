//! Cartel response classification
//!
//! The provisioning service reports some failures as free-text bodies on
//! generic statuses. Known shapes are recognized here, in an ordered
//! (status, body-pattern) table kept away from the transport so the
//! patterns stay unit-testable. First match wins.

use once_cell::sync::Lazy;
use regex::Regex;
use veyra_domain::VeyraError;

struct ResponsePattern {
    /// Status the pattern applies to; `None` matches any non-2xx status
    status: Option<u16>,
    body: Regex,
    error: fn() -> VeyraError,
}

#[allow(clippy::unwrap_used)] // patterns are literals, checked by the tests below
static PATTERNS: Lazy<Vec<ResponsePattern>> = Lazy::new(|| {
    vec![ResponsePattern {
        status: None,
        body: Regex::new(r"^Host named [^\s]+ already exists!").unwrap(),
        error: || VeyraError::HostnameAlreadyExists,
    }]
});

/// Classify a non-2xx cartel response into a typed error, when its body
/// matches a known shape.
pub(crate) fn classify_response(status: u16, body: &str) -> Option<VeyraError> {
    PATTERNS
        .iter()
        .find(|pattern| {
            pattern.status.map_or(true, |s| s == status) && pattern.body.is_match(body.trim())
        })
        .map(|pattern| (pattern.error)())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hostname_conflict_is_recognized() {
        let err = classify_response(400, "Host named worker-1.dev.example.com already exists!");
        assert!(matches!(err, Some(VeyraError::HostnameAlreadyExists)));

        // Status is irrelevant for this pattern
        let err = classify_response(500, "Host named a.b already exists!");
        assert!(matches!(err, Some(VeyraError::HostnameAlreadyExists)));
    }

    #[test]
    fn pattern_requires_the_full_prefix() {
        assert!(classify_response(400, "already exists!").is_none());
        assert!(classify_response(400, "Host named  already exists!").is_none());
        assert!(classify_response(400, "some other failure").is_none());
    }

    #[test]
    fn leading_whitespace_is_tolerated() {
        let err = classify_response(400, "  Host named a.b already exists!\n");
        assert!(matches!(err, Some(VeyraError::HostnameAlreadyExists)));
    }
}
