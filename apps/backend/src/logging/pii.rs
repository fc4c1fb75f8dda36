//! PII redaction for log output.
//!
//! Raw database and auth errors can carry emails or token material; anything
//! logged through `Redacted` is masked first.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

fn email_regex() -> &'static Regex {
    static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
        #[allow(clippy::unwrap_used)]
        Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{1,}\b").unwrap()
    });
    &EMAIL_REGEX
}

fn token_regex() -> &'static Regex {
    // base64-like runs of 16+ chars, which covers JWT segments
    static TOKEN_REGEX: LazyLock<Regex> = LazyLock::new(|| {
        #[allow(clippy::unwrap_used)]
        Regex::new(r"\b[A-Za-z0-9+/_-]{16,}={0,2}\b").unwrap()
    });
    &TOKEN_REGEX
}

/// Mask emails (keep first char of the local part and the domain) and
/// token-like runs. Emails first so their domains never get re-matched.
pub fn redact(input: &str) -> String {
    let email_redacted = email_regex().replace_all(input, |caps: &regex::Captures| {
        let full_match = &caps[0];
        match full_match.find('@') {
            Some(at_pos) if at_pos > 0 => {
                let first_char = &full_match[..1];
                let domain = &full_match[at_pos..];
                format!("{first_char}***{domain}")
            }
            _ => full_match.to_string(),
        }
    });

    token_regex()
        .replace_all(&email_redacted, "[REDACTED_TOKEN]")
        .to_string()
}

/// Wrapper that redacts on Display/Debug, so sensitive strings can be logged
/// without a call site remembering to sanitize.
pub struct Redacted<'a>(pub &'a str);

impl<'a> fmt::Display for Redacted<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", redact(self.0))
    }
}

impl<'a> fmt::Debug for Redacted<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", redact(self.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redacts_emails() {
        assert_eq!(redact("user@example.com"), "u***@example.com");
        assert_eq!(redact("a@test.org"), "a***@test.org");
        assert_eq!(
            redact("Contact user@example.com or admin@test.org"),
            "Contact u***@example.com or a***@test.org"
        );
    }

    #[test]
    fn redacts_token_like_runs() {
        assert_eq!(
            redact("eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9"),
            "[REDACTED_TOKEN]"
        );
        assert_eq!(redact("short123"), "short123");
    }

    #[test]
    fn redacts_mixed_content() {
        assert_eq!(
            redact("login failed for user@test.com with token eyJhbGciOiJIUzI1NiIsInR5cCJ9"),
            "login failed for u***@test.com with token [REDACTED_TOKEN]"
        );
    }

    #[test]
    fn leaves_plain_text_alone() {
        assert_eq!(redact("Hello world"), "Hello world");
        assert_eq!(redact(""), "");
    }

    #[test]
    fn redacted_wrapper_masks_display_and_debug() {
        let wrapped = Redacted("user@example.com");
        assert_eq!(format!("{wrapped}"), "u***@example.com");
        assert_eq!(format!("{wrapped:?}"), "u***@example.com");
    }
}
