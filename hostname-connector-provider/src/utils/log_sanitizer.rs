//! Log sanitization utilities
//!
//! Keeps response bodies and credentials from being dumped verbatim into
//! debug/error logs.

/// Maximum number of bytes of a body included in log output.
const TRUNCATE_LIMIT: usize = 256;
/// Trailing characters of a secret left visible by [`mask_secret`].
const VISIBLE_SECRET_TAIL: usize = 4;

/// MSRV-compatible replacement for `str::floor_char_boundary`.
fn floor_char_boundary(s: &str, index: usize) -> usize {
    if index >= s.len() {
        s.len()
    } else {
        let mut i = index;
        while i > 0 && !s.is_char_boundary(i) {
            i -= 1;
        }
        i
    }
}

/// Truncate a response body for logging.
///
/// Bodies within the limit are returned as-is; longer ones are cut on a char
/// boundary and suffixed with the original length.
pub fn truncate_for_log(s: &str) -> String {
    if s.len() <= TRUNCATE_LIMIT {
        s.to_string()
    } else {
        format!(
            "{}... [truncated, total {} bytes]",
            &s[..floor_char_boundary(s, TRUNCATE_LIMIT)],
            s.len()
        )
    }
}

/// Mask an API token or key, keeping only its last four characters.
///
/// Secrets of four characters or fewer are masked entirely.
pub fn mask_secret(secret: &str) -> String {
    let count = secret.chars().count();
    if count <= VISIBLE_SECRET_TAIL {
        return "***".to_string();
    }
    let tail: String = secret.chars().skip(count - VISIBLE_SECRET_TAIL).collect();
    format!("***{tail}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_body_unchanged() {
        let s = r#"{"success":true}"#;
        assert_eq!(truncate_for_log(s), s);
    }

    #[test]
    fn long_body_truncated_with_length() {
        let s = "a".repeat(TRUNCATE_LIMIT + 100);
        let result = truncate_for_log(&s);
        assert!(result.contains(&format!("total {} bytes]", TRUNCATE_LIMIT + 100)));
        assert!(result.len() < s.len());
    }

    #[test]
    fn multibyte_body_cut_on_char_boundary() {
        let s = "é".repeat(200);
        assert!(truncate_for_log(&s).contains("... [truncated, total"));
    }

    #[test]
    fn mask_keeps_last_four() {
        assert_eq!(mask_secret("abcdefgh1234"), "***1234");
    }

    #[test]
    fn mask_hides_short_secrets_entirely() {
        assert_eq!(mask_secret("abcd"), "***");
        assert_eq!(mask_secret(""), "***");
    }
}
