//! Google Sheets URL shape check used before any connection attempt.

use regex::Regex;
use std::sync::LazyLock;

/// `https://docs.google.com/spreadsheets/d/<id>` optionally followed by
/// `/edit`, a query string or a fragment.
static SHEET_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https://docs\.google\.com/spreadsheets/d/([A-Za-z0-9_-]+)(?:[/?#].*)?$")
        .expect("sheet url pattern is valid")
});

/// Returns the spreadsheet id if `url` looks like a Google Sheets document link.
pub fn validate_sheet_url(url: &str) -> Option<&str> {
    SHEET_URL
        .captures(url.trim())
        .and_then(|caps| caps.get(1))
        .map(|id| id.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_urls() {
        assert_eq!(
            validate_sheet_url("https://docs.google.com/spreadsheets/d/1AbC-d_9/edit#gid=0"),
            Some("1AbC-d_9")
        );
        assert_eq!(
            validate_sheet_url("  https://docs.google.com/spreadsheets/d/xyz  "),
            Some("xyz")
        );
        assert_eq!(
            validate_sheet_url("https://docs.google.com/spreadsheets/d/xyz?usp=sharing"),
            Some("xyz")
        );
    }

    #[test]
    fn test_invalid_urls() {
        assert_eq!(validate_sheet_url(""), None);
        assert_eq!(validate_sheet_url("https://docs.google.com/spreadsheets/d/"), None);
        assert_eq!(validate_sheet_url("http://docs.google.com/spreadsheets/d/abc"), None);
        assert_eq!(validate_sheet_url("https://example.com/spreadsheets/d/abc"), None);
        assert_eq!(validate_sheet_url("https://docs.google.com/spreadsheets/d/ab c"), None);
    }

    #[test]
    fn test_dots_in_host_are_literal() {
        assert_eq!(validate_sheet_url("https://docsXgoogle.com/spreadsheets/d/abc"), None);
        assert_eq!(
            validate_sheet_url("https://docs.google.com/spreadsheets/d/abc/edit?usp=sharing#gid=5"),
            Some("abc")
        );
    }
}
