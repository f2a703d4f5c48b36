// Helper functions for safe logging, list columns and timestamps

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, SecondsFormat, TimeZone, Utc};
use regex::Regex;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::OnceLock;

/// Masks email addresses for safe logging
///
/// # Example
/// ```ignore
/// let masked = safe_email_log("user@example.com");
/// // Returns: "u***@example.com"
/// ```
pub fn safe_email_log(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && email.len() > 3 => {
            let first: String = local.chars().take(1).collect();
            format!("{}***@{}", first, domain)
        }
        _ => "***@***.***".to_string(),
    }
}

/// Masks tokens for safe logging, keeping the first and last 4 characters
pub fn safe_token_log(token: &str) -> String {
    if token.len() > 8 && token.is_ascii() {
        format!("{}...{}", &token[..4], &token[token.len() - 4..])
    } else {
        "***".to_string()
    }
}

// ============================================================================
// JSON list columns
// ============================================================================

/// Serializes a list for storage in a TEXT column
pub fn to_json_column<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "[]".to_string())
}

/// Parses a TEXT column holding a JSON list, empty when missing or malformed
pub fn parse_json_list<T: DeserializeOwned>(raw: Option<&str>) -> Vec<T> {
    raw.and_then(|r| serde_json::from_str::<Vec<T>>(r).ok())
        .unwrap_or_default()
}

// ============================================================================
// Timestamps
// ============================================================================

/// Canonical timestamp format stored in the database (`2024-01-31T09:30:00Z`).
/// Every date column uses it so SQL string comparison orders correctly.
pub fn format_timestamp(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Secs, true)
}

pub fn now_timestamp() -> String {
    format_timestamp(&Utc::now())
}

/// Accepts RFC 3339 (any offset), `YYYY-MM-DDTHH:MM:SS` (taken as UTC) or a bare
/// `YYYY-MM-DD` (end of that day, UTC) and returns the canonical form
pub fn normalize_timestamp(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(format_timestamp(&dt.with_timezone(&Utc)));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return Some(format_timestamp(&Utc.from_utc_datetime(&naive)));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(23, 59, 59))
        .map(|naive| format_timestamp(&Utc.from_utc_datetime(&naive)))
}

/// Canonical timestamp `days` from now
pub fn days_from_now(days: i64) -> String {
    format_timestamp(&(Utc::now() + Duration::days(days)))
}

// ============================================================================
// Content helpers
// ============================================================================

/// Builds an excerpt from the first 150 characters of `content`
pub fn make_excerpt(content: &str) -> String {
    if content.chars().count() > 150 {
        let head: String = content.chars().take(150).collect();
        format!("{}...", head)
    } else {
        content.to_string()
    }
}

/// Lowercase, dash separated slug
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut last_dash = true;
    for c in text.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
            last_dash = false;
        } else if !last_dash {
            slug.push('-');
            last_dash = true;
        }
    }
    slug.trim_end_matches('-').to_string()
}

/// Extracts the month count from strings such as "6 months"; 3 when nothing matches
pub fn parse_duration_months(duration: &str) -> i64 {
    let lowered = duration.to_lowercase();
    if !lowered.contains("month") {
        return 3;
    }
    static DIGITS: OnceLock<Option<Regex>> = OnceLock::new();
    DIGITS
        .get_or_init(|| Regex::new(r"\d+").ok())
        .as_ref()
        .and_then(|re| re.find(&lowered))
        .and_then(|m| m.as_str().parse::<i64>().ok())
        .unwrap_or(3)
}

/// Escapes text for safe inclusion in HTML
pub fn html_escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escapes `LIKE` wildcards so they match literally under `ESCAPE '\'`
pub fn escape_like(term: &str) -> String {
    let mut out = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Pattern for a case-insensitive `LIKE` substring match
pub fn like_pattern(term: &str) -> String {
    format!("%{}%", escape_like(&term.trim().to_lowercase()))
}

/// Splits a comma separated query parameter into trimmed, non-empty items
pub fn split_csv(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_safe_email_log_masks_local_part() {
        assert_eq!(safe_email_log("user@example.com"), "u***@example.com");
        assert_eq!(safe_email_log("bad"), "***@***.***");
    }

    #[test]
    fn test_like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("  Pune "), "%pune%");
        assert_eq!(like_pattern("50%_off\\"), "%50\\%\\_off\\\\%");
    }

    #[test]
    fn test_safe_token_log() {
        assert_eq!(safe_token_log("abcdefghijkl"), "abcd...ijkl");
        assert_eq!(safe_token_log("short"), "***");
    }

    #[test]
    fn test_json_list_roundtrip_and_fallback() {
        let raw = to_json_column(&vec!["Rust".to_string(), "SQL".to_string()]);
        let parsed: Vec<String> = parse_json_list(Some(&raw));
        assert_eq!(parsed, vec!["Rust", "SQL"]);

        let broken: Vec<String> = parse_json_list(Some("not json"));
        assert!(broken.is_empty());
    }

    #[test]
    fn test_timestamps_sort_lexicographically() {
        let earlier = Utc.with_ymd_and_hms(2024, 1, 9, 23, 0, 0).unwrap();
        let later = Utc.with_ymd_and_hms(2024, 1, 10, 1, 0, 0).unwrap();
        assert_eq!(format_timestamp(&earlier), "2024-01-09T23:00:00Z");
        assert!(format_timestamp(&earlier) < format_timestamp(&later));
    }

    #[test]
    fn test_normalize_timestamp() {
        assert_eq!(
            normalize_timestamp("2024-03-01T10:00:00+05:30").as_deref(),
            Some("2024-03-01T04:30:00Z")
        );
        assert_eq!(
            normalize_timestamp("2024-03-01T10:00:00").as_deref(),
            Some("2024-03-01T10:00:00Z")
        );
        assert_eq!(
            normalize_timestamp("2024-03-01").as_deref(),
            Some("2024-03-01T23:59:59Z")
        );
        assert_eq!(normalize_timestamp("next friday"), None);
    }

    #[test]
    fn test_make_excerpt() {
        assert_eq!(make_excerpt("short"), "short");
        let long = "a".repeat(200);
        let excerpt = make_excerpt(&long);
        assert_eq!(excerpt.len(), 153);
        assert!(excerpt.ends_with("..."));
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Rust for Beginners!"), "rust-for-beginners");
        assert_eq!(slugify("  Two  Sum  "), "two-sum");
    }

    #[test]
    fn test_parse_duration_months() {
        assert_eq!(parse_duration_months("6 months"), 6);
        assert_eq!(parse_duration_months("1 Month"), 1);
        assert_eq!(parse_duration_months("ten weeks"), 3);
        assert_eq!(parse_duration_months("a few months"), 3);
    }

    #[test]
    fn test_html_escape() {
        assert_eq!(
            html_escape("<b>\"Tom\" & 'Jerry'</b>"),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn test_split_csv() {
        assert_eq!(split_csv("rust, go,,python "), vec!["rust", "go", "python"]);
    }
}
