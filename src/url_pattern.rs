use regex::Regex;
use std::sync::OnceLock;
use tracing::warn;

/// Host labels are ASCII alphanumerics with inner hyphens. A single `*.` may
/// lead the host, and at least two concrete labels must follow it.
const URL_PATTERN: &str = concat!(
    r"^(?:http|https|https\?)://",
    r"(?:\*\.)?",
    r"[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?",
    r"(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?)+",
    r"(?::[0-9]{1,5})?",
    r"(?:/\S*)?$",
);

fn url_pattern_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(URL_PATTERN).expect("URL_PATTERN is a valid regex"))
}

/// Check a web-app URL match pattern such as `https?://*.ubuntu.com/*`.
pub fn is_valid_url_pattern(pattern: &str) -> bool {
    url_pattern_regex().is_match(pattern)
}

/// Split a comma separated pattern list, keeping the valid entries in order.
pub fn parse_url_patterns(csv: &str) -> Vec<String> {
    csv.split(',')
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .filter(|p| {
            let valid = is_valid_url_pattern(p);
            if !valid {
                warn!(pattern = %p, "ignoring invalid web-app URL pattern");
            }
            valid
        })
        .map(String::from)
        .collect()
}
