//! Pre-network classification of href values.
//!
//! Snapshot providers hand over whatever the DOM contained, which includes
//! javascript: pseudo-links, fragments, and occasionally raw script source
//! leaked through onclick scraping. Classification decides, without I/O,
//! whether an href is worth a network check. It is pure and idempotent.

use std::sync::LazyLock;

use regex::Regex;
use url::Url;

use crate::domain::entities::SkipReason;

/// Outcome of classifying one href string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrlClass {
    /// Eligible for a network check.
    Checkable,
    /// Not checkable; validity stays `Unknown`.
    Skip(SkipReason),
}

static SCRIPT_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"function\s+\w+\s*\(",
        r"function\s*\(",
        r"=>\s*\{",
        r"\(\)\s*=>",
        r"\w+\s*\(\)\s*\{\}",
        r"void\s*\(",
        r"\breturn\s",
        r"\bvar\s+\w",
        r"\blet\s+\w",
        r"\bconst\s+\w",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("static pattern"))
    .collect()
});

/// Classifies an href, deciding whether the validator may fetch it.
pub fn classify(href: &str) -> UrlClass {
    let href = href.trim();

    if href.starts_with("javascript:") {
        return UrlClass::Skip(SkipReason::JavascriptScheme);
    }
    if href.starts_with("mailto:") {
        return UrlClass::Skip(SkipReason::MailtoScheme);
    }
    if href.starts_with("tel:") {
        return UrlClass::Skip(SkipReason::TelScheme);
    }
    if href.starts_with('#') {
        return UrlClass::Skip(SkipReason::Fragment);
    }

    if looks_like_script(href) {
        return UrlClass::Skip(SkipReason::ScriptPattern);
    }

    // Root-relative paths cannot be resolved here; the snapshot provider is
    // expected to absolutize hrefs before handing them over.
    if href.starts_with('/') {
        return UrlClass::Skip(SkipReason::RelativeUrl);
    }

    match Url::parse(href) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https" | "ftp" | "file") => {
            UrlClass::Checkable
        }
        _ => UrlClass::Skip(SkipReason::ScriptPattern),
    }
}

fn looks_like_script(href: &str) -> bool {
    if SCRIPT_PATTERNS.iter().any(|p| p.is_match(href)) {
        return true;
    }

    // Bare JS keywords only disqualify strings that are not shaped like URLs
    // or paths; "https://example.com/return-policy" stays checkable.
    let lower = href.to_ascii_lowercase();
    let url_shaped =
        lower.starts_with("http") || lower.starts_with('/') || lower.starts_with("./");
    if !url_shaped {
        const JS_KEYWORDS: &[&str] = &["function", "=>", "undefined", "null"];
        if JS_KEYWORDS.iter().any(|k| lower.contains(k)) {
            return true;
        }
    }

    false
}
