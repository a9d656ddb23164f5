//! CTA element snapshot model.
//!
//! Elements are captured by an external browser-automation layer and handed
//! to the engine as a snapshot. The engine never queries the DOM itself; the
//! only fields it writes are the link-validation results.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Interactive element kind, as classified by the snapshot provider.
///
/// Unrecognised ARIA roles are preserved verbatim in [`ElementType::Role`]
/// so rule matching stays exhaustive without losing information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElementType {
    Button,
    Link,
    Form,
    Dropdown,
    Area,
    Custom,
    Role(String),
}

impl ElementType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Button => "button",
            Self::Link => "link",
            Self::Form => "form",
            Self::Dropdown => "dropdown",
            Self::Area => "area",
            Self::Custom => "custom",
            Self::Role(role) => role,
        }
    }

    /// Native interactive tags get keyboard focus and activation for free.
    pub fn is_native_interactive(&self) -> bool {
        matches!(self, Self::Button | Self::Link)
    }
}

impl std::str::FromStr for ElementType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_ascii_lowercase().as_str() {
            "button" => Self::Button,
            "link" => Self::Link,
            "form" => Self::Form,
            "dropdown" => Self::Dropdown,
            "area" => Self::Area,
            "custom" | "" => Self::Custom,
            other => Self::Role(other.to_string()),
        })
    }
}

impl std::fmt::Display for ElementType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ElementType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ElementType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(s.parse().expect("infallible"))
    }
}

/// Top-left corner of the element in page coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

/// Rendered size of the element in CSS pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

/// Tri-state link reachability.
///
/// `Unknown` means "not network-checkable" (javascript:, mailto:, tel:,
/// fragments, unresolved relative paths) and is distinct from both `Valid`
/// and `Invalid`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkValidity {
    Valid,
    Invalid,
    Unknown,
}

/// Why an href was not sent to the network at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    JavascriptScheme,
    MailtoScheme,
    TelScheme,
    Fragment,
    ScriptPattern,
    RelativeUrl,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let reason = match self {
            Self::JavascriptScheme => "skipped: javascript link",
            Self::MailtoScheme => "skipped: mailto link",
            Self::TelScheme => "skipped: tel link",
            Self::Fragment => "skipped: fragment link",
            Self::ScriptPattern => "skipped: invalid pattern",
            Self::RelativeUrl => "skipped: relative URL",
        };
        f.write_str(reason)
    }
}

/// Classified failure of a network link check.
///
/// Produced exactly once by the validation stage and consumed directly by the
/// scorer and the issue detector, so no downstream string matching is needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    NotFound,
    Forbidden,
    ServerError,
    HttpStatus(u16),
    Timeout,
    Connection,
    Ssl,
    TooManyRedirects,
    InvalidUrl,
    Other,
    /// The worker task itself failed; the check never produced an outcome.
    TaskFailed,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound => f.write_str("Page not found (404)"),
            Self::Forbidden => f.write_str("Access forbidden (403)"),
            Self::ServerError => f.write_str("Server error (500)"),
            Self::HttpStatus(code) => write!(f, "HTTP error ({code})"),
            Self::Timeout => f.write_str("Request timeout"),
            Self::Connection => f.write_str("Connection error - unable to reach server"),
            Self::Ssl => f.write_str("SSL certificate error"),
            Self::TooManyRedirects => f.write_str("Too many redirects"),
            Self::InvalidUrl => f.write_str("Invalid URL format"),
            Self::Other => f.write_str("Unexpected error"),
            Self::TaskFailed => f.write_str("Validation failed: worker task error"),
        }
    }
}

/// Result of one link check, attached to the owning element.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkCheck {
    /// HTTP status code, when a response was received.
    pub status: Option<u16>,
    pub validity: LinkValidity,
    pub error: Option<ErrorCategory>,
    pub skip: Option<SkipReason>,
    /// Final URL after redirects, when it differs from the original href.
    pub redirect_url: Option<String>,
    /// Wall-clock response time in seconds.
    pub response_time: Option<f64>,
    /// Human-readable failure/skip message, mirrored from `error`/`skip` so
    /// report consumers never have to map category codes themselves.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub checked_at: DateTime<Utc>,
}

impl LinkCheck {
    /// Check outcome for an href that was classified as not checkable.
    pub fn skipped(reason: SkipReason) -> Self {
        Self {
            status: None,
            validity: LinkValidity::Unknown,
            error: None,
            skip: Some(reason),
            redirect_url: None,
            response_time: None,
            message: Some(reason.to_string()),
            checked_at: Utc::now(),
        }
    }

    /// Check outcome for a failed check.
    pub fn failed(error: ErrorCategory, status: Option<u16>, response_time: Option<f64>) -> Self {
        Self {
            status,
            validity: LinkValidity::Invalid,
            error: Some(error),
            skip: None,
            redirect_url: None,
            response_time,
            message: Some(error.to_string()),
            checked_at: Utc::now(),
        }
    }

    /// Check outcome for a reachable destination (HTTP 200-399).
    pub fn valid(status: u16, redirect_url: Option<String>, response_time: f64) -> Self {
        Self {
            status: Some(status),
            validity: LinkValidity::Valid,
            error: None,
            skip: None,
            redirect_url,
            response_time: Some(response_time),
            message: None,
            checked_at: Utc::now(),
        }
    }
}

fn default_true() -> bool {
    true
}

/// One call-to-action candidate captured from a page.
///
/// Immutable once supplied, except for [`CTAElement::link`] which the
/// validation stage fills in. `element_id` must be unique within a run;
/// the engine fails fast on duplicates because issue and heatmap
/// correlation depend on it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CTAElement {
    pub element_id: String,
    #[serde(default)]
    pub css_selector: String,
    pub element_type: ElementType,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub aria_label: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub tabindex: Option<String>,
    #[serde(default)]
    pub position: Position,
    #[serde(default)]
    pub size: Size,
    #[serde(default)]
    pub z_index: Option<i32>,
    #[serde(default)]
    pub html_id: Option<String>,
    #[serde(default)]
    pub html_class: Option<String>,
    #[serde(default)]
    pub text_color: Option<String>,
    #[serde(default)]
    pub background_color: Option<String>,
    #[serde(default)]
    pub href: Option<String>,
    /// Filled in by the link-validation stage; absent in fresh snapshots.
    #[serde(default)]
    pub link: Option<LinkCheck>,
    #[serde(default = "default_true")]
    pub is_visible: bool,
    #[serde(default)]
    pub is_hidden: bool,
    #[serde(default)]
    pub is_dropdown: bool,
    #[serde(default)]
    pub is_js_generated: bool,
    #[serde(default)]
    pub has_onclick: bool,
}

impl CTAElement {
    /// Word count of the visible text.
    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }

    /// True when the element carries a destination the validator may check.
    pub fn is_link_like(&self) -> bool {
        matches!(self.element_type, ElementType::Link | ElementType::Button)
            && self.href.as_deref().is_some_and(|h| !h.is_empty())
    }

    /// `"text" (type)` label used in issues and logs.
    pub fn label(&self) -> String {
        if self.text.trim().is_empty() {
            format!("Empty {}", self.element_type)
        } else {
            format!("\"{}\" ({})", self.text, self.element_type)
        }
    }

    /// `Position: x:…, y:…` string carried by issues so they render
    /// without re-reading the element.
    pub fn location(&self) -> String {
        format!("Position: x:{}, y:{}", self.position.x, self.position.y)
    }

    /// Href truncated for display in issue descriptions.
    pub fn href_excerpt(&self) -> String {
        match self.href.as_deref() {
            Some(h) if h.chars().count() > 50 => {
                let head: String = h.chars().take(50).collect();
                format!("{head}...")
            }
            Some(h) => h.to_string(),
            None => "N/A".to_string(),
        }
    }

    /// Bounding-box center, for heatmap rendering.
    pub fn center(&self) -> (f64, f64) {
        (
            f64::from(self.position.x) + f64::from(self.size.width) / 2.0,
            f64::from(self.position.y) + f64::from(self.size.height) / 2.0,
        )
    }
}
