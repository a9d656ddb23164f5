//! Detected defects on individual elements.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Issue severity. `Ord` ranks `High` above `Medium` above `Low`, which the
/// heatmap uses to pick an element's dominant severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Closed taxonomy of detectable defects.
///
/// Display strings are the report-facing labels and are stable; downstream
/// dashboards key on them. Serialization uses the same labels, not the
/// variant names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueKind {
    GenericText,
    UnclearAction,
    InsufficientText,
    TextTooLong,
    EmptyText,
    MissingLink,
    HiddenCta,
    MissingAccessibilityLabel,
    JsGeneratedMissingAccessibility,
    DropdownMissingRole,
    MissingKeyboardAccessibility,
    MissingElementId,
    BrokenLink404,
    ServerError500,
    LinkTimeout,
    ConnectionError,
    SslError,
    LinkError,
    InvalidLink,
    SlowLinkResponse,
    RedirectLink,
}

impl IssueKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GenericText => "Generic Text",
            Self::UnclearAction => "Unclear Action",
            Self::InsufficientText => "Insufficient Text",
            Self::TextTooLong => "Text Too Long",
            Self::EmptyText => "Empty Text",
            Self::MissingLink => "Missing Link",
            Self::HiddenCta => "Hidden CTA",
            Self::MissingAccessibilityLabel => "Missing Accessibility Label",
            Self::JsGeneratedMissingAccessibility => "JS-Generated Element Missing Accessibility",
            Self::DropdownMissingRole => "Dropdown CTA Missing Role",
            Self::MissingKeyboardAccessibility => "Missing Keyboard Accessibility",
            Self::MissingElementId => "Missing Element ID",
            Self::BrokenLink404 => "Broken Link (404)",
            Self::ServerError500 => "Server Error (500)",
            Self::LinkTimeout => "Link Timeout",
            Self::ConnectionError => "Connection Error",
            Self::SslError => "SSL Certificate Error",
            Self::LinkError => "Link Error",
            Self::InvalidLink => "Invalid Link",
            Self::SlowLinkResponse => "Slow Link Response",
            Self::RedirectLink => "Redirect Link",
        }
    }

    fn from_label(label: &str) -> Option<Self> {
        Some(match label {
            "Generic Text" => Self::GenericText,
            "Unclear Action" => Self::UnclearAction,
            "Insufficient Text" => Self::InsufficientText,
            "Text Too Long" => Self::TextTooLong,
            "Empty Text" => Self::EmptyText,
            "Missing Link" => Self::MissingLink,
            "Hidden CTA" => Self::HiddenCta,
            "Missing Accessibility Label" => Self::MissingAccessibilityLabel,
            "JS-Generated Element Missing Accessibility" => Self::JsGeneratedMissingAccessibility,
            "Dropdown CTA Missing Role" => Self::DropdownMissingRole,
            "Missing Keyboard Accessibility" => Self::MissingKeyboardAccessibility,
            "Missing Element ID" => Self::MissingElementId,
            "Broken Link (404)" => Self::BrokenLink404,
            "Server Error (500)" => Self::ServerError500,
            "Link Timeout" => Self::LinkTimeout,
            "Connection Error" => Self::ConnectionError,
            "SSL Certificate Error" => Self::SslError,
            "Link Error" => Self::LinkError,
            "Invalid Link" => Self::InvalidLink,
            "Slow Link Response" => Self::SlowLinkResponse,
            "Redirect Link" => Self::RedirectLink,
            _ => return None,
        })
    }
}

impl std::fmt::Display for IssueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for IssueKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for IssueKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_label(&s)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown issue type: {s}")))
    }
}

/// One detected defect. Carries enough context (element id, label, selector,
/// location) to be rendered on its own without re-reading the element.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Issue {
    #[serde(rename = "type")]
    pub kind: IssueKind,
    pub severity: Severity,
    pub element: String,
    pub element_id: String,
    pub css_selector: String,
    pub location: String,
    pub description: String,
    pub recommendation: String,
}
