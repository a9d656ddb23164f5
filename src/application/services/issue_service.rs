//! Rule-based issue detection.
//!
//! The rule list is fixed and ordered; rules are independent, so one element
//! can accumulate several issues. Detection is deterministic: the same
//! element always yields the same ordered list.

use crate::domain::entities::{
    CTAElement, ElementType, ErrorCategory, Issue, IssueKind, LinkValidity, Severity,
};
use crate::utils::lexicon::{self, ACTION_WORDS, GENERIC_TEXTS};

/// Valid links slower than this (seconds) are flagged.
const SLOW_LINK_SECS: f64 = 3.0;

/// Runs the full rule list against one element.
pub fn detect(element: &CTAElement) -> Vec<Issue> {
    let mut issues = Vec::new();
    let text = element.text.trim();
    let text_lower = text.to_lowercase();

    let issue = |kind: IssueKind, severity: Severity, description: String, recommendation: &str| {
        Issue {
            kind,
            severity,
            element: element.label(),
            element_id: element.element_id.clone(),
            css_selector: element.css_selector.clone(),
            location: element.location(),
            description,
            recommendation: recommendation.to_string(),
        }
    };

    if GENERIC_TEXTS.contains(&text_lower.as_str()) {
        issues.push(issue(
            IssueKind::GenericText,
            Severity::High,
            format!("CTA text \"{text}\" is too generic and doesn't indicate specific action"),
            "Use specific, action-oriented text that clearly indicates what will happen \
             (e.g., \"Get Started\", \"Download Now\", \"Sign Up Free\")",
        ));
    }

    if text.chars().count() > 5 && !lexicon::any_term(&text_lower, ACTION_WORDS) {
        issues.push(issue(
            IssueKind::UnclearAction,
            Severity::Medium,
            format!("CTA text \"{text}\" doesn't clearly indicate the action users should take"),
            "Include action words like \"Get\", \"Download\", \"Sign Up\", \"Try Now\"",
        ));
    }

    if text.chars().count() < 3 {
        issues.push(issue(
            IssueKind::InsufficientText,
            Severity::High,
            format!("CTA text \"{text}\" is too short to be descriptive or accessible"),
            "Add descriptive text that explains the action (minimum 3-5 characters)",
        ));
    }

    if text.chars().count() > 50 {
        issues.push(issue(
            IssueKind::TextTooLong,
            Severity::Medium,
            format!(
                "CTA text is too long ({} chars) and may reduce effectiveness",
                text.chars().count()
            ),
            "Keep CTA text concise and focused (ideally under 30 characters)",
        ));
    }

    if text.is_empty() {
        issues.push(issue(
            IssueKind::EmptyText,
            Severity::Medium,
            format!("{} has no text content", element.element_type),
            "Add descriptive text to make the CTA accessible and clear",
        ));
    }

    // Buttons may legitimately submit forms or run script; only links are
    // required to carry a destination.
    if element.element_type == ElementType::Link
        && element.href.as_deref().is_none_or(str::is_empty)
    {
        issues.push(issue(
            IssueKind::MissingLink,
            Severity::High,
            format!("Link \"{text}\" has no destination URL"),
            "Add a proper href attribute to make the link functional",
        ));
    }

    if element.is_hidden {
        issues.push(issue(
            IssueKind::HiddenCta,
            Severity::Medium,
            format!("CTA \"{text}\" is hidden and may not be accessible to users"),
            "Make the CTA visible or ensure it becomes visible through user interaction",
        ));
    }

    let has_aria = element.aria_label.as_deref().is_some_and(|a| !a.is_empty());
    if text.is_empty() && !has_aria && element.element_type.is_native_interactive() {
        issues.push(issue(
            IssueKind::MissingAccessibilityLabel,
            Severity::High,
            format!("{} has no accessible text or aria-label", element.element_type),
            "Add descriptive text or aria-label for screen readers",
        ));
    }

    if element.is_js_generated && element.role.is_none() && !has_aria {
        issues.push(issue(
            IssueKind::JsGeneratedMissingAccessibility,
            Severity::Medium,
            format!(
                "JavaScript-generated {} lacks proper accessibility attributes",
                element.element_type
            ),
            "Add role, aria-label, or other accessibility attributes",
        ));
    }

    if element.is_dropdown && element.role.is_none() {
        issues.push(issue(
            IssueKind::DropdownMissingRole,
            Severity::Medium,
            format!("Dropdown {} lacks proper ARIA role", element.element_type),
            "Add appropriate role attribute (e.g., menuitem, button)",
        ));
    }

    if element.has_onclick
        && element.tabindex.is_none()
        && !element.element_type.is_native_interactive()
    {
        issues.push(issue(
            IssueKind::MissingKeyboardAccessibility,
            Severity::Medium,
            "Element with onclick handler is not keyboard accessible".to_string(),
            "Add tabindex or use proper interactive element (button, a)",
        ));
    }

    if element.html_id.is_none() && element.element_type.is_native_interactive() {
        issues.push(issue(
            IssueKind::MissingElementId,
            Severity::Low,
            format!(
                "{} lacks an ID attribute for tracking and testing",
                element.element_type
            ),
            "Add a unique ID attribute for better tracking and testing",
        ));
    }

    link_issues(element, &mut issues, &issue);

    issues
}

fn link_issues(
    element: &CTAElement,
    issues: &mut Vec<Issue>,
    issue: &impl Fn(IssueKind, Severity, String, &str) -> Issue,
) {
    if !element.is_link_like() {
        return;
    }
    let Some(check) = &element.link else {
        return;
    };
    let href = element.href_excerpt();

    match check.validity {
        LinkValidity::Invalid => {
            let (kind, description, recommendation) = match check.error {
                Some(ErrorCategory::NotFound) => (
                    IssueKind::BrokenLink404,
                    format!("Link \"{href}\" returns a 404 error - page not found"),
                    "Fix the broken link by updating the URL or removing the CTA if the page \
                     no longer exists",
                ),
                Some(ErrorCategory::ServerError) => (
                    IssueKind::ServerError500,
                    format!("Link \"{href}\" returns a 500 error - server error"),
                    "Contact the server administrator to fix the server-side issue",
                ),
                Some(ErrorCategory::Timeout) => (
                    IssueKind::LinkTimeout,
                    format!("Link \"{href}\" times out when accessed"),
                    "Check server performance or consider using a CDN to improve response times",
                ),
                Some(ErrorCategory::Connection) => (
                    IssueKind::ConnectionError,
                    format!("Link \"{href}\" cannot be reached due to connection issues"),
                    "Verify the URL is correct and the server is online",
                ),
                Some(ErrorCategory::Ssl) => (
                    IssueKind::SslError,
                    format!("Link \"{href}\" has SSL certificate issues"),
                    "Fix SSL certificate configuration or use HTTP if appropriate",
                ),
                Some(category) => (
                    IssueKind::LinkError,
                    format!("Link \"{href}\" has an error: {category}"),
                    "Investigate and fix the link issue",
                ),
                None => (
                    IssueKind::InvalidLink,
                    format!("Link \"{href}\" is not valid"),
                    "Check the link URL and ensure it points to a valid destination",
                ),
            };
            issues.push(issue(kind, Severity::High, description, recommendation));
        }
        LinkValidity::Valid => {
            if let Some(elapsed) = check.response_time
                && elapsed > SLOW_LINK_SECS
            {
                issues.push(issue(
                    IssueKind::SlowLinkResponse,
                    Severity::Medium,
                    format!("Link \"{href}\" is slow to respond ({elapsed:.2}s)"),
                    "Optimize server performance or consider using a CDN to improve \
                     response times",
                ));
            } else if let Some(target) = check.redirect_url.as_deref()
                && Some(target) != element.href.as_deref()
            {
                issues.push(issue(
                    IssueKind::RedirectLink,
                    Severity::Low,
                    format!("Link \"{href}\" redirects to \"{target}\""),
                    "Consider updating the link to point directly to the final destination \
                     to improve performance",
                ));
            }
        }
        LinkValidity::Unknown => {}
    }
}
