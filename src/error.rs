//! Audit-level error types.

use thiserror::Error;

/// Failures that abort an audit before any element is analyzed.
///
/// Per-link failures never surface here; they are folded into the report as
/// findings. This type covers only inputs the engine cannot meaningfully
/// analyze.
#[derive(Debug, Error)]
pub enum AuditError {
    /// The audited page URL is not an absolute http(s) URL.
    #[error("invalid audit URL: {reason}")]
    InvalidUrl { reason: String },

    /// Two snapshot elements carry the same identifier.
    #[error("duplicate element id in snapshot: {id}")]
    DuplicateElementId { id: String },

    /// The snapshot is structurally unusable.
    #[error("invalid snapshot: {reason}")]
    InvalidSnapshot { reason: String },
}
