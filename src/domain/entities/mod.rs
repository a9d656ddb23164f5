//! Core audit entities.

pub mod element;
pub mod issue;
pub mod metrics;
pub mod report;

pub use element::{
    CTAElement, ElementType, ErrorCategory, LinkCheck, LinkValidity, Position, Size, SkipReason,
};
pub use issue::{Issue, IssueKind, Severity};
pub use metrics::{MetricSet, WEIGHTS, Weights, clamp_score};
pub use report::{AuditResult, ElementAnalysis, HeatmapPoint, ScoringBreakdown};
