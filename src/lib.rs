//! # CTA Audit Engine
//!
//! An analysis engine that scores a page's call-to-action elements, detects
//! actionable issues, and validates their destinations.
//!
//! ## Architecture
//!
//! This crate follows Clean Architecture principles with clear layer separation:
//!
//! - **Domain Layer** ([`domain`]) - The element snapshot model, metrics,
//!   issues, reports, and outbound-probe traits
//! - **Application Layer** ([`application`]) - Scoring, issue detection,
//!   recommendations, and audit orchestration
//! - **Infrastructure Layer** ([`infrastructure`]) - reqwest-backed link
//!   checking and the Gemini recommendation client
//!
//! ## Features
//!
//! - Eight weighted quality metrics per element, combined into an overall score
//! - Rule-based issue taxonomy with severities and remediation text
//! - Concurrency-bounded link validation with per-check failure isolation
//! - Optional AI-generated recommendations merged into the report
//! - Heatmap data for positional rendering by a UI
//!
//! ## Quick Start
//!
//! ```bash
//! # Optional: enable AI recommendations
//! export GEMINI_API_KEY="..."
//!
//! # Audit a captured element snapshot
//! cargo run -- --url https://example.com --snapshot elements.json
//! ```
//!
//! ## Configuration
//!
//! Engine configuration is loaded from environment variables via
//! [`config::Config`]. See [`config`] module for available options.

pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod utils;

pub mod config;

pub use error::AuditError;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::AuditService;
    pub use crate::config::Config;
    pub use crate::domain::entities::{
        AuditResult, CTAElement, ElementAnalysis, ElementType, ErrorCategory, Issue, IssueKind,
        LinkCheck, MetricSet, Severity,
    };
    pub use crate::domain::link_probe::{LinkProbe, ProbeResponse};
    pub use crate::domain::recommendation_provider::{NoopProvider, RecommendationProvider};
    pub use crate::error::AuditError;
    pub use crate::infrastructure::http::HttpLinkChecker;
}
