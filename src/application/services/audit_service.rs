//! Audit orchestration: snapshot validation, link checking, per-element
//! analysis, and report assembly.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use tracing::{info, instrument};
use url::Url;

use crate::application::services::{issue_service, recommendation_service, scoring_service};
use crate::domain::entities::{AuditResult, CTAElement, ElementAnalysis};
use crate::domain::link_probe::LinkProbe;
use crate::domain::recommendation_provider::RecommendationProvider;
use crate::error::AuditError;
use crate::infrastructure::http::validate_links;

/// Runs complete audits over element snapshots.
///
/// Holds only the outbound seams and pool settings; all analysis state lives
/// in the per-run pipeline, so one service can serve concurrent audits.
pub struct AuditService {
    probe: Arc<dyn LinkProbe>,
    provider: Arc<dyn RecommendationProvider>,
    link_workers: usize,
    link_timeout: Duration,
}

impl AuditService {
    pub fn new(
        probe: Arc<dyn LinkProbe>,
        provider: Arc<dyn RecommendationProvider>,
        link_workers: usize,
        link_timeout: Duration,
    ) -> Self {
        Self {
            probe,
            provider,
            link_workers,
            link_timeout,
        }
    }

    /// Audits one page snapshot.
    ///
    /// Pipeline: validate inputs, check links, score and inspect each
    /// element, then aggregate into the report. Per-link failures become
    /// findings, never errors; only unusable inputs abort the run.
    ///
    /// # Errors
    ///
    /// Returns [`AuditError`] when the page URL is not absolute http(s), an
    /// element id is blank, or two elements share an id.
    #[instrument(skip(self, elements), fields(url = %url, elements = elements.len()))]
    pub async fn audit(
        &self,
        url: &str,
        analysis_type: &str,
        elements: Vec<CTAElement>,
    ) -> Result<AuditResult, AuditError> {
        validate_page_url(url)?;
        validate_snapshot(&elements)?;

        if elements.is_empty() {
            info!("snapshot carries no elements");
            return Ok(AuditResult::empty(url, analysis_type));
        }

        let elements = validate_links(
            elements,
            Arc::clone(&self.probe),
            self.link_workers,
            self.link_timeout,
        )
        .await;

        let analyses: Vec<ElementAnalysis> = elements
            .into_iter()
            .map(|element| {
                let metrics = scoring_service::score_element(&element);
                let issues = issue_service::detect(&element);
                let recommendations =
                    recommendation_service::element_recommendations(&element, &metrics);
                ElementAnalysis {
                    element,
                    metrics,
                    issues,
                    recommendations,
                }
            })
            .collect();

        let ai_recommendations = self
            .provider
            .recommend(url, &collect_elements(&analyses))
            .await;

        let strengths = recommendation_service::strengths(&analyses);
        let recommendations = recommendation_service::aggregate(&analyses, &ai_recommendations);

        let report = AuditResult::build(
            url,
            analysis_type,
            &analyses,
            strengths,
            recommendations,
            ai_recommendations,
        );
        info!(
            score = report.score,
            issues = report.total_issues,
            "audit complete"
        );
        Ok(report)
    }
}

fn collect_elements(analyses: &[ElementAnalysis]) -> Vec<CTAElement> {
    analyses.iter().map(|a| a.element.clone()).collect()
}

/// The audited page URL must be an absolute http(s) URL with a host.
fn validate_page_url(url: &str) -> Result<(), AuditError> {
    let parsed = Url::parse(url).map_err(|e| AuditError::InvalidUrl {
        reason: e.to_string(),
    })?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(AuditError::InvalidUrl {
            reason: format!("unsupported scheme '{}'", parsed.scheme()),
        });
    }
    if parsed.host_str().is_none() {
        return Err(AuditError::InvalidUrl {
            reason: "missing host".to_string(),
        });
    }
    Ok(())
}

/// Element ids must be non-blank and unique; duplicates would make findings
/// ambiguous, so the run fails fast before any network work.
fn validate_snapshot(elements: &[CTAElement]) -> Result<(), AuditError> {
    let mut seen = HashSet::with_capacity(elements.len());
    for element in elements {
        if element.element_id.trim().is_empty() {
            return Err(AuditError::InvalidSnapshot {
                reason: "element with blank id".to_string(),
            });
        }
        if !seen.insert(element.element_id.as_str()) {
            return Err(AuditError::DuplicateElementId {
                id: element.element_id.clone(),
            });
        }
    }
    Ok(())
}
