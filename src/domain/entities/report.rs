//! Final audit report assembly.
//!
//! [`AuditResult`] is built once per run and immutable afterwards; the
//! UI/export layer only reads it.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::element::{CTAElement, ElementType};
use super::issue::Issue;
use super::metrics::MetricSet;

/// Everything derived for one element during the analysis pass.
#[derive(Debug, Clone, Serialize)]
pub struct ElementAnalysis {
    pub element: CTAElement,
    pub metrics: MetricSet,
    pub issues: Vec<Issue>,
    pub recommendations: Vec<String>,
}

impl ElementAnalysis {
    /// Primary CTAs combine strong urgency with a clear action.
    pub fn is_primary(&self) -> bool {
        self.metrics.urgency > 60 && self.metrics.action_clarity > 70
    }
}

/// Integer averages of each sub-score across all elements.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ScoringBreakdown {
    pub overall_score: i32,
    pub visibility_score: i32,
    pub urgency_score: i32,
    pub action_clarity_score: i32,
    pub accessibility_score: i32,
    pub mobile_responsiveness_score: i32,
    pub conversion_optimization_score: i32,
    pub color_contrast_score: i32,
    pub link_validity_score: i32,
}

/// Positional summary for one element, for heatmap rendering by the UI.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeatmapPoint {
    pub element_id: String,
    pub center: (f64, f64),
    pub text: String,
    pub element_type: String,
    /// Comma-joined issue kinds, or `"None"`.
    pub issues: String,
    /// Dominant severity: `High` > `Medium` > `Low` > `None`.
    pub severity: String,
}

/// The complete audit report for one page.
#[derive(Debug, Clone, Serialize)]
pub struct AuditResult {
    pub url: String,
    pub analysis_type: String,
    pub total_ctas: usize,
    pub primary_ctas: usize,
    pub secondary_ctas: usize,
    pub form_ctas: usize,
    pub link_ctas: usize,
    pub other_ctas: usize,
    pub counts_by_type: BTreeMap<String, usize>,
    pub issues: Vec<Issue>,
    pub total_issues: usize,
    pub strengths: Vec<String>,
    pub recommendations: Vec<String>,
    pub total_recommendations: usize,
    pub score: i32,
    pub scoring_breakdown: ScoringBreakdown,
    pub heatmap: Vec<HeatmapPoint>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ai_recommendations: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl AuditResult {
    /// Report for a page where no CTA candidates were found. Counts are zero
    /// and the note makes the condition explicit; no averaging happens.
    pub fn empty(url: &str, analysis_type: &str) -> Self {
        Self {
            url: url.to_string(),
            analysis_type: analysis_type.to_string(),
            total_ctas: 0,
            primary_ctas: 0,
            secondary_ctas: 0,
            form_ctas: 0,
            link_ctas: 0,
            other_ctas: 0,
            counts_by_type: BTreeMap::new(),
            issues: Vec::new(),
            total_issues: 0,
            strengths: Vec::new(),
            recommendations: Vec::new(),
            total_recommendations: 0,
            score: 0,
            scoring_breakdown: ScoringBreakdown::default(),
            heatmap: Vec::new(),
            ai_recommendations: Vec::new(),
            note: Some("No CTA elements found on the website".to_string()),
        }
    }

    /// Aggregates all per-element analyses into the final report.
    ///
    /// The primary/secondary/form/link buckets are overlapping reporting
    /// categories, not a partition.
    pub fn build(
        url: &str,
        analysis_type: &str,
        analyses: &[ElementAnalysis],
        strengths: Vec<String>,
        recommendations: Vec<String>,
        ai_recommendations: Vec<String>,
    ) -> Self {
        if analyses.is_empty() {
            return Self::empty(url, analysis_type);
        }

        let primary_ctas = analyses.iter().filter(|a| a.is_primary()).count();
        let secondary_ctas = analyses
            .iter()
            .filter(|a| !a.is_primary() && a.element.element_type == ElementType::Link)
            .count();
        let form_ctas = analyses
            .iter()
            .filter(|a| a.element.element_type == ElementType::Form)
            .count();
        let link_ctas = analyses
            .iter()
            .filter(|a| a.element.element_type == ElementType::Link)
            .count();

        let mut counts_by_type: BTreeMap<String, usize> = BTreeMap::new();
        for analysis in analyses {
            *counts_by_type
                .entry(analysis.element.element_type.as_str().to_string())
                .or_default() += 1;
        }
        let other_ctas = counts_by_type
            .iter()
            .filter(|(t, _)| !matches!(t.as_str(), "button" | "link" | "form" | "dropdown"))
            .map(|(_, n)| n)
            .sum();

        let issues: Vec<Issue> = analyses.iter().flat_map(|a| a.issues.clone()).collect();
        let heatmap = analyses.iter().map(heatmap_point).collect();

        let total = analyses.len();
        let score = average(analyses.iter().map(|a| a.metrics.overall_score), total);
        let scoring_breakdown = ScoringBreakdown {
            overall_score: score,
            visibility_score: average(analyses.iter().map(|a| a.metrics.visibility), total),
            urgency_score: average(analyses.iter().map(|a| a.metrics.urgency), total),
            action_clarity_score: average(analyses.iter().map(|a| a.metrics.action_clarity), total),
            accessibility_score: average(analyses.iter().map(|a| a.metrics.accessibility), total),
            mobile_responsiveness_score: average(
                analyses.iter().map(|a| a.metrics.mobile_responsiveness),
                total,
            ),
            conversion_optimization_score: average(
                analyses.iter().map(|a| a.metrics.conversion_optimization),
                total,
            ),
            color_contrast_score: average(analyses.iter().map(|a| a.metrics.color_contrast), total),
            link_validity_score: average(analyses.iter().map(|a| a.metrics.link_validity), total),
        };

        Self {
            url: url.to_string(),
            analysis_type: analysis_type.to_string(),
            total_ctas: total,
            primary_ctas,
            secondary_ctas,
            form_ctas,
            link_ctas,
            other_ctas,
            counts_by_type,
            total_issues: issues.len(),
            issues,
            strengths,
            total_recommendations: recommendations.len(),
            recommendations,
            score,
            scoring_breakdown,
            heatmap,
            ai_recommendations,
            note: None,
        }
    }
}

fn average(scores: impl Iterator<Item = i32>, count: usize) -> i32 {
    let sum: i64 = scores.map(i64::from).sum();
    ((sum as f64) / (count as f64)).round() as i32
}

fn heatmap_point(analysis: &ElementAnalysis) -> HeatmapPoint {
    let element = &analysis.element;

    let text = if element.text.chars().count() > 30 {
        let head: String = element.text.chars().take(30).collect();
        format!("{head}...")
    } else {
        element.text.clone()
    };

    let issues = if analysis.issues.is_empty() {
        "None".to_string()
    } else {
        analysis
            .issues
            .iter()
            .map(|i| i.kind.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    };

    let severity = analysis
        .issues
        .iter()
        .map(|i| i.severity)
        .max()
        .map_or("None", |s| s.as_str())
        .to_string();

    HeatmapPoint {
        element_id: element.element_id.clone(),
        center: element.center(),
        text,
        element_type: element.element_type.as_str().to_string(),
        issues,
        severity,
    }
}
