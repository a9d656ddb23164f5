//! Per-element recommendations, report-level aggregation, and strengths.

use std::collections::BTreeSet;

use crate::domain::entities::{CTAElement, ElementAnalysis, MetricSet};
use crate::utils::lexicon::{self, ACTION_WORDS, BENEFIT_WORDS, HIGH_URGENCY_WORDS, MEDIUM_URGENCY_WORDS};

/// Valid links slower than this (seconds) get a performance recommendation.
const SLOW_RESPONSE_SECS: f64 = 2.0;

/// Textual improvement suggestions for one scored element.
pub fn element_recommendations(element: &CTAElement, metrics: &MetricSet) -> Vec<String> {
    let mut recs = Vec::new();
    let text = element.text.to_lowercase();

    if !lexicon::any_term(&text, ACTION_WORDS) {
        recs.push("Add action-oriented words to make the CTA more compelling".to_string());
    }
    if !has_urgency_word(&text) {
        recs.push("Consider adding urgency words to create a sense of immediacy".to_string());
    }
    if !lexicon::any_term(&text, BENEFIT_WORDS) {
        recs.push("Include benefit words to highlight value proposition".to_string());
    }

    if metrics.visibility < 70 {
        recs.push("Improve CTA visibility with better positioning or styling".to_string());
    }
    if metrics.action_clarity < 60 {
        recs.push("Make the action more clear and specific".to_string());
    }
    if metrics.link_validity < 50 {
        recs.push("Fix broken or invalid links to ensure CTAs are functional".to_string());
    }

    if element.href.is_some()
        && element
            .link
            .as_ref()
            .and_then(|l| l.response_time)
            .is_some_and(|t| t > SLOW_RESPONSE_SECS)
    {
        recs.push("Optimize link performance to improve user experience".to_string());
    }

    recs
}

/// Merges per-element and externally supplied recommendations into one
/// deduplicated, deterministically ordered list.
pub fn aggregate(analyses: &[ElementAnalysis], external: &[String]) -> Vec<String> {
    let mut set: BTreeSet<String> = analyses
        .iter()
        .flat_map(|a| a.recommendations.iter().cloned())
        .collect();
    set.extend(external.iter().cloned());
    set.into_iter().collect()
}

/// Heuristic report-level strengths. Never empty: a fallback statement covers
/// pages where nothing else qualifies.
pub fn strengths(analyses: &[ElementAnalysis]) -> Vec<String> {
    let mut strengths = Vec::new();

    let primary = analyses.iter().filter(|a| a.is_primary()).count();
    if primary > 0 {
        strengths.push(format!("Found {primary} strong primary CTAs"));
    }

    if analyses
        .iter()
        .any(|a| has_urgency_word(&a.element.text.to_lowercase()))
    {
        strengths.push("Good use of urgency words in CTAs".to_string());
    }

    if analyses
        .iter()
        .any(|a| lexicon::any_term(&a.element.text.to_lowercase(), ACTION_WORDS))
    {
        strengths.push("Clear action-oriented language".to_string());
    }

    if analyses.len() > 5 {
        strengths.push("Good variety of CTA options".to_string());
    }

    if strengths.is_empty() {
        strengths.push("Website has CTA elements present".to_string());
    }

    strengths
}

fn has_urgency_word(text: &str) -> bool {
    lexicon::any_term(text, HIGH_URGENCY_WORDS) || lexicon::any_term(text, MEDIUM_URGENCY_WORDS)
}
