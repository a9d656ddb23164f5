//! Metric scoring for individual CTA elements.
//!
//! Every scorer is a pure function of one element's post-validation state.
//! Raw scores accumulate bonuses and penalties and are clamped to [0, 100];
//! the weighted overall score is derived in [`MetricSet::finalize`].

use crate::domain::entities::{
    CTAElement, ElementType, ErrorCategory, LinkValidity, MetricSet, clamp_score,
};
use crate::utils::lexicon::{
    self, ACTION_WORDS, BENEFIT_WORDS, CONVERSION_URGENCY_WORDS, GENERIC_PENALTIES, GENERIC_TEXTS,
    HEDGING_WORDS, HIGH_CONVERT_WORDS, HIGH_URGENCY_WORDS, MEDIUM_URGENCY_WORDS,
    PRIMARY_ACTION_WORDS, SECONDARY_ACTION_WORDS, SPECIFICITY_WORDS,
};

/// Page y-coordinate below which an element counts as above the fold.
const FOLD_Y: i32 = 600;
/// Elements above this line are still near the fold.
const NEAR_FOLD_Y: i32 = 1200;
/// WCAG minimum touch-target edge in pixels.
const MIN_TOUCH_SIZE: i32 = 44;
/// Marginal touch-target edge.
const SMALL_TOUCH_SIZE: i32 = 32;

/// Scores one element across all eight metrics.
pub fn score_element(element: &CTAElement) -> MetricSet {
    let text = element.text.to_lowercase();

    MetricSet {
        visibility: visibility_score(element),
        urgency: urgency_score(&text),
        action_clarity: action_clarity_score(&text),
        accessibility: accessibility_score(element),
        mobile_responsiveness: mobile_responsiveness_score(element),
        color_contrast: color_contrast_score(element),
        conversion_optimization: conversion_optimization_score(element, &text),
        link_validity: link_validity_score(element),
        overall_score: 0,
    }
    .finalize()
}

/// Rewards above-the-fold placement, adequate touch size, concise text, and
/// prominent element types.
fn visibility_score(element: &CTAElement) -> i32 {
    let mut score = 0;

    score += if element.position.y < FOLD_Y {
        25
    } else if element.position.y < NEAR_FOLD_Y {
        15
    } else {
        5
    };

    score += touch_size_points(element, 20, 10, -10);

    score += match element.word_count() {
        2..=5 => 20,
        1 => 15,
        6..=8 => 10,
        _ => -5,
    };

    score += match element.element_type {
        ElementType::Button => 20,
        ElementType::Form => 15,
        ElementType::Link => 10,
        _ => 5,
    };

    if element.z_index.is_some_and(|z| z > 0) {
        score += 10;
    }

    score += if element.is_visible && !element.is_hidden {
        15
    } else {
        -20
    };

    clamp_score(score)
}

/// Lexical urgency: counts of urgency and action vocabularies, a bonus for
/// stacking indicators, and a penalty for hedging language.
fn urgency_score(text: &str) -> i32 {
    let high = lexicon::count_terms(text, HIGH_URGENCY_WORDS) as i32;
    let medium = lexicon::count_terms(text, MEDIUM_URGENCY_WORDS) as i32;
    let action = lexicon::count_terms(text, ACTION_WORDS) as i32;

    let mut score = high * 20 + medium * 12 + action * 8;

    let indicators = high + medium + action;
    if indicators >= 3 {
        score += 15;
    } else if indicators >= 2 {
        score += 8;
    }

    if lexicon::any_term(text, HEDGING_WORDS) {
        score -= 15;
    }

    clamp_score(score)
}

/// How clearly the text names the action. Only the single highest-weight
/// generic-phrase penalty applies per text.
fn action_clarity_score(text: &str) -> i32 {
    if text.is_empty() {
        return 0;
    }

    let mut score = 0;

    score += lexicon::count_terms(text, PRIMARY_ACTION_WORDS) as i32 * 25;
    score += lexicon::count_terms(text, SECONDARY_ACTION_WORDS) as i32 * 15;

    if let Some(penalty) = GENERIC_PENALTIES
        .iter()
        .filter(|(phrase, _)| lexicon::contains_term(text, phrase))
        .map(|(_, p)| *p)
        .min()
    {
        score += penalty;
    }

    score += lexicon::count_terms(text, BENEFIT_WORDS) as i32 * 12;

    if lexicon::any_term(text, SPECIFICITY_WORDS) {
        score += 15;
    }

    score += match text.split_whitespace().count() {
        2..=5 => 10,
        1 => 5,
        n if n > 8 => -10,
        _ => 0,
    };

    // CTAs should be commands, not questions.
    if text.trim_end().ends_with('?') {
        score -= 20;
    }

    clamp_score(score)
}

/// WCAG 2.1 AA heuristics: accessible text, ARIA attributes, keyboard
/// access, touch size, and visibility. Not a full audit.
fn accessibility_score(element: &CTAElement) -> i32 {
    let mut score = 0;

    let has_text = !element.text.trim().is_empty();
    let has_aria = element.aria_label.as_deref().is_some_and(|a| !a.is_empty());

    score += if has_text {
        25
    } else if has_aria {
        20
    } else {
        -40
    };

    score += match element.text.chars().count() {
        3..=50 => 20,
        0..3 => -15,
        _ => -10,
    };

    if has_aria {
        score += 15;
    }
    if element
        .role
        .as_deref()
        .is_some_and(|r| matches!(r, "button" | "link" | "menuitem"))
    {
        score += 15;
    }

    let tabbable = element.tabindex.as_deref().is_some_and(|t| t != "-1");
    if tabbable {
        score += 10;
    }

    if element.element_type.is_native_interactive() || tabbable {
        score += 20;
    } else if element.has_onclick {
        // Interactive but unreachable from the keyboard.
        score -= 20;
    }

    score += touch_size_points(element, 20, 10, -15);

    score += if element.is_visible && !element.is_hidden {
        15
    } else {
        -25
    };

    if element.element_type.is_native_interactive() {
        score += 10; // native focus indicators
    }

    if element.element_type == ElementType::Link && !has_text && !has_aria {
        score -= 30;
    }

    clamp_score(score)
}

/// Touch-target size, short labels, and element types that work on small
/// screens.
fn mobile_responsiveness_score(element: &CTAElement) -> i32 {
    let mut score = 0;

    score += touch_size_points(element, 30, 20, -20);

    score += match element.word_count() {
        0..=3 => 25,
        4..=5 => 20,
        6..=8 => 10,
        _ => -10,
    };

    score += match element.element_type {
        ElementType::Button => 25,
        ElementType::Link => 15,
        ElementType::Form => 10,
        _ => 0,
    };

    if element.tabindex.as_deref().is_some_and(|t| t != "-1") {
        score += 15;
    }

    if element.is_dropdown {
        score -= 10;
    }

    clamp_score(score)
}

/// Best-effort contrast heuristic over computed color strings. No
/// color-space math; unknown styling scores a neutral 50.
fn color_contrast_score(element: &CTAElement) -> i32 {
    let mut score = 50;

    let text_color = element.text_color.as_deref();
    let background = element.background_color.as_deref();

    if text_color.is_some() || background.is_some() {
        let white_on_black = contains_color(text_color, WHITE) && contains_color(background, BLACK);
        let black_on_white = contains_color(text_color, BLACK) && contains_color(background, WHITE);

        if white_on_black || black_on_white {
            score += 30;
        } else if contains_color(text_color, WHITE) || contains_color(text_color, BLACK) {
            score += 15;
        } else {
            score -= 10;
        }
    }

    if element.html_class.as_deref().is_some_and(|class| {
        let class = class.to_lowercase();
        ["white", "black", "primary", "secondary"]
            .iter()
            .any(|c| class.contains(c))
    }) {
        score += 10;
    }

    clamp_score(score)
}

const WHITE: &str = "rgb(255, 255, 255)";
const BLACK: &str = "rgb(0, 0, 0)";

fn contains_color(value: Option<&str>, color: &str) -> bool {
    value.is_some_and(|v| v.contains(color))
}

/// Conversion heuristics: strong verbs, urgency, placement, and the
/// 100-300 x 40-60px size sweet spot.
fn conversion_optimization_score(element: &CTAElement, text: &str) -> i32 {
    let mut score = 0;

    if !text.is_empty() {
        if lexicon::any_term(text, HIGH_CONVERT_WORDS) {
            score += 25;
        }
        if lexicon::any_term(text, CONVERSION_URGENCY_WORDS) {
            score += 20;
        }
        if lexicon::any_term(text, BENEFIT_WORDS) {
            score += 15;
        }
        if lexicon::any_term(text, GENERIC_TEXTS) {
            score -= 30;
        }
    }

    score += match element.element_type {
        ElementType::Button => 20,
        ElementType::Form => 15,
        _ => 0,
    };

    if element.position.y < FOLD_Y {
        score += 25;
    } else if element.position.y < NEAR_FOLD_Y {
        score += 15;
    }

    let (w, h) = (element.size.width, element.size.height);
    score += if (100..=300).contains(&w) && (40..=60).contains(&h) {
        20
    } else if w >= 80 && h >= 35 {
        15
    } else {
        -10
    };

    clamp_score(score)
}

/// Scores the destination link from the validation outcome. Elements without
/// a checkable destination are neutral, except links, which should have one.
fn link_validity_score(element: &CTAElement) -> i32 {
    if element.href.as_deref().is_none_or(str::is_empty) {
        return if element.element_type == ElementType::Link {
            0
        } else {
            50
        };
    }

    let Some(check) = &element.link else {
        return 50; // not yet checked
    };

    let score = match check.validity {
        LinkValidity::Unknown => 50,
        LinkValidity::Valid => {
            let mut score = 100;
            if let Some(elapsed) = check.response_time {
                if elapsed < 1.0 {
                    score += 10;
                } else if elapsed > 5.0 {
                    score -= 10;
                }
            }
            score
        }
        LinkValidity::Invalid => match check.error {
            Some(ErrorCategory::NotFound) => 0,
            Some(ErrorCategory::Connection) => 5,
            Some(ErrorCategory::Forbidden) => 10,
            Some(ErrorCategory::Timeout) => 15,
            Some(ErrorCategory::ServerError) => 20,
            Some(ErrorCategory::Ssl) => 25,
            Some(_) => 30,
            None => 0,
        },
    };

    clamp_score(score)
}

fn touch_size_points(element: &CTAElement, full: i32, partial: i32, penalty: i32) -> i32 {
    let (w, h) = (element.size.width, element.size.height);
    if w >= MIN_TOUCH_SIZE && h >= MIN_TOUCH_SIZE {
        full
    } else if w >= SMALL_TOUCH_SIZE && h >= SMALL_TOUCH_SIZE {
        partial
    } else {
        penalty
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{LinkCheck, Position, Size};

    fn element(element_type: ElementType, text: &str) -> CTAElement {
        CTAElement {
            element_id: "cta_1".to_string(),
            css_selector: ".cta".to_string(),
            element_type,
            text: text.to_string(),
            aria_label: None,
            role: None,
            tabindex: None,
            position: Position { x: 50, y: 300 },
            size: Size {
                width: 160,
                height: 48,
            },
            z_index: None,
            html_id: None,
            html_class: None,
            text_color: None,
            background_color: None,
            href: None,
            link: None,
            is_visible: true,
            is_hidden: false,
            is_dropdown: false,
            is_js_generated: false,
            has_onclick: false,
        }
    }

    #[test]
    fn test_all_scores_stay_in_band() {
        let extremes = [
            element(ElementType::Button, "Buy now today free exclusive instant download"),
            element(ElementType::Link, ""),
            {
                let mut el = element(ElementType::Custom, "maybe think about it?");
                el.is_visible = false;
                el.is_hidden = true;
                el.size = Size {
                    width: 8,
                    height: 8,
                };
                el.position = Position { x: 0, y: 5000 };
                el
            },
        ];

        for el in extremes {
            let m = score_element(&el);
            for score in [
                m.visibility,
                m.urgency,
                m.action_clarity,
                m.accessibility,
                m.mobile_responsiveness,
                m.color_contrast,
                m.conversion_optimization,
                m.link_validity,
                m.overall_score,
            ] {
                assert!((0..=100).contains(&score), "score {score} out of band");
            }
        }
    }

    #[test]
    fn test_strong_button_scores_high_on_urgency_and_clarity() {
        let el = element(ElementType::Button, "Get Started Free Today");
        let m = score_element(&el);
        assert!(m.urgency > 70, "urgency was {}", m.urgency);
        assert!(m.action_clarity > 70, "clarity was {}", m.action_clarity);
    }

    #[test]
    fn test_generic_text_tanks_clarity() {
        let m = score_element(&element(ElementType::Link, "Click here"));
        // "click here" takes the -40 penalty plus the "click" action credit.
        assert!(m.action_clarity < 40, "clarity was {}", m.action_clarity);
    }

    #[test]
    fn test_only_highest_generic_penalty_applies() {
        // "click here" contains both "click here" (-40) and "here" (-35);
        // the combined text must only be charged once.
        let single = action_clarity_score("click here");
        let with_more = action_clarity_score("click here for more info");
        // "more info" (-20) is weaker than "click here" (-40), so the extra
        // phrase must not stack an extra penalty.
        assert!(with_more >= single);
    }

    #[test]
    fn test_question_mark_penalised() {
        let statement = action_clarity_score("start your trial");
        let question = action_clarity_score("start your trial?");
        assert_eq!(question, statement - 20);
    }

    #[test]
    fn test_hedging_reduces_urgency() {
        let direct = urgency_score("buy now");
        let hedged = urgency_score("maybe buy now");
        assert!(hedged < direct);
    }

    #[test]
    fn test_visibility_rewards_fold_and_size() {
        let above = element(ElementType::Button, "Sign up free");
        let mut below = above.clone();
        below.position.y = 2400;
        assert!(
            score_element(&above).visibility > score_element(&below).visibility
        );

        let mut tiny = above.clone();
        tiny.size = Size {
            width: 16,
            height: 16,
        };
        assert!(score_element(&above).visibility > score_element(&tiny).visibility);
    }

    #[test]
    fn test_hidden_element_loses_visibility_and_accessibility() {
        let shown = element(ElementType::Button, "Download now");
        let mut hidden = shown.clone();
        hidden.is_visible = false;
        hidden.is_hidden = true;

        let shown_m = score_element(&shown);
        let hidden_m = score_element(&hidden);
        assert!(hidden_m.visibility < shown_m.visibility);
        assert!(hidden_m.accessibility < shown_m.accessibility);
    }

    #[test]
    fn test_accessibility_aria_fallback_for_empty_text() {
        let bare = element(ElementType::Button, "");
        let mut labelled = bare.clone();
        labelled.aria_label = Some("Open signup form".to_string());

        assert!(
            score_element(&labelled).accessibility > score_element(&bare).accessibility
        );
    }

    #[test]
    fn test_onclick_without_keyboard_access_penalised() {
        let mut el = element(ElementType::Custom, "Open menu now");
        el.has_onclick = true;
        let without_tab = score_element(&el).accessibility;

        el.tabindex = Some("0".to_string());
        let with_tab = score_element(&el).accessibility;
        assert!(with_tab > without_tab);
    }

    #[test]
    fn test_dropdown_penalised_on_mobile() {
        let plain = element(ElementType::Button, "Choose plan");
        let mut dropdown = plain.clone();
        dropdown.is_dropdown = true;
        assert!(
            score_element(&plain).mobile_responsiveness
                > score_element(&dropdown).mobile_responsiveness
        );
    }

    #[test]
    fn test_contrast_defaults_to_neutral() {
        let el = element(ElementType::Button, "Go");
        assert_eq!(score_element(&el).color_contrast, 50);
    }

    #[test]
    fn test_contrast_rewards_high_contrast_pairs() {
        let mut el = element(ElementType::Button, "Go");
        el.text_color = Some("rgb(255, 255, 255)".to_string());
        el.background_color = Some("rgb(0, 0, 0)".to_string());
        assert_eq!(score_element(&el).color_contrast, 80);

        el.text_color = Some("rgb(120, 120, 120)".to_string());
        el.background_color = Some("rgb(130, 130, 130)".to_string());
        assert_eq!(score_element(&el).color_contrast, 40);
    }

    #[test]
    fn test_link_validity_missing_href() {
        let link = element(ElementType::Link, "Pricing");
        assert_eq!(score_element(&link).link_validity, 0);

        let button = element(ElementType::Button, "Submit");
        assert_eq!(score_element(&button).link_validity, 50);
    }

    #[test]
    fn test_link_validity_outcomes() {
        let mut el = element(ElementType::Link, "Docs");
        el.href = Some("https://example.com/docs".to_string());

        // Unchecked
        assert_eq!(score_element(&el).link_validity, 50);

        el.link = Some(LinkCheck::valid(200, None, 0.3));
        assert_eq!(score_element(&el).link_validity, 100);

        el.link = Some(LinkCheck::valid(200, None, 6.2));
        assert_eq!(score_element(&el).link_validity, 90);

        el.link = Some(LinkCheck::failed(ErrorCategory::NotFound, Some(404), Some(0.2)));
        assert_eq!(score_element(&el).link_validity, 0);

        el.link = Some(LinkCheck::failed(ErrorCategory::Timeout, None, None));
        assert_eq!(score_element(&el).link_validity, 15);

        el.link = Some(LinkCheck::failed(ErrorCategory::Ssl, None, None));
        assert_eq!(score_element(&el).link_validity, 25);

        el.link = Some(LinkCheck::skipped(crate::domain::entities::SkipReason::JavascriptScheme));
        assert_eq!(score_element(&el).link_validity, 50);
    }
}
