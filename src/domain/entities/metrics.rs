//! Per-element metric scores and the weighted overall score.

use serde::{Deserialize, Serialize};

/// Fixed weights for the overall score, by conversion impact.
///
/// Color contrast is reported in the breakdown but carries no weight, so the
/// remaining weights sum to exactly 1.00.
#[derive(Debug, Clone, Copy)]
pub struct Weights {
    pub conversion_optimization: f64,
    pub action_clarity: f64,
    pub urgency: f64,
    pub visibility: f64,
    pub accessibility: f64,
    pub link_validity: f64,
    pub mobile_responsiveness: f64,
}

pub const WEIGHTS: Weights = Weights {
    conversion_optimization: 0.22,
    action_clarity: 0.18,
    urgency: 0.13,
    visibility: 0.13,
    accessibility: 0.13,
    link_validity: 0.13,
    mobile_responsiveness: 0.08,
};

impl Weights {
    pub fn sum(&self) -> f64 {
        self.conversion_optimization
            + self.action_clarity
            + self.urgency
            + self.visibility
            + self.accessibility
            + self.link_validity
            + self.mobile_responsiveness
    }
}

/// The eight sub-scores for one element, each clamped to [0, 100].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricSet {
    pub visibility: i32,
    pub urgency: i32,
    pub action_clarity: i32,
    pub accessibility: i32,
    pub mobile_responsiveness: i32,
    pub color_contrast: i32,
    pub conversion_optimization: i32,
    pub link_validity: i32,
    pub overall_score: i32,
}

impl MetricSet {
    /// Recomputes `overall_score` as the rounded weighted sum of the
    /// weighted sub-scores.
    pub fn finalize(mut self) -> Self {
        let w = WEIGHTS;
        let weighted = f64::from(self.conversion_optimization) * w.conversion_optimization
            + f64::from(self.action_clarity) * w.action_clarity
            + f64::from(self.urgency) * w.urgency
            + f64::from(self.visibility) * w.visibility
            + f64::from(self.accessibility) * w.accessibility
            + f64::from(self.link_validity) * w.link_validity
            + f64::from(self.mobile_responsiveness) * w.mobile_responsiveness;
        self.overall_score = weighted.round() as i32;
        self
    }
}

/// Clamps a raw accumulated score into the [0, 100] band.
pub fn clamp_score(raw: i32) -> i32 {
    raw.clamp(0, 100)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weights_sum_to_one() {
        assert!((WEIGHTS.sum() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_overall_is_weighted_sum() {
        let metrics = MetricSet {
            visibility: 80,
            urgency: 60,
            action_clarity: 90,
            accessibility: 70,
            mobile_responsiveness: 50,
            color_contrast: 40,
            conversion_optimization: 85,
            link_validity: 100,
            overall_score: 0,
        }
        .finalize();

        let expected = (85.0_f64 * 0.22
            + 90.0 * 0.18
            + 60.0 * 0.13
            + 80.0 * 0.13
            + 70.0 * 0.13
            + 100.0 * 0.13
            + 50.0 * 0.08)
            .round() as i32;
        assert_eq!(metrics.overall_score, expected);
        assert!((0..=100).contains(&metrics.overall_score));
    }

    #[test]
    fn test_color_contrast_carries_no_weight() {
        let base = MetricSet {
            visibility: 50,
            urgency: 50,
            action_clarity: 50,
            accessibility: 50,
            mobile_responsiveness: 50,
            color_contrast: 0,
            conversion_optimization: 50,
            link_validity: 50,
            overall_score: 0,
        }
        .finalize();

        let contrasted = MetricSet {
            color_contrast: 100,
            ..base
        }
        .finalize();

        assert_eq!(base.overall_score, contrasted.overall_score);
    }

    #[test]
    fn test_clamp_score() {
        assert_eq!(clamp_score(-30), 0);
        assert_eq!(clamp_score(0), 0);
        assert_eq!(clamp_score(64), 64);
        assert_eq!(clamp_score(140), 100);
    }
}
