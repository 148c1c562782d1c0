//! # Health Score Engine
//! Pure, testable logic that maps a validated `HealthInput` → `Prediction`.
//! No I/O and no shared state; safe to call from any number of tasks at once.
//!
//! Policy: three smooth sub-scores (age, BMI, workout frequency) are combined
//! by a normalized weighted mean into one health score, which is thresholded
//! into Easy/Medium/Hard. Confidence is the distance from the nearest
//! threshold, normalized by the band width.

use crate::config::{BandCurve, ScoringConfig, Weights, WorkoutCurve};
use crate::input::{clamp_to, HealthInput, AGE_RANGE, BMI_RANGE, WORKOUT_RANGE};
use crate::prediction::{Difficulty, Prediction, ScoreComponents};

/// Age sub-score: 1.0 over the prime band, Gaussian decay on either side.
pub fn compute_age_score(age: f64, curve: &BandCurve) -> f64 {
    band_score(clamp_to(age, AGE_RANGE), curve)
}

/// BMI sub-score: 1.0 over the normal band, asymmetric Gaussian decay outside it.
pub fn compute_bmi_score(bmi: f64, curve: &BandCurve) -> f64 {
    band_score(clamp_to(bmi, BMI_RANGE), curve)
}

/// Workout sub-score: smoothstep rise to the peak, plateau, then a mild
/// linear decline past the overtraining onset.
pub fn compute_workout_score(frequency: f64, curve: &WorkoutCurve) -> f64 {
    let f = clamp_to(frequency, WORKOUT_RANGE);
    let score = if f < curve.peak_days {
        let x = f / curve.peak_days;
        x * x * (3.0 - 2.0 * x)
    } else if f <= curve.overtraining_onset {
        1.0
    } else {
        1.0 - curve.overtraining_penalty * (f - curve.overtraining_onset)
    };
    score.clamp(0.0, 1.0)
}

/// Weighted mean of the sub-scores (weights are normalized by their sum).
pub fn aggregate(age_score: f64, bmi_score: f64, workout_score: f64, w: &Weights) -> f64 {
    let raw = age_score * w.age + bmi_score * w.bmi + workout_score * w.workout;
    (raw / w.sum()).clamp(0.0, 1.0)
}

/// `score <= easy` → Easy, `score <= medium` → Medium, otherwise Hard.
pub fn classify(score: f64, easy: f64, medium: f64) -> Difficulty {
    if score <= easy {
        Difficulty::Easy
    } else if score <= medium {
        Difficulty::Medium
    } else {
        Difficulty::Hard
    }
}

/// Distance from the nearest threshold, normalized by the containing band.
///
/// The Medium band is normalized by its half-width (its centre is farthest
/// from both thresholds). The edge bands are normalized by their full width,
/// measured from the threshold, since 0 and 1 are not classification
/// boundaries. Always in [0,1]: a zero-width band yields 0, as does a NaN score.
pub fn confidence(score: f64, easy: f64, medium: f64) -> f64 {
    let s = score.clamp(0.0, 1.0);
    let raw = match classify(s, easy, medium) {
        Difficulty::Easy => (easy - s) / easy.max(f64::EPSILON),
        Difficulty::Medium => {
            let half = (medium - easy) / 2.0;
            (s - easy).min(medium - s) / half.max(f64::EPSILON)
        }
        Difficulty::Hard => (s - medium) / (1.0 - medium).max(f64::EPSILON),
    };
    if raw.is_finite() {
        raw.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

pub fn recommend(difficulty: Difficulty) -> &'static str {
    difficulty.recommendation()
}

fn band_score(x: f64, curve: &BandCurve) -> f64 {
    let (distance, sigma) = if x < curve.band_low {
        (curve.band_low - x, curve.sigma_below)
    } else if x > curve.band_high {
        (x - curve.band_high, curve.sigma_above)
    } else {
        return 1.0;
    };
    (-(distance * distance) / (2.0 * sigma * sigma))
        .exp()
        .clamp(0.0, 1.0)
}

/// Scoring core bound to one immutable parameter set.
#[derive(Debug, Clone)]
pub struct HealthScoreEngine {
    cfg: ScoringConfig,
}

impl HealthScoreEngine {
    pub fn new(cfg: ScoringConfig) -> anyhow::Result<Self> {
        cfg.validate()?;
        Ok(Self { cfg })
    }

    /// Read-only view of thresholds, weights and curve parameters.
    pub fn config(&self) -> &ScoringConfig {
        &self.cfg
    }

    pub fn components(&self, input: &HealthInput) -> ScoreComponents {
        self.components_at(input.age(), input.bmi(), input.workout_frequency())
    }

    /// Aggregate score for an arbitrary point; out-of-range values are clamped
    /// by the curves. Used for surveying the practical domain.
    pub fn health_score_at(&self, age: f64, bmi: f64, frequency: f64) -> f64 {
        let c = self.components_at(age, bmi, frequency);
        aggregate(c.age_score, c.bmi_score, c.workout_score, &self.cfg.weights)
    }

    pub fn predict(&self, input: &HealthInput) -> Prediction {
        let components = self.components(input);
        let health_score = aggregate(
            components.age_score,
            components.bmi_score,
            components.workout_score,
            &self.cfg.weights,
        );
        let t = self.cfg.thresholds;
        let difficulty = classify(health_score, t.easy, t.medium);

        Prediction {
            input: *input,
            components,
            health_score,
            difficulty,
            confidence: confidence(health_score, t.easy, t.medium),
            recommendation: recommend(difficulty),
            thresholds: t,
        }
    }

    fn components_at(&self, age: f64, bmi: f64, frequency: f64) -> ScoreComponents {
        ScoreComponents {
            age_score: compute_age_score(age, &self.cfg.age),
            bmi_score: compute_bmi_score(bmi, &self.cfg.bmi),
            workout_score: compute_workout_score(frequency, &self.cfg.workout),
        }
    }
}

impl Default for HealthScoreEngine {
    fn default() -> Self {
        Self {
            cfg: ScoringConfig::default(),
        }
    }
}
