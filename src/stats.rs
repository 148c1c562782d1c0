//! Descriptive statistics of the health score over the practical input box.
//!
//! Computed once at startup on a regular grid and exposed via `/model-info`.

use serde::Serialize;

use crate::engine::HealthScoreEngine;
use crate::input::{AGE_RANGE, BMI_RANGE, WORKOUT_RANGE};

const AGE_STEPS: usize = 63; // 1-year resolution over 18..=80
const BMI_STEPS: usize = 51; // 0.5 resolution over 15..=40
const WORKOUT_STEPS: usize = 15; // half-day resolution over 0..=7

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreStats {
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub max: f64,
    pub samples: usize,
}

impl ScoreStats {
    pub fn survey(engine: &HealthScoreEngine) -> Self {
        let mut n = 0usize;
        let mut sum = 0.0f64;
        let mut sum_sq = 0.0f64;
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;

        for age in grid(AGE_RANGE, AGE_STEPS) {
            for bmi in grid(BMI_RANGE, BMI_STEPS) {
                for freq in grid(WORKOUT_RANGE, WORKOUT_STEPS) {
                    let s = engine.health_score_at(age, bmi, freq);
                    n += 1;
                    sum += s;
                    sum_sq += s * s;
                    min = min.min(s);
                    max = max.max(s);
                }
            }
        }

        let mean = sum / n as f64;
        // population variance; guard tiny negative values from rounding
        let var = (sum_sq / n as f64 - mean * mean).max(0.0);
        Self {
            mean,
            std: var.sqrt(),
            min,
            max,
            samples: n,
        }
    }
}

/// `steps` evenly spaced points from `range.0` to `range.1` inclusive.
fn grid(range: (f64, f64), steps: usize) -> impl Iterator<Item = f64> {
    let (lo, hi) = range;
    let span = (steps - 1) as f64;
    (0..steps).map(move |i| lo + (hi - lo) * (i as f64) / span)
}
