//! prediction.rs: output shapes of the scoring core.
//!
//! A `Prediction` carries everything a caller needs to render both the
//! user-facing payload and the debug payload without recomputing anything.

use serde::Serialize;

use crate::config::Thresholds;
use crate::input::HealthInput;

/// Recommended workout difficulty. Lower health score → easier workouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    /// Canned recommendation text for this band.
    pub fn recommendation(&self) -> &'static str {
        match self {
            Difficulty::Easy => {
                "Based on your current metrics, you should start with low-intensity workouts. \
                 Focus on building a consistent routine and gradually increasing intensity."
            }
            Difficulty::Medium => {
                "You can handle moderate intensity workouts. \
                 Mix cardio and strength training while maintaining proper form and recovery."
            }
            Difficulty::Hard => {
                "You're ready for high-intensity workouts. \
                 Challenge yourself with advanced exercises while maintaining proper form and recovery."
            }
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-feature sub-scores, each in [0,1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreComponents {
    pub age_score: f64,
    pub bmi_score: f64,
    pub workout_score: f64,
}

/// Complete result of one scoring call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prediction {
    pub input: HealthInput,
    pub components: ScoreComponents,
    /// Aggregate health score in [0,1].
    pub health_score: f64,
    pub difficulty: Difficulty,
    /// Distance from the nearest threshold, normalized to [0,1].
    pub confidence: f64,
    pub recommendation: &'static str,
    pub thresholds: Thresholds,
}
