// src/config/mod.rs
pub mod scoring;

pub use scoring::{
    BandCurve, ScoringConfig, Thresholds, Weights, WorkoutCurve, DEFAULT_SCORING_CONFIG_PATH,
    ENV_EASY_THRESHOLD, ENV_MEDIUM_THRESHOLD, ENV_SCORING_CONFIG_PATH,
};
