// src/config/scoring.rs
//! Scoring parameters: thresholds, weights and curve shapes.
//!
//! TOML shape (every section and every key optional; missing keys fall back
//! to the defaults of their own section):
//! ```toml
//! [thresholds]
//! easy = 0.60
//! medium = 0.88
//!
//! [weights]
//! age = 0.25
//! bmi = 0.25
//! workout = 0.50
//!
//! [age]
//! band_low = 25.0
//! band_high = 35.0
//! sigma_below = 10.0
//! sigma_above = 20.0
//!
//! [bmi]
//! band_low = 18.5
//! band_high = 25.0
//! sigma_below = 2.5
//! sigma_above = 7.0
//!
//! [workout]
//! peak_days = 5.0
//! overtraining_onset = 6.0
//! overtraining_penalty = 0.10
//! ```
//!
//! The config is built once at startup and never mutated afterwards.

use anyhow::{bail, Context};
use serde::{Deserialize, Deserializer, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

// --- env defaults & names ---
pub const DEFAULT_SCORING_CONFIG_PATH: &str = "config/scoring.toml";

pub const ENV_SCORING_CONFIG_PATH: &str = "SCORING_CONFIG_PATH";
pub const ENV_EASY_THRESHOLD: &str = "SCORING_EASY_THRESHOLD";
pub const ENV_MEDIUM_THRESHOLD: &str = "SCORING_MEDIUM_THRESHOLD";

/// Upper bounds of the Easy and Medium bands.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    pub easy: f64,
    pub medium: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            easy: 0.60,
            medium: 0.88,
        }
    }
}

/// Relative weight of each sub-score. Normalized by their sum when aggregating.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Weights {
    pub age: f64,
    pub bmi: f64,
    /// Heaviest weight: frequency is the most direct signal of training capacity.
    pub workout: f64,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            age: 0.25,
            bmi: 0.25,
            workout: 0.50,
        }
    }
}

impl Weights {
    pub fn sum(&self) -> f64 {
        self.age + self.bmi + self.workout
    }
}

/// Plateau of 1.0 on `[band_low, band_high]` with a Gaussian falloff on each side.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BandCurve {
    pub band_low: f64,
    pub band_high: f64,
    pub sigma_below: f64,
    pub sigma_above: f64,
}

impl BandCurve {
    pub const fn age() -> Self {
        Self {
            band_low: 25.0,
            band_high: 35.0,
            sigma_below: 10.0,
            sigma_above: 20.0,
        }
    }

    /// Underweight is penalized more steeply than overweight.
    pub const fn bmi() -> Self {
        Self {
            band_low: 18.5,
            band_high: 25.0,
            sigma_below: 2.5,
            sigma_above: 7.0,
        }
    }

    fn validate(&self, name: &str) -> anyhow::Result<()> {
        let all_finite = [self.band_low, self.band_high, self.sigma_below, self.sigma_above]
            .iter()
            .all(|v| v.is_finite());
        if !all_finite {
            bail!("[{name}] contains a non-finite value");
        }
        if self.band_low > self.band_high {
            bail!(
                "[{name}] band_low ({}) must not exceed band_high ({})",
                self.band_low,
                self.band_high
            );
        }
        if self.sigma_below <= 0.0 || self.sigma_above <= 0.0 {
            bail!("[{name}] sigmas must be greater than 0");
        }
        Ok(())
    }
}

/// Smoothstep rise to `peak_days`, plateau until `overtraining_onset`,
/// then a linear decline of `overtraining_penalty` per extra day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkoutCurve {
    pub peak_days: f64,
    pub overtraining_onset: f64,
    pub overtraining_penalty: f64,
}

impl Default for WorkoutCurve {
    fn default() -> Self {
        Self {
            peak_days: 5.0,
            overtraining_onset: 6.0,
            overtraining_penalty: 0.10,
        }
    }
}

impl WorkoutCurve {
    fn validate(&self) -> anyhow::Result<()> {
        if !(self.peak_days.is_finite()
            && self.overtraining_onset.is_finite()
            && self.overtraining_penalty.is_finite())
        {
            bail!("[workout] contains a non-finite value");
        }
        if self.peak_days <= 0.0 {
            bail!("[workout] peak_days must be greater than 0");
        }
        if self.overtraining_onset < self.peak_days {
            bail!("[workout] overtraining_onset must be >= peak_days");
        }
        if self.overtraining_penalty < 0.0 {
            bail!("[workout] overtraining_penalty must not be negative");
        }
        Ok(())
    }
}

/// `[age]` / `[bmi]` as written in TOML; absent keys keep the section's default.
#[derive(Debug, Default, Deserialize)]
struct PartialBand {
    band_low: Option<f64>,
    band_high: Option<f64>,
    sigma_below: Option<f64>,
    sigma_above: Option<f64>,
}

impl PartialBand {
    fn over(self, base: BandCurve) -> BandCurve {
        BandCurve {
            band_low: self.band_low.unwrap_or(base.band_low),
            band_high: self.band_high.unwrap_or(base.band_high),
            sigma_below: self.sigma_below.unwrap_or(base.sigma_below),
            sigma_above: self.sigma_above.unwrap_or(base.sigma_above),
        }
    }
}

fn age_curve<'de, D: Deserializer<'de>>(d: D) -> Result<BandCurve, D::Error> {
    Ok(PartialBand::deserialize(d)?.over(BandCurve::age()))
}

fn bmi_curve<'de, D: Deserializer<'de>>(d: D) -> Result<BandCurve, D::Error> {
    Ok(PartialBand::deserialize(d)?.over(BandCurve::bmi()))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub thresholds: Thresholds,
    pub weights: Weights,
    #[serde(deserialize_with = "age_curve")]
    pub age: BandCurve,
    #[serde(deserialize_with = "bmi_curve")]
    pub bmi: BandCurve,
    pub workout: WorkoutCurve,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            thresholds: Thresholds::default(),
            weights: Weights::default(),
            age: BandCurve::age(),
            bmi: BandCurve::bmi(),
            workout: WorkoutCurve::default(),
        }
    }
}

impl ScoringConfig {
    /// Load using env + fallbacks:
    /// 1) $SCORING_CONFIG_PATH (must exist)
    /// 2) config/scoring.toml
    /// 3) built-in defaults
    ///
    /// Threshold env overrides are applied last, then the whole config is validated.
    pub fn load() -> anyhow::Result<Self> {
        let mut cfg = match std::env::var(ENV_SCORING_CONFIG_PATH) {
            Ok(p) => Self::from_path(Path::new(&p))?,
            Err(_) => {
                let default_path = PathBuf::from(DEFAULT_SCORING_CONFIG_PATH);
                if default_path.exists() {
                    Self::from_path(&default_path)?
                } else {
                    info!(target: "config", "no scoring config found, using built-in defaults");
                    Self::default()
                }
            }
        };

        if let Some(t) = parse_threshold_env(std::env::var(ENV_EASY_THRESHOLD).ok()) {
            cfg.thresholds.easy = t;
        }
        if let Some(t) = parse_threshold_env(std::env::var(ENV_MEDIUM_THRESHOLD).ok()) {
            cfg.thresholds.medium = t;
        }

        cfg.validate()?;
        info!(
            target: "config",
            easy = cfg.thresholds.easy,
            medium = cfg.thresholds.medium,
            "scoring config loaded"
        );
        Ok(cfg)
    }

    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading scoring config from {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("parsing scoring config at {}", path.display()))
    }

    /// Parse and validate a TOML string.
    pub fn from_toml_str(toml_str: &str) -> anyhow::Result<Self> {
        let cfg: ScoringConfig = toml::from_str(toml_str)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject any parameter set that could break boundedness or divide by zero.
    pub fn validate(&self) -> anyhow::Result<()> {
        let Thresholds { easy, medium } = self.thresholds;
        if !(easy.is_finite() && medium.is_finite()) {
            bail!("thresholds must be finite");
        }
        if !(0.0 < easy && easy < medium && medium < 1.0) {
            bail!("thresholds must satisfy 0 < easy ({easy}) < medium ({medium}) < 1");
        }

        let w = self.weights;
        if ![w.age, w.bmi, w.workout]
            .iter()
            .all(|v| v.is_finite() && *v >= 0.0)
        {
            bail!("weights must be finite and non-negative");
        }
        if w.sum() <= 0.0 {
            bail!("at least one weight must be positive");
        }

        self.age.validate("age")?;
        self.bmi.validate("bmi")?;
        self.workout.validate()?;
        Ok(())
    }
}

// parse optional float env and clamp to <0.0..=1.0>
fn parse_threshold_env(raw: Option<String>) -> Option<f64> {
    raw.and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .map(|v| v.clamp(0.0, 1.0))
}
