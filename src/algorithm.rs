//! Per-interval scoring strategies.
//!
//! Both strategies map a consumption rate to a score in `[0, 100]` and give a
//! perfect 100 whenever the rate is within tolerance of the ideal rate.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::config::{ScoringConfig, ThresholdValues};

const PERFECT_SCORE: f64 = 100.0;

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    ValueEnum,
    strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ScoringAlgorithm {
    /// Smooth falloff: `100 * decay^(deviation / tolerance)`
    #[default]
    Exponential,
    /// Coarse bands of 100/90/75/60/40/20
    Threshold,
}

impl ScoringAlgorithm {
    pub fn score(self, rate: f64, config: &ScoringConfig) -> f64 {
        let deviation = (rate - config.ideal_rate).abs();
        match self {
            ScoringAlgorithm::Exponential => {
                exponential_score(deviation, config.tolerance, config.exponential_decay)
            }
            ScoringAlgorithm::Threshold => {
                threshold_score(deviation, config.tolerance, &config.threshold_values)
            }
        }
    }
}

pub fn exponential_score(deviation: f64, tolerance: f64, decay: f64) -> f64 {
    if deviation <= tolerance {
        return PERFECT_SCORE;
    }

    (PERFECT_SCORE * decay.powf(deviation / tolerance)).max(0.0)
}

pub fn threshold_score(deviation: f64, tolerance: f64, bands: &ThresholdValues) -> f64 {
    if deviation <= tolerance {
        PERFECT_SCORE
    } else if deviation <= tolerance + bands.excellent {
        90.0
    } else if deviation <= tolerance + bands.good {
        75.0
    } else if deviation <= tolerance + bands.fair {
        60.0
    } else if deviation <= tolerance + bands.poor {
        40.0
    } else {
        20.0
    }
}

/// Whether `rate` sits inside the tolerance band, regardless of algorithm
pub fn meets_ideal_rate(rate: f64, config: &ScoringConfig) -> bool {
    (rate - config.ideal_rate).abs() <= config.tolerance
}
