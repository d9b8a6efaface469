//! Session-length multiplier and letter grade.

use serde::{Deserialize, Serialize};

use crate::config::DurationMultiplierConfig;
use crate::stats::SessionStats;

const CONSISTENCY_WEIGHT: f64 = 0.1;

/// Flat short/long multipliers outside `[min_duration, max_duration]`,
/// linear interpolation inside it.
pub fn duration_multiplier(duration: f64, config: &DurationMultiplierConfig) -> f64 {
    let DurationMultiplierConfig {
        min_duration,
        max_duration,
        short_session_multiplier,
        long_session_multiplier,
    } = *config;

    if duration < min_duration {
        short_session_multiplier
    } else if duration > max_duration {
        long_session_multiplier
    } else if max_duration <= min_duration {
        // degenerate band: duration == min == max
        short_session_multiplier
    } else {
        let ratio = (duration - min_duration) / (max_duration - min_duration);
        short_session_multiplier + (long_session_multiplier - short_session_multiplier) * ratio
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum_macros::Display,
)]
pub enum Grade {
    #[serde(rename = "F")]
    #[strum(to_string = "F")]
    F,
    #[serde(rename = "D")]
    #[strum(to_string = "D")]
    D,
    #[serde(rename = "C-")]
    #[strum(to_string = "C-")]
    CMinus,
    #[serde(rename = "C")]
    #[strum(to_string = "C")]
    C,
    #[serde(rename = "C+")]
    #[strum(to_string = "C+")]
    CPlus,
    #[serde(rename = "B-")]
    #[strum(to_string = "B-")]
    BMinus,
    #[serde(rename = "B")]
    #[strum(to_string = "B")]
    B,
    #[serde(rename = "B+")]
    #[strum(to_string = "B+")]
    BPlus,
    #[serde(rename = "A-")]
    #[strum(to_string = "A-")]
    AMinus,
    #[serde(rename = "A")]
    #[strum(to_string = "A")]
    A,
    #[serde(rename = "A+")]
    #[strum(to_string = "A+")]
    APlus,
}

/// Lower bounds, best grade first
const GRADE_THRESHOLDS: [(f64, Grade); 10] = [
    (0.95, Grade::APlus),
    (0.90, Grade::A),
    (0.85, Grade::AMinus),
    (0.80, Grade::BPlus),
    (0.75, Grade::B),
    (0.70, Grade::BMinus),
    (0.65, Grade::CPlus),
    (0.60, Grade::C),
    (0.55, Grade::CMinus),
    (0.50, Grade::D),
];

impl Grade {
    /// Map a normalized 0-1 score onto the letter scale
    pub fn from_normalized(value: f64) -> Grade {
        GRADE_THRESHOLDS
            .iter()
            .find(|(min, _)| value >= *min)
            .map(|(_, grade)| *grade)
            .unwrap_or(Grade::F)
    }
}

/// Normalized grade input: `total / (intervals * 100)` plus up to 0.1 for
/// consistency, capped at 1. Zero intervals normalize to 0.
pub fn normalized_score(total_score: f64, stats: &SessionStats) -> f64 {
    let base = if stats.interval_count == 0 {
        0.0
    } else {
        total_score / (stats.interval_count as f64 * 100.0)
    };
    (base + stats.consistency * CONSISTENCY_WEIGHT).min(1.0)
}

pub fn grade(total_score: f64, stats: &SessionStats) -> Grade {
    Grade::from_normalized(normalized_score(total_score, stats))
}
