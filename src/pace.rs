use serde::Serialize;

use crate::config::ScoringConfig;
use crate::interval::IntervalData;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, strum_macros::Display)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum PaceStatus {
    TooFast,
    Ideal,
    TooSlow,
    Stopped,
}

impl PaceStatus {
    pub fn recommendation(self) -> &'static str {
        match self {
            PaceStatus::Stopped => "Try taking a small bite to get started",
            PaceStatus::TooFast => "Slow down a bit - savor each bite",
            PaceStatus::TooSlow => "Try to maintain a steady pace",
            PaceStatus::Ideal => "Perfect pace! Keep it up",
        }
    }

    /// Display color hint for the presentation layer
    pub fn color(self) -> &'static str {
        match self {
            PaceStatus::Stopped => "#ff6b6b",
            PaceStatus::TooFast => "#ffa726",
            PaceStatus::TooSlow => "#42a5f5",
            PaceStatus::Ideal => "#66bb6a",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaceIndicator {
    pub status: PaceStatus,
    /// Signed `rate - ideal_rate`; 0 when stopped
    pub deviation: f64,
    pub recommendation: &'static str,
    pub color: &'static str,
}

impl PaceIndicator {
    fn new(status: PaceStatus, deviation: f64) -> Self {
        Self {
            status,
            deviation,
            recommendation: status.recommendation(),
            color: status.color(),
        }
    }
}

pub fn pace_indicator(rate: f64, config: &ScoringConfig) -> PaceIndicator {
    let deviation = rate - config.ideal_rate;

    if rate == 0.0 {
        PaceIndicator::new(PaceStatus::Stopped, 0.0)
    } else if deviation > config.tolerance {
        PaceIndicator::new(PaceStatus::TooFast, deviation)
    } else if deviation < -config.tolerance {
        PaceIndicator::new(PaceStatus::TooSlow, deviation)
    } else {
        PaceIndicator::new(PaceStatus::Ideal, deviation)
    }
}

/// One indicator per interval, in order. Works on any slice of intervals,
/// including a recent window of a live session.
pub fn generate_pace_indicators(
    intervals: &[IntervalData],
    config: &ScoringConfig,
) -> Vec<PaceIndicator> {
    intervals
        .iter()
        .map(|interval| pace_indicator(interval.consumption_rate, config))
        .collect()
}

/// Indicators for the last `n` intervals only
pub fn recent_pace(
    intervals: &[IntervalData],
    n: usize,
    config: &ScoringConfig,
) -> Vec<PaceIndicator> {
    let start = intervals.len().saturating_sub(n);
    generate_pace_indicators(&intervals[start..], config)
}
