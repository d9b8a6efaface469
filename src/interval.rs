use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::algorithm::meets_ideal_rate;
use crate::config::ScoringConfig;
use crate::error::{Result, ScoringError};
use crate::sample::FoodSample;

const MIN_FOOD_REMAINING: f64 = 0.0;
const MAX_FOOD_REMAINING: f64 = 100.0;

/// Consumption between two adjacent samples that passed the duration filter
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntervalData {
    pub start_time: i64,
    pub end_time: i64,
    /// Seconds
    pub duration: f64,
    /// Percentage points, never negative
    pub food_consumed: f64,
    /// Percentage points per second
    pub consumption_rate: f64,
    pub score: f64,
    pub meets_ideal_rate: bool,
}

/// Validate and time-order raw samples.
///
/// Fails with `InsufficientData` below two samples and `InvalidSample` on a
/// non-finite reading. Finite readings outside 0-100 are clamped. Ties on
/// timestamp keep their input order.
pub fn prepare_samples(samples: &[FoodSample]) -> Result<Vec<FoodSample>> {
    if samples.len() < 2 {
        return Err(ScoringError::InsufficientData {
            found: samples.len(),
        });
    }

    if let Some((index, sample)) = samples
        .iter()
        .find_position(|s| !s.food_remaining.is_finite())
    {
        return Err(ScoringError::InvalidSample {
            index,
            value: sample.food_remaining,
        });
    }

    Ok(samples
        .iter()
        .map(|s| {
            let clamped = s.food_remaining.clamp(MIN_FOOD_REMAINING, MAX_FOOD_REMAINING);
            if clamped != s.food_remaining {
                tracing::debug!(
                    timestamp = s.timestamp,
                    value = s.food_remaining,
                    "clamping out of range foodRemaining"
                );
            }
            FoodSample {
                food_remaining: clamped,
                ..*s
            }
        })
        .sorted_by_key(|s| s.timestamp)
        .collect())
}

/// Derive intervals from time-ordered samples.
///
/// Every adjacent pair is considered once; pairs whose duration falls outside
/// `[min_interval_duration, max_interval_duration]`, or that span no time at
/// all, are dropped and never bridged. Scores start at zero.
pub fn derive_intervals(sorted: &[FoodSample], config: &ScoringConfig) -> Vec<IntervalData> {
    sorted
        .iter()
        .tuple_windows()
        .filter_map(|(current, next)| {
            let duration = config
                .timestamp_unit
                .span_seconds(current.timestamp, next.timestamp);

            // zero-length pairs have no rate, whatever the configured minimum
            if duration <= 0.0
                || duration < config.min_interval_duration
                || duration > config.max_interval_duration
            {
                tracing::trace!(
                    start = current.timestamp,
                    end = next.timestamp,
                    duration,
                    "dropping interval outside duration bounds"
                );
                return None;
            }

            // food "gained" is sensor noise, not negative consumption
            let food_consumed = (current.food_remaining - next.food_remaining).max(0.0);

            Some(IntervalData {
                start_time: current.timestamp,
                end_time: next.timestamp,
                duration,
                food_consumed,
                consumption_rate: food_consumed / duration,
                score: 0.0,
                meets_ideal_rate: false,
            })
        })
        .collect()
}

/// Score every interval with the configured algorithm, returning new values.
pub fn score_intervals(intervals: &[IntervalData], config: &ScoringConfig) -> Vec<IntervalData> {
    intervals
        .iter()
        .map(|interval| IntervalData {
            score: config
                .scoring_algorithm
                .score(interval.consumption_rate, config),
            meets_ideal_rate: meets_ideal_rate(interval.consumption_rate, config),
            ..*interval
        })
        .collect()
}
