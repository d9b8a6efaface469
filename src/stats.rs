use serde::{Deserialize, Serialize};

use crate::config::ScoringConfig;
use crate::interval::IntervalData;
use crate::sample::FoodSample;

/// Whole-session aggregates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStats {
    /// Seconds from the first to the last sample
    pub total_duration: f64,
    /// First sample's remaining minus the last sample's remaining
    pub total_food_consumed: f64,
    pub average_rate: f64,
    pub interval_count: usize,
    pub ideal_rate_count: usize,
    /// 0-1, higher when interval rates spread less
    pub consistency: f64,
    pub start_time: i64,
    pub end_time: i64,
}

pub fn mean(data: &[f64]) -> Option<f64> {
    if data.is_empty() {
        return None;
    }
    Some(data.iter().sum::<f64>() / data.len() as f64)
}

/// Population standard deviation
pub fn std_dev(data: &[f64]) -> Option<f64> {
    let m = mean(data)?;
    let variance = data.iter().map(|v| (v - m).powi(2)).sum::<f64>() / data.len() as f64;
    Some(variance.sqrt())
}

/// `1 - stddev / (2 * ideal_rate)`, floored at 0; 0 when there are no rates
pub fn consistency(rates: &[f64], ideal_rate: f64) -> f64 {
    match std_dev(rates) {
        Some(sd) => (1.0 - sd / (ideal_rate * 2.0)).max(0.0),
        None => 0.0,
    }
}

/// Aggregate a session. Duration, consumption and bounds come from the first
/// and last sorted sample no matter which intervals survived filtering.
/// An empty `sorted` slice yields zeroed stats.
pub fn session_stats(
    sorted: &[FoodSample],
    intervals: &[IntervalData],
    config: &ScoringConfig,
) -> SessionStats {
    let (first, last) = match (sorted.first(), sorted.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => {
            return SessionStats {
                total_duration: 0.0,
                total_food_consumed: 0.0,
                average_rate: 0.0,
                interval_count: 0,
                ideal_rate_count: 0,
                consistency: 0.0,
                start_time: 0,
                end_time: 0,
            }
        }
    };

    let rates: Vec<f64> = intervals.iter().map(|i| i.consumption_rate).collect();

    SessionStats {
        total_duration: config
            .timestamp_unit
            .span_seconds(first.timestamp, last.timestamp),
        total_food_consumed: first.food_remaining - last.food_remaining,
        average_rate: mean(&rates).unwrap_or(0.0),
        interval_count: intervals.len(),
        ideal_rate_count: intervals.iter().filter(|i| i.meets_ideal_rate).count(),
        consistency: consistency(&rates, config.ideal_rate),
        start_time: first.timestamp,
        end_time: last.timestamp,
    }
}
