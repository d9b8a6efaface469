use serde::Serialize;

use crate::config::ScoringConfig;
use crate::engine::ScoringResult;
use crate::interval::IntervalData;
use crate::pace::{generate_pace_indicators, PaceIndicator};

const GOOD_COLOR: &str = "#66bb6a";
const WARN_COLOR: &str = "#ffa726";
const BAD_COLOR: &str = "#ff6b6b";

/// One chart point, keyed by interval start time
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartDataPoint {
    pub x: i64,
    pub y: f64,
    pub label: String,
    pub color: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VisualizationData {
    pub consumption_chart: Vec<ChartDataPoint>,
    pub rate_chart: Vec<ChartDataPoint>,
    pub score_chart: Vec<ChartDataPoint>,
    pub pace_indicators: Vec<PaceIndicator>,
}

fn pace_color(on_pace: bool) -> &'static str {
    if on_pace {
        GOOD_COLOR
    } else {
        WARN_COLOR
    }
}

fn score_color(score: f64) -> &'static str {
    if score >= 80.0 {
        GOOD_COLOR
    } else if score >= 60.0 {
        WARN_COLOR
    } else {
        BAD_COLOR
    }
}

fn pace_series(
    intervals: &[IntervalData],
    label: &str,
    y: impl Fn(&IntervalData) -> f64,
) -> Vec<ChartDataPoint> {
    intervals
        .iter()
        .enumerate()
        .map(|(i, interval)| ChartDataPoint {
            x: interval.start_time,
            y: y(interval),
            label: format!("{label} {}", i + 1),
            color: pace_color(interval.meets_ideal_rate),
        })
        .collect()
}

/// Project a result into chart-ready series. No new scoring happens here.
pub fn generate_visualization_data(
    result: &ScoringResult,
    config: &ScoringConfig,
) -> VisualizationData {
    let intervals = &result.intervals;

    let score_chart = intervals
        .iter()
        .enumerate()
        .map(|(i, interval)| ChartDataPoint {
            x: interval.start_time,
            y: interval.score,
            label: format!("Score {}", i + 1),
            color: score_color(interval.score),
        })
        .collect();

    VisualizationData {
        consumption_chart: pace_series(intervals, "Interval", |i| i.food_consumed),
        rate_chart: pace_series(intervals, "Rate", |i| i.consumption_rate),
        score_chart,
        pace_indicators: generate_pace_indicators(intervals, config),
    }
}
