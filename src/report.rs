use chrono::{DateTime, Utc};
use std::fmt;

use crate::config::ScoringConfig;
use crate::engine::ScoringResult;
use crate::pace::generate_pace_indicators;
use crate::sample::TimestampUnit;

/// `m:ss` for a duration in seconds
pub fn format_duration(seconds: f64) -> String {
    let total = seconds.max(0.0).floor() as u64;
    format!("{}:{:02}", total / 60, total % 60)
}

/// Render a session timestamp as UTC wall-clock time, if it maps to one
pub fn format_timestamp(timestamp: i64, unit: TimestampUnit) -> Option<String> {
    let dt: DateTime<Utc> = match unit {
        TimestampUnit::Milliseconds => DateTime::from_timestamp_millis(timestamp)?,
        TimestampUnit::Seconds => DateTime::from_timestamp(timestamp, 0)?,
    };
    Some(dt.format("%Y-%m-%d %H:%M:%S UTC").to_string())
}

/// Plain-text summary of a scoring result with a per-interval breakdown
pub struct Report<'a> {
    pub result: &'a ScoringResult,
    pub config: &'a ScoringConfig,
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Report { result, config } = *self;
        let stats = &result.session_stats;

        writeln!(f, "Final Score: {:.2}", result.total_score)?;
        writeln!(
            f,
            "Base Score: {:.2} x {:.2} duration multiplier",
            result.base_score, result.duration_multiplier
        )?;
        writeln!(f, "Grade: {}", result.grade)?;
        if let Some(started) = format_timestamp(stats.start_time, config.timestamp_unit) {
            writeln!(f, "Started: {started}")?;
        }
        writeln!(f, "Session Duration: {}", format_duration(stats.total_duration))?;
        writeln!(f, "Total Food Consumed: {:.1}%", stats.total_food_consumed)?;
        writeln!(f, "Average Rate: {:.2}%/s", stats.average_rate)?;
        writeln!(
            f,
            "Ideal Rate Intervals: {}/{}",
            stats.ideal_rate_count, stats.interval_count
        )?;
        writeln!(f, "Streaks: {}", result.streaks.len())?;
        writeln!(f, "Consistency: {:.1}%", stats.consistency * 100.0)?;

        if result.intervals.is_empty() {
            return Ok(());
        }

        writeln!(f)?;
        writeln!(f, "Interval Breakdown:")?;
        let indicators = generate_pace_indicators(&result.intervals, config);
        for (i, (interval, pace)) in result.intervals.iter().zip(&indicators).enumerate() {
            writeln!(
                f,
                "  Interval {}: {:.2}%/s ({}) - Score: {:.1}",
                i + 1,
                interval.consumption_rate,
                pace.status,
                interval.score
            )?;
        }
        Ok(())
    }
}

pub fn render_report(result: &ScoringResult, config: &ScoringConfig) -> String {
    Report { result, config }.to_string()
}
