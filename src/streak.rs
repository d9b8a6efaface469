use serde::{Deserialize, Serialize};

use crate::config::StreakBonusConfig;
use crate::interval::IntervalData;

/// A maximal run of on-pace intervals long enough to earn a bonus
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreakInfo {
    /// Inclusive index into the interval sequence
    pub start_index: usize,
    /// Inclusive index into the interval sequence
    pub end_index: usize,
    pub length: usize,
    /// Multiplier actually applied, after the cap
    pub bonus_multiplier: f64,
    pub bonus_points: f64,
}

/// Detect streaks in already-scored intervals and return the bonus-adjusted
/// intervals alongside the streaks found.
///
/// Each interval inside a streak gains `score * (multiplier - 1)` where the
/// multiplier is `bonus_multiplier * length` capped at `max_bonus_multiplier`.
pub fn apply_streak_bonuses(
    intervals: &[IntervalData],
    config: &StreakBonusConfig,
) -> (Vec<IntervalData>, Vec<StreakInfo>) {
    let mut adjusted = intervals.to_vec();
    let mut streaks = Vec::new();

    let mut run_start = 0;
    let mut run_length = 0;

    for (i, interval) in intervals.iter().enumerate() {
        if interval.meets_ideal_rate {
            if run_length == 0 {
                run_start = i;
            }
            run_length += 1;
        } else {
            if let Some(streak) = close_run(&mut adjusted, run_start, run_length, config) {
                streaks.push(streak);
            }
            run_length = 0;
        }
    }

    // a run reaching the last interval closes here
    if let Some(streak) = close_run(&mut adjusted, run_start, run_length, config) {
        streaks.push(streak);
    }

    (adjusted, streaks)
}

fn close_run(
    intervals: &mut [IntervalData],
    start: usize,
    length: usize,
    config: &StreakBonusConfig,
) -> Option<StreakInfo> {
    if length == 0 || length < config.min_streak_length {
        return None;
    }

    let bonus_multiplier =
        (config.bonus_multiplier * length as f64).min(config.max_bonus_multiplier);

    let mut bonus_points = 0.0;
    for interval in &mut intervals[start..start + length] {
        let bonus = interval.score * (bonus_multiplier - 1.0);
        interval.score += bonus;
        bonus_points += bonus;
    }

    tracing::debug!(start, length, bonus_multiplier, bonus_points, "streak found");

    Some(StreakInfo {
        start_index: start,
        end_index: start + length - 1,
        length,
        bonus_multiplier,
        bonus_points,
    })
}
