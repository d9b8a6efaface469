use serde::Serialize;

use crate::config::{ConfigPatch, ScoringConfig};
use crate::error::Result;
use crate::grade::{duration_multiplier, grade, Grade};
use crate::interval::{derive_intervals, prepare_samples, score_intervals, IntervalData};
use crate::pace::{generate_pace_indicators, PaceIndicator};
use crate::sample::FoodSample;
use crate::stats::{session_stats, SessionStats};
use crate::streak::{apply_streak_bonuses, StreakInfo};
use crate::visualization::{generate_visualization_data, VisualizationData};

/// Complete output of one scoring call
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoringResult {
    /// `base_score * duration_multiplier`
    pub total_score: f64,
    /// Sum of all interval scores, streak bonuses included
    pub base_score: f64,
    pub duration_multiplier: f64,
    pub intervals: Vec<IntervalData>,
    pub streaks: Vec<StreakInfo>,
    pub session_stats: SessionStats,
    pub grade: Grade,
}

/// Holds the current scoring configuration; every call is a pure function of
/// that configuration and its input.
#[derive(Debug, Clone, Default)]
pub struct ScoringEngine {
    config: ScoringConfig,
}

impl ScoringEngine {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    /// Default configuration with `patch` applied
    pub fn with_patch(patch: ConfigPatch) -> Self {
        Self::new(ScoringConfig::default().with(patch))
    }

    pub fn calculate_score(&self, samples: &[FoodSample]) -> Result<ScoringResult> {
        let config = &self.config;

        let sorted = prepare_samples(samples)?;
        let raw = derive_intervals(&sorted, config);
        tracing::debug!(
            samples = sorted.len(),
            intervals = raw.len(),
            dropped = sorted.len() - 1 - raw.len(),
            "derived intervals"
        );

        let scored = score_intervals(&raw, config);
        let (intervals, streaks) = apply_streak_bonuses(&scored, &config.streak_bonus);

        let base_score: f64 = intervals.iter().map(|i| i.score).sum();
        let session_stats = session_stats(&sorted, &intervals, config);
        let duration_multiplier =
            duration_multiplier(session_stats.total_duration, &config.duration_multiplier);
        let total_score = base_score * duration_multiplier;
        let grade = grade(total_score, &session_stats);

        tracing::debug!(
            algorithm = %config.scoring_algorithm,
            base_score,
            duration_multiplier,
            total_score,
            streaks = streaks.len(),
            %grade,
            "scored session"
        );

        Ok(ScoringResult {
            total_score,
            base_score,
            duration_multiplier,
            intervals,
            streaks,
            session_stats,
            grade,
        })
    }

    pub fn generate_pace_indicators(&self, intervals: &[IntervalData]) -> Vec<PaceIndicator> {
        generate_pace_indicators(intervals, &self.config)
    }

    pub fn generate_visualization_data(&self, result: &ScoringResult) -> VisualizationData {
        generate_visualization_data(result, &self.config)
    }

    /// Shallow-merge `patch` into the current configuration
    pub fn update_config(&mut self, patch: ConfigPatch) {
        self.config.apply(patch);
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Owned snapshot of the configuration; changing it leaves the engine alone
    pub fn get_config(&self) -> ScoringConfig {
        self.config.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::ScoringAlgorithm;
    use crate::config::{DurationMultiplierConfig, StreakBonusConfig, ThresholdValues};
    use crate::error::ScoringError;
    use assert_matches::assert_matches;

    fn samples(raw: &[(i64, f64)]) -> Vec<FoodSample> {
        raw.iter().copied().map(FoodSample::from).collect()
    }

    /// Engine accepting one-second intervals, the granularity most fixtures use
    fn engine(patch: ConfigPatch) -> ScoringEngine {
        let mut engine = ScoringEngine::with_patch(ConfigPatch {
            min_interval_duration: Some(1.0),
            ..Default::default()
        });
        engine.update_config(patch);
        engine
    }

    #[test]
    fn test_single_sample_is_insufficient() {
        let result = ScoringEngine::default().calculate_score(&samples(&[(1000, 100.0)]));
        assert_matches!(result, Err(ScoringError::InsufficientData { found: 1 }));
    }

    #[test]
    fn test_ideal_rate_scores_100_under_both_algorithms() {
        for algorithm in [ScoringAlgorithm::Exponential, ScoringAlgorithm::Threshold] {
            let engine = engine(ConfigPatch {
                ideal_rate: Some(1.0),
                tolerance: Some(0.1),
                scoring_algorithm: Some(algorithm),
                ..Default::default()
            });
            let result = engine
                .calculate_score(&samples(&[(1000, 100.0), (2000, 99.0)]))
                .unwrap();
            assert_eq!(result.intervals[0].score, 100.0, "{algorithm}");
        }
    }

    #[test]
    fn test_threshold_scoring_below_perfect() {
        let engine = engine(ConfigPatch {
            ideal_rate: Some(1.0),
            tolerance: Some(0.1),
            scoring_algorithm: Some(ScoringAlgorithm::Threshold),
            threshold_values: Some(ThresholdValues {
                excellent: 0.5,
                good: 1.0,
                fair: 2.0,
                poor: 5.0,
            }),
            ..Default::default()
        });
        let result = engine
            .calculate_score(&samples(&[(1000, 100.0), (2000, 90.0)]))
            .unwrap();
        // deviation 9.0 is beyond every band
        assert_eq!(result.intervals[0].score, 20.0);
    }

    #[test]
    fn test_default_streak_of_three_is_capped() {
        // 1.2 per interval of length: 1.2 * 3 = 3.6, capped at 2.0
        let engine = engine(ConfigPatch {
            ideal_rate: Some(0.5),
            tolerance: Some(0.1),
            ..Default::default()
        });
        let result = engine
            .calculate_score(&samples(&[
                (1000, 100.0),
                (2000, 99.5),
                (3000, 99.0),
                (4000, 98.5),
                (5000, 95.0),
            ]))
            .unwrap();

        assert_eq!(result.streaks.len(), 1);
        assert_eq!(result.streaks[0].length, 3);
        assert_eq!(result.streaks[0].bonus_multiplier, 2.0);
        assert_eq!(result.streaks[0].bonus_points, 300.0);
        assert_eq!(result.intervals[0].score, 200.0);
    }

    #[test]
    fn test_streak_multiplier_is_per_length_rate() {
        let engine = engine(ConfigPatch {
            ideal_rate: Some(0.5),
            tolerance: Some(0.1),
            streak_bonus: Some(StreakBonusConfig {
                min_streak_length: 3,
                bonus_multiplier: 0.4,
                max_bonus_multiplier: 2.0,
            }),
            ..Default::default()
        });
        let result = engine
            .calculate_score(&samples(&[
                (1000, 100.0),
                (2000, 99.5),
                (3000, 99.0),
                (4000, 98.5),
                (5000, 95.0),
            ]))
            .unwrap();

        assert_eq!(result.streaks.len(), 1);
        assert_eq!(result.streaks[0].length, 3);
        assert!((result.streaks[0].bonus_multiplier - 1.2).abs() < 1e-12);
    }

    #[test]
    fn test_streak_of_seven_is_capped() {
        let engine = engine(ConfigPatch {
            ideal_rate: Some(0.5),
            tolerance: Some(0.1),
            ..Default::default()
        });
        let result = engine
            .calculate_score(&samples(&[
                (1000, 100.0),
                (2000, 99.5),
                (3000, 99.0),
                (4000, 98.5),
                (5000, 98.0),
                (6000, 97.5),
                (7000, 97.0),
                (8000, 96.5),
                (9000, 93.0),
            ]))
            .unwrap();

        assert_eq!(result.streaks.len(), 1);
        assert_eq!(result.streaks[0].length, 7);
        assert_eq!(result.streaks[0].bonus_multiplier, 2.0);
    }

    #[test]
    fn test_short_session_multiplier() {
        let engine = engine(ConfigPatch {
            duration_multiplier: Some(DurationMultiplierConfig {
                min_duration: 60.0,
                max_duration: 300.0,
                short_session_multiplier: 0.8,
                long_session_multiplier: 1.2,
            }),
            ..Default::default()
        });
        let result = engine
            .calculate_score(&samples(&[(1000, 100.0), (2000, 99.5), (3000, 99.0)]))
            .unwrap();

        assert_eq!(result.duration_multiplier, 0.8);
        assert!(result.total_score < result.base_score);
    }

    #[test]
    fn test_interpolated_multiplier() {
        let engine = engine(ConfigPatch {
            duration_multiplier: Some(DurationMultiplierConfig {
                min_duration: 10.0,
                max_duration: 60.0,
                short_session_multiplier: 0.8,
                long_session_multiplier: 1.2,
            }),
            ..Default::default()
        });
        let session: Vec<FoodSample> = (0..=30)
            .map(|i| FoodSample::new(1000 + i * 1000, 100.0 - 0.5 * i as f64))
            .collect();
        let result = engine.calculate_score(&session).unwrap();

        assert_eq!(result.session_stats.total_duration, 30.0);
        assert!(result.duration_multiplier > 0.8 && result.duration_multiplier < 1.2);
        assert!((result.duration_multiplier - 0.96).abs() < 1e-12);
    }

    #[test]
    fn test_total_is_base_times_multiplier() {
        let engine = ScoringEngine::default();
        let session: Vec<FoodSample> = (0..10)
            .map(|i| FoodSample::new(i * 7000, 100.0 - 3.0 * i as f64))
            .collect();
        let result = engine.calculate_score(&session).unwrap();

        assert!(result.total_score == result.base_score * result.duration_multiplier);
        let sum: f64 = result.intervals.iter().map(|i| i.score).sum();
        assert_eq!(result.base_score, sum);
    }

    #[test]
    fn test_all_intervals_filtered() {
        let result = ScoringEngine::default()
            .calculate_score(&samples(&[(0, 100.0), (1000, 90.0), (2000, 80.0)]))
            .unwrap();

        assert!(result.intervals.is_empty());
        assert_eq!(result.base_score, 0.0);
        assert_eq!(result.total_score, 0.0);
        assert_eq!(result.session_stats.consistency, 0.0);
        assert_eq!(result.session_stats.total_food_consumed, 20.0);
        assert_eq!(result.grade, Grade::F);
    }

    #[test]
    fn test_unsorted_input_is_sorted() {
        let engine = ScoringEngine::default();
        let ordered = samples(&[(0, 100.0), (10_000, 95.0), (20_000, 90.0)]);
        let shuffled = samples(&[(20_000, 90.0), (0, 100.0), (10_000, 95.0)]);
        assert_eq!(
            engine.calculate_score(&ordered).unwrap(),
            engine.calculate_score(&shuffled).unwrap()
        );
    }

    #[test]
    fn test_update_config_roundtrip() {
        let mut engine = ScoringEngine::default();
        let before = engine.get_config();
        engine.update_config(ConfigPatch {
            ideal_rate: Some(1.0),
            ..Default::default()
        });

        let after = engine.get_config();
        assert_eq!(after.ideal_rate, 1.0);
        assert_eq!(after.tolerance, before.tolerance);
        assert_eq!(after.streak_bonus, before.streak_bonus);
        assert_eq!(after.duration_multiplier, before.duration_multiplier);
    }

    #[test]
    fn test_get_config_is_a_copy() {
        let engine = ScoringEngine::default();
        let mut copy = engine.get_config();
        copy.ideal_rate = 9.0;
        assert_eq!(engine.config().ideal_rate, 0.5);
    }

    #[test]
    fn test_pace_indicators_from_result() {
        let engine = engine(ConfigPatch::default());
        let result = engine
            .calculate_score(&samples(&[
                (1000, 100.0),
                (2000, 99.5),
                (3000, 95.0),
                (4000, 94.9),
                (5000, 94.9),
            ]))
            .unwrap();
        let statuses: Vec<String> = engine
            .generate_pace_indicators(&result.intervals)
            .iter()
            .map(|p| p.status.to_string())
            .collect();

        assert_eq!(statuses, vec!["ideal", "too-fast", "too-slow", "stopped"]);
    }
}
