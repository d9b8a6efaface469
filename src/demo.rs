//! Synthetic sessions for demos and smoke tests.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::{ConfigPatch, ScoringConfig};
use crate::sample::{FoodSample, TimestampUnit};

/// Sample spacing of [`steady_session`], in milliseconds
pub const STEADY_STEP_MS: i64 = 5000;
/// Sample spacing of [`jittered_session`], in milliseconds
pub const JITTERED_STEP_MS: i64 = 3000;

/// 21 samples, 5 seconds apart, eating 5% per step from a full plate
pub fn steady_session(start: i64) -> Vec<FoodSample> {
    (0..=20)
        .map(|i| FoodSample::new(start + i * STEADY_STEP_MS, 100.0 - 5.0 * i as f64))
        .collect()
}

/// `count` samples 3 seconds apart, eating 2.5% ± 0.75% per step.
/// The same seed always produces the same session.
pub fn jittered_session(seed: u64, count: usize, start: i64) -> Vec<FoodSample> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut remaining: f64 = 100.0;

    (0..count)
        .map(|i| {
            let consumption = (2.5_f64 + rng.gen_range(-0.75..0.75)).max(0.0);
            remaining = (remaining - consumption).max(0.0);
            FoodSample::new(start + i as i64 * JITTERED_STEP_MS, remaining)
                .with_confidence(rng.gen_range(0.9..1.0))
        })
        .collect()
}

/// `stored` adjusted so demo samples spaced `step_ms` apart survive the
/// interval duration filter. Demo timestamps are always milliseconds.
pub fn demo_config(stored: &ScoringConfig, step_ms: i64) -> ScoringConfig {
    let step = TimestampUnit::Milliseconds.span_seconds(0, step_ms);
    stored.with(ConfigPatch {
        timestamp_unit: Some(TimestampUnit::Milliseconds),
        min_interval_duration: Some(stored.min_interval_duration.min(step)),
        max_interval_duration: Some(stored.max_interval_duration.max(step)),
        ..Default::default()
    })
}
