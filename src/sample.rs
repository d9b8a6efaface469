use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::Result;

/// One timestamped "food remaining" observation taken during a meal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodSample {
    /// Instant the sample was taken, in the configured [`TimestampUnit`]
    pub timestamp: i64,
    /// Percentage of food remaining on the plate (0-100)
    pub food_remaining: f64,
    /// Detector confidence (0-1); carried through but not scored
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

impl FoodSample {
    pub fn new(timestamp: i64, food_remaining: f64) -> Self {
        Self {
            timestamp,
            food_remaining,
            confidence: None,
        }
    }

    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = Some(confidence);
        self
    }
}

impl From<(i64, f64)> for FoodSample {
    fn from(v: (i64, f64)) -> Self {
        FoodSample::new(v.0, v.1)
    }
}

/// Unit of [`FoodSample::timestamp`]
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    clap::ValueEnum,
    strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TimestampUnit {
    #[default]
    Milliseconds,
    Seconds,
}

impl TimestampUnit {
    /// Seconds elapsed from `start` to `end`. Widened so extreme
    /// timestamps cannot overflow.
    pub fn span_seconds(self, start: i64, end: i64) -> f64 {
        let delta = (i128::from(end) - i128::from(start)) as f64;
        match self {
            TimestampUnit::Milliseconds => delta / 1000.0,
            TimestampUnit::Seconds => delta,
        }
    }
}

/// Load samples from a JSON array or a CSV file with a
/// `timestamp,foodRemaining[,confidence]` header. The format is picked by
/// file extension; anything that isn't `.csv` is read as JSON.
pub fn load_samples<P: AsRef<Path>>(path: P) -> Result<Vec<FoodSample>> {
    let path = path.as_ref();
    let is_csv = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));

    if is_csv {
        let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_path(path)?;
        let samples = reader
            .deserialize::<FoodSample>()
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(samples)
    } else {
        let bytes = fs::read(path)?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}
