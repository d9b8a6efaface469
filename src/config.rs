use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::algorithm::ScoringAlgorithm;
use crate::error::Result;
use crate::sample::TimestampUnit;

/// Deviation band widths layered on top of the tolerance for threshold scoring.
/// Each band is compared against `tolerance + band` on its own.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ThresholdValues {
    pub excellent: f64,
    pub good: f64,
    pub fair: f64,
    pub poor: f64,
}

impl Default for ThresholdValues {
    fn default() -> Self {
        Self {
            excellent: 0.1,
            good: 0.2,
            fair: 0.4,
            poor: 0.6,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StreakBonusConfig {
    /// Minimum consecutive on-pace intervals before a run counts as a streak
    pub min_streak_length: usize,
    /// Multiplier earned per interval of streak length
    pub bonus_multiplier: f64,
    pub max_bonus_multiplier: f64,
}

impl Default for StreakBonusConfig {
    fn default() -> Self {
        Self {
            min_streak_length: 3,
            bonus_multiplier: 1.2,
            max_bonus_multiplier: 2.0,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DurationMultiplierConfig {
    /// Session length in seconds below which the short multiplier applies
    pub min_duration: f64,
    /// Session length in seconds above which the long multiplier applies
    pub max_duration: f64,
    pub short_session_multiplier: f64,
    pub long_session_multiplier: f64,
}

impl Default for DurationMultiplierConfig {
    fn default() -> Self {
        Self {
            min_duration: 60.0,
            max_duration: 1800.0,
            short_session_multiplier: 0.8,
            long_session_multiplier: 1.2,
        }
    }
}

/// Scoring parameters. Rates are in percentage points per second,
/// durations in seconds.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ScoringConfig {
    pub ideal_rate: f64,
    pub tolerance: f64,
    pub min_interval_duration: f64,
    pub max_interval_duration: f64,
    pub scoring_algorithm: ScoringAlgorithm,
    pub exponential_decay: f64,
    pub threshold_values: ThresholdValues,
    pub streak_bonus: StreakBonusConfig,
    pub duration_multiplier: DurationMultiplierConfig,
    pub timestamp_unit: TimestampUnit,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            ideal_rate: 0.5,
            tolerance: 0.2,
            min_interval_duration: 5.0,
            max_interval_duration: 60.0,
            scoring_algorithm: ScoringAlgorithm::Exponential,
            exponential_decay: 0.8,
            threshold_values: ThresholdValues::default(),
            streak_bonus: StreakBonusConfig::default(),
            duration_multiplier: DurationMultiplierConfig::default(),
            timestamp_unit: TimestampUnit::Milliseconds,
        }
    }
}

impl ScoringConfig {
    /// Return a new config with the fields present in `patch` replaced.
    pub fn with(&self, patch: ConfigPatch) -> Self {
        let mut next = self.clone();
        next.apply(patch);
        next
    }

    /// Shallow merge: nested objects are swapped wholesale, never deep-merged.
    pub fn apply(&mut self, patch: ConfigPatch) {
        let ConfigPatch {
            ideal_rate,
            tolerance,
            min_interval_duration,
            max_interval_duration,
            scoring_algorithm,
            exponential_decay,
            threshold_values,
            streak_bonus,
            duration_multiplier,
            timestamp_unit,
        } = patch;

        if let Some(v) = ideal_rate {
            self.ideal_rate = v;
        }
        if let Some(v) = tolerance {
            self.tolerance = v;
        }
        if let Some(v) = min_interval_duration {
            self.min_interval_duration = v;
        }
        if let Some(v) = max_interval_duration {
            self.max_interval_duration = v;
        }
        if let Some(v) = scoring_algorithm {
            self.scoring_algorithm = v;
        }
        if let Some(v) = exponential_decay {
            self.exponential_decay = v;
        }
        if let Some(v) = threshold_values {
            self.threshold_values = v;
        }
        if let Some(v) = streak_bonus {
            self.streak_bonus = v;
        }
        if let Some(v) = duration_multiplier {
            self.duration_multiplier = v;
        }
        if let Some(v) = timestamp_unit {
            self.timestamp_unit = v;
        }
    }
}

/// Partial update for [`ScoringConfig`]; `None` leaves a field untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ConfigPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ideal_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tolerance: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_interval_duration: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_interval_duration: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scoring_algorithm: Option<ScoringAlgorithm>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exponential_decay: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threshold_values: Option<ThresholdValues>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub streak_bonus: Option<StreakBonusConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_multiplier: Option<DurationMultiplierConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp_unit: Option<TimestampUnit>,
}

impl ConfigPatch {
    pub fn is_empty(&self) -> bool {
        *self == ConfigPatch::default()
    }
}

pub trait ConfigStore {
    fn load(&self) -> ScoringConfig;
    fn save(&self, cfg: &ScoringConfig) -> Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    pub fn new() -> Self {
        let path = if let Some(pd) = ProjectDirs::from("", "", "mealpace") {
            pd.config_dir().join("scoring.json")
        } else {
            PathBuf::from("mealpace_scoring.json")
        };
        Self { path }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> ScoringConfig {
        match fs::read(&self.path) {
            Ok(bytes) => match serde_json::from_slice::<ScoringConfig>(&bytes) {
                Ok(cfg) => cfg,
                Err(err) => {
                    tracing::warn!(path = %self.path.display(), %err, "ignoring unreadable config");
                    ScoringConfig::default()
                }
            },
            Err(_) => ScoringConfig::default(),
        }
    }

    fn save(&self, cfg: &ScoringConfig) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(cfg)?;
        fs::write(&self.path, data)?;
        Ok(())
    }
}
