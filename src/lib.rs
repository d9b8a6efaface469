// Library surface: the scoring engine and the helpers the CLI builds on.
// The engine itself does no I/O; loading and persistence live in sample/config.
pub mod algorithm;
pub mod config;
pub mod demo;
pub mod engine;
pub mod error;
pub mod grade;
pub mod interval;
pub mod pace;
pub mod report;
pub mod sample;
pub mod stats;
pub mod streak;
pub mod visualization;

pub use algorithm::ScoringAlgorithm;
pub use config::{ConfigPatch, ScoringConfig};
pub use engine::{ScoringEngine, ScoringResult};
pub use error::ScoringError;
pub use grade::Grade;
pub use interval::IntervalData;
pub use pace::{PaceIndicator, PaceStatus};
pub use sample::{FoodSample, TimestampUnit};
pub use stats::SessionStats;
pub use streak::StreakInfo;
pub use visualization::{ChartDataPoint, VisualizationData};
