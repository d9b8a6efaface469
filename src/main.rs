use clap::{error::ErrorKind, CommandFactory, Parser, Subcommand};
use mealpace::{
    config::{ConfigStore, FileConfigStore},
    demo, pace, report, sample, ConfigPatch, ScoringAlgorithm, ScoringConfig, ScoringEngine,
    TimestampUnit,
};
use serde_json::json;
use std::{error::Error, path::PathBuf};
use tracing_subscriber::EnvFilter;

/// eating pace scoring from food-remaining samples
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Scores how evenly and close to target a meal was eaten, from a time-ordered series of food-remaining samples."
)]
pub struct Cli {
    /// path to the scoring config file (defaults to the platform config dir)
    #[clap(short = 'c', long, global = true)]
    config: Option<PathBuf>,

    /// log scoring stages to stderr
    #[clap(short = 'v', long, global = true)]
    verbose: bool,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// score a session from a JSON or CSV sample file
    Score {
        file: PathBuf,

        #[clap(flatten)]
        overrides: Overrides,

        /// print the full result as JSON
        #[clap(long)]
        json: bool,

        /// include chart-ready visualization data in the JSON output
        #[clap(long, requires = "json")]
        viz: bool,
    },
    /// pace feedback for the most recent intervals of a session
    Pace {
        file: PathBuf,

        #[clap(flatten)]
        overrides: Overrides,

        /// only report the last N intervals
        #[clap(short = 'n', long)]
        last: Option<usize>,

        #[clap(long)]
        json: bool,
    },
    /// score a generated demo session
    Demo {
        /// seed for a jittered session; a steady session is used when absent
        #[clap(short = 's', long)]
        seed: Option<u64>,

        /// number of samples in a jittered session
        #[clap(long, default_value_t = 20)]
        count: usize,

        #[clap(long)]
        json: bool,
    },
    /// show, update, or reset the stored scoring config
    Config {
        #[clap(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    Show,
    Set {
        #[clap(flatten)]
        overrides: Overrides,
    },
    Reset,
}

/// Per-run config overrides; unset flags leave the stored value alone
#[derive(clap::Args, Debug, Clone, Default)]
pub struct Overrides {
    /// ideal consumption rate in %/s
    #[clap(long)]
    ideal_rate: Option<f64>,

    /// allowed deviation from the ideal rate in %/s
    #[clap(long)]
    tolerance: Option<f64>,

    #[clap(long, value_enum)]
    algorithm: Option<ScoringAlgorithm>,

    /// exponential decay factor (0-1)
    #[clap(long)]
    decay: Option<f64>,

    /// minimum interval duration in seconds
    #[clap(long)]
    min_interval: Option<f64>,

    /// maximum interval duration in seconds
    #[clap(long)]
    max_interval: Option<f64>,

    /// unit of the sample timestamps
    #[clap(long, value_enum)]
    timestamp_unit: Option<TimestampUnit>,
}

impl Overrides {
    fn to_patch(&self) -> ConfigPatch {
        ConfigPatch {
            ideal_rate: self.ideal_rate,
            tolerance: self.tolerance,
            scoring_algorithm: self.algorithm,
            exponential_decay: self.decay,
            min_interval_duration: self.min_interval,
            max_interval_duration: self.max_interval,
            timestamp_unit: self.timestamp_unit,
            ..Default::default()
        }
    }
}

impl Cli {
    fn config_store(&self) -> FileConfigStore {
        match &self.config {
            Some(path) => FileConfigStore::with_path(path),
            None => FileConfigStore::new(),
        }
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "mealpace=debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn engine_for(stored: ScoringConfig, overrides: &Overrides) -> ScoringEngine {
    let mut engine = ScoringEngine::new(stored);
    engine.update_config(overrides.to_patch());
    engine
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let store = cli.config_store();

    match cli.command {
        Command::Score {
            file,
            overrides,
            json,
            viz,
        } => {
            let engine = engine_for(store.load(), &overrides);
            let samples = sample::load_samples(&file)?;
            let result = engine.calculate_score(&samples)?;

            if json && viz {
                let output = json!({
                    "result": result,
                    "visualization": engine.generate_visualization_data(&result),
                });
                println!("{}", serde_json::to_string_pretty(&output)?);
            } else if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                print!("{}", report::render_report(&result, engine.config()));
            }
        }
        Command::Pace {
            file,
            overrides,
            last,
            json,
        } => {
            let engine = engine_for(store.load(), &overrides);
            let samples = sample::load_samples(&file)?;
            let result = engine.calculate_score(&samples)?;
            let indicators = pace::recent_pace(
                &result.intervals,
                last.unwrap_or(result.intervals.len()),
                engine.config(),
            );

            if json {
                println!("{}", serde_json::to_string_pretty(&indicators)?);
            } else {
                for p in &indicators {
                    println!(
                        "{:<9} {:+.2}%/s  {}",
                        p.status.to_string(),
                        p.deviation,
                        p.recommendation
                    );
                }
            }
        }
        Command::Demo { seed, count, json } => {
            let (samples, step_ms) = match seed {
                Some(seed) => (
                    demo::jittered_session(seed, count, 0),
                    demo::JITTERED_STEP_MS,
                ),
                None => (demo::steady_session(0), demo::STEADY_STEP_MS),
            };
            let engine = ScoringEngine::new(demo::demo_config(&store.load(), step_ms));
            let result = engine.calculate_score(&samples)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                print!("{}", report::render_report(&result, engine.config()));
            }
        }
        Command::Config { action } => match action {
            ConfigAction::Show => {
                println!("# {}", store.path().display());
                println!("{}", serde_json::to_string_pretty(&store.load())?);
            }
            ConfigAction::Set { overrides } => {
                let updated = store.load().with(overrides.to_patch());
                store.save(&updated)?;
                println!("{}", serde_json::to_string_pretty(&updated)?);
            }
            ConfigAction::Reset => {
                store.save(&ScoringConfig::default())?;
                println!("config reset: {}", store.path().display());
            }
        },
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(err) = run(cli) {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, err).exit();
    }
}
