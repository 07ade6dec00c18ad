use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

mod config;
mod generate;
mod info;
mod play;

/// witsim - Simulated WITSML Drilling Telemetry
#[derive(Parser)]
#[command(name = "witsim")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Output format for generated files.
#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum FormatArg {
    /// WITSML-style XML log document
    Xml,
    /// JSON dataset document
    Json,
    /// Both formats
    #[default]
    Both,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a synthetic telemetry dataset and write it to disk
    Generate {
        /// Output directory for generated files
        #[arg(value_name = "DIR", default_value = ".")]
        output: PathBuf,

        /// Number of data points (10-10000)
        #[arg(short = 'n', long)]
        points: Option<usize>,

        /// Start depth in meters
        #[arg(long)]
        start_depth: Option<f64>,

        /// End depth in meters
        #[arg(long)]
        end_depth: Option<f64>,

        /// Seconds between readings
        #[arg(short = 'i', long)]
        interval: Option<f64>,

        /// Output format (xml, json, both)
        #[arg(short = 'f', long, default_value = "both", value_enum)]
        format: FormatArg,

        /// RNG seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,

        /// Load series and parameter overrides from a TOML config file
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,
    },

    /// Display information about a telemetry file
    Info {
        /// Input .xml or .json file path
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Replay a telemetry file point-by-point
    Play {
        /// Input .xml or .json file path
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Speed multiplier for the replay cadence
        #[arg(short = 's', long, default_value = "1.0")]
        speed: f64,

        /// Skip pacing sleeps and replay as fast as possible
        #[arg(long)]
        instant: bool,
    },
}

impl Cli {
    /// The `-v` count.
    pub fn verbosity(&self) -> u8 {
        self.verbose
    }
}

/// Initialize env_logger from the `-v` count (warn/info/debug).
pub fn init_logging(verbosity: u8) {
    let log_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
}

/// Route a parsed command line to its subcommand.
pub fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Generate {
            output,
            points,
            start_depth,
            end_depth,
            interval,
            format,
            seed,
            config,
        } => generate::run(
            output,
            points,
            start_depth,
            end_depth,
            interval,
            format,
            seed,
            config,
        ),
        Commands::Info { file } => info::run(file),
        Commands::Play {
            file,
            speed,
            instant,
        } => play::run(file, speed, instant),
    }
}
