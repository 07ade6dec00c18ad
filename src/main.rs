//! # witsim CLI
//!
//! A command-line tool for generating, inspecting, and replaying simulated
//! WITSML-style drilling telemetry files.
//!
//! ## Usage
//!
//! ```bash
//! # Generate 100 points of XML + JSON into the current directory
//! witsim generate
//!
//! # Generate a reproducible 500-point XML file
//! witsim generate out/ --points 500 --format xml --seed 42
//!
//! # Inspect a telemetry file
//! witsim info witsml-data-1754550000000.xml
//!
//! # Replay a file at 10x speed
//! witsim play witsml-data-1754550000000.xml --speed 10
//! ```

use anyhow::Result;
use clap::Parser;

mod cli;

fn main() -> Result<()> {
    let args = cli::Cli::parse();
    cli::init_logging(args.verbosity());
    cli::dispatch(args)
}
