use anyhow::{Context, Result};
use log::info;
use std::path::PathBuf;

use witsim::playback::{PlaybackController, PlaybackStatus};
use witsim::parser;

/// Replay a telemetry file point-by-point at the dataset's own cadence.
pub fn run(file: PathBuf, speed: f64, instant: bool) -> Result<()> {
    let dataset = parser::parse_file(&file)
        .with_context(|| format!("Failed to parse {}", file.display()))?;

    info!(
        "Replaying {} points at {}x{}",
        dataset.len(),
        speed,
        if instant { " (instant)" } else { "" }
    );

    let mut controller = PlaybackController::with_dataset(dataset);
    controller.set_speed(speed);

    println!("{:>5}  {:<24}  {:>10}  {:>8}  {:>9}  {:>9}", "#", "time", "depth m", "rop", "torque", "psi");
    print_row(&controller);

    controller.play().context("Cannot start playback")?;
    while controller.status() == PlaybackStatus::Playing {
        if !instant {
            if let Some(interval) = controller.tick_interval() {
                std::thread::sleep(interval);
            }
        }
        if controller.tick().is_some() {
            print_row(&controller);
        }
    }

    info!(
        "Replay finished: visited {} points, history window holds {} rows",
        controller.cursor() + 1,
        controller.display().history().len()
    );
    Ok(())
}

fn print_row(controller: &PlaybackController) {
    let current = controller.display().current();
    println!(
        "{:>5}  {:<24}  {:>10.2}  {:>8.2}  {:>9.2}  {:>9.2}",
        controller.cursor(),
        current.timestamp,
        current.bit_depth,
        current.rop,
        current.torque,
        current.pump_pressure,
    );
}
