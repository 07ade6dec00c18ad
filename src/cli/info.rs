use anyhow::{Context, Result};
use std::path::PathBuf;

use witsim::parser;

/// Display information about a telemetry file
pub fn run(file: PathBuf) -> Result<()> {
    if !file.exists() {
        anyhow::bail!("File does not exist: {}", file.display());
    }

    let dataset = parser::parse_file(&file)
        .with_context(|| format!("Failed to parse {}", file.display()))?;
    let metadata = &dataset.metadata;

    println!("Telemetry File Information");
    println!("==========================");
    println!("File: {}", file.display());
    println!();

    println!("Series:");
    println!("  Points: {}", metadata.point_count);
    println!(
        "  Depth span: {} - {} m",
        metadata.start_depth, metadata.end_depth
    );
    println!("  Interval: {} s", metadata.time_interval_seconds);
    println!(
        "  Duration: {:.1} minutes",
        metadata.point_count as f64 * metadata.time_interval_seconds / 60.0
    );
    if !metadata.generated_at.is_empty() {
        println!("  Generated: {}", metadata.generated_at);
    }
    println!();

    if !dataset.parameters.is_empty() {
        println!("Parameters:");
        for param in &dataset.parameters {
            println!(
                "  {:<16} {} ({}, {} - {})",
                param.name, param.label, param.unit, param.min, param.max
            );
        }
        println!();
    }

    if let Some(first) = dataset.data.first() {
        println!("Channels per point: {}", first.len());
        let names: Vec<&str> = first.iter().map(|(name, _)| name.as_str()).collect();
        println!("  {}", names.join(", "));
    }

    Ok(())
}
