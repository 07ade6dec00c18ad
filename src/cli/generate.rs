use anyhow::{Context, Result};
use chrono::Utc;
use log::info;
use std::path::PathBuf;

use witsim::generator::SampleGenerator;
use witsim::serializer;
use witsim::series::{default_parameters, SeriesConfig};

use super::config::Config;
use super::FormatArg;

/// Generate a synthetic dataset and write it to disk.
#[allow(clippy::too_many_arguments)]
pub fn run(
    output: PathBuf,
    points: Option<usize>,
    start_depth: Option<f64>,
    end_depth: Option<f64>,
    interval: Option<f64>,
    format: FormatArg,
    seed: Option<u64>,
    config: Option<PathBuf>,
) -> Result<()> {
    let file_config = match config {
        Some(path) => Config::from_file(&path)?,
        None => Config::default(),
    };

    // CLI flags win over the config file; the file wins over defaults.
    let defaults = SeriesConfig::default();
    let series = SeriesConfig::new(
        points
            .or(file_config.series.points)
            .unwrap_or(defaults.point_count()),
        start_depth
            .or(file_config.series.start_depth)
            .unwrap_or(defaults.start_depth()),
        end_depth
            .or(file_config.series.end_depth)
            .unwrap_or(defaults.end_depth()),
        interval
            .or(file_config.series.interval_secs)
            .unwrap_or(defaults.time_interval_secs()),
    )
    .context("Invalid series configuration")?;

    let parameters = file_config.apply_parameters(default_parameters());

    let mut generator = match seed {
        Some(seed) => SampleGenerator::seeded(series, parameters, seed),
        None => SampleGenerator::new(series, parameters),
    }
    .context("Invalid parameter configuration")?;

    info!(
        "Generating {} points over {}-{} m at {}s intervals...",
        series.point_count(),
        series.start_depth(),
        series.end_depth(),
        series.time_interval_secs()
    );
    let dataset = generator.generate();

    if !output.exists() {
        std::fs::create_dir_all(&output)
            .with_context(|| format!("Failed to create output directory {}", output.display()))?;
    }

    let stamp = Utc::now().timestamp_millis();
    if matches!(format, FormatArg::Xml | FormatArg::Both) {
        let text = serializer::to_xml(&dataset).context("Failed to serialize XML")?;
        let path = output.join(format!("witsml-data-{stamp}.xml"));
        std::fs::write(&path, &text)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        info!("  Wrote {} ({} bytes)", path.display(), text.len());
    }
    if matches!(format, FormatArg::Json | FormatArg::Both) {
        let text = serializer::to_json(&dataset).context("Failed to serialize JSON")?;
        let path = output.join(format!("witsml-data-{stamp}.json"));
        std::fs::write(&path, &text)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        info!("  Wrote {} ({} bytes)", path.display(), text.len());
    }

    info!(
        "Generation complete: {} points, {} parameters",
        dataset.len(),
        dataset.parameters.len()
    );
    Ok(())
}
