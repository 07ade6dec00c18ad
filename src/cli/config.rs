//! TOML configuration file support for the generate command.
//!
//! Instead of passing many CLI flags, users can keep a config file:
//!
//! ```toml
//! # witsim.toml
//! [series]
//! points = 500
//! start_depth = 6400.0
//! end_depth = 6500.0
//! interval_secs = 1.0
//!
//! [[parameter]]
//! name = "torque"
//! min = 7000.0
//! max = 8000.0
//!
//! [[parameter]]
//! name = "gammaRay"
//! label = "Gamma Ray"
//! min = 20.0
//! max = 150.0
//! unit = "gAPI"
//! ```
//!
//! Known parameter names override fields of the default set; unknown names
//! are appended as new parameters. Explicit CLI flags win over the file.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use witsim::series::ParameterSpec;

/// Root configuration structure for witsim.toml files.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Series shape overrides.
    #[serde(default)]
    pub series: SeriesOverrides,

    /// Parameter overrides and additions.
    #[serde(default)]
    pub parameter: Vec<ParameterOverride>,
}

/// Overrides for the series shape.
#[derive(Debug, Default, Deserialize)]
pub struct SeriesOverrides {
    /// Number of data points.
    pub points: Option<usize>,

    /// Start depth in meters.
    pub start_depth: Option<f64>,

    /// End depth in meters.
    pub end_depth: Option<f64>,

    /// Seconds between readings.
    pub interval_secs: Option<f64>,
}

/// Partial parameter spec merged over the defaults by name.
#[derive(Debug, Deserialize)]
pub struct ParameterOverride {
    /// Canonical parameter name.
    pub name: String,
    /// Human-readable label.
    pub label: Option<String>,
    /// Lower bound of the sampled range.
    pub min: Option<f64>,
    /// Upper bound of the sampled range.
    pub max: Option<f64>,
    /// Unit of measure.
    pub unit: Option<String>,
    /// Whether the parameter is sampled at all.
    pub enabled: Option<bool>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML configuration")
    }

    /// Merge the parameter overrides over a base set.
    pub fn apply_parameters(&self, mut base: Vec<ParameterSpec>) -> Vec<ParameterSpec> {
        for over in &self.parameter {
            match base.iter_mut().find(|p| p.name == over.name) {
                Some(spec) => {
                    if let Some(label) = &over.label {
                        spec.label = label.clone();
                    }
                    if let Some(min) = over.min {
                        spec.min = min;
                    }
                    if let Some(max) = over.max {
                        spec.max = max;
                    }
                    if let Some(unit) = &over.unit {
                        spec.unit = unit.clone();
                    }
                    if let Some(enabled) = over.enabled {
                        spec.enabled = enabled;
                    }
                }
                None => base.push(ParameterSpec {
                    name: over.name.clone(),
                    label: over.label.clone().unwrap_or_else(|| over.name.clone()),
                    min: over.min.unwrap_or(0.0),
                    max: over.max.unwrap_or(0.0),
                    unit: over.unit.clone().unwrap_or_default(),
                    enabled: over.enabled.unwrap_or(true),
                }),
            }
        }
        base
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use witsim::series::default_parameters;

    #[test]
    fn test_parse_config() {
        let toml = r#"
            [series]
            points = 500
            start_depth = 6000.0
            end_depth = 6200.0
            interval_secs = 0.5

            [[parameter]]
            name = "torque"
            min = 7000.0
            max = 8000.0
        "#;

        let config = Config::from_str(toml).unwrap();
        assert_eq!(config.series.points, Some(500));
        assert_eq!(config.series.interval_secs, Some(0.5));
        assert_eq!(config.parameter.len(), 1);
    }

    #[test]
    fn test_empty_config() {
        let config = Config::from_str("").unwrap();
        assert_eq!(config.series.points, None);
        assert!(config.parameter.is_empty());
    }

    #[test]
    fn known_parameter_is_overridden_in_place() {
        let toml = r#"
            [[parameter]]
            name = "torque"
            min = 7000.0
            max = 8000.0
            enabled = false
        "#;
        let config = Config::from_str(toml).unwrap();
        let params = config.apply_parameters(default_parameters());

        let torque = params.iter().find(|p| p.name == "torque").unwrap();
        assert_eq!(torque.min, 7000.0);
        assert_eq!(torque.max, 8000.0);
        assert!(!torque.enabled);
        // Untouched fields keep their defaults.
        assert_eq!(torque.unit, "ft-lbs");
        assert_eq!(params.len(), 9);
    }

    #[test]
    fn unknown_parameter_is_appended() {
        let toml = r#"
            [[parameter]]
            name = "gammaRay"
            label = "Gamma Ray"
            min = 20.0
            max = 150.0
            unit = "gAPI"
        "#;
        let config = Config::from_str(toml).unwrap();
        let params = config.apply_parameters(default_parameters());

        assert_eq!(params.len(), 10);
        let gamma = params.last().unwrap();
        assert_eq!(gamma.name, "gammaRay");
        assert_eq!(gamma.label, "Gamma Ray");
        assert!(gamma.enabled);
    }
}
