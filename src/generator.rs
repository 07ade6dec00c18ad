//! Synthetic telemetry generation.
//!
//! [`SampleGenerator`] turns a [`SeriesConfig`] and a parameter set into a
//! [`Dataset`] of uniformly sampled readings. Both the random source and
//! the simulation start instant are injectable so output is reproducible
//! under test and from the CLI's `--seed` flag.

use chrono::{DateTime, SecondsFormat, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::channel;
use crate::dataset::{round2, DataPoint, Dataset, DatasetMetadata};
use crate::series::{validate_parameters, ConfigError, ParameterSpec, SeriesConfig};

// Fixed sampling ranges for the auxiliary channels. These are rig-floor
// plausibility ranges, independent of the user-configured parameters.
const BLOCK_POSITION_RANGE: (f64, f64) = (20.0, 30.0);
const STROKE1_RANGE: (f64, f64) = (35.0, 43.0);
const STROKE2_RANGE: (f64, f64) = (30.0, 38.0);
const MUD_FLOW_OUT_RANGE: (f64, f64) = (38.0, 48.0);

/// Generates an ordered series of synthetic drilling readings.
pub struct SampleGenerator<R: Rng> {
    config: SeriesConfig,
    parameters: Vec<ParameterSpec>,
    start_time: DateTime<Utc>,
    rng: R,
}

impl SampleGenerator<StdRng> {
    /// Generator with an entropy-seeded RNG and a start instant of now.
    pub fn new(config: SeriesConfig, parameters: Vec<ParameterSpec>) -> Result<Self, ConfigError> {
        Self::with_rng(config, parameters, StdRng::from_entropy())
    }

    /// Generator with a deterministic seed; same seed, same dataset.
    pub fn seeded(
        config: SeriesConfig,
        parameters: Vec<ParameterSpec>,
        seed: u64,
    ) -> Result<Self, ConfigError> {
        Self::with_rng(config, parameters, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> SampleGenerator<R> {
    /// Generator with a caller-supplied random source.
    pub fn with_rng(
        config: SeriesConfig,
        parameters: Vec<ParameterSpec>,
        rng: R,
    ) -> Result<Self, ConfigError> {
        validate_parameters(&parameters)?;
        Ok(Self {
            config,
            parameters,
            start_time: Utc::now(),
            rng,
        })
    }

    /// Override the simulation start instant (defaults to now).
    pub fn start_time(mut self, start_time: DateTime<Utc>) -> Self {
        self.start_time = start_time;
        self
    }

    /// Produce a dataset with exactly `point_count` points.
    ///
    /// Point `i` is stamped `start + i × interval` and carries the depth
    /// `start_depth + i × increment` on both depth channels. Enabled
    /// parameters are sampled uniformly from their ranges; disabled ones
    /// are omitted entirely.
    pub fn generate(&mut self) -> Dataset {
        let point_count = self.config.point_count();
        let increment = self.config.depth_increment();
        let interval_secs = self.config.time_interval_secs();

        let mut data = Vec::with_capacity(point_count);
        for i in 0..point_count {
            let offset_ms = (i as f64 * interval_secs * 1000.0).round() as i64;
            let timestamp = self.start_time + chrono::Duration::milliseconds(offset_ms);
            let depth = round2(self.config.start_depth() + i as f64 * increment);

            let mut point = DataPoint::new();
            point.insert_text(
                channel::TIMESTAMP,
                timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
            );
            point.insert_number(channel::BIT_DEPTH, depth);
            point.insert_number(channel::HOLE_DEPTH, depth);
            point.insert_number(
                channel::BLOCK_POSITION,
                round2(sample_uniform(&mut self.rng, BLOCK_POSITION_RANGE)),
            );
            point.insert_number(
                channel::STROKE1,
                round2(sample_uniform(&mut self.rng, STROKE1_RANGE)),
            );
            point.insert_number(
                channel::STROKE2,
                round2(sample_uniform(&mut self.rng, STROKE2_RANGE)),
            );
            point.insert_number(channel::STROKE3, 0.0);
            point.insert_number(
                channel::MUD_FLOW_OUT,
                round2(sample_uniform(&mut self.rng, MUD_FLOW_OUT_RANGE)),
            );

            for param in self.parameters.iter().filter(|p| p.enabled) {
                let value = param.min + self.rng.gen::<f64>() * (param.max - param.min);
                point.insert_number(&param.name, round2(value));
            }

            data.push(point);
        }

        Dataset {
            metadata: DatasetMetadata {
                point_count,
                start_depth: self.config.start_depth(),
                end_depth: self.config.end_depth(),
                time_interval_seconds: interval_secs,
                generated_at: self.start_time.to_rfc3339_opts(SecondsFormat::Millis, true),
            },
            parameters: self
                .parameters
                .iter()
                .filter(|p| p.enabled)
                .cloned()
                .collect(),
            data,
        }
    }
}

fn sample_uniform<R: Rng>(rng: &mut R, (min, max): (f64, f64)) -> f64 {
    min + rng.gen::<f64>() * (max - min)
}
