//! Core data model: points, metadata, and the dataset bundle.
//!
//! A [`DataPoint`] is an insertion-ordered mapping from channel name to
//! value. Values are numeric for measurements and raw text for anything
//! that does not parse as a float (the ISO-8601 `timestamp` index, or
//! free-form tags in hand-edited files). Points are created once by the
//! generator or the parser and never mutated afterward.

use chrono::DateTime;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

use crate::channel;
use crate::series::ParameterSpec;


/// Round a channel value to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// One telemetry reading: channel name → value, in insertion order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DataPoint {
    channels: Map<String, Value>,
}

impl DataPoint {
    /// Create an empty point.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a numeric channel value.
    ///
    /// Non-finite values have no JSON representation and are dropped.
    pub fn insert_number(&mut self, name: impl Into<String>, value: f64) {
        if let Some(number) = Number::from_f64(value) {
            self.channels.insert(name.into(), Value::Number(number));
        }
    }

    /// Insert a raw text channel value.
    pub fn insert_text(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.channels.insert(name.into(), Value::String(value.into()));
    }

    /// Raw value for a channel, if present.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.channels.get(name)
    }

    /// Numeric value for a channel.
    ///
    /// Text values that parse as a float are coerced; anything else is `None`.
    pub fn number(&self, name: &str) -> Option<f64> {
        match self.channels.get(name)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Text value for a channel.
    pub fn text(&self, name: &str) -> Option<&str> {
        match self.channels.get(name)? {
            Value::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// The time index of this point, under either spelling.
    pub fn timestamp(&self) -> Option<&str> {
        self.text(channel::TIMESTAMP).or_else(|| self.text("TIME"))
    }

    /// Whether the point carries the named channel.
    pub fn contains(&self, name: &str) -> bool {
        self.channels.contains_key(name)
    }

    /// Iterate channels in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.channels.iter()
    }

    /// Number of channels in the point.
    pub fn len(&self) -> usize {
        self.channels.len()
    }

    /// Whether the point has no channels.
    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }
}

/// Dataset-level facts: series shape and provenance.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DatasetMetadata {
    /// Number of points in the dataset.
    pub point_count: usize,
    /// Depth of the first point, meters.
    pub start_depth: f64,
    /// Depth of the last configured point, meters.
    pub end_depth: f64,
    /// Seconds between consecutive points.
    pub time_interval_seconds: f64,
    /// ISO-8601 instant the dataset was generated.
    pub generated_at: String,
}

/// A complete telemetry dataset: metadata, the enabled parameter specs,
/// and the ordered point sequence. Produced wholesale by generation or
/// parsing, read-only afterward.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    /// Series shape and provenance.
    #[serde(default)]
    pub metadata: DatasetMetadata,
    /// Enabled parameter specs, in configuration order.
    #[serde(default)]
    pub parameters: Vec<ParameterSpec>,
    /// Ordered point sequence.
    pub data: Vec<DataPoint>,
}

impl Dataset {
    /// Number of points.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the dataset has no points.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// An empty dataset; playback treats it as "nothing loaded".
    pub fn empty() -> Self {
        Self {
            metadata: DatasetMetadata::default(),
            parameters: Vec::new(),
            data: Vec::new(),
        }
    }

    /// Fill in metadata derivable from the points themselves.
    ///
    /// Parsed XML files (and JSON files without a metadata block) carry no
    /// explicit series facts; the point count, depth span, and replay
    /// interval are recovered from the data so the file can be replayed at
    /// its native cadence.
    pub fn derive_metadata(&mut self) {
        self.metadata.point_count = self.data.len();

        let depth_of = |point: &DataPoint| {
            point
                .number(channel::BIT_DEPTH)
                .or_else(|| point.number("DBTM"))
        };
        if let Some(first) = self.data.first().and_then(depth_of) {
            self.metadata.start_depth = first;
        }
        if let Some(last) = self.data.last().and_then(depth_of) {
            self.metadata.end_depth = last;
        }

        if self.metadata.time_interval_seconds <= 0.0 {
            self.metadata.time_interval_seconds = self.observed_interval().unwrap_or(1.0);
        }
        if self.metadata.generated_at.is_empty() {
            if let Some(first) = self.data.first().and_then(DataPoint::timestamp) {
                self.metadata.generated_at = first.to_string();
            }
        }
    }

    /// Seconds between the first two points, from their timestamps.
    fn observed_interval(&self) -> Option<f64> {
        let first = DateTime::parse_from_rfc3339(self.data.first()?.timestamp()?).ok()?;
        let second = DateTime::parse_from_rfc3339(self.data.get(1)?.timestamp()?).ok()?;
        let secs = (second - first).num_milliseconds() as f64 / 1000.0;
        (secs > 0.0).then_some(secs)
    }
}
