//! # witsim - Simulated WITSML Drilling Telemetry
//!
//! `witsim` synthesizes drilling surface telemetry in a simplified,
//! WITSML-inspired shape, serializes it to XML or JSON, re-parses such
//! files, and replays them point-by-point to drive a live-looking display.
//!
//! ## Key Pieces
//!
//! - **Generator**: uniform sampling of user-configured parameter ranges
//!   over a depth/time series, with an injectable RNG for reproducibility.
//!
//! - **Serializer**: pure dataset → text writers for pretty JSON and a
//!   WITSML v2-style XML log document with a declared channel list.
//!
//! - **Parser**: extension-sniffed reading of those files back into a
//!   dataset, recovering channel declarations and the replay cadence.
//!
//! - **Playback**: a tick-driven cursor with play/pause/reset/speed
//!   controls feeding a bounded display window.
//!
//! ## Quick Start - Generate and Serialize
//!
//! ```rust
//! use witsim::generator::SampleGenerator;
//! use witsim::series::{default_parameters, SeriesConfig};
//! use witsim::serializer;
//!
//! let config = SeriesConfig::new(100, 6400.0, 6500.0, 1.0)?;
//! let mut generator = SampleGenerator::seeded(config, default_parameters(), 42)?;
//! let dataset = generator.generate();
//!
//! let xml = serializer::to_xml(&dataset).expect("serialize");
//! let json = serializer::to_json(&dataset).expect("serialize");
//! # let _ = (xml, json);
//! # Ok::<(), witsim::series::ConfigError>(())
//! ```
//!
//! ## Quick Start - Parse and Replay
//!
//! ```rust,no_run
//! use std::path::Path;
//! use witsim::parser;
//! use witsim::playback::{PlaybackController, PlaybackStatus};
//!
//! let dataset = parser::parse_file(Path::new("witsml-data-1.xml"))?;
//! let mut controller = PlaybackController::with_dataset(dataset);
//!
//! controller.play()?;
//! while controller.status() == PlaybackStatus::Playing {
//!     if let Some(interval) = controller.tick_interval() {
//!         std::thread::sleep(interval);
//!     }
//!     if controller.tick().is_some() {
//!         let current = controller.display().current();
//!         println!("depth {:.2} m, ROP {:.2} ft/hr", current.bit_depth, current.rop);
//!     }
//! }
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! ## Architecture
//!
//! The library is organized into the following modules:
//!
//! - [`channel`]: canonical channel names, wire mnemonics, alias map, and
//!   the ordered channel layout shared by serializer and parser
//! - [`series`]: parameter specs, series configuration, validation
//! - [`dataset`]: the point/metadata/dataset data model
//! - [`generator`]: synthetic telemetry generation
//! - [`serializer`]: dataset → XML/JSON text
//! - [`parser`]: XML/JSON files → dataset
//! - [`playback`]: tick-driven replay and the display views
//!
//! ## Scope
//!
//! This crate emits a schema-inspired subset of WITSML, not validated
//! against the Energistics schemas. There is no acquisition from real
//! equipment, no persistence beyond the written files, and no networked
//! operation; all state is in-memory and per-session.

#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]

pub mod channel;
pub mod dataset;
pub mod generator;
pub mod parser;
pub mod playback;
pub mod serializer;
pub mod series;

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::channel::{channel_layout, ChannelColumn};
    pub use crate::dataset::{DataPoint, Dataset, DatasetMetadata};
    pub use crate::generator::SampleGenerator;
    pub use crate::parser::{parse_file, parse_named, ParseError, SourceFormat};
    pub use crate::playback::{
        CurrentReadings, DisplayState, HistoryRow, PlaybackController, PlaybackError,
        PlaybackStatus, HISTORY_CAPACITY, SPEED_STEPS,
    };
    pub use crate::serializer::{to_json, to_xml, WriteError};
    pub use crate::series::{
        default_parameters, ConfigError, ParameterSpec, SeriesConfig, MAX_POINT_COUNT,
        MIN_POINT_COUNT,
    };
}
