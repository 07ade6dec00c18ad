//! Integration test for the full file → parse → replay pipeline.

use chrono::{TimeZone, Utc};
use std::fs;
use tempfile::tempdir;

use witsim::generator::SampleGenerator;
use witsim::parser;
use witsim::playback::{PlaybackController, PlaybackStatus, HISTORY_CAPACITY};
use witsim::serializer;
use witsim::series::{default_parameters, SeriesConfig};

#[test]
fn replays_a_parsed_xml_file_to_completion() {
    let dir = tempdir().unwrap();
    let config = SeriesConfig::new(200, 6400.0, 6500.0, 2.0).unwrap();
    let dataset = SampleGenerator::seeded(config, default_parameters(), 42)
        .unwrap()
        .start_time(Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap())
        .generate();

    let path = dir.path().join("run.xml");
    fs::write(&path, serializer::to_xml(&dataset).unwrap()).unwrap();

    let parsed = parser::parse_file(&path).unwrap();
    let mut controller = PlaybackController::with_dataset(parsed);

    // The parsed file replays at its native 2-second cadence.
    controller.play().unwrap();
    assert_eq!(
        controller.tick_interval(),
        Some(std::time::Duration::from_secs(2))
    );
    controller.set_speed(10.0);
    assert_eq!(
        controller.tick_interval(),
        Some(std::time::Duration::from_millis(200))
    );

    let mut ticks = 0;
    while controller.status() == PlaybackStatus::Playing {
        if controller.tick().is_some() {
            ticks += 1;
        }
    }

    assert_eq!(ticks, 199);
    assert_eq!(controller.status(), PlaybackStatus::Finished);
    assert_eq!(controller.cursor(), 199);
    assert_eq!(controller.display().history().len(), HISTORY_CAPACITY);

    // The final readings come from the last point, normalized from wire
    // mnemonics back to canonical fields.
    let last = &dataset.data[199];
    let current = controller.display().current();
    assert_eq!(Some(current.bit_depth), last.number("bitDepth"));
    assert_eq!(Some(current.hook_load), last.number("hookLoad"));
    assert_eq!(current.timestamp, last.timestamp().unwrap());

    // Replaying again after a reset walks the same points.
    controller.reset();
    assert_eq!(controller.cursor(), 0);
    assert_eq!(controller.display().history().len(), 1);
    controller.play().unwrap();
    let mut second_run = 0;
    while controller.status() == PlaybackStatus::Playing {
        if controller.tick().is_some() {
            second_run += 1;
        }
    }
    assert_eq!(second_run, 199);
}
