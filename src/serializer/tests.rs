use super::*;

use crate::generator::SampleGenerator;
use crate::series::{default_parameters, SeriesConfig};
use chrono::{TimeZone, Utc};
use quick_xml::events::Event;
use quick_xml::Reader;

fn sample_dataset() -> Dataset {
    let config = SeriesConfig::new(10, 6400.0, 6500.0, 1.0).unwrap();
    SampleGenerator::seeded(config, default_parameters(), 42)
        .unwrap()
        .start_time(Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap())
        .generate()
}

/// Collect `Mnemonic` texts under `Channels` and child tag names of the
/// first `Point`.
fn channels_and_point_tags(xml: &str) -> (Vec<String>, Vec<String>) {
    let mut reader = Reader::from_reader(xml.as_bytes());
    reader.config_mut().trim_text(true);

    let mut channels = Vec::new();
    let mut point_tags = Vec::new();
    let mut in_channels = false;
    let mut in_mnemonic = false;
    let mut in_point = false;
    let mut seen_point = false;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf).unwrap() {
            Event::Start(ref e) => match e.name().as_ref() {
                b"Channels" => in_channels = true,
                b"Mnemonic" if in_channels => in_mnemonic = true,
                b"Point" if !seen_point => {
                    in_point = true;
                    seen_point = true;
                }
                tag if in_point => {
                    point_tags.push(String::from_utf8_lossy(tag).into_owned())
                }
                _ => {}
            },
            Event::Text(ref t) => {
                if in_mnemonic {
                    channels.push(t.unescape().unwrap().into_owned());
                    in_mnemonic = false;
                }
            }
            Event::End(ref e) => match e.name().as_ref() {
                b"Channels" => in_channels = false,
                b"Point" => in_point = false,
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }
    (channels, point_tags)
}

#[test]
fn json_has_dataset_sections_in_order() {
    let dataset = sample_dataset();
    let json = to_json(&dataset).unwrap();

    let meta_pos = json.find("\"metadata\"").unwrap();
    let params_pos = json.find("\"parameters\"").unwrap();
    let data_pos = json.find("\"data\"").unwrap();
    assert!(meta_pos < params_pos && params_pos < data_pos);

    // Pretty-printed, with wire-style metadata keys.
    assert!(json.contains("\n  \"metadata\""));
    assert!(json.contains("\"pointCount\": 10"));
    assert!(json.contains("\"timeIntervalSeconds\": 1.0"));
}

#[test]
fn json_points_keep_channel_order() {
    let dataset = sample_dataset();
    let json = to_json(&dataset).unwrap();

    let ts_pos = json.find("\"timestamp\"").unwrap();
    let bit_pos = json.find("\"bitDepth\"").unwrap();
    let hook_pos = json.find("\"hookLoad\"").unwrap();
    assert!(ts_pos < bit_pos && bit_pos < hook_pos);
}

#[test]
fn xml_declares_the_fixed_wrapper() {
    let dataset = sample_dataset();
    let xml = to_xml(&dataset).unwrap();

    assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
    assert!(xml.contains("<WitsmlData xmlns=\"http://www.energistics.org/energyml/data/witsmlv2\""));
    assert!(xml.contains("<Log uid=\"log-"));
    assert!(xml.contains("schemaVersion=\"2.1\""));
    assert!(xml.contains("<Title>Simulated Drilling Data</Title>"));
    assert!(xml.contains("<Originator>WITSML Generator</Originator>"));
    assert!(xml.contains("<Creation>2026-01-01T00:00:00.000Z</Creation>"));
    assert!(xml.contains("<LoggingMethod>MWD</LoggingMethod>"));
    assert!(xml.contains("<WellboreName>Simulated Well</WellboreName>"));
    assert!(xml.contains("<IndexKind>date time</IndexKind>"));
    assert!(xml.contains("<DataPoints count=\"10\">"));
}

#[test]
fn xml_channel_list_matches_point_children_exactly() {
    let dataset = sample_dataset();
    let xml = to_xml(&dataset).unwrap();

    let (channels, point_tags) = channels_and_point_tags(&xml);
    assert_eq!(channels, point_tags);
    assert_eq!(channels[0], "TIME");
    assert_eq!(channels[1], "DBTM");
    assert_eq!(channels[2], "DMEA");
    assert!(channels.contains(&"HOOKLOAD".to_string()));
    assert_eq!(channels.last().map(String::as_str), Some("MUDFLOWOUT"));
}

#[test]
fn xml_omits_disabled_parameters() {
    let mut params = default_parameters();
    params[4].enabled = false; // torque
    let config = SeriesConfig::new(10, 6400.0, 6500.0, 1.0).unwrap();
    let dataset = SampleGenerator::seeded(config, params, 42).unwrap().generate();
    let xml = to_xml(&dataset).unwrap();

    assert!(!xml.contains("<TORQUE>"));
    assert!(!xml.contains("<Mnemonic>TORQUE</Mnemonic>"));
}

#[test]
fn xml_escapes_parameter_units() {
    let dataset = sample_dataset();
    let xml = to_xml(&dataset).unwrap();
    // The default set carries unit strings that must survive as-is.
    assert!(xml.contains("<Uom>gal/min</Uom>"));
    assert!(xml.contains("<Uom>°F</Uom>"));
}

#[test]
fn format_number_drops_trailing_zero_fraction() {
    assert_eq!(format_number(6400.0), "6400");
    assert_eq!(format_number(36.37), "36.37");
    assert_eq!(format_number(0.0), "0");
    assert_eq!(format_number(-12.5), "-12.5");
}
