use super::*;

use crate::generator::SampleGenerator;
use crate::serializer;
use crate::series::{default_parameters, SeriesConfig};
use chrono::{TimeZone, Utc};

fn sample_dataset() -> Dataset {
    let config = SeriesConfig::new(10, 6400.0, 6500.0, 1.0).unwrap();
    SampleGenerator::seeded(config, default_parameters(), 42)
        .unwrap()
        .start_time(Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap())
        .generate()
}

#[test]
fn sniffs_format_from_extension() {
    assert_eq!(SourceFormat::from_name("data.json").unwrap(), SourceFormat::Json);
    assert_eq!(SourceFormat::from_name("data.XML").unwrap(), SourceFormat::Xml);
    assert!(matches!(
        SourceFormat::from_name("data.csv"),
        Err(ParseError::UnsupportedExtension(_))
    ));
    assert!(matches!(
        SourceFormat::from_name("data"),
        Err(ParseError::UnsupportedExtension(_))
    ));
}

#[test]
fn parses_full_json_dataset() {
    let dataset = sample_dataset();
    let json = serializer::to_json(&dataset).unwrap();

    let parsed = parse_named("witsml-data-1.json", &json).unwrap();
    assert_eq!(parsed, dataset);
}

#[test]
fn parses_bare_point_array() {
    let text = r#"[
        {"timestamp": "2026-01-01T00:00:00.000Z", "bitDepth": 6400.0, "rop": 30.5},
        {"timestamp": "2026-01-01T00:00:01.000Z", "bitDepth": 6410.0, "rop": 31.2}
    ]"#;
    let parsed = parse_named("points.json", text).unwrap();
    assert_eq!(parsed.len(), 2);
    assert_eq!(parsed.metadata.point_count, 2);
    assert_eq!(parsed.metadata.start_depth, 6400.0);
    assert_eq!(parsed.metadata.end_depth, 6410.0);
    assert_eq!(parsed.data[1].number("rop"), Some(31.2));
}

#[test]
fn parses_object_wrapping_data_array() {
    let text = r#"{"data": [{"bitDepth": 100.0}, {"bitDepth": 110.0}]}"#;
    let parsed = parse_named("wrapped.json", text).unwrap();
    assert_eq!(parsed.len(), 2);
    assert_eq!(parsed.metadata.start_depth, 100.0);
}

#[test]
fn malformed_json_is_an_error() {
    assert!(matches!(
        parse_named("bad.json", "{not json"),
        Err(ParseError::Json(_))
    ));
}

#[test]
fn json_scalar_root_is_invalid_structure() {
    assert!(matches!(
        parse_named("scalar.json", "42"),
        Err(ParseError::InvalidStructure(_))
    ));
}

#[test]
fn empty_json_array_is_empty_point_set() {
    assert!(matches!(
        parse_named("empty.json", "[]"),
        Err(ParseError::EmptyPointSet)
    ));
}

#[test]
fn parses_generated_xml_points() {
    let dataset = sample_dataset();
    let xml = serializer::to_xml(&dataset).unwrap();
    let parsed = parse_named("witsml-data-1.xml", &xml).unwrap();

    assert_eq!(parsed.len(), dataset.len());
    // Values come back under their wire mnemonics, numerically intact.
    for (original, reparsed) in dataset.data.iter().zip(parsed.data.iter()) {
        assert_eq!(reparsed.number("DBTM"), original.number("bitDepth"));
        assert_eq!(reparsed.number("HOOKLOAD"), original.number("hookLoad"));
        assert_eq!(reparsed.number("STROKE3"), Some(0.0));
        assert_eq!(reparsed.timestamp(), original.timestamp());
    }
}

#[test]
fn xml_metadata_is_derived_from_points() {
    let dataset = sample_dataset();
    let xml = serializer::to_xml(&dataset).unwrap();
    let parsed = parse_named("witsml-data-1.xml", &xml).unwrap();

    assert_eq!(parsed.metadata.point_count, 10);
    assert_eq!(parsed.metadata.start_depth, 6400.0);
    assert_eq!(parsed.metadata.end_depth, 6490.0);
    assert_eq!(parsed.metadata.time_interval_seconds, 1.0);
    assert_eq!(parsed.metadata.generated_at, dataset.metadata.generated_at);
}

#[test]
fn xml_parameters_are_reconstructed_with_observed_ranges() {
    let dataset = sample_dataset();
    let xml = serializer::to_xml(&dataset).unwrap();
    let parsed = parse_named("witsml-data-1.xml", &xml).unwrap();

    let names: Vec<&str> = parsed.parameters.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(
        names,
        dataset
            .parameters
            .iter()
            .map(|p| p.name.as_str())
            .collect::<Vec<_>>()
    );
    let hook = parsed.parameters.iter().find(|p| p.name == "hookLoad").unwrap();
    assert_eq!(hook.label, "Hook Load");
    assert_eq!(hook.unit, "kips");
    assert!(hook.min >= 140.0 && hook.max <= 160.0);
    assert!(hook.min <= hook.max);
}

#[test]
fn xml_keeps_unknown_tags_as_raw_text() {
    let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<WitsmlData>
  <Point>
    <TIME>2026-01-01T00:00:00.000Z</TIME>
    <DBTM>6400</DBTM>
    <NOTE>spud section</NOTE>
  </Point>
</WitsmlData>"#;
    let parsed = parse_named("notes.xml", xml).unwrap();
    assert_eq!(parsed.data[0].number("DBTM"), Some(6400.0));
    assert_eq!(parsed.data[0].text("NOTE"), Some("spud section"));
}

#[test]
fn malformed_xml_is_an_error() {
    let result = parse_named("bad.xml", "<WitsmlData><Point><TIME>1");
    assert!(matches!(
        result,
        Err(ParseError::Xml(_)) | Err(ParseError::InvalidStructure(_))
    ));
}

#[test]
fn xml_without_points_is_empty_point_set() {
    let xml = r#"<?xml version="1.0"?><WitsmlData><Log></Log></WitsmlData>"#;
    assert!(matches!(
        parse_named("empty.xml", xml),
        Err(ParseError::EmptyPointSet)
    ));
}

#[test]
fn unsupported_extension_is_reported_before_reading() {
    assert!(matches!(
        parse_named("data.csv", "a,b,c"),
        Err(ParseError::UnsupportedExtension(_))
    ));
}
