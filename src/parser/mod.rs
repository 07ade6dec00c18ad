//! File parsing: extension-sniffed JSON/XML into a [`Dataset`].
//!
//! JSON input may be a full dataset document, any object wrapping a `data`
//! array, or a bare array of points. XML input is scanned as an event
//! stream: every `Point` element becomes a [`DataPoint`], child tag names
//! preserved as-is (wire mnemonics stay uppercase; normalization is the
//! display layer's job), text coerced to a number when it parses as a
//! float. Channel declarations are recovered so a parsed file carries
//! reconstructed parameter specs and a usable replay interval.

use std::io::BufRead;
use std::path::Path;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use serde_json::Value;

use crate::channel;
use crate::dataset::{DataPoint, Dataset};
use crate::series::ParameterSpec;

pub use error::ParseError;

mod error;

#[cfg(test)]
mod tests;

/// Input format, sniffed from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    /// A `{metadata, parameters, data}` document or point array.
    Json,
    /// A WITSML-style XML log document.
    Xml,
}

impl SourceFormat {
    /// Sniff the format from a file name; anything but `.json`/`.xml`
    /// (case-insensitive) is an unsupported-extension error.
    pub fn from_name(name: &str) -> Result<Self, ParseError> {
        let extension = Path::new(name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("json") => Ok(Self::Json),
            Some("xml") => Ok(Self::Xml),
            _ => Err(ParseError::UnsupportedExtension(name.to_string())),
        }
    }
}

/// Read and parse a telemetry file from disk.
pub fn parse_file(path: &Path) -> Result<Dataset, ParseError> {
    let name = path.to_string_lossy();
    let format = SourceFormat::from_name(&name)?;
    let text = std::fs::read_to_string(path)?;
    parse_text(format, &text)
}

/// Parse in-memory text with a file name as the format hint.
pub fn parse_named(name: &str, text: &str) -> Result<Dataset, ParseError> {
    parse_text(SourceFormat::from_name(name)?, text)
}

/// Parse in-memory text with an explicit format.
pub fn parse_text(format: SourceFormat, text: &str) -> Result<Dataset, ParseError> {
    let dataset = match format {
        SourceFormat::Json => parse_json(text)?,
        SourceFormat::Xml => parse_xml(text)?,
    };
    if dataset.is_empty() {
        return Err(ParseError::EmptyPointSet);
    }
    Ok(dataset)
}

/// Parse a JSON document into a dataset.
pub fn parse_json(text: &str) -> Result<Dataset, ParseError> {
    let value: Value = serde_json::from_str(text)?;
    let mut dataset = match value {
        // A bare array of points is accepted as the `data` sequence.
        Value::Array(_) => Dataset {
            data: serde_json::from_value(value)?,
            ..Dataset::empty()
        },
        Value::Object(_) => serde_json::from_value(value)?,
        other => {
            return Err(ParseError::InvalidStructure(format!(
                "expected a dataset object or point array, got {}",
                json_kind(&other)
            )))
        }
    };
    if dataset.metadata.point_count == 0 {
        dataset.derive_metadata();
    }
    Ok(dataset)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// A `Channel` declaration recovered from the `Channels` block.
#[derive(Debug, Default)]
struct ChannelDecl {
    mnemonic: String,
    label: Option<String>,
    unit: Option<String>,
}

/// Parse a WITSML-style XML document into a dataset.
pub fn parse_xml(text: &str) -> Result<Dataset, ParseError> {
    let mut reader = Reader::from_reader(text.as_bytes());
    reader.config_mut().trim_text(true);

    let mut declarations: Vec<ChannelDecl> = Vec::new();
    let mut data: Vec<DataPoint> = Vec::new();
    let mut creation: Option<String> = None;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => match e.name().as_ref() {
                b"Point" => data.push(read_point(&mut reader)?),
                b"Channel" => declarations.push(read_channel(&mut reader)?),
                b"Creation" => creation = read_element_text(&mut reader, b"Creation")?,
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(ParseError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    let mut dataset = Dataset {
        parameters: reconstruct_parameters(&declarations, &data),
        data,
        ..Dataset::empty()
    };
    if let Some(creation) = creation {
        dataset.metadata.generated_at = creation;
    }
    dataset.derive_metadata();
    Ok(dataset)
}

/// Read one `Point` element into an ordered channel map.
fn read_point<R: BufRead>(reader: &mut Reader<R>) -> Result<DataPoint, ParseError> {
    let mut point = DataPoint::new();
    let mut current: Option<String> = None;
    let mut pending: Option<String> = None;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                current = Some(tag_name(e)?);
                pending = None;
            }
            Ok(Event::Text(ref t)) => {
                if current.is_some() {
                    pending = Some(t.unescape()?.into_owned());
                }
            }
            Ok(Event::End(ref e)) => {
                if e.name().as_ref() == b"Point" {
                    return Ok(point);
                }
                if let Some(tag) = current.take() {
                    let text = pending.take().unwrap_or_default();
                    // Float text becomes a number; anything else (the TIME
                    // stamp, free-form tags) keeps its raw string form.
                    match text.trim().parse::<f64>() {
                        Ok(value) => point.insert_number(tag, value),
                        Err(_) => point.insert_text(tag, text),
                    }
                }
            }
            Ok(Event::Eof) => {
                return Err(ParseError::InvalidStructure(
                    "unterminated Point element".to_string(),
                ))
            }
            Err(e) => return Err(ParseError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }
}

/// Read one `Channel` declaration (mnemonic, label, unit).
fn read_channel<R: BufRead>(reader: &mut Reader<R>) -> Result<ChannelDecl, ParseError> {
    let mut decl = ChannelDecl::default();
    let mut current: Option<String> = None;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => current = Some(tag_name(e)?),
            Ok(Event::Text(ref t)) => {
                let text = t.unescape()?.into_owned();
                match current.as_deref() {
                    Some("Mnemonic") => decl.mnemonic = text,
                    Some("GlobalMnemonic") => decl.label = Some(text),
                    Some("Uom") => decl.unit = Some(text),
                    _ => {}
                }
            }
            Ok(Event::End(ref e)) => {
                if e.name().as_ref() == b"Channel" {
                    return Ok(decl);
                }
                current = None;
            }
            Ok(Event::Eof) => {
                return Err(ParseError::InvalidStructure(
                    "unterminated Channel element".to_string(),
                ))
            }
            Err(e) => return Err(ParseError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }
}

/// Read the text content of the element just opened.
fn read_element_text<R: BufRead>(
    reader: &mut Reader<R>,
    end_tag: &[u8],
) -> Result<Option<String>, ParseError> {
    let mut text = None;
    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Text(ref t)) => text = Some(t.unescape()?.into_owned()),
            Ok(Event::End(ref e)) if e.name().as_ref() == end_tag => return Ok(text),
            Ok(Event::Eof) => return Ok(text),
            Err(e) => return Err(ParseError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }
}

fn tag_name(e: &BytesStart) -> Result<String, ParseError> {
    Ok(std::str::from_utf8(e.name().as_ref())?.to_string())
}

/// Rebuild parameter specs from channel declarations.
///
/// Index and auxiliary channels are not user parameters and are skipped;
/// the remaining declarations get their canonical name where the mnemonic
/// is a known alias (lowercased otherwise) and observed min/max ranges
/// from the data.
fn reconstruct_parameters(declarations: &[ChannelDecl], data: &[DataPoint]) -> Vec<ParameterSpec> {
    declarations
        .iter()
        .filter(|decl| !decl.mnemonic.is_empty())
        .filter(|decl| !matches!(decl.mnemonic.as_str(), "TIME" | "DBTM" | "DMEA"))
        .filter(|decl| !channel::AUX_MNEMONICS.contains(&decl.mnemonic.as_str()))
        .map(|decl| {
            let name = channel::canonical(&decl.mnemonic)
                .map(str::to_string)
                .unwrap_or_else(|| decl.mnemonic.to_lowercase());
            let observed: Vec<f64> = data
                .iter()
                .filter_map(|p| p.number(&decl.mnemonic).or_else(|| p.number(&name)))
                .collect();
            let min = observed.iter().copied().fold(f64::INFINITY, f64::min);
            let max = observed.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            ParameterSpec {
                label: decl.label.clone().unwrap_or_else(|| name.clone()),
                unit: decl.unit.clone().unwrap_or_default(),
                min: if min.is_finite() { min } else { 0.0 },
                max: if max.is_finite() { max } else { 0.0 },
                enabled: true,
                name,
            }
        })
        .collect()
}
