//! Pure dataset → text serialization.
//!
//! Two writers share the [`crate::channel::channel_layout`] ordering:
//! [`to_json`] emits the dataset structure verbatim, pretty-printed;
//! [`to_xml`] emits a simplified WITSML v2-style log document. The
//! structural contract is that the `Channels` declaration list and the
//! child elements of every `Point` match exactly, in the same order.
//! Round-trips are structural, not byte-exact: re-parsing the output
//! reproduces the same numeric values.

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use uuid::Uuid;

use crate::channel::{self, ChannelColumn};
use crate::dataset::{DataPoint, Dataset};

#[cfg(test)]
mod tests;

const WITSML_NAMESPACE: &str = "http://www.energistics.org/energyml/data/witsmlv2";
const XSI_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema-instance";
const SCHEMA_LOCATION: &str =
    "http://www.energistics.org/energyml/data/witsmlv2 Log.xsd";

/// Errors raised while assembling output text.
#[derive(Debug, thiserror::Error)]
pub enum WriteError {
    /// JSON serialization failed.
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// XML event assembly failed.
    #[error("XML write error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// I/O error from the underlying writer.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The assembled document was not valid UTF-8.
    #[error("generated XML is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Serialize a dataset as pretty-printed JSON: `{metadata, parameters, data}`.
pub fn to_json(dataset: &Dataset) -> Result<String, WriteError> {
    Ok(serde_json::to_string_pretty(dataset)?)
}

/// Serialize a dataset as a WITSML-style XML log document.
pub fn to_xml(dataset: &Dataset) -> Result<String, WriteError> {
    let layout = channel::channel_layout(&dataset.parameters);
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let mut root = BytesStart::new("WitsmlData");
    root.push_attribute(("xmlns", WITSML_NAMESPACE));
    root.push_attribute(("xmlns:xsi", XSI_NAMESPACE));
    root.push_attribute(("xsi:schemaLocation", SCHEMA_LOCATION));
    writer.write_event(Event::Start(root))?;

    let mut log = BytesStart::new("Log");
    let log_uid = format!("log-{}", Uuid::new_v4());
    log.push_attribute(("uid", log_uid.as_str()));
    log.push_attribute(("schemaVersion", "2.1"));
    writer.write_event(Event::Start(log))?;

    write_citation(&mut writer, &dataset.metadata.generated_at)?;
    text_element(&mut writer, "RunNumber", "1")?;
    text_element(&mut writer, "PassNumber", "1")?;
    text_element(&mut writer, "LoggingMethod", "MWD")?;

    writer.write_event(Event::Start(BytesStart::new("Wellbore")))?;
    text_element(&mut writer, "WellboreName", "Simulated Well")?;
    writer.write_event(Event::End(BytesEnd::new("Wellbore")))?;

    let mut channel_set = BytesStart::new("ChannelSet");
    channel_set.push_attribute(("uid", "channelset-1"));
    writer.write_event(Event::Start(channel_set))?;

    write_index(&mut writer)?;
    write_channels(&mut writer, &layout)?;
    write_data(&mut writer, &layout, dataset)?;

    writer.write_event(Event::End(BytesEnd::new("ChannelSet")))?;
    writer.write_event(Event::End(BytesEnd::new("Log")))?;
    writer.write_event(Event::End(BytesEnd::new("WitsmlData")))?;

    Ok(String::from_utf8(writer.into_inner())?)
}

fn write_citation<W: std::io::Write>(
    writer: &mut Writer<W>,
    creation: &str,
) -> Result<(), WriteError> {
    writer.write_event(Event::Start(BytesStart::new("Citation")))?;
    text_element(writer, "Title", "Simulated Drilling Data")?;
    text_element(writer, "Originator", "WITSML Generator")?;
    text_element(writer, "Creation", creation)?;
    writer.write_event(Event::End(BytesEnd::new("Citation")))?;
    Ok(())
}

fn write_index<W: std::io::Write>(writer: &mut Writer<W>) -> Result<(), WriteError> {
    writer.write_event(Event::Start(BytesStart::new("Index")))?;
    text_element(writer, "IndexKind", "date time")?;
    text_element(writer, "Mnemonic", "TIME")?;
    text_element(writer, "Uom", "s")?;
    text_element(writer, "Direction", "increasing")?;
    writer.write_event(Event::End(BytesEnd::new("Index")))?;
    Ok(())
}

fn write_channels<W: std::io::Write>(
    writer: &mut Writer<W>,
    layout: &[ChannelColumn],
) -> Result<(), WriteError> {
    writer.write_event(Event::Start(BytesStart::new("Channels")))?;
    for column in layout {
        let mut element = BytesStart::new("Channel");
        let uid = format!("ch-{}", column.name.to_lowercase());
        element.push_attribute(("uid", uid.as_str()));
        writer.write_event(Event::Start(element))?;

        text_element(writer, "Mnemonic", &column.mnemonic)?;
        if column.name != channel::TIMESTAMP {
            text_element(writer, "GlobalMnemonic", &column.label)?;
        }
        text_element(writer, "DataKind", column.data_kind)?;
        text_element(writer, "Uom", &column.unit)?;
        text_element(writer, "ChannelPropertyKind", &column.property_kind)?;

        writer.write_event(Event::End(BytesEnd::new("Channel")))?;
    }
    writer.write_event(Event::End(BytesEnd::new("Channels")))?;
    Ok(())
}

fn write_data<W: std::io::Write>(
    writer: &mut Writer<W>,
    layout: &[ChannelColumn],
    dataset: &Dataset,
) -> Result<(), WriteError> {
    writer.write_event(Event::Start(BytesStart::new("Data")))?;

    let mut data_points = BytesStart::new("DataPoints");
    let count = dataset.len().to_string();
    data_points.push_attribute(("count", count.as_str()));
    writer.write_event(Event::Start(data_points))?;

    for point in &dataset.data {
        write_point(writer, layout, point)?;
    }

    writer.write_event(Event::End(BytesEnd::new("DataPoints")))?;
    writer.write_event(Event::End(BytesEnd::new("Data")))?;
    Ok(())
}

fn write_point<W: std::io::Write>(
    writer: &mut Writer<W>,
    layout: &[ChannelColumn],
    point: &DataPoint,
) -> Result<(), WriteError> {
    writer.write_event(Event::Start(BytesStart::new("Point")))?;
    for column in layout {
        let text = if column.name == channel::TIMESTAMP {
            point.timestamp().unwrap_or_default().to_string()
        } else {
            // Points may carry either spelling (generated data is canonical,
            // re-parsed XML keeps wire mnemonics); channels absent under both
            // serialize as 0 so every Point matches the declared channel list.
            let value = point
                .number(&column.name)
                .or_else(|| point.number(&column.mnemonic))
                .unwrap_or(0.0);
            format_number(value)
        };
        text_element(writer, &column.mnemonic, &text)?;
    }
    writer.write_event(Event::End(BytesEnd::new("Point")))?;
    Ok(())
}

fn text_element<W: std::io::Write>(
    writer: &mut Writer<W>,
    tag: &str,
    text: &str,
) -> Result<(), WriteError> {
    writer.write_event(Event::Start(BytesStart::new(tag)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(tag)))?;
    Ok(())
}

/// Integral values print without a trailing `.0`, matching the wire form
/// readers expect (`6400`, `36.37`).
fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}
