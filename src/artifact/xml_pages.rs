use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use chrono::{DateTime, Utc};
use xml::common::XmlVersion;
use xml::writer::{EmitterConfig, EventWriter, XmlEvent};

use super::error::{SerError, SerResult, Section};
use crate::config::{GeneratorConfig, MSQ_NAMESPACE};
use crate::pages::{PageSet, PAGE_SIZE};

/// `writeDate` format: ISO-8601 UTC without fractional seconds.
const WRITE_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Renders the `.msq` XML document. `pages` must already be normalized.
pub(crate) fn render(
    config: &GeneratorConfig,
    pages: &PageSet,
    now: DateTime<Utc>,
) -> SerResult<String> {
    let mut writer = EmitterConfig::new()
        .perform_indent(true)
        .create_writer(Vec::new());

    writer
        .write(XmlEvent::StartDocument {
            version: XmlVersion::Version10,
            encoding: Some("UTF-8"),
            standalone: None,
        })
        .map_err(SerError::xml(Section::Header))?;
    writer
        .write(XmlEvent::start_element("msq").default_ns(MSQ_NAMESPACE))
        .map_err(SerError::xml(Section::Header))?;

    let write_date = now.format(WRITE_DATE_FORMAT).to_string();
    empty_element(
        &mut writer,
        Section::Bibliography,
        XmlEvent::start_element("bibliography")
            .attr("author", &config.author)
            .attr("tuneComment", &config.comment)
            .attr("writeDate", &write_date),
    )?;
    empty_element(
        &mut writer,
        Section::VersionInfo,
        XmlEvent::start_element("versionInfo")
            .attr("signature", &config.xml_signature)
            .attr("revision", &config.revision)
            .attr("fileFormat", &config.file_format),
    )?;

    let size = PAGE_SIZE.to_string();
    for (index, page) in pages.pages().iter().enumerate() {
        let section = Section::Page(index);
        let number = (index + 1).to_string();
        let data = STANDARD.encode(page.as_bytes());
        writer
            .write(
                XmlEvent::start_element("page")
                    .attr("number", &number)
                    .attr("size", &size),
            )
            .map_err(SerError::xml(section))?;
        writer
            .write(XmlEvent::start_element("data"))
            .map_err(SerError::xml(section))?;
        writer
            .write(XmlEvent::characters(&data))
            .map_err(SerError::xml(section))?;
        writer
            .write(XmlEvent::end_element())
            .map_err(SerError::xml(section))?;
        writer
            .write(XmlEvent::end_element())
            .map_err(SerError::xml(section))?;
    }

    writer
        .write(XmlEvent::end_element())
        .map_err(SerError::xml(Section::Trailer))?;

    let mut document = String::from_utf8(writer.into_inner())?;
    document.push('\n');
    Ok(document)
}

fn empty_element<'a>(
    writer: &mut EventWriter<Vec<u8>>,
    section: Section,
    element: impl Into<XmlEvent<'a>>,
) -> SerResult<()> {
    writer.write(element).map_err(SerError::xml(section))?;
    writer
        .write(XmlEvent::end_element())
        .map_err(SerError::xml(section))
}
