use core::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::tables::TableKind;

/// Context markers used when reporting serialization failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Section {
    /// `[MegaSquirt]` header of the text rendition.
    Header,
    /// `[Constants]` block.
    Constants,
    /// One of the table sections.
    Table(TableKind),
    /// Trailing comment block.
    Trailer,
    /// XML `bibliography` element.
    Bibliography,
    /// XML `versionInfo` element.
    VersionInfo,
    /// Page payload, by zero-based index.
    Page(usize),
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Section::Header => write!(f, "header"),
            Section::Constants => write!(f, "constants"),
            Section::Table(kind) => write!(f, "{} table", kind),
            Section::Trailer => write!(f, "trailer"),
            Section::Bibliography => write!(f, "bibliography"),
            Section::VersionInfo => write!(f, "version info"),
            Section::Page(index) => write!(f, "page {}", index + 1),
        }
    }
}

/// Fatal failure while rendering or reading an artifact.
#[derive(Debug, Error)]
pub enum SerError {
    /// A number that cannot be written: NaN or infinite.
    #[error("non-finite value {value} for `{field}` in {section}")]
    NonFinite {
        section: Section,
        field: &'static str,
        value: f64,
    },
    /// Input ended before the expected number of bytes were read.
    #[error("{section} ended while reading `{field}`")]
    UnexpectedEnd {
        section: Section,
        field: &'static str,
    },
    /// The XML writer rejected an event.
    #[error("failed to write XML {section}: {source}")]
    Xml {
        section: Section,
        #[source]
        source: xml::writer::Error,
    },
    /// Formatting into the text buffer failed.
    #[error("failed to format {section}")]
    Format { section: Section },
    /// Rendered XML was not valid UTF-8.
    #[error("rendered XML is not valid UTF-8")]
    Utf8(#[from] std::string::FromUtf8Error),
}

impl SerError {
    pub fn non_finite(section: Section, field: &'static str, value: f64) -> Self {
        SerError::NonFinite {
            section,
            field,
            value,
        }
    }

    pub fn unexpected_end(section: Section, field: &'static str) -> Self {
        SerError::UnexpectedEnd { section, field }
    }

    pub fn xml(section: Section) -> impl FnOnce(xml::writer::Error) -> Self {
        move |source| SerError::Xml { section, source }
    }

    /// Returns the section the error was raised in, when it has one.
    pub fn section(&self) -> Option<Section> {
        match *self {
            SerError::NonFinite { section, .. }
            | SerError::UnexpectedEnd { section, .. }
            | SerError::Xml { section, .. }
            | SerError::Format { section } => Some(section),
            SerError::Utf8(_) => None,
        }
    }
}

/// Convenient alias for serialization results.
pub type SerResult<T> = core::result::Result<T, SerError>;

/// Rejects NaN and infinities.
pub(crate) fn finite(section: Section, field: &'static str, value: f64) -> SerResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(SerError::non_finite(section, field, value))
    }
}
