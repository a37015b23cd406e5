//! Generator configuration shared by every artifact produced in a process.
//!
//! The configuration carries only identifiers and labels written into the
//! artifact headers. None of it influences derived numbers or table contents.
//!
//! | Field | Default | Written to |
//! |-------|---------|------------|
//! | `xml_signature` | [`DEFAULT_XML_SIGNATURE`] | `versionInfo@signature` |
//! | `revision` | [`DEFAULT_REVISION`] | `versionInfo@revision` |
//! | `file_format` | [`DEFAULT_FILE_FORMAT`] | `versionInfo@fileFormat` |
//! | `text_signature` | [`DEFAULT_TEXT_SIGNATURE`] | `[MegaSquirt] signature=` |
//! | `text_file_version` | [`DEFAULT_TEXT_FILE_VERSION`] | `[MegaSquirt] fileVersion=` |
//! | `author` | [`DEFAULT_AUTHOR`] | `bibliography@author`, text trailer |
//! | `comment` | [`DEFAULT_COMMENT`] | `bibliography@tuneComment` |

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Namespace of the `msq` root element.
pub const MSQ_NAMESPACE: &str = "http://www.msefi.com/";

/// Firmware signature the page layout was taken from (MS2/Extra 3.4.x).
pub const DEFAULT_XML_SIGNATURE: &str = "MS2Extra comms342hP";

/// Firmware INI revision the page layout was taken from.
pub const DEFAULT_REVISION: &str = "20240609";

/// XML `.msq` file format version.
pub const DEFAULT_FILE_FORMAT: &str = "5.0";

/// Signature written into the text rendition.
pub const DEFAULT_TEXT_SIGNATURE: &str = "MShift v0.01";

/// File version written into the text rendition.
pub const DEFAULT_TEXT_FILE_VERSION: &str = "029y3";

pub const DEFAULT_AUTHOR: &str = "MS2/Extra Tune Generator";

pub const DEFAULT_COMMENT: &str = "Generated Baseline Tune";

/// Failure while loading configuration or catalog data.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// JSON input did not match the expected shape.
    #[error("failed to parse {what}: {source}")]
    Parse {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// Header labels for generated artifacts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub xml_signature: String,
    pub revision: String,
    pub file_format: String,
    pub text_signature: String,
    pub text_file_version: String,
    pub author: String,
    pub comment: String,
}

impl GeneratorConfig {
    /// Parses a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|source| ConfigError::Parse {
            what: "generator config",
            source,
        })
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = author.into();
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }

    /// Overrides the firmware signature and INI revision together.
    pub fn with_firmware(mut self, signature: impl Into<String>, revision: impl Into<String>) -> Self {
        self.xml_signature = signature.into();
        self.revision = revision.into();
        self
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            xml_signature: DEFAULT_XML_SIGNATURE.to_string(),
            revision: DEFAULT_REVISION.to_string(),
            file_format: DEFAULT_FILE_FORMAT.to_string(),
            text_signature: DEFAULT_TEXT_SIGNATURE.to_string(),
            text_file_version: DEFAULT_TEXT_FILE_VERSION.to_string(),
            author: DEFAULT_AUTHOR.to_string(),
            comment: DEFAULT_COMMENT.to_string(),
        }
    }
}
