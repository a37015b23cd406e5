//! Artifact rendering.
//!
//! Both encodings read the same [`DerivedParameters`] and [`TableSet`]:
//!
//! | Encoding | Content | Uses pages |
//! |----------|---------|------------|
//! | [`Encoding::Text`] | `[MegaSquirt]`, `[Constants]`, three table sections, comment trailer | no |
//! | [`Encoding::XmlPages`] | `msq` document with `bibliography`, `versionInfo` and 16 base64 `page` elements | yes |
//!
//! Rendering either succeeds completely or fails with a [`SerError`]; no
//! partial artifact is ever returned.

mod error;
mod filename;
mod text;
mod xml_pages;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::GeneratorConfig;
use crate::derive::DerivedParameters;
use crate::pages::{PageEncoder, PageSet};
use crate::tables::TableSet;

pub use error::{SerError, SerResult, Section};
pub use filename::{file_stem, sanitize};

/// File extension shared by both encodings.
pub const MSQ_EXTENSION: &str = "msq";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Encoding {
    /// `key=value` sections.
    #[default]
    Text,
    /// XML with base64 page payloads.
    XmlPages,
}

/// A rendered tune ready to be written out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artifact {
    pub content: String,
    /// File stem without extension.
    pub filename: String,
    pub encoding: Encoding,
}

impl Artifact {
    /// Stem plus the `.msq` extension.
    pub fn file_name(&self) -> String {
        format!("{}.{}", self.filename, MSQ_EXTENSION)
    }
}

/// Renders artifacts with the header labels of a [`GeneratorConfig`].
#[derive(Debug, Clone, Copy)]
pub struct ArtifactSerializer<'a> {
    config: &'a GeneratorConfig,
}

impl<'a> ArtifactSerializer<'a> {
    pub fn new(config: &'a GeneratorConfig) -> Self {
        Self { config }
    }

    /// Renders one artifact.
    ///
    /// For [`Encoding::XmlPages`], `pages` is used when given (after
    /// normalization to 16 × 2048 bytes) and composed from `tables`
    /// otherwise. The text encoding ignores `pages`. `now` stamps the
    /// filename and the generation date.
    pub fn serialize(
        &self,
        parameters: &DerivedParameters,
        tables: &TableSet,
        pages: Option<&PageSet>,
        encoding: Encoding,
        now: DateTime<Utc>,
    ) -> SerResult<Artifact> {
        let content = match encoding {
            Encoding::Text => text::render(self.config, parameters, tables, now)?,
            Encoding::XmlPages => {
                let pages = match pages {
                    Some(pages) => {
                        let mut pages = pages.clone();
                        for notice in pages.normalize() {
                            warn!(%notice, "recovered while serializing pages");
                        }
                        pages
                    }
                    None => PageEncoder::new().encode_tables(tables).pages,
                };
                xml_pages::render(self.config, &pages, now)?
            }
        };
        let artifact = Artifact {
            content,
            filename: file_stem(&parameters.engine_family, parameters.displacement_ci, now),
            encoding,
        };
        info!(
            file = %artifact.file_name(),
            encoding = ?encoding,
            bytes = artifact.content.len(),
            "rendered artifact"
        );
        Ok(artifact)
    }
}
