//! Baseline tune generation for MS2/Extra engine controllers.
//!
//! A run takes a [`engine::TuneRequest`] through four stages:
//!
//! 1. [`tables::TableGenerator`] builds the VE, AFR and spark grids.
//! 2. [`derive::ParameterDeriver`] computes the scalar constants.
//! 3. [`pages::PageEncoder`] maps the grids into 16 firmware pages (XML only).
//! 4. [`artifact::ArtifactSerializer`] renders the `.msq` artifact.
//!
//! Every stage is a pure function of its inputs plus a read-only
//! [`catalog::ProfileCatalog`] and [`config::GeneratorConfig`]. Conditions the
//! run recovers from are collected as [`notice::Notice`]s; only rendering
//! failures are fatal.

pub mod artifact;
pub mod catalog;
pub mod config;
pub mod derive;
pub mod engine;
pub mod notice;
pub mod pages;
pub mod tables;

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use artifact::{Artifact, ArtifactSerializer, Encoding, SerError};
use catalog::ProfileCatalog;
use config::{ConfigError, GeneratorConfig};
use derive::{DerivedParameters, ParameterDeriver};
use engine::{EngineDescriptor, ProfileSelection, TuneRequest, ValidationReport};
use notice::Notice;
use pages::{PageEncoder, PageSet};
use tables::{TableGenerator, TableSet};

static DEFAULT_CONFIG: Lazy<GeneratorConfig> = Lazy::new(GeneratorConfig::default);

/// Result type used throughout the library.
pub type TuneResult<T> = core::result::Result<T, TuneError>;

/// Fatal failures of a generation run.
#[derive(Debug, Error)]
pub enum TuneError {
    /// The artifact could not be rendered; nothing was produced.
    #[error("serialization failed: {0}")]
    Serialization(#[from] SerError),
    /// Configuration or catalog data could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Everything produced by one run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Generation {
    pub artifact: Artifact,
    pub parameters: DerivedParameters,
    pub tables: TableSet,
    /// Recovered conditions in stage order.
    pub notices: Vec<Notice>,
    pub validation: ValidationReport,
}

/// Runs the pipeline against an injected catalog and configuration.
#[derive(Debug, Clone, Copy)]
pub struct TuneGenerator<'a> {
    catalog: &'a ProfileCatalog,
    config: &'a GeneratorConfig,
}

impl<'a> TuneGenerator<'a> {
    pub fn new(catalog: &'a ProfileCatalog, config: &'a GeneratorConfig) -> Self {
        Self { catalog, config }
    }

    pub fn catalog(&self) -> &'a ProfileCatalog {
        self.catalog
    }

    pub fn generate_tables(&self, engine: &EngineDescriptor, profiles: &ProfileSelection) -> TableSet {
        TableGenerator::new(self.catalog).generate_all(engine, profiles)
    }

    pub fn derive_parameters(&self, request: &TuneRequest) -> DerivedParameters {
        ParameterDeriver::new(self.catalog).derive(
            &request.engine,
            &request.components,
            &request.settings,
        )
    }

    /// Builds an artifact stamped with the current time.
    pub fn build_artifact(&self, request: &TuneRequest, encoding: Encoding) -> TuneResult<Generation> {
        self.build_artifact_at(request, encoding, Utc::now())
    }

    /// Builds an artifact stamped with `now`. Identical inputs give identical
    /// output.
    pub fn build_artifact_at(
        &self,
        request: &TuneRequest,
        encoding: Encoding,
        now: DateTime<Utc>,
    ) -> TuneResult<Generation> {
        self.run(request, encoding, None, now)
    }

    /// Builds an XML artifact over caller-supplied page images.
    ///
    /// The generated tables are written into their mapped regions; every
    /// other byte of `pages` is kept.
    pub fn build_artifact_over_pages_at(
        &self,
        request: &TuneRequest,
        pages: PageSet,
        now: DateTime<Utc>,
    ) -> TuneResult<Generation> {
        self.run(request, Encoding::XmlPages, Some(pages), now)
    }

    fn run(
        &self,
        request: &TuneRequest,
        encoding: Encoding,
        base_pages: Option<PageSet>,
        now: DateTime<Utc>,
    ) -> TuneResult<Generation> {
        let tables = self.generate_tables(&request.engine, &request.profiles());
        let parameters = self.derive_parameters(request);
        let mut notices = tables.notices();
        notices.extend(parameters.notices());

        let pages = match encoding {
            Encoding::Text => None,
            Encoding::XmlPages => {
                let encoder = PageEncoder::new();
                let encoded = match base_pages {
                    Some(pages) => encoder.encode_into(pages, tables.iter()),
                    None => encoder.encode_tables(&tables),
                };
                notices.extend(encoded.notices);
                Some(encoded.pages)
            }
        };

        let artifact = ArtifactSerializer::new(self.config).serialize(
            &parameters,
            &tables,
            pages.as_ref(),
            encoding,
            now,
        )?;
        let validation = engine::validate(request);
        debug!(
            notices = notices.len(),
            warnings = validation.warnings.len(),
            "generation complete"
        );
        Ok(Generation {
            artifact,
            parameters,
            tables,
            notices,
            validation,
        })
    }
}

impl Default for TuneGenerator<'static> {
    fn default() -> Self {
        Self::new(ProfileCatalog::shared(), &DEFAULT_CONFIG)
    }
}

/// [`TuneGenerator::generate_tables`] with the built-in catalog.
pub fn generate_tables(engine: &EngineDescriptor, profiles: &ProfileSelection) -> TableSet {
    TuneGenerator::default().generate_tables(engine, profiles)
}

/// [`TuneGenerator::derive_parameters`] with the built-in catalog.
pub fn derive_parameters(request: &TuneRequest) -> DerivedParameters {
    TuneGenerator::default().derive_parameters(request)
}

/// [`TuneGenerator::build_artifact`] with the built-in catalog and default
/// configuration.
pub fn build_artifact(request: &TuneRequest, encoding: Encoding) -> TuneResult<Generation> {
    TuneGenerator::default().build_artifact(request, encoding)
}

/// [`TuneGenerator::build_artifact_at`] with the built-in catalog and default
/// configuration.
pub fn build_artifact_at(
    request: &TuneRequest,
    encoding: Encoding,
    now: DateTime<Utc>,
) -> TuneResult<Generation> {
    TuneGenerator::default().build_artifact_at(request, encoding, now)
}
