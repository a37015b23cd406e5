//! Inputs to a generation run.
//!
//! A run consumes a [`TuneRequest`]: the [`EngineDescriptor`], whatever
//! [`ComponentSpecs`] are known and optional [`TuneSettings`]. Requests are
//! immutable once a run starts. Component specs can be entered directly or
//! resolved from catalog model names through [`ComponentSelection`], and a
//! full request can be seeded from a known combination with
//! [`TuneRequest::from_combo`].
//!
//! [`validate`] produces the warnings and suggestions list consumed by the
//! documentation step; it never blocks generation.

mod builder;
mod types;
mod validate;

pub use builder::EngineDescriptorBuilder;
pub use types::{
    CamProfile, ComponentSelection, ComponentSpecs, EngineDescriptor, ProfileSelection,
    TuneRequest, TuneSettings,
};
pub use validate::{validate, ValidationReport};
