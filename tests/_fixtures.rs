#![allow(dead_code)]

use baseline_tune::catalog::{InjectorSpec, ProfileCatalog};
use baseline_tune::engine::{ComponentSpecs, EngineDescriptorBuilder, TuneRequest};
use baseline_tune::tables::{TableGrid, TableKind, TableSet};
use chrono::{DateTime, TimeZone, Utc};
use once_cell::sync::Lazy;

/// Frozen clock used wherever output must be reproducible.
pub static FROZEN_NOW: Lazy<DateTime<Utc>> =
    Lazy::new(|| Utc.with_ymd_and_hms(2024, 6, 9, 12, 30, 0).unwrap());

/// 350ci eight cylinder with nothing but builder defaults.
pub static DEFAULT_REQUEST: Lazy<TuneRequest> =
    Lazy::new(|| TuneRequest::new(EngineDescriptorBuilder::new().build()));

/// 306ci Ford small block on 34 lb/hr injectors at reference pressure.
pub static FORD_306_REQUEST: Lazy<TuneRequest> = Lazy::new(|| {
    let engine = EngineDescriptorBuilder::new()
        .displacement(306.0)
        .family("Ford_302")
        .build();
    TuneRequest::new(engine).with_components(ComponentSpecs {
        injector: Some(InjectorSpec::with_size(34.0)),
        ..ComponentSpecs::default()
    })
});

pub fn catalog() -> &'static ProfileCatalog {
    ProfileCatalog::shared()
}

pub fn combo(name: &str) -> TuneRequest {
    TuneRequest::from_combo(name, catalog()).expect("known combo")
}

pub fn flat_set(ve: f64, afr: f64, spark: f64) -> TableSet {
    TableSet {
        ve: TableGrid::filled(TableKind::Ve, ve),
        afr: TableGrid::filled(TableKind::Afr, afr),
        spark: TableGrid::filled(TableKind::Spark, spark),
    }
}
