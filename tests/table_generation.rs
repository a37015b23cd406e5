mod _fixtures;

use _fixtures::{catalog, FORD_306_REQUEST};
use baseline_tune::catalog::{AfrProfile, ProfileCatalog};
use baseline_tune::engine::{CamProfile, EngineDescriptorBuilder, ProfileSelection};
use baseline_tune::notice::Notice;
use baseline_tune::tables::{TableGenerator, TableKind, GRID_SIZE, LOAD_BINS, RPM_BINS};
use insta::assert_debug_snapshot;
use proptest::prelude::*;

#[test]
fn every_profile_yields_canonical_grids() {
    let generator = TableGenerator::new(catalog());
    let engine = &FORD_306_REQUEST.engine;
    for afr in catalog().afr_profile_names() {
        for timing in catalog().timing_profile_names() {
            let set = generator.generate_all(engine, &ProfileSelection::new(afr, timing));
            for grid in set.iter() {
                assert!(grid.is_canonical_shape(), "{afr}/{timing} {}", grid.kind());
                assert_eq!(grid.rpm_bins(), RPM_BINS);
                assert_eq!(grid.load_bins(), LOAD_BINS);
            }
            assert!(set.notices().is_empty());
        }
    }
}

#[test]
fn unknown_afr_profile_matches_default_grid() {
    let generator = TableGenerator::new(catalog());
    let engine = &FORD_306_REQUEST.engine;
    let bogus = generator.generate(TableKind::Afr, engine, "bogus");
    let default = generator.generate(TableKind::Afr, engine, "street_performance");
    assert_eq!(bogus.cells(), default.cells());
    assert_eq!(
        bogus.fallback_notice(),
        Some(Notice::UnknownProfileFallback {
            table: TableKind::Afr,
            requested: "bogus".to_string(),
            substituted: "street_performance".to_string(),
        })
    );
    assert_eq!(default.fallback_notice(), None);
}

#[test]
fn unknown_timing_profile_uses_conservative() {
    let generator = TableGenerator::new(catalog());
    let engine = &FORD_306_REQUEST.engine;
    let set = generator.generate_all(engine, &ProfileSelection::new("street", "nitrous"));
    let conservative = generator.generate(TableKind::Spark, engine, "conservative");
    assert_eq!(set.spark.cells(), conservative.cells());
    assert_eq!(set.notices().len(), 1);
}

#[test]
fn afr_regions_follow_load_and_idle() {
    let grid = TableGenerator::new(catalog()).generate(
        TableKind::Afr,
        &FORD_306_REQUEST.engine,
        "street_performance",
    );
    // Idle columns (600, 900 rpm) use the idle target at every load.
    assert_eq!(grid.cell(15, 0), Some(14.7));
    assert_eq!(grid.cell(0, 1), Some(14.7));
    // 20..50 kPa cruise, 60..90 kPa acceleration, above that WOT.
    assert_eq!(grid.cell(3, 5), Some(15.0));
    assert_eq!(grid.cell(4, 5), Some(12.8));
    assert_eq!(grid.cell(7, 5), Some(12.8));
    assert_eq!(grid.cell(8, 5), Some(12.2));
}

#[test]
fn spark_regions_follow_rpm_and_load() {
    let grid = TableGenerator::new(catalog()).generate(
        TableKind::Spark,
        &FORD_306_REQUEST.engine,
        "conservative",
    );
    let row_at_100_kpa: Vec<f64> = grid.cells()[8].clone();
    assert_debug_snapshot!(row_at_100_kpa, @r###"
    [
        15.0,
        15.0,
        32.0,
        32.0,
        32.0,
        32.0,
        32.0,
        32.0,
        32.0,
        32.0,
        32.0,
        32.0,
        32.0,
        32.0,
        25.0,
        25.0,
    ]
    "###);
    // Above 100 kPa the power advance applies.
    assert_eq!(grid.cell(9, 7), Some(28.0));
}

#[test]
fn cam_profile_scales_ve() {
    let generator = TableGenerator::new(catalog());
    let stock = EngineDescriptorBuilder::new().cam(CamProfile::Stock).build();
    let aggressive = EngineDescriptorBuilder::new().cam(CamProfile::Aggressive).build();
    let stock = generator.generate(TableKind::Ve, &stock, "street");
    let aggressive = generator.generate(TableKind::Ve, &aggressive, "street");
    // 60 kPa at 3200 rpm: 80 × 1.0 and 80 × 1.1.
    assert_eq!(stock.cell(4, 7), Some(80.0));
    assert_eq!(aggressive.cell(4, 7), Some(88.0));
    // 20 kPa at 600 rpm: 65 × 0.9.
    assert_eq!(stock.cell(0, 0), Some(59.0));
    assert!(stock.profile().is_none());
}

#[test]
fn load_curve_replaces_load_buckets() {
    let mut profile = catalog()
        .afr_profile("street")
        .cloned()
        .expect("street profile");
    profile.load_curve = Some(vec![15.0, 12.0]);
    let catalog = ProfileCatalog::builtin().with_afr_profile("curved", profile);
    let grid = TableGenerator::new(&catalog).generate(
        TableKind::Afr,
        &FORD_306_REQUEST.engine,
        "curved",
    );
    assert_eq!(grid.cell(0, 4), Some(15.0));
    assert_eq!(grid.cell(15, 4), Some(12.0));
    assert_eq!(grid.cell(5, 4), Some(14.0));
    // Idle override still applies.
    assert_eq!(grid.cell(5, 0), Some(14.7));
}

#[test]
fn custom_catalog_profiles_are_used() {
    let lean = AfrProfile {
        idle: 15.0,
        cruise: 16.0,
        acceleration: 14.0,
        wot: 13.0,
        warmup: 14.0,
        description: "lean test profile".to_string(),
        load_curve: None,
    };
    let catalog = ProfileCatalog::builtin().with_afr_profile("lean", lean);
    let grid = TableGenerator::new(&catalog).generate(
        TableKind::Afr,
        &FORD_306_REQUEST.engine,
        "lean",
    );
    assert_eq!(grid.cell(0, 2), Some(16.0));
    assert_eq!(grid.cell(15, 2), Some(13.0));
}

proptest! {
    #[test]
    fn generated_cells_stay_in_bounds(
        displacement in 60.0f64..700.0,
        cylinders in prop_oneof![Just(4u8), Just(6u8), Just(8u8)],
        cam in prop_oneof![
            Just(CamProfile::Stock),
            Just(CamProfile::Performance),
            Just(CamProfile::Aggressive),
            Just(CamProfile::Custom),
        ],
    ) {
        let engine = EngineDescriptorBuilder::new()
            .displacement(displacement)
            .cylinders(cylinders)
            .cam(cam)
            .build();
        let set = TableGenerator::new(catalog())
            .generate_all(&engine, &ProfileSelection::new("street_strip", "aggressive"));
        prop_assert_eq!(set.ve.rows(), GRID_SIZE);
        prop_assert!(set.ve.row_major().all(|ve| (30.0..=120.0).contains(&ve)));
        prop_assert!(set.spark.row_major().all(|spark| (5.0..=45.0).contains(&spark)));
        prop_assert!(set.afr.row_major().all(|afr| (afr * 10.0 - (afr * 10.0).round()).abs() < 1e-9));
    }
}
