mod _fixtures;

use _fixtures::{catalog, combo, DEFAULT_REQUEST, FORD_306_REQUEST};
use baseline_tune::catalog::{DwellControl, FiringOrderSource, SparkOutput};
use baseline_tune::derive::{
    required_fuel, ConstantValue, ParameterDeriver, RevLimits, DEFAULT_BATTERY_CORRECTION,
    DEFAULT_DWELL_MS, DEFAULT_INJECTOR_DEADTIME_MS,
};
use baseline_tune::engine::{ComponentSelection, EngineDescriptorBuilder, TuneSettings};
use baseline_tune::notice::Notice;
use baseline_tune::derive_parameters;
use proptest::prelude::*;

#[test]
fn required_fuel_reference_scenario() {
    assert_eq!(required_fuel(306.0, 8, 34.0, 43.5), 0.51);
    assert_eq!(derive_parameters(&FORD_306_REQUEST).required_fuel, 0.51);
}

#[test]
fn fuel_pressure_corrects_required_fuel() {
    let params = derive_parameters(&combo("Ford_302_X303_34lb"));
    assert_eq!(params.fuel_pressure_psi, 39.0);
    assert_eq!(params.required_fuel, 0.44);
}

#[test]
fn missing_components_use_estimated_defaults() {
    let params = derive_parameters(&DEFAULT_REQUEST);
    assert_eq!(params.injector.size_lb_hr, 34.0);
    assert_eq!(params.injector.deadtime_ms, DEFAULT_INJECTOR_DEADTIME_MS);
    assert_eq!(params.injector.battery_correction, DEFAULT_BATTERY_CORRECTION);
    assert_eq!(params.coil.dwell_time_ms, DEFAULT_DWELL_MS);
    assert_eq!(params.coil.dwell_control, DwellControl::VoltageBased);
    assert_eq!(params.coil.spark_output, SparkOutput::GoingHigh);
    assert!(!params.ego.wideband);
    assert_eq!(params.ego.codes, [159.0, 921.0, 123.0, 123.0]);

    let notices = params.notices();
    let estimated: Vec<&str> = notices
        .iter()
        .filter_map(|notice| match notice {
            Notice::MissingSpecFallback { field, .. } => Some(*field),
            _ => None,
        })
        .collect();
    assert_eq!(
        estimated,
        ["injector size", "injector deadtime", "battery correction", "dwell time"]
    );
}

#[test]
fn partial_injector_spec_only_estimates_missing_fields() {
    let params = derive_parameters(&FORD_306_REQUEST);
    assert!(!params.injector.size_estimated);
    assert!(params.injector.deadtime_estimated);
    assert_eq!(params.notices().len(), 3);
}

#[test]
fn known_combo_needs_no_fallbacks() {
    let params = derive_parameters(&combo("Ford_302_X303_34lb"));
    assert!(params.notices().is_empty());
    assert_eq!(params.coil.dwell_time_ms, 3.0);
    assert_eq!(params.firing_order, [1, 5, 4, 2, 6, 3, 7, 8]);
    assert_eq!(params.firing_order_source, FiringOrderSource::Family);
}

#[test]
fn rev_limits_derive_from_hard_limit() {
    let request = DEFAULT_REQUEST.clone().with_settings(TuneSettings {
        rev_limit: Some(7000),
        ..TuneSettings::default()
    });
    let params = derive_parameters(&request);
    assert_eq!(
        params.rev_limits,
        RevLimits {
            hard: 7000,
            soft: 6700,
            spark_resume: 6800,
            fuel_resume: 6500,
        }
    );
    assert_eq!(derive_parameters(&DEFAULT_REQUEST).rev_limits.hard, 6500);
}

#[test]
fn firing_order_falls_back_by_cylinder_count() {
    let deriver = ParameterDeriver::new(catalog());
    let derive = |cylinders: u8, family: &str| {
        let engine = EngineDescriptorBuilder::new()
            .cylinders(cylinders)
            .family(family)
            .build();
        deriver.derive(&engine, &Default::default(), &Default::default())
    };

    let v6 = derive(6, "GM_V6");
    assert_eq!(v6.firing_order, [1, 6, 5, 4, 3, 2]);
    assert_eq!(v6.firing_order_source, FiringOrderSource::Family);

    let inline_six = derive(6, "Custom");
    assert_eq!(inline_six.firing_order, [1, 5, 3, 6, 2, 4]);
    assert_eq!(inline_six.firing_order_source, FiringOrderSource::CylinderDefault);

    let five = derive(5, "Audi_I5");
    assert_eq!(five.firing_order, [1, 8, 4, 3, 6, 5, 7, 2]);
    assert_eq!(five.firing_order_source, FiringOrderSource::EightCylinderFallback);
    assert!(five
        .notices()
        .iter()
        .any(|notice| matches!(notice, Notice::FiringOrderFallback { cylinders: 5, .. })));
}

#[test]
fn wideband_selection_sets_ego_codes() {
    let mut request = combo("Ford_302_X303_34lb");
    request.components = ComponentSelection {
        injector_model: Some("Bosch_42lb_Green".to_string()),
        wideband_model: Some("AEM_30-4110".to_string()),
        ..ComponentSelection::default()
    }
    .resolve(catalog());
    let params = derive_parameters(&request);
    assert!(params.ego.wideband);
    assert_eq!(params.ego.codes, [0.0, 1024.0, 100.0, 203.0]);
}

#[test]
fn constants_follow_section_order() {
    let params = derive_parameters(&DEFAULT_REQUEST);
    let constants = params.constants();
    let keys: Vec<&str> = constants.iter().map(|constant| constant.key).collect();
    assert_eq!(&keys[..5], ["reqFuel", "injOpen", "battFac", "RevLimRpm2", "RevLimRpm"]);
    assert_eq!(keys.last(), Some(&"egoADC"));
    assert_eq!(keys.len(), 30);
    assert_eq!(constants[0].value, ConstantValue::Number(0.58));
    // Conservative timing idles at 15 degrees.
    let idle = constants
        .iter()
        .find(|constant| constant.key == "IdleAdv")
        .map(|constant| constant.value.clone());
    assert_eq!(idle, Some(ConstantValue::Number(15.0)));
}

proptest! {
    #[test]
    fn required_fuel_never_rises_with_pressure(
        displacement in 60.0f64..700.0,
        cylinders in 1u8..=12,
        injector in 14.0f64..220.0,
        low in 20.0f64..80.0,
        delta in 0.0f64..40.0,
    ) {
        let at_low = required_fuel(displacement, cylinders, injector, low);
        let at_high = required_fuel(displacement, cylinders, injector, low + delta);
        prop_assert!(at_high <= at_low);
    }

    #[test]
    fn soft_limit_sits_below_hard_limit(hard in 0u32..20_000) {
        let limits = RevLimits::from_hard_limit(hard);
        prop_assert_eq!(limits.hard - limits.soft, 300);
        prop_assert!(limits.fuel_resume < limits.soft);
        prop_assert!(limits.spark_resume < limits.hard);
    }
}
