mod _fixtures;

use _fixtures::{catalog, combo, DEFAULT_REQUEST};
use baseline_tune::engine::{
    validate, ComponentSelection, EngineDescriptorBuilder, TuneRequest, TuneSettings,
};
use insta::assert_json_snapshot;

#[test]
fn bare_request_gets_sizing_warning_and_suggestions() {
    let report = validate(&DEFAULT_REQUEST);
    assert_json_snapshot!(report, @r###"
    {
      "warnings": [
        "Injectors may be undersized for 455hp. Consider 46lb+ injectors."
      ],
      "suggestions": [
        "Injector specs unknown; estimated 34 lb/hr values are used",
        "No wideband O2 sensor configured; install one before tuning the VE table"
      ]
    }
    "###);
}

#[test]
fn oversized_injectors_are_flagged() {
    let engine = EngineDescriptorBuilder::new()
        .displacement(100.0)
        .cylinders(4)
        .build();
    let request = TuneRequest::new(engine).with_components(
        ComponentSelection {
            injector_model: Some("Siemens_80lb".to_string()),
            wideband_model: Some("PLX_DM6".to_string()),
            ..ComponentSelection::default()
        }
        .resolve(catalog()),
    );
    let report = validate(&request);
    assert_eq!(report.warnings.len(), 1);
    assert!(report.warnings[0].starts_with("Large injectors may hurt idle quality"));
    assert!(report.suggestions.is_empty());
}

#[test]
fn rev_limit_above_coil_rating_is_flagged() {
    let mut request = DEFAULT_REQUEST.clone().with_settings(TuneSettings {
        rev_limit: Some(7000),
        ..TuneSettings::default()
    });
    request.components = ComponentSelection {
        coil_model: Some("GM_HEI".to_string()),
        ..ComponentSelection::default()
    }
    .resolve(catalog());
    let report = validate(&request);
    assert!(report
        .warnings
        .contains(&"Rev limit 7000 RPM exceeds the coil's 6200 RPM capability".to_string()));
    assert!(report
        .suggestions
        .contains(&"Lower the rev limit to 6200 RPM or upgrade the coil".to_string()));
}

#[test]
fn weak_fuel_pump_is_flagged() {
    let mut request = DEFAULT_REQUEST.clone();
    request.components = ComponentSelection {
        fuel_pump_model: Some("stock".to_string()),
        ..ComponentSelection::default()
    }
    .resolve(catalog());
    let report = validate(&request);
    assert!(report
        .warnings
        .contains(&"Fuel pump supports about 200hp, below the estimated 455hp".to_string()));
}

#[test]
fn validation_never_blocks_generation() {
    let request = combo("Ford_302_X303_34lb");
    let generation = baseline_tune::build_artifact(&request, Default::default()).expect("build");
    assert!(!generation.validation.is_clean());
    assert_eq!(
        generation.validation.warnings,
        ["Injectors may be undersized for 398hp. Consider 40lb+ injectors."]
    );
}
