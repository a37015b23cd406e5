use serde::Serialize;

use super::types::TuneRequest;
use crate::derive::{DEFAULT_INJECTOR_SIZE_LB_HR, DEFAULT_REV_LIMIT};

/// Rough crank horsepower per cubic inch assumed when sizing parts.
const HP_PER_CUBIC_INCH: f64 = 1.3;

/// Horsepower one lb/hr of injector flow supports.
const HP_PER_LB_HR: f64 = 10.0;

/// Findings about a request, handed to the documentation step as plain text.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ValidationReport {
    pub warnings: Vec<String>,
    pub suggestions: Vec<String>,
}

impl ValidationReport {
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty() && self.suggestions.is_empty()
    }
}

/// Checks component choices against the engine and returns the findings.
pub fn validate(request: &TuneRequest) -> ValidationReport {
    let mut report = ValidationReport::default();
    let estimated_hp = request.engine.displacement_ci * HP_PER_CUBIC_INCH;
    validate_injector(request, estimated_hp, &mut report);
    validate_coil(request, &mut report);
    validate_fuel_pump(request, estimated_hp, &mut report);
    validate_sensors(request, &mut report);
    report
}

fn validate_injector(request: &TuneRequest, estimated_hp: f64, report: &mut ValidationReport) {
    let size = match &request.components.injector {
        Some(injector) => injector.size_lb_hr,
        None => {
            report.suggestions.push(format!(
                "Injector specs unknown; estimated {DEFAULT_INJECTOR_SIZE_LB_HR} lb/hr values are used"
            ));
            DEFAULT_INJECTOR_SIZE_LB_HR
        }
    };
    let max_hp = size * HP_PER_LB_HR;
    if estimated_hp > max_hp * 0.8 {
        report.warnings.push(format!(
            "Injectors may be undersized for {}hp. Consider {}lb+ injectors.",
            estimated_hp.round(),
            (estimated_hp / HP_PER_LB_HR).ceil()
        ));
    }
    if size > estimated_hp / 5.0 {
        report.warnings.push(
            "Large injectors may hurt idle quality. Consider smaller injectors for better drivability."
                .to_string(),
        );
    }
}

fn validate_coil(request: &TuneRequest, report: &mut ValidationReport) {
    let rev_limit = request.settings.rev_limit.unwrap_or(DEFAULT_REV_LIMIT);
    let Some(max_rpm) = request.components.coil.as_ref().and_then(|coil| coil.max_rpm) else {
        return;
    };
    if rev_limit > max_rpm {
        report.warnings.push(format!(
            "Rev limit {rev_limit} RPM exceeds the coil's {max_rpm} RPM capability"
        ));
        report
            .suggestions
            .push(format!("Lower the rev limit to {max_rpm} RPM or upgrade the coil"));
    }
}

fn validate_fuel_pump(request: &TuneRequest, estimated_hp: f64, report: &mut ValidationReport) {
    if let Some(pump) = &request.components.fuel_pump {
        if f64::from(pump.max_hp) < estimated_hp {
            report.warnings.push(format!(
                "Fuel pump supports about {}hp, below the estimated {}hp",
                pump.max_hp,
                estimated_hp.round()
            ));
        }
    }
}

fn validate_sensors(request: &TuneRequest, report: &mut ValidationReport) {
    if request.components.wideband.is_none() {
        report.suggestions.push(
            "No wideband O2 sensor configured; install one before tuning the VE table".to_string(),
        );
    }
}
