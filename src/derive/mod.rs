//! Scalar ECU constants derived from the engine and its components.
//!
//! [`ParameterDeriver::derive`] is the single place where missing component
//! data is replaced by estimated defaults:
//!
//! | Value | Source | Estimated default |
//! |-------|--------|-------------------|
//! | injector size | `components.injector.size_lb_hr` | [`DEFAULT_INJECTOR_SIZE_LB_HR`] |
//! | injector deadtime | `components.injector.deadtime_ms` | [`DEFAULT_INJECTOR_DEADTIME_MS`] |
//! | battery correction | `components.injector.battery_correction` | [`DEFAULT_BATTERY_CORRECTION`] |
//! | dwell | `components.coil.dwell_time_ms` | [`DEFAULT_DWELL_MS`] |
//! | fuel pressure | `settings.fuel_pressure_psi` | [`REFERENCE_FUEL_PRESSURE_PSI`] |
//! | rev limit | `settings.rev_limit` | [`DEFAULT_REV_LIMIT`] |
//! | EGO calibration | `components.wideband` | [`NARROWBAND_EGO_ADC`] |
//!
//! Estimated values are tagged so the documentation step can flag them; see
//! [`DerivedParameters::notices`].

mod fuel;
mod ignition;
mod sensors;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::catalog::{FiringOrderSource, ProfileCatalog};
use crate::engine::{ComponentSpecs, EngineDescriptor, ProfileSelection, TuneSettings};
use crate::notice::Notice;

pub use fuel::{required_fuel, REFERENCE_FUEL_PRESSURE_PSI};
pub use ignition::{CoilSettings, RevLimits, DEFAULT_DWELL_MS, DEFAULT_REV_LIMIT};
pub use sensors::{
    EgoCalibration, SensorCalibration, ADC_COUNTS_PER_VOLT, DEFAULT_MAP_ADC,
    DEFAULT_THERMISTOR_ADC, DEFAULT_TPS_ADC, NARROWBAND_EGO_ADC,
};

/// Injector size assumed when no injector is specified, in lb/hr.
pub const DEFAULT_INJECTOR_SIZE_LB_HR: f64 = 34.0;

pub const DEFAULT_INJECTOR_DEADTIME_MS: f64 = 0.6;

pub const DEFAULT_BATTERY_CORRECTION: f64 = 0.15;

// Fixed firmware settings written with every tune.
const ENGINE_TYPE: f64 = 0.0;
const ALGORITHM_SPEED_DENSITY: f64 = 0.0;
const MAP_TYPE: f64 = 0.0;
const FAN_TEMP_F: f64 = 210.0;
const FAN_HYSTERESIS_F: f64 = 5.0;
const PRIME_PULSE_MS: f64 = 5.0;
const EGO_TYPE: f64 = 0.0;
const EGO_SWITCH_POINT: f64 = 400.0;
const TRIGGER_ANGLE: f64 = 0.0;
const FIXED_ANGLE: f64 = 10.0;
const SPARK_MODE: f64 = 0.0;

/// Injector values after default resolution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InjectorSettings {
    pub size_lb_hr: f64,
    pub deadtime_ms: f64,
    pub battery_correction: f64,
    pub size_estimated: bool,
    pub deadtime_estimated: bool,
    pub battery_correction_estimated: bool,
}

impl InjectorSettings {
    fn resolve(components: &ComponentSpecs) -> Self {
        let injector = components.injector.as_ref();
        let deadtime = injector.and_then(|injector| injector.deadtime_ms);
        let battery = injector.and_then(|injector| injector.battery_correction);
        Self {
            size_lb_hr: injector
                .map(|injector| injector.size_lb_hr)
                .unwrap_or(DEFAULT_INJECTOR_SIZE_LB_HR),
            deadtime_ms: deadtime.unwrap_or(DEFAULT_INJECTOR_DEADTIME_MS),
            battery_correction: battery.unwrap_or(DEFAULT_BATTERY_CORRECTION),
            size_estimated: injector.is_none(),
            deadtime_estimated: deadtime.is_none(),
            battery_correction_estimated: battery.is_none(),
        }
    }
}

/// A named constant in the flattened parameter list.
#[derive(Debug, Clone, PartialEq)]
pub struct Constant {
    pub key: &'static str,
    pub value: ConstantValue,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConstantValue {
    Number(f64),
    List(Vec<f64>),
}

fn number(key: &'static str, value: f64) -> Constant {
    Constant {
        key,
        value: ConstantValue::Number(value),
    }
}

fn list<T: Copy + Into<f64>>(key: &'static str, values: &[T]) -> Constant {
    Constant {
        key,
        value: ConstantValue::List(values.iter().map(|&value| value.into()).collect()),
    }
}

/// Every scalar the artifact needs, computed once per run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedParameters {
    pub required_fuel: f64,
    pub fuel_pressure_psi: f64,
    pub injector: InjectorSettings,
    pub rev_limits: RevLimits,
    pub coil: CoilSettings,
    /// Idle advance taken from the resolved timing profile.
    pub idle_advance: f64,
    pub displacement_ci: f64,
    pub cylinders: u8,
    pub injectors: u8,
    pub engine_family: String,
    pub firing_order: Vec<u8>,
    pub firing_order_source: FiringOrderSource,
    pub ego: EgoCalibration,
    pub sensors: SensorCalibration,
}

impl DerivedParameters {
    /// Constants in the fixed order of the `[Constants]` section.
    pub fn constants(&self) -> Vec<Constant> {
        vec![
            number("reqFuel", self.required_fuel),
            number("injOpen", self.injector.deadtime_ms),
            number("battFac", self.injector.battery_correction),
            number("RevLimRpm2", self.rev_limits.hard as f64),
            number("RevLimRpm", self.rev_limits.soft as f64),
            number("RevLimSparkResume", self.rev_limits.spark_resume as f64),
            number("RevLimFuelResume", self.rev_limits.fuel_resume as f64),
            number("nCylinders", f64::from(self.cylinders)),
            number("nInjectors", f64::from(self.injectors)),
            list("firingOrder", &self.firing_order),
            number("engineType", ENGINE_TYPE),
            number("algorithm", ALGORITHM_SPEED_DENSITY),
            number("mapType", MAP_TYPE),
            number("fanTemp", FAN_TEMP_F),
            number("fanHyst", FAN_HYSTERESIS_F),
            number("primePulse", PRIME_PULSE_MS),
            number("egoType", EGO_TYPE),
            number("egoSwitch", EGO_SWITCH_POINT),
            number("dwellcont", f64::from(self.coil.dwell_control.flag())),
            number("dwellrun", self.coil.dwell_time_ms),
            number("IdleAdv", self.idle_advance),
            number("triggerAngle", TRIGGER_ANGLE),
            number("FixedAngle", FIXED_ANGLE),
            number("SparkMode", SPARK_MODE),
            number("IgInv", f64::from(self.coil.spark_output.flag())),
            list("mapADC", &self.sensors.map_adc),
            list("matADC", &self.sensors.mat_adc),
            list("cltADC", &self.sensors.clt_adc),
            list("tpsADC", &self.sensors.tps_adc),
            list("egoADC", &self.ego.codes),
        ]
    }

    /// Estimated-default and firing-order substitutions made during derivation.
    pub fn notices(&self) -> Vec<Notice> {
        let mut notices = Vec::new();
        if self.injector.size_estimated {
            notices.push(Notice::MissingSpecFallback {
                field: "injector size",
                value: self.injector.size_lb_hr,
            });
        }
        if self.injector.deadtime_estimated {
            notices.push(Notice::MissingSpecFallback {
                field: "injector deadtime",
                value: self.injector.deadtime_ms,
            });
        }
        if self.injector.battery_correction_estimated {
            notices.push(Notice::MissingSpecFallback {
                field: "battery correction",
                value: self.injector.battery_correction,
            });
        }
        if self.coil.dwell_estimated {
            notices.push(Notice::MissingSpecFallback {
                field: "dwell time",
                value: self.coil.dwell_time_ms,
            });
        }
        if self.firing_order_source != FiringOrderSource::Family {
            notices.push(Notice::FiringOrderFallback {
                cylinders: self.cylinders,
                family: self.engine_family.clone(),
                source: self.firing_order_source,
            });
        }
        notices
    }
}

/// Computes [`DerivedParameters`] against a catalog.
#[derive(Debug, Clone, Copy)]
pub struct ParameterDeriver<'a> {
    catalog: &'a ProfileCatalog,
}

impl<'a> ParameterDeriver<'a> {
    pub fn new(catalog: &'a ProfileCatalog) -> Self {
        Self { catalog }
    }

    pub fn derive(
        &self,
        engine: &EngineDescriptor,
        components: &ComponentSpecs,
        settings: &TuneSettings,
    ) -> DerivedParameters {
        let injector = InjectorSettings::resolve(components);
        let fuel_pressure_psi = settings
            .fuel_pressure_psi
            .unwrap_or(REFERENCE_FUEL_PRESSURE_PSI);
        let required_fuel = required_fuel(
            engine.displacement_ci,
            engine.cylinders,
            injector.size_lb_hr,
            fuel_pressure_psi,
        );
        let rev_limits =
            RevLimits::from_hard_limit(settings.rev_limit.unwrap_or(DEFAULT_REV_LIMIT));
        let coil = CoilSettings::from_spec(components.coil.as_ref());

        let profiles = ProfileSelection::for_request(engine, settings);
        let idle_advance = self
            .catalog
            .resolve_timing_profile(&profiles.timing)
            .profile
            .idle;

        let (firing_order, firing_order_source) = self
            .catalog
            .firing_order(engine.cylinders, &engine.engine_family);

        let parameters = DerivedParameters {
            required_fuel,
            fuel_pressure_psi,
            injector,
            rev_limits,
            coil,
            idle_advance,
            displacement_ci: engine.displacement_ci,
            cylinders: engine.cylinders,
            injectors: engine.cylinders,
            engine_family: engine.engine_family.clone(),
            firing_order: firing_order.to_vec(),
            firing_order_source,
            ego: EgoCalibration::from_spec(components.wideband.as_ref()),
            sensors: SensorCalibration::default(),
        };

        for notice in parameters.notices() {
            warn!(%notice, "recovered during parameter derivation");
        }
        debug!(
            required_fuel = parameters.required_fuel,
            hard_rev_limit = parameters.rev_limits.hard,
            "derived parameters"
        );
        parameters
    }
}
