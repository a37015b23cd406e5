use serde::{Deserialize, Serialize};

/// Fuel injector characteristics.
///
/// | Field | Unit | Fallback when absent |
/// |-------|------|----------------------|
/// | `size_lb_hr` | lb/hr at 43.5 psi | `34.0` (whole injector missing) |
/// | `deadtime_ms` | milliseconds | `0.6` |
/// | `battery_correction` | ms/V | `0.15` |
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InjectorSpec {
    /// Static flow rating.
    pub size_lb_hr: f64,
    /// Opening time.
    #[serde(default)]
    pub deadtime_ms: Option<f64>,
    /// Deadtime correction per volt of battery deviation.
    #[serde(default)]
    pub battery_correction: Option<f64>,
    /// Rough horsepower the injector can support.
    #[serde(default)]
    pub max_hp: Option<u32>,
    /// Free-form notes shown to users.
    #[serde(default)]
    pub notes: String,
}

impl InjectorSpec {
    /// Injector with only a flow rating, as entered for custom parts.
    pub fn with_size(size_lb_hr: f64) -> Self {
        Self {
            size_lb_hr,
            deadtime_ms: None,
            battery_correction: None,
            max_hp: None,
            notes: String::new(),
        }
    }
}

/// How the ECU controls coil charge time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DwellControl {
    /// Fixed dwell time (`dwell_time`).
    DwellTime,
    /// Battery-voltage based duty. Every other tag lands here.
    #[serde(other)]
    VoltageBased,
}

impl DwellControl {
    /// Flag written to the `dwellcont` constant.
    pub const fn flag(self) -> u8 {
        match self {
            DwellControl::DwellTime => 1,
            DwellControl::VoltageBased => 0,
        }
    }
}

/// Spark output polarity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SparkOutput {
    /// Output goes high to fire (`going_high`).
    GoingHigh,
    /// Output goes low to fire. Every other tag lands here.
    #[serde(other)]
    GoingLow,
}

impl SparkOutput {
    /// Flag written to the `IgInv` constant.
    pub const fn flag(self) -> u8 {
        match self {
            SparkOutput::GoingHigh => 1,
            SparkOutput::GoingLow => 0,
        }
    }
}

/// Ignition coil characteristics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoilSpec {
    /// Coil layout (distributor, waste spark, coil on plug, ...).
    pub coil_type: String,
    /// Running dwell in milliseconds.
    #[serde(default)]
    pub dwell_time_ms: Option<f64>,
    /// Highest rpm the coil keeps up with.
    #[serde(default)]
    pub max_rpm: Option<u32>,
    /// Spark output polarity.
    pub spark_output: SparkOutput,
    /// Dwell control strategy.
    pub dwell_control: DwellControl,
    #[serde(default)]
    pub notes: String,
}

/// Wideband controller analog output calibration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WidebandSpec {
    pub low_voltage: f64,
    pub high_voltage: f64,
    pub low_afr: f64,
    pub high_afr: f64,
    #[serde(default)]
    pub notes: String,
}

/// Fuel pump characteristics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuelPumpSpec {
    /// Free flow in litres per hour when known.
    #[serde(default)]
    pub flow_lph: Option<f64>,
    /// Pressure the flow rating was measured at.
    #[serde(default)]
    pub rated_pressure_psi: Option<f64>,
    /// Rough horsepower the pump can support.
    pub max_hp: u32,
    #[serde(default)]
    pub fuel_type: String,
    #[serde(default)]
    pub notes: String,
}

/// A proven engine combination users can start from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnownCombo {
    pub displacement_ci: f64,
    pub cylinders: u8,
    pub compression_ratio: f64,
    pub engine_family: String,
    pub cam_profile: String,
    pub injector_model: String,
    pub fuel_pressure_psi: f64,
    pub fuel_type: String,
    pub coil_model: String,
    pub rev_limit: u32,
    pub afr_profile: String,
    pub timing_profile: String,
    #[serde(default)]
    pub notes: String,
}
