use serde::{Deserialize, Serialize};

use crate::catalog::{CoilSpec, DwellControl, SparkOutput};

/// Hard rev limit used when none is configured.
pub const DEFAULT_REV_LIMIT: u32 = 6500;

/// Running dwell used when the coil is unknown, in milliseconds.
pub const DEFAULT_DWELL_MS: f64 = 4.0;

const SOFT_LIMIT_BELOW_HARD: i64 = 300;
const SPARK_RESUME_BELOW_HARD: i64 = 200;
const FUEL_RESUME_BELOW_SOFT: i64 = 200;

/// Rev limiter thresholds in rpm.
///
/// Signed so that an unreasonably low configured limit still produces
/// well-defined (if meaningless) thresholds instead of wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevLimits {
    pub hard: i64,
    pub soft: i64,
    pub spark_resume: i64,
    pub fuel_resume: i64,
}

impl RevLimits {
    pub fn from_hard_limit(hard_limit: u32) -> Self {
        let hard = i64::from(hard_limit);
        let soft = hard - SOFT_LIMIT_BELOW_HARD;
        Self {
            hard,
            soft,
            spark_resume: hard - SPARK_RESUME_BELOW_HARD,
            fuel_resume: soft - FUEL_RESUME_BELOW_SOFT,
        }
    }
}

/// Coil-derived ignition settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoilSettings {
    pub dwell_time_ms: f64,
    /// Set when [`DEFAULT_DWELL_MS`] was substituted.
    pub dwell_estimated: bool,
    pub dwell_control: DwellControl,
    pub spark_output: SparkOutput,
}

impl CoilSettings {
    /// Unknown coils run voltage-based dwell with a rising spark output.
    pub fn from_spec(coil: Option<&CoilSpec>) -> Self {
        let dwell = coil.and_then(|coil| coil.dwell_time_ms);
        Self {
            dwell_time_ms: dwell.unwrap_or(DEFAULT_DWELL_MS),
            dwell_estimated: dwell.is_none(),
            dwell_control: coil
                .map(|coil| coil.dwell_control)
                .unwrap_or(DwellControl::VoltageBased),
            spark_output: coil
                .map(|coil| coil.spark_output)
                .unwrap_or(SparkOutput::GoingHigh),
        }
    }
}
