use serde::{Deserialize, Serialize};

use crate::catalog::WidebandSpec;

/// ADC counts per volt of a 10-bit converter on a 5 V reference.
pub const ADC_COUNTS_PER_VOLT: f64 = 204.8;

/// EGO calibration written when no wideband controller is configured.
pub const NARROWBAND_EGO_ADC: [u16; 4] = [159, 921, 123, 123];

pub const DEFAULT_MAP_ADC: [u16; 4] = [255, 255, 255, 1023];
pub const DEFAULT_THERMISTOR_ADC: [u16; 8] = [32, 158, 177, 121, 239, 90, 252, 68];
pub const DEFAULT_TPS_ADC: [u16; 4] = [159, 921, 159, 921];

/// Oxygen sensor calibration codes: `low_adc, high_adc, low_afr×10, high_afr×10`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EgoCalibration {
    pub codes: [f64; 4],
    /// False when the narrowband default was used.
    pub wideband: bool,
}

impl EgoCalibration {
    pub fn from_spec(wideband: Option<&WidebandSpec>) -> Self {
        match wideband {
            Some(spec) => Self {
                codes: [
                    (spec.low_voltage * ADC_COUNTS_PER_VOLT).round(),
                    (spec.high_voltage * ADC_COUNTS_PER_VOLT).round(),
                    (spec.low_afr * 10.0).round(),
                    (spec.high_afr * 10.0).round(),
                ],
                wideband: true,
            },
            None => Self {
                codes: NARROWBAND_EGO_ADC.map(f64::from),
                wideband: false,
            },
        }
    }
}

/// Fixed MAP, air/coolant temperature and throttle calibrations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SensorCalibration {
    pub map_adc: [u16; 4],
    pub mat_adc: [u16; 8],
    pub clt_adc: [u16; 8],
    pub tps_adc: [u16; 4],
}

impl Default for SensorCalibration {
    fn default() -> Self {
        Self {
            map_adc: DEFAULT_MAP_ADC,
            mat_adc: DEFAULT_THERMISTOR_ADC,
            clt_adc: DEFAULT_THERMISTOR_ADC,
            tps_adc: DEFAULT_TPS_ADC,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wideband_codes_scale_voltage_and_afr() {
        let spec = WidebandSpec {
            low_voltage: 0.0,
            high_voltage: 5.0,
            low_afr: 10.0,
            high_afr: 20.3,
            notes: String::new(),
        };
        let ego = EgoCalibration::from_spec(Some(&spec));
        assert_eq!(ego.codes, [0.0, 1024.0, 100.0, 203.0]);
        assert!(ego.wideband);
    }

    #[test]
    fn missing_wideband_uses_narrowband_codes() {
        let ego = EgoCalibration::from_spec(None);
        assert_eq!(ego.codes, [159.0, 921.0, 123.0, 123.0]);
        assert!(!ego.wideband);
    }
}
