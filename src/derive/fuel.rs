/// Reference pressure injector flow ratings are quoted at.
pub const REFERENCE_FUEL_PRESSURE_PSI: f64 = 43.5;

/// Scaling constant of the RequiredFuel formula.
const REQUIRED_FUEL_SCALE: f64 = 0.4536;

/// Base injector pulse width for one cylinder filling, in milliseconds.
///
/// `((displacement / cylinders) * 0.4536 / injector_size) * sqrt(43.5 / pressure)`
/// rounded to two decimals. A zero cylinder count, injector size or pressure
/// yields a non-finite value, which the serializer rejects.
pub fn required_fuel(
    displacement_ci: f64,
    cylinders: u8,
    injector_size_lb_hr: f64,
    fuel_pressure_psi: f64,
) -> f64 {
    let per_cylinder = displacement_ci / f64::from(cylinders);
    let base = per_cylinder * REQUIRED_FUEL_SCALE / injector_size_lb_hr;
    let correction = (REFERENCE_FUEL_PRESSURE_PSI / fuel_pressure_psi).sqrt();
    (base * correction * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_pressure_has_no_correction() {
        assert_eq!(required_fuel(306.0, 8, 34.0, 43.5), 0.51);
    }

    #[test]
    fn zero_cylinders_is_not_finite() {
        assert!(!required_fuel(306.0, 0, 34.0, 43.5).is_finite());
    }
}
