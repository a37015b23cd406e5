use tracing::{debug, warn};

use super::{resample, TableGrid, TableKind, TableSet, GRID_SIZE, LOAD_BINS, RPM_BINS};
use crate::catalog::{AfrProfile, ProfileCatalog, TimingProfile};
use crate::engine::{CamProfile, EngineDescriptor, ProfileSelection};

const VE_BASE: f64 = 80.0;
const VE_LIGHT_LOAD: f64 = 65.0;
const VE_HEAVY_LOAD: f64 = 95.0;
const VE_LOW_RPM_FACTOR: f64 = 0.9;
const VE_HIGH_RPM_FACTOR: f64 = 0.95;
const VE_MIN: f64 = 30.0;
const VE_MAX: f64 = 120.0;

const SPARK_MIN: f64 = 5.0;
const SPARK_MAX: f64 = 45.0;

/// Light load ceiling for VE (exclusive) in kPa.
const VE_LIGHT_LOAD_BELOW: u32 = 50;
/// Heavy load floor for VE and spark (exclusive) in kPa.
const HEAVY_LOAD_ABOVE: u32 = 100;
/// Cruise ceiling for AFR (inclusive) in kPa.
const AFR_CRUISE_MAX: u32 = 50;
/// Acceleration ceiling for AFR (inclusive) in kPa.
const AFR_ACCEL_MAX: u32 = 90;

const LOW_RPM_BELOW: u32 = 1500;
const HIGH_RPM_ABOVE: u32 = 5500;
/// Idle override ceiling (inclusive).
const IDLE_RPM_MAX: u32 = 900;
/// Redline override floor (exclusive).
const REDLINE_RPM_ABOVE: u32 = 6000;

/// Builds VE, AFR and spark tables from catalog profiles.
#[derive(Debug, Clone, Copy)]
pub struct TableGenerator<'a> {
    catalog: &'a ProfileCatalog,
}

impl<'a> TableGenerator<'a> {
    pub fn new(catalog: &'a ProfileCatalog) -> Self {
        Self { catalog }
    }

    /// Generates one table.
    ///
    /// `profile_name` selects the AFR or timing profile; the VE table is
    /// shaped by the engine's camshaft instead and ignores it. Unknown names
    /// fall back to the catalog defaults and the substitution is recorded on
    /// the returned grid.
    pub fn generate(&self, kind: TableKind, engine: &EngineDescriptor, profile_name: &str) -> TableGrid {
        let grid = match kind {
            TableKind::Ve => ve_table(engine.cam_profile),
            TableKind::Afr => {
                let resolved = self.catalog.resolve_afr_profile(profile_name);
                afr_table(resolved.profile).with_profile(profile_name, resolved.name)
            }
            TableKind::Spark => {
                let resolved = self.catalog.resolve_timing_profile(profile_name);
                spark_table(resolved.profile).with_profile(profile_name, resolved.name)
            }
        };
        if let Some(profile) = grid.profile().filter(|profile| profile.fell_back()) {
            warn!(
                table = %kind,
                requested = %profile.requested,
                substituted = %profile.resolved,
                "unknown profile, using default"
            );
        }
        debug!(table = %kind, "generated table");
        grid
    }

    /// Generates the full VE/AFR/spark set for a run.
    pub fn generate_all(&self, engine: &EngineDescriptor, profiles: &ProfileSelection) -> TableSet {
        TableSet {
            ve: self.generate(TableKind::Ve, engine, &profiles.afr),
            afr: self.generate(TableKind::Afr, engine, &profiles.afr),
            spark: self.generate(TableKind::Spark, engine, &profiles.timing),
        }
    }
}

fn build_grid(kind: TableKind, cell: impl Fn(usize, usize) -> f64) -> TableGrid {
    let cells = (0..GRID_SIZE)
        .map(|row| (0..GRID_SIZE).map(|column| cell(row, column)).collect())
        .collect();
    TableGrid::new(kind, RPM_BINS.to_vec(), LOAD_BINS.to_vec(), cells)
}

/// Per-row base values: the profile's load curve when it has one, otherwise
/// the load-bucket rule.
fn row_bases(load_curve: Option<&[f64]>, bucket: impl Fn(u32) -> f64) -> Vec<f64> {
    load_curve
        .and_then(|curve| resample(curve, GRID_SIZE))
        .unwrap_or_else(|| LOAD_BINS.iter().map(|&load| bucket(load)).collect())
}

fn ve_cell(load: u32, rpm: u32, cam: CamProfile) -> f64 {
    let mut ve = if load < VE_LIGHT_LOAD_BELOW {
        VE_LIGHT_LOAD
    } else if load > HEAVY_LOAD_ABOVE {
        VE_HEAVY_LOAD
    } else {
        VE_BASE
    };
    if rpm < LOW_RPM_BELOW {
        ve *= VE_LOW_RPM_FACTOR;
    } else if rpm > HIGH_RPM_ABOVE {
        ve *= VE_HIGH_RPM_FACTOR;
    }
    ve *= cam.ve_multiplier();
    ve.round().clamp(VE_MIN, VE_MAX)
}

fn ve_table(cam: CamProfile) -> TableGrid {
    build_grid(TableKind::Ve, |row, column| {
        ve_cell(LOAD_BINS[row], RPM_BINS[column], cam)
    })
}

fn afr_table(profile: &AfrProfile) -> TableGrid {
    let bases = row_bases(profile.load_curve.as_deref(), |load| {
        if load <= AFR_CRUISE_MAX {
            profile.cruise
        } else if load <= AFR_ACCEL_MAX {
            profile.acceleration
        } else {
            profile.wot
        }
    });
    build_grid(TableKind::Afr, |row, column| {
        let target = if RPM_BINS[column] <= IDLE_RPM_MAX {
            profile.idle
        } else {
            bases[row]
        };
        (target * 10.0).round() / 10.0
    })
}

fn spark_table(profile: &TimingProfile) -> TableGrid {
    let bases = row_bases(profile.load_curve.as_deref(), |load| {
        if load > HEAVY_LOAD_ABOVE {
            profile.power
        } else {
            profile.cruise
        }
    });
    build_grid(TableKind::Spark, |row, column| {
        let rpm = RPM_BINS[column];
        let advance = if rpm <= IDLE_RPM_MAX {
            profile.idle
        } else if rpm > REDLINE_RPM_ABOVE {
            profile.redline
        } else {
            bases[row]
        };
        advance.round().clamp(SPARK_MIN, SPARK_MAX)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ve_buckets_match_reference_values() {
        assert_eq!(ve_cell(20, 600, CamProfile::Stock), 59.0);
        assert_eq!(ve_cell(60, 3200, CamProfile::Stock), 80.0);
        assert_eq!(ve_cell(120, 6000, CamProfile::Stock), 90.0);
        assert_eq!(ve_cell(120, 3200, CamProfile::Aggressive), 105.0);
    }

    #[test]
    fn ve_is_clamped() {
        for load in LOAD_BINS {
            for rpm in RPM_BINS {
                let ve = ve_cell(load, rpm, CamProfile::Aggressive);
                assert!((VE_MIN..=VE_MAX).contains(&ve));
            }
        }
    }
}
