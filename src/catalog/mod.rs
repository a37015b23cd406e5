//! Read-only lookup tables shared by every generation run.
//!
//! The catalog bundles the AFR and timing strategy profiles, the component
//! databases (injectors, coils, wideband controllers, fuel pumps), known engine
//! combinations and firing orders. A catalog is built once, either from the
//! built-in data via [`ProfileCatalog::builtin`] or from JSON via
//! [`ProfileCatalog::from_json`], and is then only ever borrowed.
//!
//! # Fallbacks
//!
//! | Lookup | Unknown key resolves to |
//! |--------|-------------------------|
//! | AFR profile | [`DEFAULT_AFR_PROFILE`] |
//! | Timing profile | [`DEFAULT_TIMING_PROFILE`] |
//! | Firing order, unknown family | per-cylinder-count default |
//! | Firing order, unsupported cylinder count | [`FALLBACK_FIRING_ORDER`] (8 cylinders) |
//! | Component model | absent, which later resolves to estimated defaults |

mod builtin;
mod components;
mod profiles;

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::config::ConfigError;

pub use components::{
    CoilSpec, DwellControl, FuelPumpSpec, InjectorSpec, KnownCombo, SparkOutput, WidebandSpec,
};
pub use profiles::{
    AfrProfile, Resolved, TimingProfile, DEFAULT_AFR_PROFILE, DEFAULT_TIMING_PROFILE,
};

/// Firing order used when the cylinder count has no default of its own.
pub const FALLBACK_FIRING_ORDER: [u8; 8] = [1, 8, 4, 3, 6, 5, 7, 2];

static BUILTIN: Lazy<ProfileCatalog> = Lazy::new(ProfileCatalog::builtin);
static FALLBACK_AFR: Lazy<AfrProfile> = Lazy::new(builtin::street_performance);
static FALLBACK_TIMING: Lazy<TimingProfile> = Lazy::new(builtin::conservative);

/// Firing order for a specific engine family.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FiringOrder {
    pub cylinders: u8,
    pub family: String,
    pub order: Vec<u8>,
}

/// Where a resolved firing order came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FiringOrderSource {
    /// Exact (cylinder count, family) match.
    Family,
    /// Family unknown, default for the cylinder count used.
    CylinderDefault,
    /// Cylinder count unsupported, 8-cylinder default used.
    EightCylinderFallback,
}

/// Static lookup tables. Never mutated once shared.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileCatalog {
    #[serde(default)]
    afr_profiles: BTreeMap<String, AfrProfile>,
    #[serde(default)]
    timing_profiles: BTreeMap<String, TimingProfile>,
    #[serde(default)]
    injectors: BTreeMap<String, InjectorSpec>,
    #[serde(default)]
    coils: BTreeMap<String, CoilSpec>,
    #[serde(default)]
    widebands: BTreeMap<String, WidebandSpec>,
    #[serde(default)]
    fuel_pumps: BTreeMap<String, FuelPumpSpec>,
    #[serde(default)]
    combos: BTreeMap<String, KnownCombo>,
    #[serde(default)]
    firing_orders: Vec<FiringOrder>,
    #[serde(default)]
    default_firing_orders: BTreeMap<u8, Vec<u8>>,
}

impl ProfileCatalog {
    /// Builds the catalog from the built-in data.
    pub fn builtin() -> Self {
        Self {
            afr_profiles: builtin::afr_profiles(),
            timing_profiles: builtin::timing_profiles(),
            injectors: builtin::injectors(),
            coils: builtin::coils(),
            widebands: builtin::widebands(),
            fuel_pumps: builtin::fuel_pumps(),
            combos: builtin::combos(),
            firing_orders: builtin::firing_orders(),
            default_firing_orders: builtin::default_firing_orders(),
        }
    }

    /// Process-wide built-in catalog, constructed on first use.
    pub fn shared() -> &'static ProfileCatalog {
        &BUILTIN
    }

    /// Parses a catalog from its JSON representation.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|source| ConfigError::Parse {
            what: "profile catalog",
            source,
        })
    }

    /// Adds or replaces an AFR profile. Intended for setup before sharing.
    pub fn with_afr_profile(mut self, name: impl Into<String>, profile: AfrProfile) -> Self {
        self.afr_profiles.insert(name.into(), profile);
        self
    }

    /// Adds or replaces a timing profile. Intended for setup before sharing.
    pub fn with_timing_profile(mut self, name: impl Into<String>, profile: TimingProfile) -> Self {
        self.timing_profiles.insert(name.into(), profile);
        self
    }

    pub fn afr_profile(&self, name: &str) -> Option<&AfrProfile> {
        self.afr_profiles.get(name)
    }

    pub fn timing_profile(&self, name: &str) -> Option<&TimingProfile> {
        self.timing_profiles.get(name)
    }

    /// Names of all AFR profiles in ascending order.
    pub fn afr_profile_names(&self) -> impl Iterator<Item = &str> {
        self.afr_profiles.keys().map(String::as_str)
    }

    /// Names of all timing profiles in ascending order.
    pub fn timing_profile_names(&self) -> impl Iterator<Item = &str> {
        self.timing_profiles.keys().map(String::as_str)
    }

    /// Resolves an AFR profile, substituting [`DEFAULT_AFR_PROFILE`] for
    /// unknown names.
    pub fn resolve_afr_profile<'a>(&'a self, name: &'a str) -> Resolved<'a, AfrProfile> {
        match self.afr_profiles.get(name) {
            Some(profile) => Resolved {
                profile,
                name,
                fell_back: false,
            },
            None => Resolved {
                profile: self
                    .afr_profiles
                    .get(DEFAULT_AFR_PROFILE)
                    .unwrap_or(&*FALLBACK_AFR),
                name: DEFAULT_AFR_PROFILE,
                fell_back: true,
            },
        }
    }

    /// Resolves a timing profile, substituting [`DEFAULT_TIMING_PROFILE`] for
    /// unknown names.
    pub fn resolve_timing_profile<'a>(&'a self, name: &'a str) -> Resolved<'a, TimingProfile> {
        match self.timing_profiles.get(name) {
            Some(profile) => Resolved {
                profile,
                name,
                fell_back: false,
            },
            None => Resolved {
                profile: self
                    .timing_profiles
                    .get(DEFAULT_TIMING_PROFILE)
                    .unwrap_or(&*FALLBACK_TIMING),
                name: DEFAULT_TIMING_PROFILE,
                fell_back: true,
            },
        }
    }

    pub fn injector(&self, model: &str) -> Option<&InjectorSpec> {
        self.injectors.get(model)
    }

    pub fn coil(&self, model: &str) -> Option<&CoilSpec> {
        self.coils.get(model)
    }

    pub fn wideband(&self, model: &str) -> Option<&WidebandSpec> {
        self.widebands.get(model)
    }

    pub fn fuel_pump(&self, model: &str) -> Option<&FuelPumpSpec> {
        self.fuel_pumps.get(model)
    }

    pub fn combo(&self, name: &str) -> Option<&KnownCombo> {
        self.combos.get(name)
    }

    /// Known combinations in ascending name order.
    pub fn combos(&self) -> impl Iterator<Item = (&str, &KnownCombo)> {
        self.combos.iter().map(|(name, combo)| (name.as_str(), combo))
    }

    /// Looks up the firing order for `(cylinders, family)`.
    pub fn firing_order(&self, cylinders: u8, family: &str) -> (&[u8], FiringOrderSource) {
        if let Some(entry) = self
            .firing_orders
            .iter()
            .find(|entry| entry.cylinders == cylinders && entry.family == family)
        {
            return (&entry.order, FiringOrderSource::Family);
        }
        if let Some(order) = self.default_firing_orders.get(&cylinders) {
            return (order, FiringOrderSource::CylinderDefault);
        }
        let builtin_fallback: &'static [u8] = &FALLBACK_FIRING_ORDER;
        let fallback = self
            .default_firing_orders
            .get(&8)
            .map(Vec::as_slice)
            .unwrap_or(builtin_fallback);
        (fallback, FiringOrderSource::EightCylinderFallback)
    }
}

impl Default for ProfileCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}
