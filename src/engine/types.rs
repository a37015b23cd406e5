use serde::{Deserialize, Serialize};

use crate::catalog::{
    CoilSpec, FuelPumpSpec, InjectorSpec, ProfileCatalog, WidebandSpec, DEFAULT_TIMING_PROFILE,
};
use crate::config::ConfigError;

/// Camshaft grind category.
///
/// | Variant | VE multiplier |
/// |---------|---------------|
/// | `Stock` | 1.00 |
/// | `Performance` | 1.05 |
/// | `Aggressive` | 1.10 |
/// | `Custom` | 1.00 |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CamProfile {
    #[default]
    Stock,
    Performance,
    Aggressive,
    /// Any grind without a dedicated multiplier.
    #[serde(other)]
    Custom,
}

impl CamProfile {
    /// Parses a camshaft tag. Unrecognised tags map to [`CamProfile::Custom`].
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "stock" => CamProfile::Stock,
            "performance" => CamProfile::Performance,
            "aggressive" => CamProfile::Aggressive,
            _ => CamProfile::Custom,
        }
    }

    pub const fn tag(self) -> &'static str {
        match self {
            CamProfile::Stock => "stock",
            CamProfile::Performance => "performance",
            CamProfile::Aggressive => "aggressive",
            CamProfile::Custom => "custom",
        }
    }

    /// Factor applied to every VE cell.
    pub const fn ve_multiplier(self) -> f64 {
        match self {
            CamProfile::Stock | CamProfile::Custom => 1.0,
            CamProfile::Performance => 1.05,
            CamProfile::Aggressive => 1.1,
        }
    }
}

/// High-level description of the engine being tuned.
///
/// Numeric ranges are checked by the caller before a run starts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineDescriptor {
    /// Swept volume in cubic inches.
    pub displacement_ci: f64,
    pub cylinders: u8,
    pub compression_ratio: f64,
    pub cam_profile: CamProfile,
    pub engine_family: String,
    pub fuel_type: String,
    /// Intended use; doubles as the AFR profile name when none is given.
    pub intended_use: String,
}

/// Optional knobs collected alongside the engine description.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TuneSettings {
    /// Hard rev limit in rpm. Defaults to 6500.
    pub rev_limit: Option<u32>,
    /// Regulated fuel pressure in psi. Defaults to 43.5.
    pub fuel_pressure_psi: Option<f64>,
    /// AFR profile name. Defaults to the engine's intended use.
    pub afr_profile: Option<String>,
    /// Timing profile name. Defaults to `conservative`.
    pub timing_profile: Option<String>,
}

/// Profile names feeding the table generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileSelection {
    pub afr: String,
    pub timing: String,
}

impl ProfileSelection {
    pub fn new(afr: impl Into<String>, timing: impl Into<String>) -> Self {
        Self {
            afr: afr.into(),
            timing: timing.into(),
        }
    }

    /// Selection implied by an engine and its settings.
    pub fn for_request(engine: &EngineDescriptor, settings: &TuneSettings) -> Self {
        Self {
            afr: settings
                .afr_profile
                .clone()
                .unwrap_or_else(|| engine.intended_use.clone()),
            timing: settings
                .timing_profile
                .clone()
                .unwrap_or_else(|| DEFAULT_TIMING_PROFILE.to_string()),
        }
    }
}

/// Component data available for the run. Every entry is optional.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ComponentSpecs {
    pub injector: Option<InjectorSpec>,
    pub coil: Option<CoilSpec>,
    pub wideband: Option<WidebandSpec>,
    pub fuel_pump: Option<FuelPumpSpec>,
}

/// Component model names as picked from the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ComponentSelection {
    pub injector_model: Option<String>,
    pub coil_model: Option<String>,
    pub wideband_model: Option<String>,
    pub fuel_pump_model: Option<String>,
}

impl ComponentSelection {
    /// Looks up every named model. Unknown models resolve to `None`.
    pub fn resolve(&self, catalog: &ProfileCatalog) -> ComponentSpecs {
        ComponentSpecs {
            injector: self
                .injector_model
                .as_deref()
                .and_then(|model| catalog.injector(model))
                .cloned(),
            coil: self
                .coil_model
                .as_deref()
                .and_then(|model| catalog.coil(model))
                .cloned(),
            wideband: self
                .wideband_model
                .as_deref()
                .and_then(|model| catalog.wideband(model))
                .cloned(),
            fuel_pump: self
                .fuel_pump_model
                .as_deref()
                .and_then(|model| catalog.fuel_pump(model))
                .cloned(),
        }
    }
}

/// Everything a generation run consumes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TuneRequest {
    pub engine: EngineDescriptor,
    #[serde(default)]
    pub components: ComponentSpecs,
    #[serde(default)]
    pub settings: TuneSettings,
}

impl TuneRequest {
    pub fn new(engine: EngineDescriptor) -> Self {
        Self {
            engine,
            components: ComponentSpecs::default(),
            settings: TuneSettings::default(),
        }
    }

    pub fn with_components(mut self, components: ComponentSpecs) -> Self {
        self.components = components;
        self
    }

    pub fn with_settings(mut self, settings: TuneSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Parses a request from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|source| ConfigError::Parse {
            what: "tune request",
            source,
        })
    }

    /// Builds a request from a named known combination.
    pub fn from_combo(name: &str, catalog: &ProfileCatalog) -> Option<Self> {
        let combo = catalog.combo(name)?;
        let engine = EngineDescriptor {
            displacement_ci: combo.displacement_ci,
            cylinders: combo.cylinders,
            compression_ratio: combo.compression_ratio,
            cam_profile: CamProfile::from_tag(&combo.cam_profile),
            engine_family: combo.engine_family.clone(),
            fuel_type: combo.fuel_type.clone(),
            intended_use: combo.afr_profile.clone(),
        };
        let components = ComponentSelection {
            injector_model: Some(combo.injector_model.clone()),
            coil_model: Some(combo.coil_model.clone()),
            wideband_model: None,
            fuel_pump_model: None,
        }
        .resolve(catalog);
        let settings = TuneSettings {
            rev_limit: Some(combo.rev_limit),
            fuel_pressure_psi: Some(combo.fuel_pressure_psi),
            afr_profile: Some(combo.afr_profile.clone()),
            timing_profile: Some(combo.timing_profile.clone()),
        };
        Some(Self {
            engine,
            components,
            settings,
        })
    }

    /// Profile names implied by this request.
    pub fn profiles(&self) -> ProfileSelection {
        ProfileSelection::for_request(&self.engine, &self.settings)
    }
}
