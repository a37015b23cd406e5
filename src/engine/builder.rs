use super::types::{CamProfile, EngineDescriptor};

/// Builder used to assemble an [`EngineDescriptor`].
///
/// | Field | Default |
/// |-------|---------|
/// | `displacement_ci` | `350.0` |
/// | `cylinders` | `8` |
/// | `compression_ratio` | `9.0` |
/// | `cam_profile` | [`CamProfile::Stock`] |
/// | `engine_family` | `"Custom"` |
/// | `fuel_type` | `"91"` |
/// | `intended_use` | `"street_performance"` |
#[derive(Debug, Clone)]
pub struct EngineDescriptorBuilder {
    pub displacement_ci: f64,
    pub cylinders: u8,
    pub compression_ratio: f64,
    pub cam_profile: CamProfile,
    pub engine_family: String,
    pub fuel_type: String,
    pub intended_use: String,
}

impl EngineDescriptorBuilder {
    /// Returns a builder initialised with the defaults listed above.
    pub fn new() -> Self {
        Self {
            displacement_ci: 350.0,
            cylinders: 8,
            compression_ratio: 9.0,
            cam_profile: CamProfile::Stock,
            engine_family: "Custom".to_string(),
            fuel_type: "91".to_string(),
            intended_use: "street_performance".to_string(),
        }
    }

    pub fn displacement(mut self, cubic_inches: f64) -> Self {
        self.displacement_ci = cubic_inches;
        self
    }

    pub fn cylinders(mut self, cylinders: u8) -> Self {
        self.cylinders = cylinders;
        self
    }

    pub fn compression(mut self, ratio: f64) -> Self {
        self.compression_ratio = ratio;
        self
    }

    pub fn cam(mut self, cam: CamProfile) -> Self {
        self.cam_profile = cam;
        self
    }

    pub fn family(mut self, family: impl Into<String>) -> Self {
        self.engine_family = family.into();
        self
    }

    pub fn fuel_type(mut self, fuel_type: impl Into<String>) -> Self {
        self.fuel_type = fuel_type.into();
        self
    }

    pub fn intended_use(mut self, intended_use: impl Into<String>) -> Self {
        self.intended_use = intended_use.into();
        self
    }

    pub fn build(&self) -> EngineDescriptor {
        EngineDescriptor {
            displacement_ci: self.displacement_ci,
            cylinders: self.cylinders,
            compression_ratio: self.compression_ratio,
            cam_profile: self.cam_profile,
            engine_family: self.engine_family.clone(),
            fuel_type: self.fuel_type.clone(),
            intended_use: self.intended_use.clone(),
        }
    }
}

impl Default for EngineDescriptorBuilder {
    fn default() -> Self {
        Self::new()
    }
}
