use serde::{Deserialize, Serialize};

/// Profile substituted when a requested AFR strategy is unknown.
pub const DEFAULT_AFR_PROFILE: &str = "street_performance";

/// Profile substituted when a requested timing strategy is unknown.
pub const DEFAULT_TIMING_PROFILE: &str = "conservative";

/// Air/fuel ratio targets for each operating region.
///
/// | Field | Region |
/// |-------|--------|
/// | `idle` | rpm at or below the idle bin |
/// | `cruise` | light load |
/// | `acceleration` | medium load |
/// | `wot` | heavy load |
/// | `warmup` | cold running, informational |
///
/// `load_curve`, when present, replaces the load-region selection with a
/// per-bin base pattern (resampled onto the load axis if its length differs).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AfrProfile {
    pub idle: f64,
    pub cruise: f64,
    pub acceleration: f64,
    pub wot: f64,
    pub warmup: f64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub load_curve: Option<Vec<f64>>,
}

/// Spark advance targets (degrees BTDC) for each operating region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimingProfile {
    pub idle: f64,
    pub cruise: f64,
    pub power: f64,
    pub redline: f64,
    #[serde(default)]
    pub advance_rate: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub load_curve: Option<Vec<f64>>,
}

/// Outcome of a profile lookup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolved<'a, P> {
    /// Profile that will actually be used.
    pub profile: &'a P,
    /// Name of the profile that will actually be used.
    pub name: &'a str,
    /// Whether the requested name was unknown and the default was substituted.
    pub fell_back: bool,
}
