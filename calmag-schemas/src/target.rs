use serde::{Deserialize, Serialize};
use std::fmt;

fn default_weeks() -> f64 {
    1.0
}

fn default_part() -> f64 {
    1.0
}

/// A named phase of the cultivation timeline, in canonical order. Targets
/// keyed by stage in a `BTreeMap` iterate in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrowStage {
    Propagation,
    Vegetation,
    Flower,
    LateFlower,
}

impl GrowStage {
    pub const ALL: [GrowStage; 4] = [
        GrowStage::Propagation,
        GrowStage::Vegetation,
        GrowStage::Flower,
        GrowStage::LateFlower,
    ];

    pub fn label(self) -> &'static str {
        match self {
            GrowStage::Propagation => "Propagation",
            GrowStage::Vegetation => "Vegetation",
            GrowStage::Flower => "Flower",
            GrowStage::LateFlower => "Late Flower",
        }
    }
}

impl fmt::Display for GrowStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Desired calcium and magnesium levels in mg/L. A value of zero (or any
/// non-positive value) means "derive this element from the other via the
/// configured ratio" during target validation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TargetElements {
    #[serde(default)]
    pub calcium: f64,
    #[serde(default)]
    pub magnesium: f64,
}

/// Per-stage dosing target. `weeks` is kept as a float so sloppy catalog
/// values survive deserialization; validation truncates it to a positive
/// whole number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Target {
    #[serde(default)]
    pub elements: TargetElements,
    #[serde(default = "default_weeks")]
    pub weeks: f64,
}

impl Default for Target {
    fn default() -> Self {
        Self {
            elements: TargetElements::default(),
            weeks: default_weeks(),
        }
    }
}

/// Target Ca:Mg ratio, canonically "parts calcium per 1 part magnesium".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ratio {
    pub calcium: f64,
    #[serde(default = "default_part")]
    pub magnesium: f64,
}

impl Ratio {
    pub fn new(calcium: f64, magnesium: f64) -> Self {
        Self { calcium, magnesium }
    }

    /// The quotient the engine actually works with.
    pub fn calcium_per_magnesium(&self) -> f64 {
        self.calcium / self.magnesium
    }
}

impl Default for Ratio {
    fn default() -> Self {
        Self {
            calcium: 3.5,
            magnesium: 1.0,
        }
    }
}
