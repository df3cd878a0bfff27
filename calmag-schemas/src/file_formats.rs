use crate::{
    additive::{Additive, AdditiveSlot},
    fertilizer::Fertilizer,
    target::{GrowStage, Target},
};
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};

/// On-disk catalog: fertilizers grouped by brand, additives keyed by the
/// element slot they correct, and the default per-stage targets.
#[derive(Debug, Deserialize)]
pub struct CatalogFile {
    pub schema_version: String,
    #[serde(default)]
    pub fertilizers: BTreeMap<String, Vec<Fertilizer>>,
    #[serde(default)]
    pub additives: BTreeMap<AdditiveSlot, Vec<Additive>>,
    #[serde(default)]
    pub targets: BTreeMap<GrowStage, Target>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WaterUnit {
    #[default]
    MgPerLiter,
    Millimole,
}

/// On-disk source-water profile. Values are flat element concentrations,
/// either in mg/L or in millimole (converted on load).
#[derive(Debug, Deserialize)]
pub struct WaterFile {
    pub schema_version: String,
    #[serde(default)]
    pub unit: WaterUnit,
    pub elements: HashMap<String, f64>,
}
