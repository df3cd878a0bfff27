use crate::element::{Elements, CALCIUM, MAGNESIUM};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

fn default_density() -> f64 {
    1.0
}

fn default_concentration() -> f64 {
    100.0
}

/// The two additive positions of the engine: one product correcting
/// calcium, one correcting magnesium. An empty product name means no
/// additive is selected for that slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdditiveSlot {
    Calcium,
    Magnesium,
}

impl AdditiveSlot {
    pub const ALL: [AdditiveSlot; 2] = [AdditiveSlot::Calcium, AdditiveSlot::Magnesium];

    /// Name of the element this slot is meant to correct.
    pub fn element(self) -> &'static str {
        match self {
            AdditiveSlot::Calcium => CALCIUM,
            AdditiveSlot::Magnesium => MAGNESIUM,
        }
    }
}

impl fmt::Display for AdditiveSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.element())
    }
}

/// A mineral additive. `real` is derived at boot and whenever the
/// concentration or elements change: milligrams of each element delivered
/// per 1 mL of the additive at its configured concentration and density.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Additive {
    pub name: String,
    #[serde(default)]
    pub elements: Elements,
    #[serde(default = "default_concentration")]
    pub concentration: f64,
    #[serde(default = "default_density")]
    pub density: f64,
    #[serde(default)]
    pub real: HashMap<String, f64>,
}
