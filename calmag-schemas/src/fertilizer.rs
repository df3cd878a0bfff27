use crate::element::Elements;
use serde::{Deserialize, Serialize};

fn default_density() -> f64 {
    1.0
}

/// A base fertilizer product. `elements` holds the declared percentages as
/// printed on the label; the catalog normalizer scales them by `density` and
/// derives `ratio` once at engine construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fertilizer {
    pub name: String,
    #[serde(default)]
    pub brand: String,
    #[serde(default = "default_density")]
    pub density: f64,
    #[serde(default)]
    pub elements: Elements,
    /// Calcium per one part magnesium, derived at boot. Infinite when the
    /// product carries no magnesium.
    #[serde(default)]
    pub ratio: f64,
}

impl Fertilizer {
    /// Composite catalog key, e.g. `"BioBizz - Calmag"`.
    pub fn key(&self) -> String {
        format!("{} - {}", self.brand, self.name)
    }
}
