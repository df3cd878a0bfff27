use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const CALCIUM: &str = "calcium";
pub const MAGNESIUM: &str = "magnesium";

/// A single entry of a raw element map. Catalog files may declare an element
/// either directly (`calcium: 12.0`) or as one or more compound oxides
/// (`calcium: { CaO: 16.8 }`) that get converted during summarization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ElementValue {
    Scalar(f64),
    Compound(HashMap<String, f64>),
}

impl ElementValue {
    /// Scales every leaf value by the given factor, descending into
    /// compound entries.
    pub fn scale(&mut self, factor: f64) {
        match self {
            ElementValue::Scalar(value) => *value *= factor,
            ElementValue::Compound(parts) => {
                for value in parts.values_mut() {
                    *value *= factor;
                }
            }
        }
    }
}

impl From<f64> for ElementValue {
    fn from(value: f64) -> Self {
        ElementValue::Scalar(value)
    }
}

/// Raw element map as it appears in catalog definitions, prior to
/// summarization.
pub type Elements = HashMap<String, ElementValue>;

/// Flat element map in mg/L, the result of summarization.
pub type ElementTotals = HashMap<String, f64>;

/// Wraps a flat mg/L map into a raw element map of scalar entries.
pub fn scalar_elements(values: HashMap<String, f64>) -> Elements {
    values
        .into_iter()
        .map(|(name, value)| (name, ElementValue::Scalar(value)))
        .collect()
}
