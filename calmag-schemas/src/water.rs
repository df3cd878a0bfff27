use crate::element::ElementTotals;
use serde::{Deserialize, Serialize};

/// The current source-water composition in mg/L, after summarization,
/// secondary-element derivation and flooring.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Water {
    pub elements: ElementTotals,
}
