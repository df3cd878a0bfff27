use crate::additive::AdditiveSlot;
use crate::element::ElementTotals;
use crate::target::{GrowStage, Target};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Amount of base fertilizer applied per liter of water.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FertilizerDose {
    pub ml: f64,
    pub name: String,
}

/// Amount of one additive applied per liter of water. `mg` is the dry mass
/// equivalent of the dosed volume at the additive's concentration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AdditiveDose {
    pub ml: f64,
    pub mg: f64,
    pub name: String,
    pub concentration: f64,
}

/// What single dose of the selected additive would have closed the initial
/// deficit: either 1 mL at a tuned concentration, or more than 1 mL at full
/// strength.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SuggestedAdditive {
    pub ml: f64,
    pub concentration: f64,
    pub name: String,
}

/// Per-element shortfall of the raw source water against the target, before
/// any dilution or dosing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MissingElements {
    pub calcium: f64,
    pub magnesium: f64,
}

/// Outcome of one dosing-solver run against a single target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DosingResult {
    pub fertilizer: FertilizerDose,
    pub additive: BTreeMap<AdditiveSlot, AdditiveDose>,
    pub elements: ElementTotals,
    /// Fraction (0, 1] of full-strength source water retained.
    pub dilution: f64,
    /// Fraction of nutrient-free water mixed in, `1 - dilution`.
    pub water: f64,
    /// Final Ca:Mg ratio of the solution.
    pub ratio: f64,
    pub missing: MissingElements,
    pub suggested_additive: BTreeMap<AdditiveSlot, SuggestedAdditive>,
    pub target: Target,
    /// True when the targeted-refinement pass rewrote fertilizer, dilution
    /// and final elements. Additive doses are then still the ones computed
    /// against the first baseline and may be inconsistent with the rest of
    /// the result.
    pub refined: bool,
}

/// One row of the weekly dosing table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekRow {
    /// Sequential week number across the whole timeline, 1-based.
    pub week: u32,
    pub stage: GrowStage,
    pub result: DosingResult,
}

/// Deficit of the raw source water against the first configured stage,
/// with the additive doses that would have closed it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Deficiency {
    pub missing: MissingElements,
    pub suggested_additive: BTreeMap<AdditiveSlot, SuggestedAdditive>,
}

/// Full calculation output: initial deficiency, one result per configured
/// stage, and the interpolated week-by-week table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CalculationOutcome {
    pub deficiency: Deficiency,
    pub results: BTreeMap<GrowStage, DosingResult>,
    pub table: Vec<WeekRow>,
}
