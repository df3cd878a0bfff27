use crate::{
    calculator::{engine::Calculator, state::{Catalog, CalculatorState}},
    error::CalmagError,
};
use calmag_schemas::{
    additive::AdditiveSlot,
    element::{Elements, CALCIUM, MAGNESIUM},
    target::{GrowStage, Ratio, Target},
    water::Water,
};
use std::collections::BTreeMap;

/// A fluent builder for constructing a `Calculator`.
///
/// The builder collects the catalog, the source-water composition, the
/// product selection and the target configuration, then validates the
/// construction contract and runs the catalog normalizer exactly once.
#[derive(Default)]
pub struct CalculatorBuilder {
    catalog: Option<Catalog>,
    water: Option<Elements>,
    fertilizer: String,
    additives: BTreeMap<AdditiveSlot, String>,
    ratio: Option<Ratio>,
    targets: Option<BTreeMap<GrowStage, Target>>,
    dilution_support: bool,
}

impl CalculatorBuilder {
    /// Creates a new, empty `CalculatorBuilder`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the product catalog the engine will dose from.
    pub fn with_catalog(mut self, catalog: Catalog) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// Sets the raw source-water composition. Must contain `calcium` and
    /// `magnesium` entries.
    pub fn with_water(mut self, water: Elements) -> Self {
        self.water = Some(water);
        self
    }

    /// Selects the base fertilizer by its `"Brand - Product"` key. An empty
    /// key selects no fertilizer.
    pub fn with_fertilizer(mut self, key: &str) -> Self {
        self.fertilizer = key.to_string();
        self
    }

    /// Selects an additive for one slot by name. An empty name leaves the
    /// slot unfilled.
    pub fn with_additive(mut self, slot: AdditiveSlot, name: &str) -> Self {
        self.additives.insert(slot, name.to_string());
        self
    }

    /// Sets the target Ca:Mg ratio (default 3.5 : 1).
    pub fn with_ratio(mut self, ratio: Ratio) -> Self {
        self.ratio = Some(ratio);
        self
    }

    /// Replaces the catalog's default per-stage targets.
    pub fn with_targets(mut self, targets: BTreeMap<GrowStage, Target>) -> Self {
        self.targets = Some(targets);
        self
    }

    /// Enables diluting the source water when its native mineral content
    /// already exceeds the targets.
    pub fn with_dilution_support(mut self, enabled: bool) -> Self {
        self.dilution_support = enabled;
        self
    }

    /// Consumes the builder and returns a fully booted `Calculator`.
    ///
    /// # Errors
    ///
    /// Returns a `CalmagError` if the water composition is missing or lacks
    /// calcium/magnesium, or if a selected fertilizer or additive key is
    /// unknown to the catalog.
    pub fn build(self) -> Result<Calculator, CalmagError> {
        let catalog = self.catalog.unwrap_or_default();
        let water = self.water.ok_or(CalmagError::WaterNotDefined)?;

        for element in [CALCIUM, MAGNESIUM] {
            if !water.contains_key(element) {
                return Err(CalmagError::WaterElementMissing(element.to_string()));
            }
        }

        if !self.fertilizer.is_empty() && !catalog.fertilizers.contains_key(&self.fertilizer) {
            return Err(CalmagError::FertilizerNotFound(self.fertilizer));
        }
        for (slot, name) in &self.additives {
            if name.is_empty() {
                continue;
            }
            let known = catalog
                .additives
                .get(slot)
                .map_or(false, |slot_map| slot_map.contains_key(name));
            if !known {
                return Err(CalmagError::AdditiveNotFound(name.clone(), slot.to_string()));
            }
        }

        let mut additives = BTreeMap::new();
        for slot in AdditiveSlot::ALL {
            let name = self.additives.get(&slot).cloned().unwrap_or_default();
            additives.insert(slot, name);
        }

        let raw_targets = self
            .targets
            .unwrap_or_else(|| catalog.default_targets.clone());

        let state = CalculatorState {
            catalog,
            fertilizer: self.fertilizer,
            additives,
            water: Water::default(),
            ratio: self.ratio.unwrap_or_default(),
            raw_targets: raw_targets.clone(),
            targets: raw_targets,
            target_offset: 0.0,
            dilution_support: self.dilution_support,
        };

        let mut calculator = Calculator::from_state(state);
        calculator.boot();
        calculator.set_water(water);
        Ok(calculator)
    }
}
