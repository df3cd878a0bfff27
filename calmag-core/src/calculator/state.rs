use crate::summarize::{amount, summarize};
use calmag_schemas::{
    additive::{Additive, AdditiveSlot},
    element::{CALCIUM, MAGNESIUM},
    fertilizer::Fertilizer,
    file_formats::CatalogFile,
    target::{GrowStage, Ratio, Target},
    water::Water,
};
use std::collections::{BTreeMap, HashMap};

/// The usable product catalog, flattened from its on-disk shape.
/// Fertilizers are keyed by their composite `"Brand - Product"` key.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub fertilizers: HashMap<String, Fertilizer>,
    pub additives: BTreeMap<AdditiveSlot, HashMap<String, Additive>>,
    pub default_targets: BTreeMap<GrowStage, Target>,
}

impl Catalog {
    /// Flattens a catalog file. Products that deliver neither calcium nor
    /// magnesium are excluded from the usable catalog.
    pub fn from_file(file: CatalogFile) -> Self {
        let mut fertilizers = HashMap::new();
        for (brand, products) in file.fertilizers {
            for mut fertilizer in products {
                fertilizer.brand = brand.clone();
                let totals = summarize(&fertilizer.elements);
                if amount(&totals, CALCIUM) <= 0.0 && amount(&totals, MAGNESIUM) <= 0.0 {
                    continue;
                }
                fertilizers.insert(fertilizer.key(), fertilizer);
            }
        }

        let mut additives: BTreeMap<AdditiveSlot, HashMap<String, Additive>> = BTreeMap::new();
        for slot in AdditiveSlot::ALL {
            additives.insert(slot, HashMap::new());
        }
        for (slot, products) in file.additives {
            let slot_map = additives.entry(slot).or_default();
            for additive in products {
                slot_map.insert(additive.name.clone(), additive);
            }
        }

        Self {
            fertilizers,
            additives,
            default_targets: file.targets,
        }
    }
}

/// Mutable engine configuration. One snapshot of this state plus a target
/// fully determines a dosing-solver run.
#[derive(Debug, Clone)]
pub struct CalculatorState {
    pub catalog: Catalog,
    /// Selected fertilizer key; empty means no fertilizer.
    pub fertilizer: String,
    /// Selected additive name per slot; empty means no additive.
    pub additives: BTreeMap<AdditiveSlot, String>,
    pub water: Water,
    pub ratio: Ratio,
    /// Targets exactly as supplied by the caller. Revalidation always
    /// starts from these, so ratio changes re-derive stale values.
    pub raw_targets: BTreeMap<GrowStage, Target>,
    /// Validated targets, rebuilt on every ratio or offset change.
    pub targets: BTreeMap<GrowStage, Target>,
    /// Global percentage offset applied multiplicatively to every stage.
    pub target_offset: f64,
    pub dilution_support: bool,
}
