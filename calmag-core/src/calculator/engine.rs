use crate::{
    calculator::state::CalculatorState,
    error::CalmagError,
    summarize::{amount, summarize},
    units,
};
use calmag_schemas::{
    additive::{Additive, AdditiveSlot},
    element::{ElementTotals, Elements, CALCIUM, MAGNESIUM},
    fertilizer::Fertilizer,
    result::{
        AdditiveDose, CalculationOutcome, Deficiency, DosingResult, FertilizerDose,
        MissingElements, SuggestedAdditive, WeekRow,
    },
    target::{GrowStage, Ratio, Target},
    water::Water,
};
use std::collections::{BTreeMap, HashSet};

/// Volume added per dosing iteration, in mL per liter of water.
const DOSE_STEP_ML: f64 = 0.01;
/// Ceiling for each dosing loop; exhaustion is logged, not fatal.
const DOSE_STEP_LIMIT: u32 = 50_000;
/// Ceiling for the ratio-correction loop of the refinement pass.
const RATIO_STEP_LIMIT: u32 = 5_000;
/// Minimum calcium/magnesium level, guards the ratio divisions.
const ELEMENT_FLOOR: f64 = 0.001;
/// Additive doses at or below this volume are discarded entirely.
const DISCARD_THRESHOLD_ML: f64 = 0.10;
/// Relative tolerance for "on target" checks.
const TARGET_TOLERANCE: f64 = 0.05;

/// Fills in a missing target element from the other via the configured
/// ratio and coerces the stage duration to a positive whole number. The
/// calcium branch wins when both elements are missing.
pub fn validate_target(target: &mut Target, ratio_calcium: f64) {
    if target.elements.calcium <= 0.0 {
        if target.elements.magnesium <= 0.0 {
            target.elements.magnesium = ELEMENT_FLOOR;
        }
        target.elements.calcium = target.elements.magnesium * ratio_calcium;
    } else if target.elements.magnesium <= 0.0 {
        target.elements.magnesium = target.elements.calcium / ratio_calcium;
    }

    target.weeks = target.weeks.trunc();
    if target.weeks < 1.0 {
        target.weeks = 1.0;
    }
}

/// Milligrams of each element delivered per 1 mL of the additive at the
/// given concentration. Pure in the additive's elements, concentration and
/// density.
pub fn real_yield(additive: &Additive, concentration: f64) -> ElementTotals {
    summarize(&additive.elements)
        .into_iter()
        .map(|(name, value)| {
            (
                name,
                value * 10.0 * (concentration / 100.0) * additive.density,
            )
        })
        .collect()
}

fn ratio_of(elements: &ElementTotals) -> f64 {
    let magnesium = amount(elements, MAGNESIUM);
    if magnesium == 0.0 {
        f64::INFINITY
    } else {
        amount(elements, CALCIUM) / magnesium
    }
}

fn apply_yield(elements: &mut ElementTotals, real: &ElementTotals, ml: f64) {
    for (name, per_ml) in real {
        *elements.entry(name.clone()).or_insert(0.0) += per_ml * ml;
    }
}

fn floor_minerals(elements: &mut ElementTotals) {
    for name in [CALCIUM, MAGNESIUM] {
        let value = elements.entry(name.to_string()).or_insert(0.0);
        if *value <= 0.0 {
            *value = ELEMENT_FLOOR;
        }
    }
}

/// The dosing engine. Holds the booted catalog, the normalized source
/// water, the product selection and the per-stage targets; every solver
/// call reads this configuration and returns a fresh result without
/// mutating it.
#[derive(Debug)]
pub struct Calculator {
    pub(super) state: CalculatorState,
}

impl Calculator {
    pub(super) fn from_state(state: CalculatorState) -> Self {
        Self { state }
    }

    /// Catalog normalizer. Runs once after construction: derives each
    /// fertilizer's inherent Ca:Mg ratio, scales its declared percentages
    /// by density, computes each additive's real yield and validates the
    /// configured targets. Malformed entries have already self-healed via
    /// serde defaults, so this never fails.
    pub(super) fn boot(&mut self) {
        for fertilizer in self.state.catalog.fertilizers.values_mut() {
            let totals = summarize(&fertilizer.elements);
            let magnesium = amount(&totals, MAGNESIUM);
            fertilizer.ratio = if magnesium > 0.0 {
                amount(&totals, CALCIUM) / magnesium
            } else {
                f64::INFINITY
            };
            for value in fertilizer.elements.values_mut() {
                value.scale(fertilizer.density);
            }
        }

        for slot_map in self.state.catalog.additives.values_mut() {
            for additive in slot_map.values_mut() {
                let real = real_yield(additive, additive.concentration);
                additive.real = real;
            }
        }

        self.revalidate_targets();
    }

    /// Rebuilds the effective targets from the raw, caller-supplied ones:
    /// applies the global offset multiplicatively, then validates against
    /// the current ratio. Called after every ratio or offset change so
    /// previously derived values never go stale.
    fn revalidate_targets(&mut self) {
        let ratio_calcium = self.state.ratio.calcium_per_magnesium();
        let offset = 1.0 + self.state.target_offset / 100.0;

        let mut targets = self.state.raw_targets.clone();
        for target in targets.values_mut() {
            target.elements.calcium *= offset;
            target.elements.magnesium *= offset;
            validate_target(target, ratio_calcium);
        }
        self.state.targets = targets;
    }

    /// Replaces the source-water composition. Always succeeds: the input
    /// is summarized, negative values are zeroed, secondary elements are
    /// derived (sulfur from sulphate, nitrogen from nitrate and nitrite,
    /// chlorine from chloride) and calcium/magnesium are floored at
    /// 0.001 mg/L.
    pub fn set_water(&mut self, raw: Elements) {
        let mut elements = summarize(&raw);
        for value in elements.values_mut() {
            if *value < 0.0 {
                *value = 0.0;
            }
        }

        let derivations = [
            ("sulphate", "sulfur"),
            ("nitrate", "nitrogen"),
            ("nitrite", "nitrogen"),
            ("chloride", "chlorine"),
        ];
        for (source, derived) in derivations {
            let source_amount = amount(&elements, source);
            if source_amount <= 0.0 {
                continue;
            }
            // Chloride already is the elemental chlorine mass; ions shed
            // their oxygen by molar-mass fraction.
            let factor = match (units::molar_mass(derived), units::molar_mass(source)) {
                (Some(derived_mass), Some(source_mass)) => derived_mass / source_mass,
                _ => 1.0,
            };
            *elements.entry(derived.to_string()).or_insert(0.0) += source_amount * factor;
        }

        floor_minerals(&mut elements);
        self.state.water = Water { elements };
    }

    /// Selects the base fertilizer. An empty key deselects.
    pub fn set_fertilizer(&mut self, key: &str) -> Result<(), CalmagError> {
        if !key.is_empty() && !self.state.catalog.fertilizers.contains_key(key) {
            return Err(CalmagError::FertilizerNotFound(key.to_string()));
        }
        self.state.fertilizer = key.to_string();
        Ok(())
    }

    /// Selects an additive for one slot, optionally overriding its
    /// concentration (which re-derives the real yield). An empty name
    /// deselects the slot.
    pub fn set_additive(
        &mut self,
        slot: AdditiveSlot,
        name: &str,
        concentration: Option<f64>,
    ) -> Result<(), CalmagError> {
        if name.is_empty() {
            self.state.additives.insert(slot, String::new());
            return Ok(());
        }

        let slot_map = self
            .state
            .catalog
            .additives
            .get_mut(&slot)
            .ok_or_else(|| CalmagError::AdditiveNotFound(name.to_string(), slot.to_string()))?;
        let additive = slot_map
            .get_mut(name)
            .ok_or_else(|| CalmagError::AdditiveNotFound(name.to_string(), slot.to_string()))?;

        if let Some(concentration) = concentration {
            additive.concentration = concentration.clamp(0.0, 100.0);
            let real = real_yield(additive, additive.concentration);
            additive.real = real;
        }

        self.state.additives.insert(slot, name.to_string());
        Ok(())
    }

    /// Changes the target ratio. Re-runs target validation for all stages,
    /// since derived element values depend on the ratio.
    pub fn set_ratio(&mut self, ratio: Ratio) {
        self.state.ratio = ratio;
        self.revalidate_targets();
    }

    /// Replaces the per-stage targets in bulk and validates them.
    pub fn set_targets(&mut self, targets: BTreeMap<GrowStage, Target>) {
        self.state.raw_targets = targets;
        self.revalidate_targets();
    }

    /// Sets a global percentage offset applied multiplicatively to every
    /// stage's element targets. Re-runs target validation for all stages.
    pub fn set_target_offset(&mut self, percent: f64) {
        self.state.target_offset = percent;
        self.revalidate_targets();
    }

    pub fn set_dilution_support(&mut self, enabled: bool) {
        self.state.dilution_support = enabled;
    }

    /// Injects a caller-synthesized fertilizer into the catalog under the
    /// given label and selects it.
    pub fn add_fertilizer(&mut self, key: &str, mut fertilizer: Fertilizer) {
        let totals = summarize(&fertilizer.elements);
        let magnesium = amount(&totals, MAGNESIUM);
        fertilizer.ratio = if magnesium > 0.0 {
            amount(&totals, CALCIUM) / magnesium
        } else {
            f64::INFINITY
        };
        for value in fertilizer.elements.values_mut() {
            value.scale(fertilizer.density);
        }
        self.state
            .catalog
            .fertilizers
            .insert(key.to_string(), fertilizer);
        self.state.fertilizer = key.to_string();
    }

    /// Injects a caller-synthesized additive into one slot and selects it.
    pub fn add_additive(&mut self, slot: AdditiveSlot, mut additive: Additive) {
        additive.concentration = additive.concentration.clamp(0.0, 100.0);
        let real = real_yield(&additive, additive.concentration);
        additive.real = real;
        let name = additive.name.clone();
        self.state
            .catalog
            .additives
            .entry(slot)
            .or_default()
            .insert(name.clone(), additive);
        self.state.additives.insert(slot, name);
    }

    /// Full calculation: the initial deficiency, one result per configured
    /// stage and the interpolated week-by-week table.
    pub fn calculate(&self) -> CalculationOutcome {
        let results = self.get_applied_fertilizer();
        let deficiency = results
            .values()
            .next()
            .map(|result| Deficiency {
                missing: result.missing,
                suggested_additive: result.suggested_additive.clone(),
            })
            .unwrap_or_default();
        let table = self.build_week_table();

        CalculationOutcome {
            deficiency,
            results,
            table,
        }
    }

    /// Runs the dosing solver once per configured stage target.
    pub fn get_applied_fertilizer(&self) -> BTreeMap<GrowStage, DosingResult> {
        self.state
            .targets
            .iter()
            .map(|(stage, target)| (*stage, self.calculate_fertilizer(target)))
            .collect()
    }

    /// The dosing solver: dilutes the source water if supported, race-doses
    /// the base fertilizer, corrects the ratio with both additives, and
    /// reports final concentrations, dilution and the initial deficit.
    pub fn calculate_fertilizer(&self, target: &Target) -> DosingResult {
        let ratio_calcium = self.state.ratio.calcium_per_magnesium();
        let target_calcium = target.elements.calcium;
        let target_magnesium = target.elements.magnesium;

        let fertilizer = self.selected_fertilizer();
        let fertilizer_elements = fertilizer
            .map(|f| summarize(&f.elements))
            .unwrap_or_default();

        let initial = self.relevant_water_elements(&fertilizer_elements);
        let mut elements = initial.clone();

        // Dilution pass: the most restrictive element wins, and dilution
        // never amplifies.
        let mut dilution = 1.0_f64;
        if self.state.dilution_support {
            for (name, target_value) in [(CALCIUM, target_calcium), (MAGNESIUM, target_magnesium)]
            {
                let current = amount(&elements, name);
                if target_value > 0.0 && current > target_value {
                    dilution = dilution.min(target_value / current);
                }
            }
            if dilution < 1.0 {
                for value in elements.values_mut() {
                    *value *= dilution;
                }
            }
        }

        // Base fertilizer race loop. A product lacking either element is
        // skipped entirely.
        let mut fertilizer_ml = 0.0;
        if amount(&fertilizer_elements, CALCIUM) > 0.0
            && amount(&fertilizer_elements, MAGNESIUM) > 0.0
        {
            fertilizer_ml = dose_fertilizer(
                &mut elements,
                &fertilizer_elements,
                target_calcium,
                target_magnesium,
            );
        }

        floor_minerals(&mut elements);

        let mut additive_doses = BTreeMap::new();
        for slot in AdditiveSlot::ALL {
            let dose = match self.selected_additive(slot) {
                Some(additive) => dose_additive(
                    &mut elements,
                    slot,
                    additive,
                    ratio_calcium,
                    target_calcium,
                    target_magnesium,
                ),
                None => AdditiveDose::default(),
            };
            additive_doses.insert(slot, dose);
        }

        let missing = MissingElements {
            calcium: (target_calcium - amount(&initial, CALCIUM)).max(0.0),
            magnesium: (target_magnesium - amount(&initial, MAGNESIUM)).max(0.0),
        };
        let suggested_additive = self.suggest_additives(&missing);

        let mut result = DosingResult {
            fertilizer: FertilizerDose {
                ml: fertilizer_ml,
                name: fertilizer.map(|f| f.key()).unwrap_or_default(),
            },
            additive: additive_doses,
            ratio: ratio_of(&elements),
            elements,
            dilution,
            water: 1.0 - dilution,
            missing,
            suggested_additive,
            target: target.clone(),
            refined: false,
        };

        self.refine_with_dilution(
            &mut result,
            &initial,
            &fertilizer_elements,
            target_calcium,
            target_magnesium,
            ratio_calcium,
        );

        result
    }

    /// Targeted refinement pass. When the first pass landed off target
    /// despite a non-trivial dilution, and adding fertilizer alone would
    /// pull the undiluted water's ratio toward target, the fertilizer and
    /// dilution are recomputed from scratch. Additive doses are left as
    /// computed against the first baseline; the result is flagged
    /// `refined` so callers can see the inconsistency.
    fn refine_with_dilution(
        &self,
        result: &mut DosingResult,
        initial: &ElementTotals,
        fertilizer_elements: &ElementTotals,
        target_calcium: f64,
        target_magnesium: f64,
        ratio_calcium: f64,
    ) {
        let misses = |current: f64, target_value: f64| {
            target_value > 0.0 && (current - target_value).abs() > target_value * TARGET_TOLERANCE
        };
        let off_target = misses(amount(&result.elements, CALCIUM), target_calcium)
            || misses(amount(&result.elements, MAGNESIUM), target_magnesium);

        let fertilizer = match self.selected_fertilizer() {
            Some(fertilizer) => fertilizer,
            None => return,
        };
        let dosable = amount(fertilizer_elements, CALCIUM) > 0.0
            && amount(fertilizer_elements, MAGNESIUM) > 0.0;

        if !(off_target
            && self.state.dilution_support
            && dosable
            && result.dilution < 1.0 - DISCARD_THRESHOLD_ML
            && ratio_of(initial) > fertilizer.ratio)
        {
            return;
        }

        // Dose fertilizer into the undiluted water until its ratio falls
        // within tolerance of the target ratio.
        let mut corrected = initial.clone();
        let mut steps = 0u32;
        while (ratio_of(&corrected) - ratio_calcium).abs() > ratio_calcium * TARGET_TOLERANCE {
            if steps >= RATIO_STEP_LIMIT {
                eprintln!(
                    "warning: ratio correction stopped at the {} step ceiling",
                    RATIO_STEP_LIMIT
                );
                break;
            }
            steps += 1;
            for (name, value) in fertilizer_elements {
                *corrected.entry(name.clone()).or_insert(0.0) += value * 10.0 / 100.0;
            }
        }

        // Each element's own dilution requirement from the ratio-corrected
        // baseline; the stricter one wins.
        let dilution_calcium = target_calcium / amount(&corrected, CALCIUM);
        let dilution_magnesium = target_magnesium / amount(&corrected, MAGNESIUM);
        let refined_dilution = dilution_calcium.min(dilution_magnesium);
        if refined_dilution <= 0.0 || refined_dilution > 1.0 {
            return;
        }

        let mut refined_elements: ElementTotals = initial
            .iter()
            .map(|(name, value)| (name.clone(), value * refined_dilution))
            .collect();
        let refined_ml = dose_fertilizer(
            &mut refined_elements,
            fertilizer_elements,
            target_calcium,
            target_magnesium,
        );
        floor_minerals(&mut refined_elements);

        result.fertilizer.ml = refined_ml;
        result.dilution = refined_dilution;
        result.water = 1.0 - refined_dilution;
        result.ratio = ratio_of(&refined_elements);
        result.elements = refined_elements;
        result.refined = true;
    }

    /// Suggestion engine: for each element with a positive deficit and a
    /// selected additive, the single dose that would have closed the gap —
    /// 1 mL at a tuned concentration, or more volume at full strength.
    fn suggest_additives(
        &self,
        missing: &MissingElements,
    ) -> BTreeMap<AdditiveSlot, SuggestedAdditive> {
        let mut suggestions = BTreeMap::new();
        for slot in AdditiveSlot::ALL {
            let deficit = match slot {
                AdditiveSlot::Calcium => missing.calcium,
                AdditiveSlot::Magnesium => missing.magnesium,
            };
            if deficit <= 0.0 {
                continue;
            }
            let additive = match self.selected_additive(slot) {
                Some(additive) => additive,
                None => continue,
            };

            let yield_at_full = amount(&real_yield(additive, 100.0), slot.element());
            if yield_at_full <= 0.0 {
                continue;
            }

            let delta = deficit / yield_at_full;
            let concentration = delta * 100.0;
            let suggestion = if concentration > 100.0 {
                SuggestedAdditive {
                    ml: concentration / 100.0,
                    concentration: 100.0,
                    name: additive.name.clone(),
                }
            } else {
                SuggestedAdditive {
                    ml: 1.0,
                    concentration,
                    name: additive.name.clone(),
                }
            };
            suggestions.insert(slot, suggestion);
        }
        suggestions
    }

    /// Weekly table: linear per-week interpolation of the stage targets in
    /// canonical stage order, one solver call per week, numbered across
    /// the whole timeline.
    fn build_week_table(&self) -> Vec<WeekRow> {
        let ratio_calcium = self.state.ratio.calcium_per_magnesium();
        let mut start = self
            .state
            .targets
            .get(&GrowStage::Propagation)
            .map(|target| target.elements)
            .unwrap_or_else(|| calmag_schemas::target::TargetElements {
                calcium: 40.0,
                magnesium: 40.0 / ratio_calcium,
            });

        let mut table = Vec::new();
        let mut week = 0u32;
        for (stage, target) in &self.state.targets {
            let end = target.elements;
            let weeks = target.weeks.trunc().max(1.0);
            let delta_calcium = end.calcium - start.calcium;

            for index in 0..weeks as u32 {
                let calcium = start.calcium + delta_calcium / weeks * (index + 1) as f64;
                // Magnesium is always ratio-derived for interpolated weeks,
                // overriding its raw interpolation.
                let magnesium = calcium / ratio_calcium;
                let week_target = Target {
                    elements: calmag_schemas::target::TargetElements { calcium, magnesium },
                    weeks: target.weeks,
                };

                week += 1;
                table.push(WeekRow {
                    week,
                    stage: *stage,
                    result: self.calculate_fertilizer(&week_target),
                });
            }

            start = end;
        }
        table
    }

    fn selected_fertilizer(&self) -> Option<&Fertilizer> {
        if self.state.fertilizer.is_empty() {
            return None;
        }
        self.state.catalog.fertilizers.get(&self.state.fertilizer)
    }

    fn selected_additive(&self, slot: AdditiveSlot) -> Option<&Additive> {
        let name = self.state.additives.get(&slot)?;
        if name.is_empty() {
            return None;
        }
        self.state.catalog.additives.get(&slot)?.get(name)
    }

    /// The water elements that matter for the current selection: whatever
    /// the fertilizer and additives deliver, plus calcium and magnesium.
    fn relevant_water_elements(&self, fertilizer_elements: &ElementTotals) -> ElementTotals {
        let mut relevant: HashSet<&str> = HashSet::from([CALCIUM, MAGNESIUM]);
        relevant.extend(fertilizer_elements.keys().map(String::as_str));
        for slot in AdditiveSlot::ALL {
            if let Some(additive) = self.selected_additive(slot) {
                relevant.extend(additive.real.keys().map(String::as_str));
            }
        }

        let mut elements: ElementTotals = self
            .state
            .water
            .elements
            .iter()
            .filter(|(name, _)| relevant.contains(name.as_str()))
            .map(|(name, value)| (name.clone(), *value))
            .collect();
        floor_minerals(&mut elements);
        elements
    }

    pub fn get_water(&self) -> &Water {
        &self.state.water
    }

    pub fn get_ratio(&self) -> &Ratio {
        &self.state.ratio
    }

    pub fn get_targets(&self) -> &BTreeMap<GrowStage, Target> {
        &self.state.targets
    }

    pub fn get_fertilizer(&self) -> &str {
        &self.state.fertilizer
    }

    pub fn get_fertilizers(&self) -> &std::collections::HashMap<String, Fertilizer> {
        &self.state.catalog.fertilizers
    }

    pub fn get_additives(
        &self,
    ) -> &BTreeMap<AdditiveSlot, std::collections::HashMap<String, Additive>> {
        &self.state.catalog.additives
    }

    /// All element names known to the catalog, sorted.
    pub fn get_elements(&self) -> Vec<String> {
        let mut names: HashSet<String> = HashSet::new();
        for fertilizer in self.state.catalog.fertilizers.values() {
            names.extend(summarize(&fertilizer.elements).into_keys());
        }
        for slot_map in self.state.catalog.additives.values() {
            for additive in slot_map.values() {
                names.extend(summarize(&additive.elements).into_keys());
            }
        }
        let mut names: Vec<String> = names.into_iter().collect();
        names.sort();
        names
    }
}

/// Fixed-step fertilizer race loop: keeps dosing while *both* elements are
/// strictly below target and stops the instant either reaches it, so an
/// imbalanced fertilizer can leave the minority element under target.
fn dose_fertilizer(
    elements: &mut ElementTotals,
    fertilizer_elements: &ElementTotals,
    target_calcium: f64,
    target_magnesium: f64,
) -> f64 {
    let mut ml = 0.0;
    let mut steps = 0u32;
    while amount(elements, CALCIUM) < target_calcium
        && amount(elements, MAGNESIUM) < target_magnesium
    {
        if steps >= DOSE_STEP_LIMIT {
            eprintln!(
                "warning: fertilizer dosing stopped at the {} step ceiling",
                DOSE_STEP_LIMIT
            );
            break;
        }
        steps += 1;
        ml += DOSE_STEP_ML;
        for (name, value) in fertilizer_elements {
            *elements.entry(name.clone()).or_insert(0.0) += value * 10.0 / 100.0;
        }
    }
    ml
}

/// Fixed-step additive loop for one slot. The magnesium slot doses only a
/// magnesium-dominant additive (while the ratio sits above target or both
/// elements are below it); the calcium slot mirrors that. A mis-assigned
/// additive never doses. Afterwards the dose is backtracked by one step on
/// ratio overshoot, or discarded entirely below the significance
/// threshold.
fn dose_additive(
    elements: &mut ElementTotals,
    slot: AdditiveSlot,
    additive: &Additive,
    ratio_calcium: f64,
    target_calcium: f64,
    target_magnesium: f64,
) -> AdditiveDose {
    let real_calcium = amount(&additive.real, CALCIUM);
    let real_magnesium = amount(&additive.real, MAGNESIUM);

    let mut ml = 0.0;
    let mut steps = 0u32;
    loop {
        let calcium = amount(elements, CALCIUM);
        let magnesium = amount(elements, MAGNESIUM);
        let both_below = calcium < target_calcium && magnesium < target_magnesium;
        let keep_dosing = match slot {
            AdditiveSlot::Magnesium => {
                real_magnesium > real_calcium
                    && (calcium / magnesium > ratio_calcium || both_below)
            }
            AdditiveSlot::Calcium => {
                real_calcium > real_magnesium
                    && (calcium / magnesium < ratio_calcium || both_below)
            }
        };
        if !keep_dosing {
            break;
        }
        if steps >= DOSE_STEP_LIMIT {
            eprintln!(
                "warning: {} additive dosing stopped at the {} step ceiling",
                slot, DOSE_STEP_LIMIT
            );
            break;
        }
        steps += 1;
        ml += DOSE_STEP_ML;
        apply_yield(elements, &additive.real, DOSE_STEP_ML);
    }

    if ml > DISCARD_THRESHOLD_ML {
        // Overshot past the target ratio: back out exactly one step.
        if ratio_of(elements) < ratio_calcium {
            ml -= DOSE_STEP_ML;
            apply_yield(elements, &additive.real, -DOSE_STEP_ML);
        }
    } else if ml > 0.0 {
        // Clinically insignificant dose: discard it entirely.
        apply_yield(elements, &additive.real, -ml);
        ml = 0.0;
    }

    AdditiveDose {
        ml,
        mg: ml * (additive.concentration / 100.0) * 1000.0,
        name: additive.name.clone(),
        concentration: additive.concentration,
    }
}
