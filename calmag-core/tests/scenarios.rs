use approx::assert_relative_eq;
use calmag_core::{
    calculator::state::Catalog, comparator, CalculatorBuilder, CalmagError,
};
use calmag_schemas::{
    additive::{Additive, AdditiveSlot},
    element::{scalar_elements, ElementValue, Elements, CALCIUM, MAGNESIUM},
    fertilizer::Fertilizer,
    target::{GrowStage, Ratio, Target, TargetElements},
};
use std::collections::{BTreeMap, HashMap};

fn elements(calcium: f64, magnesium: f64) -> Elements {
    HashMap::from([
        (CALCIUM.to_string(), ElementValue::Scalar(calcium)),
        (MAGNESIUM.to_string(), ElementValue::Scalar(magnesium)),
    ])
}

fn water(calcium: f64, magnesium: f64) -> Elements {
    scalar_elements(HashMap::from([
        (CALCIUM.to_string(), calcium),
        (MAGNESIUM.to_string(), magnesium),
    ]))
}

fn target(calcium: f64, magnesium: f64, weeks: f64) -> Target {
    Target {
        elements: TargetElements { calcium, magnesium },
        weeks,
    }
}

fn catalog() -> Catalog {
    let mut catalog = Catalog::default();

    let balanced = Fertilizer {
        name: "Balanced".to_string(),
        brand: "Test".to_string(),
        density: 1.0,
        elements: elements(10.0, 10.0),
        ratio: 0.0,
    };
    catalog.fertilizers.insert(balanced.key(), balanced);

    let mut calcium_slot = HashMap::new();
    calcium_slot.insert(
        "CalBoost".to_string(),
        Additive {
            name: "CalBoost".to_string(),
            elements: elements(10.0, 0.0),
            concentration: 100.0,
            density: 1.0,
            real: HashMap::new(),
        },
    );
    catalog.additives.insert(AdditiveSlot::Calcium, calcium_slot);

    catalog
        .default_targets
        .insert(GrowStage::Propagation, target(150.0, 50.0, 1.0));
    catalog
}

#[test]
fn construction_requires_calcium_and_magnesium_in_water() {
    let missing_magnesium =
        scalar_elements(HashMap::from([(CALCIUM.to_string(), 20.0)]));
    let err = CalculatorBuilder::new()
        .with_catalog(catalog())
        .with_water(missing_magnesium)
        .build()
        .unwrap_err();
    assert!(matches!(err, CalmagError::WaterElementMissing(element) if element == MAGNESIUM));
}

#[test]
fn additive_alone_lifts_calcium_to_target() {
    // Water 20/5, no fertilizer, a 100 mg/mL calcium additive, dilution
    // disabled: the calcium slot alone has to close the gap to 150.
    let mut calculator = CalculatorBuilder::new()
        .with_catalog(catalog())
        .with_water(water(20.0, 5.0))
        .build()
        .unwrap();
    calculator
        .set_additive(AdditiveSlot::Calcium, "CalBoost", None)
        .unwrap();

    let result = calculator.calculate_fertilizer(&target(150.0, 50.0, 1.0));

    assert_relative_eq!(result.fertilizer.ml, 0.0);
    let dose = &result.additive[&AdditiveSlot::Calcium];
    assert!(dose.ml > 0.0);
    assert!(result.elements[CALCIUM] >= 150.0);
    assert!(result.elements[CALCIUM] < 151.0);
    assert_relative_eq!(dose.mg, dose.ml * 1000.0, epsilon = 1e-9);
    assert_relative_eq!(result.missing.calcium, 130.0);
}

#[test]
fn hard_water_engages_dilution_and_refinement() {
    // Water 300/60 sits at ratio 5.0 against a 3.5 target; with a balanced
    // fertilizer selected and dilution enabled, the first pass under-doses
    // magnesium and the refinement pass recomputes dilution from the
    // ratio-corrected baseline.
    let calculator = CalculatorBuilder::new()
        .with_catalog(catalog())
        .with_water(water(300.0, 60.0))
        .with_fertilizer("Test - Balanced")
        .with_dilution_support(true)
        .build()
        .unwrap();

    let result = calculator.calculate_fertilizer(&target(150.0, 50.0, 1.0));

    assert!(result.dilution < 1.0);
    assert!(result.refined);
    let ratio_target = 3.5;
    assert!(
        (result.ratio - ratio_target).abs() <= ratio_target * 0.05 + 1e-9,
        "final ratio {} not within 5% of {}",
        result.ratio,
        ratio_target
    );
    assert!(result.fertilizer.ml > 0.0);
}

#[test]
fn weekly_interpolation_reaches_stage_end_exactly() {
    let mut calculator = CalculatorBuilder::new()
        .with_catalog(catalog())
        .with_water(water(20.0, 5.0))
        .with_ratio(Ratio::new(4.0, 1.0))
        .build()
        .unwrap();

    let mut targets = BTreeMap::new();
    targets.insert(GrowStage::Propagation, target(40.0, 0.0, 1.0));
    targets.insert(GrowStage::Vegetation, target(80.0, 0.0, 2.0));
    calculator.set_targets(targets);

    let outcome = calculator.calculate();
    assert_eq!(outcome.table.len(), 3);

    // Weeks are numbered across the whole timeline.
    let weeks: Vec<u32> = outcome.table.iter().map(|row| row.week).collect();
    assert_eq!(weeks, vec![1, 2, 3]);

    // Vegetation interpolates 40 -> 80 over two weeks and lands exactly on
    // the stage's validated end elements in its final week.
    let last = outcome.table.last().unwrap();
    assert_eq!(last.stage, GrowStage::Vegetation);
    assert_relative_eq!(last.result.target.elements.calcium, 80.0);
    assert_relative_eq!(last.result.target.elements.magnesium, 20.0);

    let middle = &outcome.table[1];
    assert_relative_eq!(middle.result.target.elements.calcium, 60.0);
    assert_relative_eq!(middle.result.target.elements.magnesium, 15.0);
}

#[test]
fn calculate_reports_first_stage_deficiency() {
    let mut calculator = CalculatorBuilder::new()
        .with_catalog(catalog())
        .with_water(water(20.0, 5.0))
        .build()
        .unwrap();
    calculator
        .set_additive(AdditiveSlot::Calcium, "CalBoost", None)
        .unwrap();

    let outcome = calculator.calculate();
    assert_relative_eq!(outcome.deficiency.missing.calcium, 130.0);
    assert_relative_eq!(outcome.deficiency.missing.magnesium, 45.0);
    assert!(outcome
        .deficiency
        .suggested_additive
        .contains_key(&AdditiveSlot::Calcium));
}

#[test]
fn comparator_holds_water_and_ratio_fixed() {
    let mut catalog = catalog();
    let heavy = Fertilizer {
        name: "Heavy".to_string(),
        brand: "Test".to_string(),
        density: 1.0,
        elements: elements(20.0, 5.0),
        ratio: 0.0,
    };
    catalog.fertilizers.insert(heavy.key(), heavy);

    let outcomes =
        comparator::compare_fertilizers(&catalog, &water(20.0, 5.0), &Ratio::default()).unwrap();
    assert_eq!(outcomes.len(), 2);
    for results in outcomes.values() {
        let result = &results[&GrowStage::Propagation];
        // No additives are selected during comparison.
        assert_relative_eq!(result.additive[&AdditiveSlot::Calcium].ml, 0.0);
        assert_relative_eq!(result.additive[&AdditiveSlot::Magnesium].ml, 0.0);
    }
}
