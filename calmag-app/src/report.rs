use calmag_schemas::{
    additive::AdditiveSlot,
    element::{CALCIUM, MAGNESIUM},
    result::{CalculationOutcome, DosingResult},
    target::GrowStage,
};
use std::collections::BTreeMap;

fn element_of(result: &DosingResult, name: &str) -> f64 {
    result.elements.get(name).copied().unwrap_or(0.0)
}

/// Prints the full calculation as an aligned console report.
pub fn print_summary(outcome: &CalculationOutcome) {
    println!("\n\n--- [Dosing Report] ---");
    println!("========================================");

    println!("Initial Deficiency:");
    println!(
        "  - Calcium:   {:>8.2} mg/L missing",
        outcome.deficiency.missing.calcium
    );
    println!(
        "  - Magnesium: {:>8.2} mg/L missing",
        outcome.deficiency.missing.magnesium
    );
    for (slot, suggestion) in &outcome.deficiency.suggested_additive {
        println!(
            "  - Suggested {:<9} | {:>6.2} mL of {} at {:.1}%",
            slot.element(),
            suggestion.ml,
            suggestion.name,
            suggestion.concentration
        );
    }

    println!("\nPer-Stage Results:");
    for (stage, result) in &outcome.results {
        print_stage_line(*stage, result);
    }

    println!("\nWeekly Table ({} weeks):", outcome.table.len());
    for row in &outcome.table {
        let calcium_dose = row
            .result
            .additive
            .get(&AdditiveSlot::Calcium)
            .map_or(0.0, |dose| dose.ml);
        let magnesium_dose = row
            .result
            .additive
            .get(&AdditiveSlot::Magnesium)
            .map_or(0.0, |dose| dose.ml);
        println!(
            "  - Week {:>2} [{:<11}] | target Ca {:>6.1} Mg {:>5.1} | fert {:>5.2} mL | add Ca {:>5.2} mL Mg {:>5.2} mL | dilution {:>4.2}{}",
            row.week,
            row.stage.label(),
            row.result.target.elements.calcium,
            row.result.target.elements.magnesium,
            row.result.fertilizer.ml,
            calcium_dose,
            magnesium_dose,
            row.result.dilution,
            if row.result.refined { " (refined)" } else { "" }
        );
    }

    println!("========================================");
}

fn print_stage_line(stage: GrowStage, result: &DosingResult) {
    println!(
        "  - {:<11} | Ca {:>6.1} / {:>6.1} mg/L | Mg {:>5.1} / {:>5.1} mg/L | ratio {:>5.2} | fert {:>5.2} mL{}",
        stage.label(),
        element_of(result, CALCIUM),
        result.target.elements.calcium,
        element_of(result, MAGNESIUM),
        result.target.elements.magnesium,
        result.ratio,
        result.fertilizer.ml,
        if result.refined { " (refined)" } else { "" }
    );
}

/// Prints the comparator ranking, best fit first.
pub fn print_comparison(
    ranking: &[(String, f64)],
    outcomes: &BTreeMap<String, BTreeMap<GrowStage, DosingResult>>,
) {
    println!("\n\n--- [Fertilizer Comparison] ---");
    println!("========================================");
    for (rank, (key, deviation)) in ranking.iter().enumerate() {
        println!(
            "{:>2}. {:<32} | total deviation {:>8.2} mg/L",
            rank + 1,
            key,
            deviation
        );
        if let Some(results) = outcomes.get(key) {
            for (stage, result) in results {
                print_stage_line(*stage, result);
            }
        }
    }
    println!("========================================");
}
