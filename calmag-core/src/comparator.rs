use crate::{
    calculator::{builder::CalculatorBuilder, state::Catalog},
    error::CalmagError,
    summarize::amount,
};
use calmag_schemas::{
    element::{Elements, CALCIUM, MAGNESIUM},
    result::DosingResult,
    target::{GrowStage, Ratio},
};
use std::collections::BTreeMap;

/// Per-stage dosing results for every fertilizer in the catalog, holding
/// water and ratio fixed. Each fertilizer is evaluated in its own isolated
/// engine with no additives selected.
pub fn compare_fertilizers(
    catalog: &Catalog,
    water: &Elements,
    ratio: &Ratio,
) -> Result<BTreeMap<String, BTreeMap<GrowStage, DosingResult>>, CalmagError> {
    let mut outcomes = BTreeMap::new();
    for key in catalog.fertilizers.keys() {
        let calculator = CalculatorBuilder::new()
            .with_catalog(catalog.clone())
            .with_water(water.clone())
            .with_ratio(ratio.clone())
            .with_fertilizer(key)
            .build()?;
        outcomes.insert(key.clone(), calculator.get_applied_fertilizer());
    }
    Ok(outcomes)
}

/// Ranks compared fertilizers by their summed absolute deviation from the
/// stage targets, best first.
pub fn rank_by_deviation(
    outcomes: &BTreeMap<String, BTreeMap<GrowStage, DosingResult>>,
) -> Vec<(String, f64)> {
    let mut ranking: Vec<(String, f64)> = outcomes
        .iter()
        .map(|(key, results)| {
            let deviation = results
                .values()
                .map(|result| {
                    let calcium = amount(&result.elements, CALCIUM);
                    let magnesium = amount(&result.elements, MAGNESIUM);
                    (calcium - result.target.elements.calcium).abs()
                        + (magnesium - result.target.elements.magnesium).abs()
                })
                .sum();
            (key.clone(), deviation)
        })
        .collect();
    ranking.sort_by(|a, b| a.1.total_cmp(&b.1));
    ranking
}

#[cfg(test)]
mod tests {
    use super::*;
    use calmag_schemas::{
        element::{scalar_elements, ElementValue},
        fertilizer::Fertilizer,
        target::{Target, TargetElements},
    };
    use std::collections::HashMap;

    fn fertilizer(brand: &str, name: &str, calcium: f64, magnesium: f64) -> Fertilizer {
        Fertilizer {
            name: name.to_string(),
            brand: brand.to_string(),
            density: 1.0,
            elements: HashMap::from([
                (CALCIUM.to_string(), ElementValue::Scalar(calcium)),
                (MAGNESIUM.to_string(), ElementValue::Scalar(magnesium)),
            ]),
            ratio: 0.0,
        }
    }

    #[test]
    fn every_catalog_fertilizer_is_evaluated_per_stage() {
        let mut catalog = Catalog::default();
        for product in [
            fertilizer("A", "Balanced", 10.0, 10.0),
            fertilizer("B", "Heavy", 20.0, 5.0),
        ] {
            catalog.fertilizers.insert(product.key(), product);
        }
        catalog.default_targets.insert(
            GrowStage::Propagation,
            Target {
                elements: TargetElements {
                    calcium: 40.0,
                    magnesium: 0.0,
                },
                weeks: 1.0,
            },
        );

        let water = scalar_elements(HashMap::from([
            (CALCIUM.to_string(), 5.0),
            (MAGNESIUM.to_string(), 2.0),
        ]));
        let outcomes = compare_fertilizers(&catalog, &water, &Ratio::default()).unwrap();

        assert_eq!(outcomes.len(), 2);
        for results in outcomes.values() {
            assert!(results.contains_key(&GrowStage::Propagation));
        }

        let ranking = rank_by_deviation(&outcomes);
        assert_eq!(ranking.len(), 2);
        assert!(ranking[0].1 <= ranking[1].1);
    }
}
