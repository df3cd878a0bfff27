use calmag_schemas::element::{ElementTotals, ElementValue, Elements, CALCIUM, MAGNESIUM};

/// Mass fraction of elemental calcium in calcium oxide.
pub const CAO_TO_CALCIUM: f64 = 0.7143;
/// Mass fraction of elemental magnesium in magnesium oxide.
pub const MGO_TO_MAGNESIUM: f64 = 0.6032;

/// Conversion factor from a compound declaration to the base element.
/// Unknown compounds pass through unconverted, treated as already being the
/// base element amount.
pub fn compound_factor(compound: &str) -> f64 {
    match compound {
        "CaO" => CAO_TO_CALCIUM,
        "MgO" => MGO_TO_MAGNESIUM,
        _ => 1.0,
    }
}

/// Reduces a raw element map to base-element totals. Compound entries are
/// converted by their stoichiometric factor and accumulated into the parent
/// element; scalars accumulate directly. The output always carries
/// `calcium` and `magnesium` keys, defaulting to 0.
pub fn summarize(elements: &Elements) -> ElementTotals {
    let mut totals = ElementTotals::new();
    for (name, value) in elements {
        let total = totals.entry(name.clone()).or_insert(0.0);
        match value {
            ElementValue::Scalar(amount) => *total += amount,
            ElementValue::Compound(parts) => {
                for (compound, amount) in parts {
                    *total += amount * compound_factor(compound);
                }
            }
        }
    }
    totals.entry(CALCIUM.to_string()).or_insert(0.0);
    totals.entry(MAGNESIUM.to_string()).or_insert(0.0);
    totals
}

/// Lookup with a zero default, the common access pattern for summarized
/// maps.
pub fn amount(totals: &ElementTotals, name: &str) -> f64 {
    totals.get(name).copied().unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::collections::HashMap;

    fn scalar(value: f64) -> ElementValue {
        ElementValue::Scalar(value)
    }

    #[test]
    fn flat_map_passes_through_unchanged() {
        let mut elements = Elements::new();
        elements.insert("calcium".to_string(), scalar(12.0));
        elements.insert("potassium".to_string(), scalar(3.0));

        let totals = summarize(&elements);
        assert_relative_eq!(totals["calcium"], 12.0);
        assert_relative_eq!(totals["potassium"], 3.0);
        // Magnesium is ensured even when absent from the input.
        assert_relative_eq!(totals["magnesium"], 0.0);
    }

    #[test]
    fn oxide_compounds_convert_by_mass_fraction() {
        let mut elements = Elements::new();
        elements.insert(
            "calcium".to_string(),
            ElementValue::Compound(HashMap::from([("CaO".to_string(), 20.0)])),
        );
        elements.insert(
            "magnesium".to_string(),
            ElementValue::Compound(HashMap::from([("MgO".to_string(), 10.0)])),
        );

        let totals = summarize(&elements);
        assert_relative_eq!(totals["calcium"], 20.0 * CAO_TO_CALCIUM);
        assert_relative_eq!(totals["magnesium"], 10.0 * MGO_TO_MAGNESIUM);
    }

    #[test]
    fn unknown_compound_keys_pass_through() {
        let mut elements = Elements::new();
        elements.insert(
            "magnesium".to_string(),
            ElementValue::Compound(HashMap::from([
                ("MgO".to_string(), 10.0),
                ("Mg".to_string(), 2.0),
            ])),
        );

        let totals = summarize(&elements);
        assert_relative_eq!(totals["magnesium"], 10.0 * MGO_TO_MAGNESIUM + 2.0);
    }

    #[test]
    fn summarization_is_order_independent() {
        let mut forward = Elements::new();
        forward.insert("calcium".to_string(), scalar(5.0));
        forward.insert("magnesium".to_string(), scalar(2.0));
        forward.insert("iron".to_string(), scalar(0.1));

        let mut reverse = Elements::new();
        reverse.insert("iron".to_string(), scalar(0.1));
        reverse.insert("magnesium".to_string(), scalar(2.0));
        reverse.insert("calcium".to_string(), scalar(5.0));

        assert_eq!(summarize(&forward), summarize(&reverse));
    }
}
