use calmag_schemas::element::ElementTotals;

/// Molar masses in g/mol for the element vocabulary accepted at the engine
/// boundary. Compound species (sulphate, nitrate, nitrite) carry the mass
/// of the whole ion.
pub const MOLAR_MASSES: [(&str, f64); 17] = [
    ("calcium", 40.08),
    ("magnesium", 24.31),
    ("potassium", 39.10),
    ("iron", 55.85),
    ("sulphate", 96.06),
    ("nitrate", 62.00),
    ("nitrite", 46.01),
    ("phosphorus", 30.97),
    ("nitrogen", 14.01),
    ("sulfur", 32.06),
    ("sodium", 22.99),
    ("chloride", 35.45),
    ("manganese", 54.94),
    ("boron", 10.81),
    ("zinc", 65.38),
    ("copper", 63.55),
    ("molybdenum", 95.94),
];

pub fn molar_mass(element: &str) -> Option<f64> {
    MOLAR_MASSES
        .iter()
        .find(|(name, _)| *name == element)
        .map(|(_, mass)| *mass)
}

/// Converts a single millimolar value to mg/L. Returns `None` for elements
/// outside the known vocabulary.
pub fn mmol_to_mg(element: &str, millimole: f64) -> Option<f64> {
    molar_mass(element).map(|mass| millimole * mass)
}

/// Converts a flat millimolar map to mg/L. Elements without a known molar
/// mass are passed through unchanged.
pub fn convert_millimolar(elements: &ElementTotals) -> ElementTotals {
    elements
        .iter()
        .map(|(name, value)| {
            let converted = mmol_to_mg(name, *value).unwrap_or(*value);
            (name.clone(), converted)
        })
        .collect()
}
