use anyhow::{Context, Result};
use calmag_core::{units, Catalog};
use calmag_schemas::{
    element::{scalar_elements, Elements},
    file_formats::{CatalogFile, WaterFile, WaterUnit},
};
use std::fs;

/// Loads and flattens the product catalog from a YAML file.
pub fn load_catalog(path: &str) -> Result<Catalog> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read catalog file: {}", path))?;
    let file: CatalogFile = serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse YAML from {}", path))?;
    Ok(Catalog::from_file(file))
}

/// Loads a source-water profile from a YAML file, converting millimolar
/// values to mg/L when the file declares them as such.
pub fn load_water(path: &str) -> Result<Elements> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read water profile: {}", path))?;
    let file: WaterFile = serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse YAML from {}", path))?;

    let elements = match file.unit {
        WaterUnit::MgPerLiter => file.elements,
        WaterUnit::Millimole => units::convert_millimolar(&file.elements),
    };
    Ok(scalar_elements(elements))
}
