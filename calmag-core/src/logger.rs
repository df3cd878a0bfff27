use calmag_schemas::{
    additive::AdditiveSlot,
    result::WeekRow,
};
use csv::Writer;
use serde::Serialize;
use std::fs;
use std::io;
use std::path::Path;

#[derive(Debug, Serialize)]
struct TableEntry {
    week: u32,
    stage: String,
    target_calcium: f64,
    target_magnesium: f64,
    fertilizer_name: String,
    fertilizer_ml: f64,
    additive_calcium_ml: f64,
    additive_calcium_mg: f64,
    additive_magnesium_ml: f64,
    additive_magnesium_mg: f64,
    dilution: f64,
    water: f64,
    ratio: f64,
    refined: bool,
    elements_json: String,
    missing_json: String,
}

/// Writes the weekly dosing table as CSV, one row per week.
pub struct TableWriter {
    writer: Writer<fs::File>,
}

impl TableWriter {
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, io::Error> {
        let file = fs::File::create(path)?;
        Ok(Self {
            writer: Writer::from_writer(file),
        })
    }

    pub fn write_week(&mut self, row: &WeekRow) -> Result<(), anyhow::Error> {
        let result = &row.result;
        let calcium_dose = result
            .additive
            .get(&AdditiveSlot::Calcium)
            .cloned()
            .unwrap_or_default();
        let magnesium_dose = result
            .additive
            .get(&AdditiveSlot::Magnesium)
            .cloned()
            .unwrap_or_default();

        let entry = TableEntry {
            week: row.week,
            stage: row.stage.label().to_string(),
            target_calcium: result.target.elements.calcium,
            target_magnesium: result.target.elements.magnesium,
            fertilizer_name: result.fertilizer.name.clone(),
            fertilizer_ml: result.fertilizer.ml,
            additive_calcium_ml: calcium_dose.ml,
            additive_calcium_mg: calcium_dose.mg,
            additive_magnesium_ml: magnesium_dose.ml,
            additive_magnesium_mg: magnesium_dose.mg,
            dilution: result.dilution,
            water: result.water,
            ratio: result.ratio,
            refined: result.refined,
            elements_json: serde_json::to_string(&result.elements)?,
            missing_json: serde_json::to_string(&result.missing)?,
        };

        self.writer.serialize(entry)?;
        self.writer.flush()?;
        Ok(())
    }

    pub fn write_table(&mut self, table: &[WeekRow]) -> Result<(), anyhow::Error> {
        for row in table {
            self.write_week(row)?;
        }
        Ok(())
    }
}
