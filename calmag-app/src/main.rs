use anyhow::{Context, Result};
use calmag_core::{comparator, logger::TableWriter, CalculatorBuilder};
use calmag_schemas::{additive::AdditiveSlot, target::Ratio};
use clap::Parser;
use std::fs;
use std::path::Path;

mod config;
mod report;

/// Computes base fertilizer and mineral additive doses that bring a water
/// profile to a target Ca:Mg ratio across the configured grow stages.
#[derive(Debug, Parser)]
#[command(name = "calmag", version)]
struct Cli {
    /// Path to the product catalog YAML.
    #[arg(long, default_value = "data/catalog.yaml")]
    catalog: String,

    /// Path to the source-water profile YAML.
    #[arg(long, default_value = "data/water.yaml")]
    water: String,

    /// Base fertilizer key ("Brand - Product"); empty selects none.
    #[arg(long, default_value = "")]
    fertilizer: String,

    /// Calcium additive name; empty selects none.
    #[arg(long, default_value = "")]
    additive_calcium: String,

    /// Optional concentration override (%) for the calcium additive.
    #[arg(long)]
    additive_calcium_concentration: Option<f64>,

    /// Magnesium additive name; empty selects none.
    #[arg(long, default_value = "")]
    additive_magnesium: String,

    /// Optional concentration override (%) for the magnesium additive.
    #[arg(long)]
    additive_magnesium_concentration: Option<f64>,

    /// Target calcium parts per one part magnesium.
    #[arg(long, default_value_t = 3.5)]
    ratio: f64,

    /// Allow diluting the source water when it exceeds the targets.
    #[arg(long)]
    dilute: bool,

    /// Global percentage offset applied to every stage target.
    #[arg(long, default_value_t = 0.0)]
    target_offset: f64,

    /// Rank all catalog fertilizers against this water instead of dosing.
    #[arg(long)]
    compare: bool,

    /// Directory for run output (weekly table CSV, result JSON).
    #[arg(long, default_value = "./data/runs")]
    output_dir: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    println!("--- CalMag Calculator ---");

    let catalog = config::load_catalog(&cli.catalog)?;
    let water = config::load_water(&cli.water)?;
    let ratio = Ratio::new(cli.ratio, 1.0);

    if cli.compare {
        let outcomes = comparator::compare_fertilizers(&catalog, &water, &ratio)?;
        let ranking = comparator::rank_by_deviation(&outcomes);
        report::print_comparison(&ranking, &outcomes);
        return Ok(());
    }

    let mut calculator = CalculatorBuilder::new()
        .with_catalog(catalog)
        .with_water(water)
        .with_fertilizer(&cli.fertilizer)
        .with_additive(AdditiveSlot::Calcium, &cli.additive_calcium)
        .with_additive(AdditiveSlot::Magnesium, &cli.additive_magnesium)
        .with_ratio(ratio)
        .with_dilution_support(cli.dilute)
        .build()?;

    if let Some(concentration) = cli.additive_calcium_concentration {
        calculator.set_additive(
            AdditiveSlot::Calcium,
            &cli.additive_calcium,
            Some(concentration),
        )?;
    }
    if let Some(concentration) = cli.additive_magnesium_concentration {
        calculator.set_additive(
            AdditiveSlot::Magnesium,
            &cli.additive_magnesium,
            Some(concentration),
        )?;
    }
    if cli.target_offset != 0.0 {
        calculator.set_target_offset(cli.target_offset);
    }

    let outcome = calculator.calculate();

    let output_dir = format!(
        "{}/calmag_{}",
        cli.output_dir,
        chrono::Utc::now().format("%Y%m%d_%H%M%S")
    );
    fs::create_dir_all(&output_dir)
        .with_context(|| format!("Failed to create output directory: {}", output_dir))?;

    let table_path = Path::new(&output_dir).join("weekly_table.csv");
    let mut writer = TableWriter::new(&table_path)
        .with_context(|| format!("Failed to open {:?}", table_path))?;
    writer.write_table(&outcome.table)?;

    let outcome_path = Path::new(&output_dir).join("outcome.json");
    fs::write(&outcome_path, serde_json::to_string_pretty(&outcome)?)
        .with_context(|| format!("Failed to write {:?}", outcome_path))?;

    report::print_summary(&outcome);
    println!("\nRun artifacts are in '{}'", output_dir);

    Ok(())
}
