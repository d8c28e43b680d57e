//! Calculate a batch of requests from a JSON array
//!
//! Each request is validated and calculated in parallel; one summary row
//! per request goes to a CSV file.

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::Parser;
use fiscal_engine::{CalculationInput, ScenarioRunner, ScheduleOptions};
use rayon::prelude::*;
use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(
    name = "run_batch",
    about = "Calculate a JSON array of requests and write a CSV summary."
)]
struct Args {
    /// JSON file holding an array of requests
    #[arg(short, long)]
    input: PathBuf,

    /// Output CSV path
    #[arg(short, long, default_value = "batch_output.csv")]
    output: PathBuf,

    /// Rate table directory; built-in 2025 tables when omitted
    #[arg(long)]
    rates: Option<PathBuf>,

    /// Schedule cutoff date (YYYY-MM-DD); defaults to the local date
    #[arg(long)]
    today: Option<NaiveDate>,
}

/// One CSV line per request
#[derive(Debug, Clone, Default, Serialize)]
struct BatchRow {
    index: usize,
    regime: String,
    fiscal_year: i32,
    valid: bool,
    taxable_income: f64,
    total_taxes: f64,
    total_contributions: f64,
    vat: f64,
    total_due: f64,
    base_shortfall: f64,
    conservative_shortfall: f64,
    first_shortfall: Option<NaiveDate>,
    errors: String,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let start = Instant::now();
    let text = std::fs::read_to_string(&args.input)
        .with_context(|| format!("reading {}", args.input.display()))?;
    let inputs: Vec<CalculationInput> =
        serde_json::from_str(&text).with_context(|| format!("parsing {}", args.input.display()))?;
    println!("Loaded {} requests in {:?}", inputs.len(), start.elapsed());

    let runner = match &args.rates {
        Some(dir) => ScenarioRunner::from_csv_path(dir)
            .with_context(|| format!("loading rate tables from {}", dir.display()))?,
        None => ScenarioRunner::new(),
    };
    let today = args.today.unwrap_or_else(|| Local::now().date_naive());
    let options = ScheduleOptions::new(today);

    let calc_start = Instant::now();
    let rows: Vec<BatchRow> = inputs
        .par_iter()
        .enumerate()
        .map(|(index, input)| {
            let mut row = BatchRow {
                index,
                regime: format!("{:?}", input.kind()),
                fiscal_year: input.fiscal_year(),
                ..Default::default()
            };

            let outcome = match runner.try_run_with_schedules(input, &options) {
                Ok(outcome) => outcome,
                Err(report) => {
                    row.errors = report.to_string();
                    return row;
                }
            };
            let base = outcome.base_summary();
            let result = &outcome.result;

            row.valid = true;
            row.taxable_income = result.taxable_income;
            row.total_taxes = result.total_taxes;
            row.total_contributions = result.total_contributions;
            row.vat = result.vat_amount;
            row.total_due = result.total_due;
            row.base_shortfall = base.total_shortfall;
            row.conservative_shortfall = outcome.conservative_summary().total_shortfall;
            row.first_shortfall = base.first_shortfall;
            row
        })
        .collect();
    println!("Calculated in {:?}", calc_start.elapsed());

    let mut writer = csv::Writer::from_path(&args.output)
        .with_context(|| format!("creating {}", args.output.display()))?;
    for row in &rows {
        writer.serialize(row)?;
    }
    writer.flush()?;

    let invalid = rows.iter().filter(|r| !r.valid).count();
    let total_due: f64 = rows.iter().map(|r| r.total_due).sum();
    println!("Output written to {}", args.output.display());
    println!("\nBatch Summary:");
    println!("  Requests:  {} ({} rejected)", rows.len(), invalid);
    println!("  Total due: {:.2}", total_due);
    println!("\nTotal time: {:?}", start.elapsed());

    Ok(())
}
