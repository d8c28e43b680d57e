//! Fiscal Engine CLI
//!
//! Command-line interface for calculating liabilities and payment schedules

use anyhow::{anyhow, Context, Result};
use chrono::{Local, NaiveDate};
use clap::Parser;
use fiscal_engine::schedule::CONSERVATIVE_ACCRUAL_MULTIPLIER;
use fiscal_engine::{
    build_schedule, CalculationInput, CalculationResult, Engine, RateTables, ScheduleOptions,
    ScheduleRow, ScheduleSummary,
};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "fiscal_engine", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Calculate liabilities for a JSON request and simulate the payment schedule
    Calculate(CalculateArgs),
    /// Check a JSON request and list every field problem
    Validate(ValidateArgs),
}

#[derive(clap::Args, Debug)]
struct CalculateArgs {
    /// Path to the request JSON
    #[arg(short, long)]
    input: PathBuf,

    /// Rate table directory; built-in 2025 tables when omitted
    #[arg(long)]
    rates: Option<PathBuf>,

    /// Opening balance; falls back to the request's current_balance
    #[arg(long)]
    balance: Option<f64>,

    /// Accrual multiplier for the schedule
    #[arg(long, default_value_t = 1.0)]
    multiplier: f64,

    /// Also simulate the conservative schedule
    #[arg(long)]
    conservative: bool,

    /// Cutoff date (YYYY-MM-DD); defaults to the local date
    #[arg(long)]
    today: Option<NaiveDate>,

    /// Write the schedule rows to this CSV file
    #[arg(long)]
    schedule_csv: Option<PathBuf>,

    /// Print the result as JSON instead of a table
    #[arg(long)]
    json: bool,
}

#[derive(clap::Args, Debug)]
struct ValidateArgs {
    /// Path to the request JSON
    #[arg(short, long)]
    input: PathBuf,

    /// Rate table directory; built-in 2025 tables when omitted
    #[arg(long)]
    rates: Option<PathBuf>,
}

fn load_tables(dir: Option<&Path>) -> Result<RateTables> {
    match dir {
        Some(dir) => RateTables::from_csv_path(dir)
            .with_context(|| format!("loading rate tables from {}", dir.display())),
        None => Ok(RateTables::default_2025()),
    }
}

fn read_request(path: &Path) -> Result<CalculationInput> {
    let text =
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
}

fn print_result(result: &CalculationResult) {
    println!("Regime: {:?} ({})", result.regime, result.fiscal_year);
    println!("  Taxable income:      {:>12.2}", result.taxable_income);
    println!("  Gross tax:           {:>12.2}", result.gross_tax);
    println!("  Net tax:             {:>12.2}", result.net_tax);
    println!("  Effective rate:      {:>12.4}", result.effective_rate);
    for line in &result.lines {
        println!("  {:<20} {:>12.2}", format!("{:?}:", line.kind), line.amount);
    }
    println!("  Contributions:       {:>12.2}", result.total_contributions);
    println!("  VAT:                 {:>12.2}", result.vat_amount);
    println!(
        "  Advances:            {:>12.2} / {:.2}",
        result.installments.first, result.installments.second
    );
    println!("  Total due:           {:>12.2}", result.total_due);
    println!();
}

fn print_schedule(title: &str, rows: &[ScheduleRow]) {
    println!("{} ({} rows):", title, rows.len());
    println!(
        "{:>10} {:<40} {:>12} {:>12} {:>12} {:>12}",
        "Date", "Event", "Amount", "Balance", "Required", "Deficit"
    );
    println!("{}", "-".repeat(103));
    for row in rows {
        let amount = if row.is_income { row.amount } else { -row.amount };
        println!(
            "{:>10} {:<40} {:>12.2} {:>12.2} {:>12.2} {:>12.2}",
            row.date.format("%Y-%m-%d"),
            row.description,
            amount,
            row.new_balance,
            row.required_payment,
            row.deficit
        );
    }

    let summary = ScheduleSummary::from_rows(rows);
    println!(
        "Accrued {:.2}, paid {:.2}, shortfall {:.2}, closing balance {:.2}",
        summary.total_accrued, summary.total_paid, summary.total_shortfall, summary.final_balance
    );
    match summary.first_shortfall {
        Some(date) => println!("First shortfall on {}", date),
        None => println!("Fully funded"),
    }
    println!();
}

fn write_schedule_csv(path: &Path, rows: &[ScheduleRow]) -> Result<()> {
    let mut writer =
        csv::Writer::from_path(path).with_context(|| format!("creating {}", path.display()))?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

fn calculate(args: CalculateArgs) -> Result<()> {
    let engine = Engine::new(load_tables(args.rates.as_deref())?);
    let input = read_request(&args.input)?;

    let result = engine
        .try_calculate(&input)
        .map_err(|report| anyhow!("invalid request {}: {}", args.input.display(), report))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_result(&result);
    }

    let today = args.today.unwrap_or_else(|| Local::now().date_naive());
    let options = ScheduleOptions::new(today);
    let balance = args.balance.or(input.current_balance()).unwrap_or(0.0);

    let rows = build_schedule(&result, balance, args.multiplier, &options);
    print_schedule("Payment schedule", &rows);

    if args.conservative {
        let conservative =
            build_schedule(&result, balance, CONSERVATIVE_ACCRUAL_MULTIPLIER, &options);
        print_schedule("Conservative schedule", &conservative);
    }

    if let Some(path) = args.schedule_csv {
        write_schedule_csv(&path, &rows)?;
        println!("Schedule written to {}", path.display());
    }

    Ok(())
}

fn validate(args: ValidateArgs) -> Result<()> {
    let engine = Engine::new(load_tables(args.rates.as_deref())?);
    let input = read_request(&args.input)?;

    let report = engine.validate(&input);
    if report.is_valid() {
        println!("{}: ok", args.input.display());
        return Ok(());
    }
    for message in report.messages() {
        println!("{}: {}", message.field, message.message);
    }
    Err(anyhow!("{} problem(s) in {}", report.issues.len(), args.input.display()))
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Calculate(args) => calculate(args),
        Commands::Validate(args) => validate(args),
    }
}
