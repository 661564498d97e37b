use analytics::{KpiCalculator, KpiReport, summarize_dataset, validate_dataset};
use anyhow::{Context, Result, bail};
use chrono::{DateTime, NaiveDate, Utc};
use clap::{Parser, Subcommand};
use comfy_table::Table;
use comfy_table::presets::UTF8_FULL;
use core_types::MaintenanceDataset;
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

mod format;

use format::{format_currency, format_duration, format_percentage};

/// The main entry point for the RCM KPI reporting tool.
fn main() -> Result<()> {
    // A .env file is optional; it may carry KPI_* overrides.
    dotenvy::dotenv().ok();

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let cli = Cli::parse();

    match cli.command {
        Commands::Report(args) => handle_report(args),
        Commands::Validate(args) => handle_validate(args),
        Commands::Summary(args) => handle_summary(args),
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Reliability and maintenance-cost KPIs for an asset register.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Calculate the KPI report for a dataset.
    Report(ReportArgs),
    /// Check a dataset for orphaned records, invalid values and missing columns.
    Validate(DataArgs),
    /// Show record counts and date ranges of a dataset.
    Summary(DataArgs),
}

#[derive(Parser)]
struct DataArgs {
    /// Path to a JSON file with `assets`, `failures` and `maintenance_costs` tables.
    #[arg(long, short)]
    data: PathBuf,
}

#[derive(Parser)]
struct ReportArgs {
    #[command(flatten)]
    input: DataArgs,

    /// Measure the trailing windows back from the end of this day (format: YYYY-MM-DD).
    /// Defaults to now.
    #[arg(long)]
    as_of: Option<NaiveDate>,

    /// Print the report as JSON instead of a table.
    #[arg(long)]
    json: bool,
}

// ==============================================================================
// Command Logic
// ==============================================================================

fn handle_report(args: ReportArgs) -> Result<()> {
    let settings = configuration::load_config().context("Failed to load KPI settings")?;
    let calculator = KpiCalculator::with_settings(settings)?;
    let data = load_dataset(&args.input.data)?;

    let as_of = match args.as_of {
        Some(date) => end_of_day(date)?,
        None => Utc::now(),
    };
    tracing::info!(%as_of, path = %args.input.data.display(), "Calculating KPI report.");

    let report = calculator.calculate_all_kpis_at(&data, as_of, &mut rand::thread_rng());

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", render_report(&report));
    }
    Ok(())
}

fn handle_validate(args: DataArgs) -> Result<()> {
    let data = load_dataset(&args.data)?;
    let report = validate_dataset(&data);

    for error in &report.errors {
        println!("error: {}", error);
    }
    for warning in &report.warnings {
        println!("warning: {}", warning);
    }

    if !report.valid {
        bail!("{} contains {} invalid records", args.data.display(), report.errors.len());
    }
    println!("{} is valid.", args.data.display());
    Ok(())
}

fn handle_summary(args: DataArgs) -> Result<()> {
    let data = load_dataset(&args.data)?;
    let summary = summarize_dataset(&data);

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Table", "Records", "From", "To"]);
    for (name, table_summary) in [
        ("assets", &summary.assets),
        ("failures", &summary.failures),
        ("maintenance_costs", &summary.maintenance_costs),
    ] {
        let (from, to) = match table_summary.date_range {
            Some((start, end)) => (start.date_naive().to_string(), end.date_naive().to_string()),
            None => ("-".to_string(), "-".to_string()),
        };
        table.add_row(vec![
            name.to_string(),
            table_summary.record_count.to_string(),
            from,
            to,
        ]);
    }

    println!("{table}");
    Ok(())
}

fn load_dataset(path: &Path) -> Result<MaintenanceDataset> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read dataset file {}", path.display()))?;
    let data: MaintenanceDataset = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse dataset file {}", path.display()))?;

    tracing::debug!(
        assets = data.assets.len(),
        failures = data.failures.len(),
        costs = data.maintenance_costs.len(),
        "Loaded dataset."
    );
    Ok(data)
}

fn end_of_day(date: NaiveDate) -> Result<DateTime<Utc>> {
    date.and_hms_opt(23, 59, 59)
        .map(|dt| dt.and_utc())
        .with_context(|| format!("Invalid --as-of date {}", date))
}

fn render_report(report: &KpiReport) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["KPI", "Value", "Change"]);

    table.add_row(vec![
        "MTBF".to_string(),
        format!("{:.1} days", report.mtbf),
        format_percentage(report.mtbf_change),
    ]);
    table.add_row(vec![
        "MTTR".to_string(),
        format_duration(report.mttr),
        format_percentage(report.mttr_change),
    ]);
    table.add_row(vec![
        "OEE".to_string(),
        format_percentage(report.oee),
        format_percentage(report.oee_change),
    ]);
    table.add_row(vec![
        "Maintenance cost".to_string(),
        format_currency(report.total_cost),
        format!("{:.1}%", report.cost_change),
    ]);
    table.add_row(vec![
        "Utilization".to_string(),
        format!(
            "{} ({}/{})",
            format_percentage(report.utilization),
            report.active_assets,
            report.total_assets
        ),
        String::new(),
    ]);
    table.add_row(vec![
        "Failure rate".to_string(),
        format!(
            "{:.3}/day ({} failures)",
            report.failure_rate, report.total_failures
        ),
        String::new(),
    ]);
    for (level, share) in &report.criticality_distribution {
        table.add_row(vec![
            format!("Criticality: {}", level),
            format_percentage(*share),
            String::new(),
        ]);
    }

    table
}
