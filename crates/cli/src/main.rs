//! # planboard-cli
//!
//! Command-line inspection and export for the planning dataset: record
//! counts, the dense weekly pivot, per-store margin series, chart HTML,
//! and workbook export.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use planboard_aggregate::{pivot, week_labels, weekly_margin, MarginBand, PivotRow, WeeklyMargin};
use planboard_viz::margin_chart;
use planboard_workbook::WorkbookSource;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// planboard - planning dataset tooling
#[derive(Parser)]
#[command(name = "planboard")]
#[command(author, version, about = "Inspect and export the planning dataset", long_about = None)]
struct Cli {
    /// Workbook location: a file path or an http(s) URL
    #[arg(value_name = "WORKBOOK")]
    workbook: String,

    #[command(subcommand)]
    command: Command,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Show sheet and record counts
    Inspect,
    /// Print the dense weekly planning pivot
    Pivot {
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },
    /// Print the weekly gross-margin series for one store
    Margin {
        /// Store id
        #[arg(long)]
        store: String,
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },
    /// Write the gross-margin chart for one store as standalone HTML
    Chart {
        /// Store id
        #[arg(long)]
        store: String,
        /// Output HTML file
        #[arg(long)]
        out: PathBuf,
    },
    /// Rebuild the workbook and write it to a new xlsx file
    Export {
        /// Output xlsx file
        #[arg(long)]
        out: PathBuf,
    },
}

/// Output format for results.
#[derive(Clone, Copy, Default, clap::ValueEnum)]
enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Pretty table output (default)
    #[default]
    Table,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .init();
    }

    let source = WorkbookSource::parse(&cli.workbook);
    let dataset = planboard_workbook::load(&source)
        .await
        .with_context(|| format!("failed to load workbook from {source}"))?;

    match cli.command {
        Command::Inspect => {
            println!("{}", "Workbook".bold());
            println!("  stores:   {}", dataset.stores.len());
            println!("  skus:     {}", dataset.skus.len());
            println!("  facts:    {}", dataset.facts.len());
            println!("  weeks:    {}", week_labels(&dataset.facts).len());
        }
        Command::Pivot { format } => {
            let rows = pivot(&dataset.facts, &dataset.stores, &dataset.skus);
            print_pivot(&rows, format)?;
        }
        Command::Margin { store, format } => {
            if dataset.store(&store).is_none() {
                anyhow::bail!("store not found: {store}");
            }
            let series = weekly_margin(&dataset.facts, &dataset.skus, &store);
            print_margin(&series, format)?;
        }
        Command::Chart { store, out } => {
            let record = dataset
                .store(&store)
                .with_context(|| format!("store not found: {store}"))?;
            let series = weekly_margin(&dataset.facts, &dataset.skus, &store);
            let html = margin_chart(&record.label, &series).to_html();
            std::fs::write(&out, html)
                .with_context(|| format!("failed to write {}", out.display()))?;
            println!("chart written to {}", out.display());
        }
        Command::Export { out } => {
            planboard_workbook::save_workbook(&dataset, &out)
                .with_context(|| format!("failed to write {}", out.display()))?;
            println!("workbook written to {}", out.display());
        }
    }

    Ok(())
}

fn print_pivot(rows: &[PivotRow], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(rows)?);
        }
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(std::io::stdout());
            writer.write_record([
                "Store",
                "SKU",
                "Week",
                "SalesUnits",
                "SalesDollars",
                "GMDollars",
                "GMPercent",
            ])?;
            for row in rows {
                for (week, cell) in &row.weeks {
                    writer.write_record([
                        row.store.clone(),
                        row.sku.clone(),
                        week.clone(),
                        cell.sales_units.to_string(),
                        format!("{:.2}", cell.sales_dollars),
                        format!("{:.2}", cell.gm_dollars),
                        format!("{:.2}", cell.gm_percent),
                    ])?;
                }
            }
            writer.flush()?;
        }
        OutputFormat::Table => {
            println!(
                "{:<28} {:<32} {:>5} {:>10} {:>12} {:>12} {:>8}",
                "Store".bold(),
                "SKU".bold(),
                "Week".bold(),
                "Units".bold(),
                "Sales $".bold(),
                "GM $".bold(),
                "GM %".bold()
            );
            for row in rows {
                for (week, cell) in &row.weeks {
                    println!(
                        "{:<28} {:<32} {:>5} {:>10} {:>12.2} {:>12.2} {:>8}",
                        truncate(&row.store, 28),
                        truncate(&row.sku, 32),
                        week,
                        cell.sales_units,
                        cell.sales_dollars,
                        cell.gm_dollars,
                        colorize_percent(cell.gm_percent)
                    );
                }
            }
        }
    }
    Ok(())
}

fn print_margin(series: &[WeeklyMargin], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(series)?);
        }
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(std::io::stdout());
            writer.write_record(["Week", "GMDollars", "GMPercent"])?;
            for point in series {
                writer.write_record([
                    point.week.clone(),
                    format!("{:.2}", point.gm_dollars),
                    format!("{:.2}", point.gm_percent),
                ])?;
            }
            writer.flush()?;
        }
        OutputFormat::Table => {
            println!(
                "{:>5} {:>12} {:>8}",
                "Week".bold(),
                "GM $".bold(),
                "GM %".bold()
            );
            for point in series {
                println!(
                    "{:>5} {:>12.2} {:>8}",
                    point.week,
                    point.gm_dollars,
                    colorize_percent(point.gm_percent)
                );
            }
        }
    }
    Ok(())
}

/// Color a GM percentage by its severity band.
fn colorize_percent(percent: f64) -> colored::ColoredString {
    let text = format!("{percent:.2}");
    match MarginBand::classify(percent) {
        MarginBand::Good => text.green(),
        MarginBand::Fair => text.yellow(),
        MarginBand::Warn => text.truecolor(251, 146, 60),
        MarginBand::Poor => text.red(),
    }
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max.saturating_sub(1)).collect();
        format!("{cut}…")
    }
}
