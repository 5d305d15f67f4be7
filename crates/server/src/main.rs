//! # planboard-server
//!
//! HTTP API serving the planning dataset (stores, SKUs, weekly planning
//! facts) to the browser frontend: editable master-data grids, the dense
//! weekly pivot, and the per-store gross-margin chart.
//!
//! The workbook is loaded once at startup into a single shared dataset;
//! `POST /api/reload` re-fetches it on demand.

mod app;
mod error;

use anyhow::{Context, Result};
use app::{create_router, AppState};
use clap::Parser;
use planboard_workbook::WorkbookSource;
use tracing_subscriber::EnvFilter;

/// planboard - planning dataset viewer/editor backend
#[derive(Parser)]
#[command(name = "planboard-server")]
#[command(author, version, about = "HTTP API for the planning dataset", long_about = None)]
struct Cli {
    /// Workbook location: a file path or an http(s) URL
    #[arg(value_name = "WORKBOOK")]
    workbook: String,

    /// Address to bind
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Port to listen on
    #[arg(long, default_value_t = 3000)]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let source = WorkbookSource::parse(&cli.workbook);
    let dataset = planboard_workbook::load(&source)
        .await
        .with_context(|| format!("failed to load workbook from {source}"))?;

    let app = create_router(AppState::new(dataset, Some(source)));

    let addr = format!("{}:{}", cli.host, cli.port);
    tracing::info!(%addr, "planboard-server listening");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    axum::serve(listener, app).await?;

    Ok(())
}
