//! # Tincture CLI
//!
//! Command-line interface for report style resolution and chart building.
//!
//! ## Usage
//!
//! ```bash
//! # Resolve a persisted style (any historical shape) against the defaults
//! tincture resolve style.json
//!
//! # Build chart datasets from report rows
//! tincture chart --style style.json --data rows.json
//!
//! # Same rows as a pie chart
//! tincture chart --data rows.json --kind pie
//!
//! # Run the HTTP API
//! tincture serve --listen 0.0.0.0:8080 --backend http://localhost:5000/api
//! ```
//!
//! Logging follows `RUST_LOG` (default `info`).

use clap::{Parser, Subcommand};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use tincture::{
    TinctureError,
    chart::{BuildOptions, ChartKind, build_chart, series_of},
    server::{ServerConfig, serve},
    style,
};

/// Tincture - Report style and chart dataset utility
#[derive(Parser, Debug)]
#[command(name = "tincture")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API
    Serve {
        /// Address to listen on
        #[arg(long, default_value = "0.0.0.0:8080")]
        listen: String,

        /// Report backend root URL used for previews
        #[arg(long, default_value = "http://localhost:5000/api")]
        backend: String,
    },

    /// Print the resolved style for a raw style file
    Resolve {
        /// JSON file holding the persisted or partial style
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Print the chart built from a data file
    Chart {
        /// Style file (defaults when omitted)
        #[arg(long, value_name = "FILE")]
        style: Option<PathBuf>,

        /// JSON array of points or series
        #[arg(long, value_name = "FILE")]
        data: PathBuf,

        /// Chart kind overriding the style (bar, line, scatter, pie, doughnut, bubble)
        #[arg(long)]
        kind: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn read_json(path: &Path) -> Result<Value, TinctureError> {
    let text = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

fn parse_kind(kind: &str) -> Result<ChartKind, TinctureError> {
    serde_json::from_value(Value::String(kind.to_ascii_lowercase()))
        .map_err(|_| TinctureError::InvalidRequest(format!("Unknown chart kind '{}'", kind)))
}

async fn run() -> Result<(), TinctureError> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { listen, backend } => {
            serve(ServerConfig {
                listen_addr: listen,
                backend_url: backend,
            })
            .await
        }
        Commands::Resolve { file } => {
            let raw = read_json(&file)?;
            let resolved = style::resolve(Some(&raw));
            println!("{}", serde_json::to_string_pretty(&resolved)?);
            Ok(())
        }
        Commands::Chart {
            style: style_file,
            data,
            kind,
        } => {
            let raw_style = match style_file {
                Some(path) => Some(read_json(&path)?),
                None => None,
            };
            let resolved = style::resolve(raw_style.as_ref());

            let data = read_json(&data)?;
            let rows = data.as_array().ok_or_else(|| {
                TinctureError::InvalidRequest("data file must hold a JSON array".to_string())
            })?;

            let mut options = BuildOptions::from_style(&resolved.chart, series_of(rows).len());
            if let Some(kind) = kind {
                options.kind = parse_kind(&kind)?;
            }

            let view = build_chart(rows, &options);
            println!("{}", serde_json::to_string_pretty(&view)?);
            Ok(())
        }
    }
}
