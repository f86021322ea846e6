//! Progress Graph Command Line Interface
//!
//! Renders a workbook to DOT or to the JSON payload the front end reads.
//!
//! # Usage
//!
//! ```bash
//! # DOT for a workbook directory holding Node.csv and Edge.csv
//! progress-graph render --workbook ./workbooks/roadmap | dot -Tsvg > roadmap.svg
//!
//! # Full payload, data source taken from the config file / SPREADSHEET_ID
//! progress-graph --config progress-graph.yaml render --format json
//! ```

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use progress_graph::{load_graph, CsvWorkbook, GraphConfig, RowSource, SourceLocator};

#[derive(Parser)]
#[command(name = "progress-graph")]
#[command(version)]
#[command(about = "Render Node/Edge sheets as Graphviz DOT or a JSON graph payload")]
#[command(long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// YAML configuration file
    #[arg(long, short, global = true, env = "PROGRESS_GRAPH_CONFIG")]
    config: Option<PathBuf>,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// DOT text only
    Dot,
    /// Compact JSON payload
    Json,
    /// Indented JSON payload
    Pretty,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the graph
    Render {
        /// Workbook directory (overrides the configured data source)
        #[arg(short, long)]
        workbook: Option<PathBuf>,

        /// Output format
        #[arg(long, short = 'f', default_value = "dot", value_enum)]
        format: OutputFormat,
    },
}

// =============================================================================
// MAIN
// =============================================================================

fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "progress_graph=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => GraphConfig::from_file(path)
            .with_context(|| format!("Failed to load config file: {}", path.display()))?,
        None => GraphConfig::default(),
    }
    .apply_env();

    match cli.command {
        Commands::Render { workbook, format } => render(&config, workbook, format),
    }
}

fn render(config: &GraphConfig, workbook: Option<PathBuf>, format: OutputFormat) -> Result<()> {
    let bound = workbook.map(|dir| Arc::new(CsvWorkbook::open(dir)) as Arc<dyn RowSource>);
    let source = SourceLocator::new(config.workbook_root.clone())
        .resolve(bound, config)
        .context("Failed to locate a data source")?;

    let response = load_graph(source.as_ref(), config)
        .with_context(|| format!("Failed to read {}", source.describe()))?;

    match format {
        OutputFormat::Dot => print!("{}", response.graph_text),
        OutputFormat::Json => println!("{}", serde_json::to_string(&response)?),
        OutputFormat::Pretty => println!("{}", serde_json::to_string_pretty(&response)?),
    }
    Ok(())
}
