use std::io;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use log::info;

use price_search::config::{Config, load_config};
use price_search::{Mode, Orchestrator};

#[derive(Parser, Debug)]
#[command(name = "price-search")]
#[command(about = "Search price records loaded from a CSV file or URL", long_about = None)]
struct Args {
    /// CSV file or http(s) URL to load (sample mode falls back to the configured sample)
    #[arg(value_name = "SOURCE")]
    source: Option<String>,

    /// Ingestion mode; overrides the config file
    #[arg(long, value_enum)]
    mode: Option<Mode>,

    /// TOML config file
    #[arg(long, short = 'c', value_name = "FILE")]
    config: Option<PathBuf>,

    /// Search once for this item text and exit
    #[arg(long, short = 'q')]
    query: Option<String>,

    /// List item suggestions for this prefix and exit
    #[arg(long, short = 's')]
    suggest: Option<String>,

    /// Print search results as CSV
    #[arg(long)]
    csv: bool,
}

fn main() {
    let args = Args::parse();
    // Initialize logger (respect RUST_LOG env var if set)
    env_logger::init();

    if let Err(e) = run(args) {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => Config::default(),
    };
    let mode = args.mode.unwrap_or(config.ingest.mode);
    info!("starting price search in {:?} mode", mode);

    let mut orchestrator = Orchestrator::new(&config, mode);
    let source = match mode {
        Mode::Upload => args.source.clone(),
        Mode::Sample => args
            .source
            .clone()
            .or_else(|| Some(config.ingest.sample_source.clone())),
    };
    if let Some(location) = source {
        orchestrator.ingest(&location);
    }

    let stdout = io::stdout();
    if args.query.is_some() || args.suggest.is_some() {
        orchestrator.run_once(
            args.query.as_deref(),
            args.suggest.as_deref(),
            args.csv,
            &mut stdout.lock(),
        )
    } else {
        orchestrator.run_prompt(io::stdin().lock(), stdout.lock())
    }
}
