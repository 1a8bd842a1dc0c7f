use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use csvchart::{run_viewer, ViewerConfig};

#[derive(Parser)]
#[command(author, version, about = "Chart the columns of CSV files", long_about = None)]
struct Cli {
    /// CSV files to open at startup
    #[arg(value_name = "FILES")]
    files: Vec<PathBuf>,

    /// YAML config file (default: ~/.csvchart/config.yaml when present)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Cli::parse();

    let config = match ViewerConfig::load(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!(error = %e, "ignoring config, using defaults");
            ViewerConfig::default()
        }
    };

    run_viewer(config, args.config, args.files)
}
