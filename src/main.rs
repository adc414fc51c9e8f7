//! # Profile Finder
//!
//! Reads a list of people from a names file, resolves each one against the
//! reference profile collection and writes a JSON report with one record per
//! person.
//!
//! ## Usage
//!
//! ```
//! # Use paths and options from config/settings.json
//! cargo run --bin profile_finder
//!
//! # Override input, output, preferred language and worker count
//! cargo run --bin profile_finder -- -i data/names.txt -o out/results.json -l English -w 8
//! ```
//!
//! ## Input format
//!
//! One person per line, `#` comments and blank lines ignored:
//! `Name`, `Name|Company` or `Name|Company|Position`.

use anyhow::{Context, Result};
use clap::Parser;
use profile_finder::app;
use profile_finder::logging::configure_logging;
use profile_finder::settings::{Overrides, Settings, DEFAULT_SETTINGS_PATH};
use std::path::PathBuf;
use tracing::{error, info};

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Mass profile finder: resolve a list of names against reference profile data"
)]
struct Cli {
    /// Path to the input names file (default from settings)
    #[arg(short, long = "input")]
    input_file: Option<PathBuf>,

    /// Path to the output JSON file (default from settings)
    #[arg(short, long = "output")]
    output_file: Option<PathBuf>,

    /// Preferred profile language (overrides settings)
    #[arg(short, long)]
    language: Option<String>,

    /// Maximum number of concurrent workers (overrides settings)
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
    workers: Option<u32>,

    /// Settings file location
    #[arg(short, long, default_value = DEFAULT_SETTINGS_PATH)]
    settings: PathBuf,
}

impl Cli {
    fn overrides(&self) -> Overrides {
        Overrides {
            input_file: self.input_file.clone(),
            output_file: self.output_file.clone(),
            language: self.language.clone(),
            workers: self.workers.map(|w| w as usize),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let settings = Settings::load(&cli.settings).context("Failed to load configuration")?;
    let config = settings
        .resolve(&cli.overrides())
        .context("Invalid configuration")?;

    let _guard = configure_logging(&config.log_path).context("Failed to configure logging")?;
    info!("Starting profile finder");

    if let Err(err) = app::run(&config).await {
        error!("Run aborted: {}", err);
        return Err(err).context("Profile lookup run failed");
    }

    info!("Run completed successfully");
    Ok(())
}
