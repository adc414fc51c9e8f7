//! Resolve a single name and print what the batch would report for it.
//!
//! ```
//! cargo run --bin lookup_profile -- "John Malkovich" --company "Malkovich Enterprises"
//! cargo run --bin lookup_profile -- "Jane Doe" --language English --profiles data/profiles.json
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use profile_finder::profile::{
    ProfileMatcher, ResolutionOutcome, ResultRecord, StaticProfileSource,
};
use profile_finder::query::build_search_query;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(author, version, about = "Look up a single person in the reference profiles")]
struct Cli {
    /// Person's full name
    name: String,

    /// Company used to disambiguate same-name profiles
    #[arg(short, long)]
    company: Option<String>,

    /// Preferred profile language
    #[arg(short, long)]
    language: Option<String>,

    /// JSON file with reference profiles (built-in sample data if omitted)
    #[arg(short, long)]
    profiles: Option<PathBuf>,

    /// Show matcher debug output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::INFO })
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let source = match &cli.profiles {
        Some(path) => StaticProfileSource::from_json_file(path)
            .with_context(|| format!("Failed to load profiles from {}", path.display()))?,
        None => StaticProfileSource::builtin(),
    };
    let matcher = ProfileMatcher::new(Arc::new(source));

    let company = cli.company.as_deref();
    let language = cli.language.as_deref().filter(|l| !l.trim().is_empty());

    let search_query = build_search_query(&cli.name, company, None, language);
    let outcome = matcher.resolve(&cli.name, company, language);

    println!("Query:  {}", search_query);
    println!("Status: {}", outcome.status());
    if let ResolutionOutcome::Ambiguous { candidates, .. } = &outcome {
        println!("Tied:   {} profiles, reporting the first", candidates);
    }

    let record = ResultRecord::from_outcome(&cli.name, search_query, &outcome, language);
    println!("{}", serde_json::to_string_pretty(&record)?);

    Ok(())
}
