//! marquee command-line entry point.
//!
//! Extracts listing records from a local file, stdin, or a page on the
//! configured source site and prints them as JSON.

use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use marquee_client::{ExtractConfig, Extractor, ListingExtractor, SourceFetcher, scrape_detail};
use marquee_core::{AppConfig, ContentRecord};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "marquee", version, about = "Extract download listings from movie/series pages")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract a record from an HTML file, or stdin when no path (or `-`) is given
    Extract {
        path: Option<PathBuf>,
    },
    /// Fetch a listing page by full URL or post id and extract it
    Detail {
        url: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = AppConfig::load()?;
    let extractor = ListingExtractor::new(ExtractConfig::from(&config));

    let record = match cli.command {
        Command::Extract { path } => {
            let html = read_input(path.as_ref())?;
            extractor.extract(&html)?
        }
        Command::Detail { url } => {
            tracing::debug!(%url, "resolving listing page");
            let fetcher = SourceFetcher::from_config(&config)?;
            scrape_detail(&fetcher, &extractor, &url).await?
        }
    };

    tracing::info!(
        title = %record.title,
        content_type = %record.content_type,
        groups = record.servers.len(),
        links = record.link_count(),
        "extracted record"
    );
    print_record(&record)
}

fn read_input(path: Option<&PathBuf>) -> Result<String> {
    match path {
        Some(p) if p.as_os_str() != "-" => {
            tracing::debug!(path = %p.display(), "reading markup from file");
            std::fs::read_to_string(p).with_context(|| format!("failed to read {}", p.display()))
        }
        _ => {
            tracing::debug!("reading markup from stdin");
            let mut html = String::new();
            std::io::stdin().read_to_string(&mut html).context("failed to read stdin")?;
            Ok(html)
        }
    }
}

fn print_record(record: &ContentRecord) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(record)?);
    Ok(())
}
