mod output;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use lunch_core::{MenuEntry, RestaurantMenus, SourceId};
use lunch_scraper::{pdf::extract_text_blocking, Aggregator, PdfExtractText};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "lunch-cli")]
#[command(about = "Scrape and debug lunch menu sources")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch live menus and print them as JSON.
    Scrape {
        /// Only scrape this source (runs it even if disabled in the sources file).
        #[arg(long)]
        source: Option<SourceId>,
    },
    /// Parse a saved HTML, text or PDF document with one source's parser.
    Parse {
        #[arg(long)]
        source: SourceId,
        #[arg(long)]
        file: PathBuf,
        /// Print a table instead of JSON.
        #[arg(long)]
        table: bool,
    },
    /// List the configured sources.
    Sources,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DocumentKind {
    Pdf,
    Text,
}

fn document_kind(path: &Path) -> DocumentKind {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("pdf") => DocumentKind::Pdf,
        _ => DocumentKind::Text,
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("warn"))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Scrape { source } => {
            let menus = scrape(source).await?;
            println!("{}", serde_json::to_string_pretty(&menus)?);
        }
        Commands::Parse {
            source,
            file,
            table,
        } => {
            let entries = parse_file(source, &file).await?;
            if table {
                print!("{}", output::render_table(&entries));
            } else {
                println!("{}", serde_json::to_string_pretty(&entries)?);
            }
        }
        Commands::Sources => {
            let config = lunch_core::load_app_config()?;
            let sources = lunch_core::load_sources_or_default(&config.sources_path)?;
            print!("{}", output::render_sources(&sources.sources));
        }
    }

    Ok(())
}

async fn scrape(only: Option<SourceId>) -> anyhow::Result<RestaurantMenus> {
    let config = lunch_core::load_app_config()?;
    let mut sources = lunch_core::load_sources_or_default(&config.sources_path)?.sources;

    if let Some(id) = only {
        sources.retain(|source| source.id == id);
        let Some(source) = sources.first_mut() else {
            anyhow::bail!(
                "source '{id}' is not configured in {}",
                config.sources_path.display()
            );
        };
        source.enabled = true;
    }

    let aggregator = Aggregator::from_config(&config, sources)?;
    Ok(aggregator.collect().await)
}

async fn parse_file(source: SourceId, path: &Path) -> anyhow::Result<Vec<MenuEntry>> {
    let document = match document_kind(path) {
        DocumentKind::Pdf => {
            let bytes = tokio::fs::read(path)
                .await
                .with_context(|| format!("failed to read {}", path.display()))?;
            extract_text_blocking(Arc::new(PdfExtractText), bytes).await?
        }
        DocumentKind::Text => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("failed to read {}", path.display()))?,
    };

    let entries = lunch_scraper::parse_document(source, &document);
    tracing::info!(source = %source, count = entries.len(), "parsed document");
    Ok(entries)
}
