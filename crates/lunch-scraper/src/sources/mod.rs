//! Per-restaurant menu parsers and the fetch-then-parse entry point.

mod bricks;
mod eatery;
mod edison;
mod foodhall;
mod grenden;
mod kantin;
pub(crate) mod line_scan;
mod smakapakina;

use std::sync::Arc;
use std::time::Duration;

use chrono::Weekday;
use lunch_core::{Day, MenuEntry, SourceConfig, SourceId};

use crate::client::MenuClient;
use crate::error::ScraperError;
use crate::pdf::{extract_text_blocking, PdfTextExtractor};
use crate::segment::collapse_whitespace;

pub use bricks::BricksParser;
pub use eatery::{find_pdf_link, EateryParser, EATERY_LUNCH_PRICE};
pub use edison::EdisonParser;
pub use foodhall::FoodHallParser;
pub use grenden::GrendenParser;
pub use kantin::KantinParser;
pub use smakapakina::SmakapakinaParser;

/// Swedish weekday headings emitted as Swedish day labels.
pub(crate) const SWEDISH_MARKERS: &[(&str, Day)] = &[
    ("Måndag", Day::Swedish(Weekday::Mon)),
    ("Tisdag", Day::Swedish(Weekday::Tue)),
    ("Onsdag", Day::Swedish(Weekday::Wed)),
    ("Torsdag", Day::Swedish(Weekday::Thu)),
    ("Fredag", Day::Swedish(Weekday::Fri)),
];

/// Converts one restaurant's document into menu entries.
///
/// Parsing is pure: the same document always yields the same entries, and
/// a document that does not match the expected layout yields fewer (or
/// zero) entries rather than an error.
pub trait MenuParser: Send + Sync {
    fn source(&self) -> SourceId;

    /// Day labels this source may emit.
    fn allowed_days(&self) -> &'static [Day];

    fn parse(&self, document: &str) -> Vec<MenuEntry>;
}

#[must_use]
pub fn parser_for(source: SourceId) -> &'static dyn MenuParser {
    match source {
        SourceId::Edison => &EdisonParser,
        SourceId::Bricks => &BricksParser,
        SourceId::Kantin => &KantinParser,
        SourceId::Smakapakina => &SmakapakinaParser,
        SourceId::Grenden => &GrendenParser,
        SourceId::Eatery => &EateryParser,
        SourceId::FoodHall => &FoodHallParser,
    }
}

fn is_stray_punctuation(c: char) -> bool {
    c.is_whitespace()
        || matches!(
            c,
            ',' | ';' | ':' | '.' | '-' | '–' | '—' | '•' | '·' | '|' | '*'
        )
}

fn normalize_name(name: &str) -> String {
    collapse_whitespace(name.trim_matches(is_stray_punctuation))
}

/// Normalizes names and drops entries that break the menu entry rules:
/// empty name, a day the source never emits, or a negative or non-finite
/// price.
#[must_use]
pub fn finalize(parser: &dyn MenuParser, entries: Vec<MenuEntry>) -> Vec<MenuEntry> {
    let allowed = parser.allowed_days();
    let before = entries.len();

    let kept: Vec<MenuEntry> = entries
        .into_iter()
        .filter_map(|mut entry| {
            entry.name = normalize_name(&entry.name);
            let price_ok = !matches!(entry.price, Some(p) if !p.is_finite() || p < 0.0);
            (!entry.name.is_empty() && allowed.contains(&entry.day) && price_ok).then_some(entry)
        })
        .collect();

    if kept.len() < before {
        tracing::debug!(
            source = %parser.source(),
            dropped = before - kept.len(),
            "dropped invalid menu entries"
        );
    }
    kept
}

/// Parses `document` with the source's parser and applies [`finalize`].
#[must_use]
pub fn parse_document(source: SourceId, document: &str) -> Vec<MenuEntry> {
    let parser = parser_for(source);
    finalize(parser, parser.parse(document))
}

/// Fetches and parses one source.
///
/// Eatery goes through its landing page to a PDF, which is downloaded with
/// `pdf_timeout` and converted to text on the blocking pool. Every other
/// source is a single HTML page.
///
/// # Errors
///
/// Returns [`ScraperError`] for fetch, link resolution or PDF extraction
/// failures. Parsing itself never fails.
pub async fn scrape(
    client: &MenuClient,
    pdf: &Arc<dyn PdfTextExtractor>,
    pdf_timeout: Duration,
    source: &SourceConfig,
) -> Result<Vec<MenuEntry>, ScraperError> {
    let timeout = source.timeout_secs.map(Duration::from_secs);

    let document = match source.id {
        SourceId::Eatery => {
            let landing = client.fetch_html(&source.url, timeout).await?;
            let pdf_url = find_pdf_link(&landing, &source.url)?;
            tracing::debug!(source = %source.id, pdf_url = %pdf_url, "found lunch menu PDF");
            let bytes = client.fetch_bytes(&pdf_url, Some(pdf_timeout)).await?;
            extract_text_blocking(Arc::clone(pdf), bytes).await?
        }
        _ => client.fetch_html(&source.url, timeout).await?,
    };

    let entries = parse_document(source.id, &document);
    tracing::info!(source = %source.id, count = entries.len(), "parsed menu");
    Ok(entries)
}

/// [`scrape`], with any failure logged and turned into an empty list.
pub async fn scrape_or_empty(
    client: &MenuClient,
    pdf: &Arc<dyn PdfTextExtractor>,
    pdf_timeout: Duration,
    source: &SourceConfig,
) -> Vec<MenuEntry> {
    match scrape(client, pdf, pdf_timeout, source).await {
        Ok(entries) => entries,
        Err(e) => {
            tracing::error!(source = %source.id, url = %source.url, error = %e, "scrape failed");
            Vec::new()
        }
    }
}
