use std::fmt::Write as _;

use lunch_core::{MenuEntry, SourceConfig};
use lunch_scraper::format_price;

const DAY_WIDTH: usize = 18;
const PRICE_WIDTH: usize = 9;

/// One line per entry: day, price, name.
pub(crate) fn render_table(entries: &[MenuEntry]) -> String {
    let mut out = String::new();
    for entry in entries {
        let _ = writeln!(
            out,
            "{:<DAY_WIDTH$} {:>PRICE_WIDTH$}  {}",
            entry.day.label(),
            format_price(entry.price),
            entry.name
        );
    }
    let _ = writeln!(out, "{} entries", entries.len());
    out
}

pub(crate) fn render_sources(sources: &[SourceConfig]) -> String {
    let mut out = String::new();
    for source in sources {
        let state = if source.enabled { "enabled" } else { "disabled" };
        let _ = writeln!(
            out,
            "{:<12} {:<9} {}  {}",
            source.id.as_str(),
            state,
            source.name,
            source.url
        );
    }
    out
}
