//! Bricks Eatery: `.menu-block` containers under weekday headings, each
//! holding `.menu-item` rows. Older pages without menu blocks are plain
//! `category / price / description` text.

use lunch_core::{Day, MenuEntry, SourceId};

use super::line_scan::{scan, CategoryRule, EntryLayout, LineScanProfile};
use super::{MenuParser, SWEDISH_MARKERS};
use crate::price::parse_price;
use crate::segment::{collapse_whitespace, HtmlDocument, MarkupNode};

const FALLBACK_PROFILE: LineScanProfile = LineScanProfile {
    day_markers: SWEDISH_MARKERS,
    layout: EntryLayout::CategoryPriceDescription {
        categories: CategoryRule::AnyLine,
    },
    price_markers: &["kr"],
    specials: &[],
    description_denylist: &[],
    min_description_chars: 20,
};

pub struct BricksParser;

impl MenuParser for BricksParser {
    fn source(&self) -> SourceId {
        SourceId::Bricks
    }

    fn allowed_days(&self) -> &'static [Day] {
        &Day::SWEDISH_WORKDAYS
    }

    fn parse(&self, document: &str) -> Vec<MenuEntry> {
        let doc = HtmlDocument::parse(document);
        let root = doc.root();
        if root.select(".menu-block").is_empty() {
            return scan(&FALLBACK_PROFILE, &doc.lines());
        }
        parse_menu_blocks(&root)
    }
}

fn parse_menu_blocks<N: MarkupNode>(root: &N) -> Vec<MenuEntry> {
    let mut entries = Vec::new();
    let mut current_day: Option<Day> = None;

    for node in root.select("h2, h3, h4, .menu-block") {
        if node.matches(".menu-block") {
            let Some(day) = current_day else {
                tracing::debug!("bricks: menu block before any day heading");
                continue;
            };
            entries.extend(
                node.select(".menu-item")
                    .iter()
                    .filter_map(|item| parse_item(item, day)),
            );
        } else {
            current_day = heading_day(&node.text());
        }
    }

    entries
}

/// Weekday named by the first word of a heading (`"Tisdag 14/10"`).
/// Any other heading ends the current day.
fn heading_day(heading: &str) -> Option<Day> {
    let first = heading.split_whitespace().next()?;
    Day::from_swedish_name(first.trim_end_matches(|c: char| !c.is_alphabetic()))
}

fn child_text<N: MarkupNode>(item: &N, selector: &str) -> Option<String> {
    let text = collapse_whitespace(&item.select(selector).first()?.text());
    (!text.is_empty()).then_some(text)
}

fn parse_item<N: MarkupNode>(item: &N, day: Day) -> Option<MenuEntry> {
    let category = child_text(item, ".menu-item__category")?;
    let description = child_text(item, ".menu-item__description")?;
    let price = parse_price(&child_text(item, ".menu-item__price")?)?;
    Some(MenuEntry::new(
        format!("{category}: {description}"),
        Some(price),
        day,
    ))
}
