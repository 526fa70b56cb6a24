//! Food Hall (Nordrest): two street-food counters whose week-long lunch
//! menus sit in Elementor sections.

use std::sync::LazyLock;

use lunch_core::{Day, MenuEntry, SourceId};
use regex::Regex;

use super::MenuParser;
use crate::segment::{collapse_whitespace, HtmlDocument, MarkupNode};

const SECTIONS: &[&str] = &["Bao Bao", "Wurst Case Scenario"];
const DEFAULT_PRICE: f64 = 105.0;

static SEK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(\d+)\s*SEK").expect("valid regex"));

pub struct FoodHallParser;

impl MenuParser for FoodHallParser {
    fn source(&self) -> SourceId {
        SourceId::FoodHall
    }

    fn allowed_days(&self) -> &'static [Day] {
        &[Day::WholeWeek]
    }

    fn parse(&self, document: &str) -> Vec<MenuEntry> {
        let doc = HtmlDocument::parse(document);
        let root = doc.root();
        let headings = root.select("h2");

        let mut entries = Vec::new();
        for &section in SECTIONS {
            let Some(heading) = headings.iter().find(|h| h.text().contains(section)) else {
                tracing::debug!(section, "foodhall: section heading not found");
                continue;
            };
            match menu_container(heading) {
                Some(container) => entries.extend(
                    container
                        .select(".axis-menu__item")
                        .iter()
                        .filter_map(|item| parse_item(item, section)),
                ),
                None => tracing::debug!(section, "foodhall: no lunch menu container"),
            }
        }
        entries
    }
}

/// Climbs `.elementor-element` ancestors from `heading` until one holds
/// both a "Lunch menu" heading and menu items.
fn menu_container<N: MarkupNode>(heading: &N) -> Option<N> {
    let mut container = heading.closest(".elementor-element");
    while let Some(current) = container {
        let has_lunch_heading = current
            .select("h3")
            .iter()
            .any(|h| h.text().contains("Lunch menu"));
        if has_lunch_heading && !current.select(".axis-menu__item").is_empty() {
            return Some(current);
        }
        container = current
            .parent()
            .and_then(|parent| parent.closest(".elementor-element"));
    }
    None
}

fn first_text<N: MarkupNode>(item: &N, selector: &str) -> Option<String> {
    item.select(selector)
        .first()
        .map(|el| collapse_whitespace(&el.text()))
}

fn parse_item<N: MarkupNode>(item: &N, section: &str) -> Option<MenuEntry> {
    let dish = first_text(item, ".axis-menu__name").filter(|dish| !dish.is_empty())?;
    let description = first_text(item, ".axis-menu__desc").unwrap_or_default();
    let price = first_text(item, ".axis-menu__price")
        .and_then(|text| SEK_RE.captures(&text)?[1].parse::<f64>().ok())
        .unwrap_or(DEFAULT_PRICE);

    let full = if description.is_empty() {
        dish
    } else {
        format!("{dish} – {description}")
    };
    Some(MenuEntry::new(
        format!("{section}: {full}"),
        Some(price),
        Day::WholeWeek,
    ))
}
