//! Smaka på Kina: one combined entry per weekday listing that day's
//! numbered dishes.
//!
//! Two page shapes are supported. The legacy embedded menu exposes titles,
//! descriptions and prices as parallel `data-hook` elements. The current
//! page only has the dishes in running text, with prices hidden in embedded
//! JSON.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use lunch_core::{Day, MenuEntry, SourceId};
use regex::Regex;

use super::MenuParser;
use crate::price::parse_price;
use crate::segment::{collapse_whitespace, HtmlDocument, MarkupNode};

const LEGACY_MARKER: &str = r#"data-hook="wixrest-menus-item-title""#;
const MAX_DISHES_PER_DAY: usize = 6;
const MIN_EXPECTED_DISHES: usize = 4;
const MAX_PREFACE_CHARS: usize = 80;

static WEEKDAY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(måndag|tisdag|onsdag|torsdag|fredag)").expect("valid regex")
});
static LEADING_WEEKDAY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(?:måndag|tisdag|onsdag|torsdag|fredag)\P{L}*").expect("valid regex")
});
static ENUM_MARKER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\d+\.").expect("valid regex"));
static SPILLOVER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)DUMPLINGS|JIAO\s+ZI").expect("valid regex"));
static CJK_PAREN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\([^)]*\p{Han}[^)]*\)").expect("valid regex"));
static DATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b\d{1,2}\s+(?:jan|feb|mar|apr|maj|jun|jul|aug|sep|okt|nov|dec)\b")
        .expect("valid regex")
});
static CURRENCY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b\d+\s*(?:kr|sek)\b").expect("valid regex"));
static JSON_PRICE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""name":"([^"]+)"[^}]*"priceInfo":\{"price":"(\d+)""#).expect("valid regex")
});

fn is_edge_punctuation(c: char) -> bool {
    c.is_whitespace() || matches!(c, ',' | '.' | ';' | ':' | '-')
}

pub struct SmakapakinaParser;

impl MenuParser for SmakapakinaParser {
    fn source(&self) -> SourceId {
        SourceId::Smakapakina
    }

    fn allowed_days(&self) -> &'static [Day] {
        &Day::SWEDISH_WORKDAYS
    }

    fn parse(&self, document: &str) -> Vec<MenuEntry> {
        let mut entries = if document.contains(LEGACY_MARKER) {
            parse_legacy(document)
        } else {
            parse_modern(document)
        };
        entries.sort_by_key(|e| e.day.sort_key());
        entries
    }
}

fn weekday_in(text: &str) -> Option<Day> {
    WEEKDAY_RE
        .find(text)
        .and_then(|m| Day::from_swedish_name(m.as_str()))
}

fn clean_dish(raw: &str) -> String {
    let text = CJK_PAREN_RE.replace_all(raw, "");
    let text = DATE_RE.replace_all(&text, "");
    let text = CURRENCY_RE.replace_all(&text, "");
    collapse_whitespace(text.trim_matches(is_edge_punctuation))
}

fn join_dishes(dishes: &[String]) -> String {
    dishes
        .join(", ")
        .trim_end_matches(is_edge_punctuation)
        .to_string()
}

/// Text following each `N.` marker, up to the next marker.
fn enumerated_chunks(text: &str) -> Vec<&str> {
    let markers: Vec<_> = ENUM_MARKER_RE.find_iter(text).collect();
    markers
        .iter()
        .enumerate()
        .map(|(i, m)| {
            let end = markers.get(i + 1).map_or(text.len(), regex::Match::start);
            &text[m.end()..end]
        })
        .collect()
}

fn push_unique(dishes: &mut Vec<String>, dish: String) {
    if !dish.is_empty() && !dishes.iter().any(|d| d.to_lowercase() == dish.to_lowercase()) {
        dishes.push(dish);
    }
}

// Legacy embedded menu

fn hook_texts<N: MarkupNode>(root: &N, hook: &str) -> Vec<String> {
    root.select(&format!(r#"[data-hook="{hook}"]"#))
        .iter()
        .map(|el| collapse_whitespace(&el.text()))
        .collect()
}

fn parse_legacy(html: &str) -> Vec<MenuEntry> {
    let doc = HtmlDocument::parse(html);
    let root = doc.root();
    let titles = hook_texts(&root, "wixrest-menus-item-title");
    let descriptions = hook_texts(&root, "wixrest-menus-item-description");
    let prices = hook_texts(&root, "wixrest-menus-item-price");

    titles
        .iter()
        .enumerate()
        .filter_map(|(i, title)| {
            let day = weekday_in(title)?;
            let description = descriptions.get(i).map_or("", String::as_str);
            let mut dishes = Vec::new();
            for chunk in enumerated_chunks(description) {
                push_unique(&mut dishes, clean_dish(chunk));
            }
            if dishes.is_empty() {
                return None;
            }
            let price = prices.get(i).and_then(|p| parse_price(p));
            Some(MenuEntry::new(join_dishes(&dishes), price, day))
        })
        .collect()
}

// Current page layout

/// Day prices from embedded JSON records such as
/// `"name":"Måndag, 12 Okt",...,"priceInfo":{"price":"100"`.
fn embedded_prices(html: &str) -> HashMap<Day, f64> {
    JSON_PRICE_RE
        .captures_iter(html)
        .filter_map(|caps| {
            let day = weekday_in(&caps[1])?;
            let price = parse_price(&caps[2])?;
            Some((day, price))
        })
        .collect()
}

/// One block per first occurrence of each weekday name, running to the
/// next weekday name and cut at the dumpling section.
fn day_blocks(text: &str) -> Vec<(Day, &str)> {
    let found: Vec<_> = WEEKDAY_RE.find_iter(text).collect();
    let mut seen = HashSet::new();
    let mut blocks = Vec::new();

    for (i, m) in found.iter().enumerate() {
        let Some(day) = Day::from_swedish_name(m.as_str()) else {
            continue;
        };
        if !seen.insert(day) {
            continue;
        }
        let end = found.get(i + 1).map_or(text.len(), regex::Match::start);
        let mut block = &text[m.start()..end];
        if let Some(spill) = SPILLOVER_RE.find(block) {
            if spill.start() > 0 {
                block = &block[..spill.start()];
            }
        }
        blocks.push((day, block));
    }

    blocks
}

fn extract_dishes(block: &str) -> Vec<String> {
    let mut dishes = Vec::new();
    for chunk in enumerated_chunks(block) {
        let chunk = SPILLOVER_RE
            .find(chunk)
            .map_or(chunk, |spill| &chunk[..spill.start()]);
        push_unique(&mut dishes, clean_dish(chunk));
        if dishes.len() >= MAX_DISHES_PER_DAY {
            break;
        }
    }

    if !dishes.is_empty() && dishes.len() < MIN_EXPECTED_DISHES {
        if let Some(preface) = leading_dish(block) {
            if !dishes.iter().any(|d| d.to_lowercase() == preface.to_lowercase()) {
                dishes.insert(0, preface);
            }
        }
    }

    dishes.truncate(MAX_DISHES_PER_DAY);
    dishes
}

/// An un-numbered dish written between the day heading and `1.`.
fn leading_dish(block: &str) -> Option<String> {
    let first = ENUM_MARKER_RE.find_iter(block).find(|m| m.as_str() == "1.")?;
    let before = DATE_RE.replace_all(&block[..first.start()], "");
    let before = LEADING_WEEKDAY_RE.replace(&before, "");
    let preface = collapse_whitespace(&before);

    let chars = preface.chars().count();
    if chars <= 3 || chars >= MAX_PREFACE_CHARS || preface.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }
    let cleaned = clean_dish(&preface);
    (!cleaned.is_empty()).then_some(cleaned)
}

fn parse_modern(html: &str) -> Vec<MenuEntry> {
    let text = HtmlDocument::parse(html).visible_text();
    let prices = embedded_prices(html);

    day_blocks(&text)
        .into_iter()
        .filter_map(|(day, block)| {
            let dishes = extract_dishes(block);
            if dishes.is_empty() {
                return None;
            }
            Some(MenuEntry::new(
                join_dishes(&dishes),
                prices.get(&day).copied(),
                day,
            ))
        })
        .collect()
}

#[cfg(test)]
#[path = "smakapakina_test.rs"]
mod tests;
