//! Grenden (Nordrest): accordion with one `.weekday-item` per day. Dishes
//! served on most days are collapsed into a single whole-week special.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use chrono::Weekday;
use lunch_core::{Day, MenuEntry, SourceId};
use regex::Regex;

use super::MenuParser;
use crate::segment::{collapse_whitespace, HtmlDocument, MarkupNode};

const DEFAULT_BASE_PRICE: f64 = 105.0;
const DEFAULT_SPECIAL_PRICE: f64 = 125.0;

static BASE_PRICE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)PRICE:\s*(\d+)\s*KR").expect("valid regex"));
static SPECIAL_PRICE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)grill\s*&\s*fusion\s*special\s*(\d+)\s*SEK").expect("valid regex")
});

const ALLOWED_DAYS: &[Day] = &[
    Day::Swedish(Weekday::Mon),
    Day::Swedish(Weekday::Tue),
    Day::Swedish(Weekday::Wed),
    Day::Swedish(Weekday::Thu),
    Day::Swedish(Weekday::Fri),
    Day::WholeWeek,
];

pub struct GrendenParser;

impl MenuParser for GrendenParser {
    fn source(&self) -> SourceId {
        SourceId::Grenden
    }

    fn allowed_days(&self) -> &'static [Day] {
        ALLOWED_DAYS
    }

    fn parse(&self, document: &str) -> Vec<MenuEntry> {
        let doc = HtmlDocument::parse(document);
        let page_text = doc.visible_text();
        let base_price = capture_price(&BASE_PRICE_RE, &page_text).unwrap_or(DEFAULT_BASE_PRICE);
        let special_price =
            capture_price(&SPECIAL_PRICE_RE, &page_text).unwrap_or(DEFAULT_SPECIAL_PRICE);

        let wrappers = doc.root().select(".accordion-wrapper");
        let visible = wrappers
            .iter()
            .find(|w| w.attr("style").is_some_and(|s| s.contains("display: block")))
            .or_else(|| wrappers.first());

        match visible {
            Some(wrapper) => parse_accordion(wrapper, base_price, special_price),
            None => {
                tracing::debug!("grenden: no accordion wrapper found");
                Vec::new()
            }
        }
    }
}

fn capture_price(re: &Regex, text: &str) -> Option<f64> {
    re.captures(text)?[1].parse::<f64>().ok()
}

struct Dish {
    key: String,
    name: String,
    day: Day,
}

fn day_from_header(header: &str) -> Option<Day> {
    let first_line = header.trim().lines().next()?.trim();
    Day::from_swedish_name(first_line).or_else(|| {
        first_line
            .split_whitespace()
            .next()
            .and_then(Day::from_swedish_name)
    })
}

fn dish_name(clean: &str) -> Option<String> {
    let parts: Vec<&str> = clean.split('|').map(str::trim).collect();
    if parts.len() >= 2 {
        Some(format!("{} – {}", parts[0], parts[1..].join(" | ")))
    } else if clean.chars().count() > 10 {
        Some(clean.to_string())
    } else {
        None
    }
}

/// Occurrence count at which a dish is treated as a whole-week special.
fn weekly_special_threshold(days: usize) -> usize {
    std::cmp::max(3, days * 3 / 5)
}

fn parse_accordion<N: MarkupNode>(wrapper: &N, base_price: f64, special_price: f64) -> Vec<MenuEntry> {
    let weekday_items = wrapper.select(".weekday-item");
    let mut dishes: Vec<Dish> = Vec::new();
    let mut counts: HashMap<String, usize> = HashMap::new();

    for item in &weekday_items {
        let header = item
            .select(".accordion-header")
            .first()
            .map(MarkupNode::text)
            .unwrap_or_default();
        let Some(day) = day_from_header(&header) else {
            tracing::debug!(header = %header.trim(), "grenden: unknown day header");
            continue;
        };

        for ratt in item.select("li.ratter") {
            let clean = collapse_whitespace(&ratt.own_text());
            if clean.chars().count() <= 5 {
                continue;
            }
            *counts.entry(clean.clone()).or_default() += 1;
            if let Some(name) = dish_name(&clean) {
                dishes.push(Dish {
                    key: clean,
                    name,
                    day,
                });
            }
        }
    }

    let threshold = weekly_special_threshold(weekday_items.len());
    let mut seen = HashSet::new();
    let mut entries = Vec::new();

    for dish in dishes {
        if !seen.insert(dish.key.clone()) {
            continue;
        }
        let weekly = counts.get(&dish.key).copied().unwrap_or_default() >= threshold;
        entries.push(if weekly {
            MenuEntry::new(dish.name, Some(special_price), Day::WholeWeek)
        } else {
            MenuEntry::new(dish.name, Some(base_price), dish.day)
        });
    }

    entries
}
