//! Generic line-scanning parser shared by the text-layout sources.
//!
//! Each source describes its layout as a [`LineScanProfile`]; [`scan`]
//! walks the lines once, tracking the current day.

use lunch_core::{Day, MenuEntry};

use crate::price::parse_price;
use crate::segment::TextLines;

/// Which lines count as a category heading.
#[derive(Debug, Clone, Copy)]
pub(crate) enum CategoryRule {
    /// One of the listed words, optionally followed by `", extra text"`.
    Vocabulary(&'static [&'static str]),
    /// Any line while a day is active.
    AnyLine,
}

impl CategoryRule {
    fn category<'l>(&self, line: &'l str) -> Option<&'l str> {
        match self {
            CategoryRule::Vocabulary(words) => words.iter().find_map(|&word| {
                let rest = line.strip_prefix(word)?;
                (rest.is_empty() || rest.starts_with(',')).then(|| &line[..word.len()])
            }),
            CategoryRule::AnyLine => Some(line),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub(crate) enum EntryLayout {
    /// `category` / `price` / `description` triples under each day.
    CategoryPriceDescription { categories: CategoryRule },
    /// The line right after a day marker is that day's dish. No price is
    /// published, so every entry gets `parse_price(price_text)`.
    DescriptionAfterDay { price_text: &'static str },
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct LineScanProfile {
    /// Day marker text (matched case-insensitively) and the label it emits.
    pub day_markers: &'static [(&'static str, Day)],
    pub layout: EntryLayout,
    /// A price line has a digit followed somewhere by one of these
    /// (lowercase) currency markers.
    pub price_markers: &'static [&'static str],
    /// Headings whose following line is a special with a fixed day label.
    pub specials: &'static [(&'static str, Day)],
    /// Substrings that disqualify a description line.
    pub description_denylist: &'static [&'static str],
    /// A description must be strictly longer than this many characters.
    pub min_description_chars: usize,
}

impl LineScanProfile {
    fn day_marker(&self, line: &str) -> Option<Day> {
        let lower = line.to_lowercase();
        self.day_markers
            .iter()
            .find(|(marker, _)| marker.to_lowercase() == lower)
            .map(|&(_, day)| day)
    }

    fn special(&self, line: &str) -> Option<(&'static str, Day)> {
        self.specials
            .iter()
            .find(|(heading, _)| heading.eq_ignore_ascii_case(line))
            .copied()
    }

    fn is_price_line(&self, line: &str) -> bool {
        let lower = line.to_lowercase();
        lower.find(|c: char| c.is_ascii_digit()).is_some_and(|digit| {
            self.price_markers
                .iter()
                .any(|marker| lower[digit..].contains(marker))
        })
    }

    fn is_description(&self, line: &str) -> bool {
        line.chars().count() > self.min_description_chars
            && !self
                .description_denylist
                .iter()
                .any(|denied| line.contains(denied))
    }
}

pub(crate) fn scan(profile: &LineScanProfile, lines: &TextLines) -> Vec<MenuEntry> {
    let mut entries = Vec::new();
    let mut current_day: Option<Day> = None;
    let mut i = 0;

    while i < lines.len() {
        let Some(line) = lines.get(i) else { break };

        if let Some(day) = profile.day_marker(line) {
            current_day = Some(day);
            if let EntryLayout::DescriptionAfterDay { price_text } = profile.layout {
                if let Some(description) = lines.get(i + 1) {
                    if profile.is_description(description) {
                        entries.push(MenuEntry::new(description, parse_price(price_text), day));
                        i += 1;
                    }
                }
            }
            i += 1;
            continue;
        }

        if let Some((heading, day)) = profile.special(line) {
            if let Some(description) = lines.get(i + 1) {
                let price = match profile.layout {
                    EntryLayout::DescriptionAfterDay { price_text } => parse_price(price_text),
                    EntryLayout::CategoryPriceDescription { .. } => None,
                };
                entries.push(MenuEntry::new(
                    format!("{heading}: {description}"),
                    price,
                    day,
                ));
                i += 2;
                continue;
            }
        }

        if let (Some(day), EntryLayout::CategoryPriceDescription { categories }) =
            (current_day, profile.layout)
        {
            if let (Some(category), Some(price_line), Some(description)) = (
                categories.category(line),
                lines.get(i + 1),
                lines.get(i + 2),
            ) {
                if profile.is_price_line(price_line) && profile.is_description(description) {
                    entries.push(MenuEntry::new(
                        format!("{category}: {description}"),
                        parse_price(price_line),
                        day,
                    ));
                    i += 3;
                    continue;
                }
            }
        }

        i += 1;
    }

    entries
}

#[cfg(test)]
mod tests {
    use chrono::Weekday;

    use super::*;

    const MARKERS: &[(&str, Day)] = &[
        ("Måndag", Day::Swedish(Weekday::Mon)),
        ("Tisdag", Day::Swedish(Weekday::Tue)),
    ];

    fn triples(categories: CategoryRule) -> LineScanProfile {
        LineScanProfile {
            day_markers: MARKERS,
            layout: EntryLayout::CategoryPriceDescription { categories },
            price_markers: &["kr", ":-"],
            specials: &[],
            description_denylist: &[],
            min_description_chars: 0,
        }
    }

    #[test]
    fn lines_before_first_day_are_ignored() {
        let lines = TextLines::from_text("Green\n115:-\nOrphan dish\nMåndag\nGreen\n115:-\nSoup");
        let entries = scan(&triples(CategoryRule::Vocabulary(&["Green"])), &lines);
        assert_eq!(
            entries,
            vec![MenuEntry::new(
                "Green: Soup",
                Some(115.0),
                Day::Swedish(Weekday::Mon)
            )]
        );
    }

    #[test]
    fn day_markers_match_case_insensitively() {
        let lines = TextLines::from_text("TISDAG\nGreen\n115:-\nSoup");
        let entries = scan(&triples(CategoryRule::Vocabulary(&["Green"])), &lines);
        assert_eq!(entries[0].day, Day::Swedish(Weekday::Tue));
    }

    #[test]
    fn vocabulary_allows_trailing_comma_text_only() {
        let rule = CategoryRule::Vocabulary(&["Green", "World Wide"]);
        assert_eq!(rule.category("Green, vegetarian"), Some("Green"));
        assert_eq!(rule.category("World Wide"), Some("World Wide"));
        assert_eq!(rule.category("Greenery"), None);
    }

    #[test]
    fn category_without_price_line_is_skipped() {
        let lines = TextLines::from_text("Måndag\nGreen\nNo price here\nSoup");
        let entries = scan(&triples(CategoryRule::Vocabulary(&["Green"])), &lines);
        assert!(entries.is_empty());
    }

    #[test]
    fn price_line_needs_digit_before_marker() {
        let profile = triples(CategoryRule::AnyLine);
        assert!(profile.is_price_line("115:-"));
        assert!(profile.is_price_line("Pris 95 KR"));
        assert!(!profile.is_price_line("kr 95"));
        assert!(!profile.is_price_line("95 SEK"));
        assert!(!profile.is_price_line("Kryddig soppa"));
    }

    #[test]
    fn truncated_triple_is_dropped() {
        let lines = TextLines::from_text("Måndag\nGreen\n115:-");
        let entries = scan(&triples(CategoryRule::Vocabulary(&["Green"])), &lines);
        assert!(entries.is_empty());
    }

    #[test]
    fn description_after_day_respects_denylist_and_length() {
        let profile = LineScanProfile {
            day_markers: MARKERS,
            layout: EntryLayout::DescriptionAfterDay { price_text: "-" },
            price_markers: &[],
            specials: &[("Veckans soppa", Day::WeeklySpecial)],
            description_denylist: &["buffé"],
            min_description_chars: 10,
        };
        let lines = TextLines::from_text(
            "Måndag\nSalladsbuffé ingår\nTisdag\nKort\nVeckans soppa\nTomatsoppa med basilika",
        );
        let entries = scan(&profile, &lines);
        assert_eq!(
            entries,
            vec![MenuEntry::new(
                "Veckans soppa: Tomatsoppa med basilika",
                None,
                Day::WeeklySpecial
            )]
        );
    }

    #[test]
    fn scanning_is_idempotent() {
        let lines = TextLines::from_text("Måndag\nGreen\n115:-\nSoup\nTisdag\nGreen\n115:-\nStew");
        let profile = triples(CategoryRule::Vocabulary(&["Green"]));
        assert_eq!(scan(&profile, &lines), scan(&profile, &lines));
    }
}
