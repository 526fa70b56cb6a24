//! Eatery Lund: the weekly menu is a PDF linked from the landing page.
//! Parsing works on the extracted text, where day names may be glued to
//! neighbouring dish text.

use std::sync::LazyLock;

use lunch_core::{Day, MenuEntry, SourceId};
use regex::Regex;

use super::MenuParser;
use crate::client::resolve_url;
use crate::error::ScraperError;
use crate::segment::{collapse_whitespace, HtmlDocument, MarkupNode, TextLines};

/// Flat lunch price; the PDF never lists one.
pub const EATERY_LUNCH_PRICE: f64 = 135.0;

/// A dish must be longer than this to be flushed or emitted.
const MIN_DISH_CHARS: usize = 15;

static DAY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(måndag|tisdag|onsdag|torsdag|fredag)\b").expect("valid regex")
});
static BOILERPLATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:Sweet Tuesday|Pancake Thursday|Vi bjuder|•|\d+%|Med reservation)")
        .expect("valid regex")
});
static NUMERIC_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\d\s./:-]+$").expect("valid regex"));
static REPEATED_COMMA_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r",(?:\s*,)+").expect("valid regex"));

pub struct EateryParser;

impl MenuParser for EateryParser {
    fn source(&self) -> SourceId {
        SourceId::Eatery
    }

    fn allowed_days(&self) -> &'static [Day] {
        &Day::SWEDISH_WORKDAYS
    }

    fn parse(&self, document: &str) -> Vec<MenuEntry> {
        let mut builder = DishBuilder::default();
        for line in TextLines::from_text(document).iter() {
            builder.feed(line);
        }
        builder.finish()
    }
}

/// Finds the lunch menu PDF on the landing page: the first `<a>` whose
/// text mentions "lunchmeny" and whose `href` points at a `.pdf`.
///
/// # Errors
///
/// - [`ScraperError::MissingPdfLink`] when no such link exists.
/// - [`ScraperError::InvalidUrl`] when the link cannot be resolved against `page_url`.
pub fn find_pdf_link(html: &str, page_url: &str) -> Result<String, ScraperError> {
    let doc = HtmlDocument::parse(html);
    let href = doc
        .root()
        .select("a[href]")
        .into_iter()
        .find_map(|a| {
            let href = a.attr("href")?;
            (a.text().to_lowercase().contains("lunchmeny") && href.contains(".pdf"))
                .then(|| href.to_string())
        })
        .ok_or_else(|| ScraperError::MissingPdfLink {
            url: page_url.to_string(),
        })?;
    resolve_url(page_url, &href)
}

fn is_skippable(line: &str) -> bool {
    BOILERPLATE_RE.is_match(line) || NUMERIC_RE.is_match(line)
}

fn starts_uppercase(line: &str) -> bool {
    line.chars().next().is_some_and(char::is_uppercase)
}

fn clean_dish(raw: &str) -> String {
    let collapsed = collapse_whitespace(raw);
    let commas = REPEATED_COMMA_RE.replace_all(&collapsed, ",");
    commas
        .trim_matches(|c: char| c == ',' || c.is_whitespace())
        .to_string()
}

#[derive(Default)]
struct DishBuilder {
    day: Option<Day>,
    dish: String,
    entries: Vec<MenuEntry>,
}

impl DishBuilder {
    fn feed(&mut self, line: &str) {
        if is_skippable(line) {
            return;
        }
        let mut rest = line;
        while let Some(found) = DAY_RE.find(rest) {
            let before = rest[..found.start()].trim();
            if !before.is_empty() && !is_skippable(before) {
                self.append(before);
            }
            self.flush();
            self.day = Day::from_swedish_name(found.as_str());
            rest = rest[found.end()..].trim();
        }

        if rest.is_empty() || is_skippable(rest) {
            return;
        }
        if starts_uppercase(rest) && self.dish.chars().count() > MIN_DISH_CHARS {
            self.flush();
        }
        self.append(rest);
    }

    fn append(&mut self, text: &str) {
        if !self.dish.is_empty() {
            self.dish.push(' ');
        }
        self.dish.push_str(text);
    }

    fn flush(&mut self) {
        let raw = std::mem::take(&mut self.dish);
        let Some(day) = self.day else { return };
        let name = clean_dish(&raw);
        if name.chars().count() > MIN_DISH_CHARS && !BOILERPLATE_RE.is_match(&name) {
            self.entries
                .push(MenuEntry::new(name, Some(EATERY_LUNCH_PRICE), day));
        }
    }

    fn finish(mut self) -> Vec<MenuEntry> {
        self.flush();
        self.entries
    }
}

#[cfg(test)]
mod tests {
    use chrono::Weekday;

    use super::*;

    #[test]
    fn fredag_block_with_boilerplate_yields_one_dish() {
        let text = "FREDAG\nSweet Tuesday varje tisdag\n• Kaffe ingår\n\
                    Krämig svamprisotto med parmesan och ruccola\n";
        let entries = EateryParser.parse(text);
        assert_eq!(
            entries,
            vec![MenuEntry::new(
                "Krämig svamprisotto med parmesan och ruccola",
                Some(EATERY_LUNCH_PRICE),
                Day::Swedish(Weekday::Fri)
            )]
        );
    }

    #[test]
    fn multi_line_dishes_are_joined_until_uppercase_line() {
        let text = "Måndag\nHelstekt fläskkarré med rotfrukter,\nsenapssås och\
                    \npotatis\nVegetarisk lasagne med tomatsås\nTisdag\nKycklinggryta med jasminris\n";
        let entries = EateryParser.parse(text);
        let pairs: Vec<(&str, Day)> = entries.iter().map(|e| (e.name.as_str(), e.day)).collect();
        assert_eq!(
            pairs,
            vec![
                (
                    "Helstekt fläskkarré med rotfrukter, senapssås och potatis",
                    Day::Swedish(Weekday::Mon)
                ),
                ("Vegetarisk lasagne med tomatsås", Day::Swedish(Weekday::Mon)),
                ("Kycklinggryta med jasminris", Day::Swedish(Weekday::Tue)),
            ]
        );
    }

    #[test]
    fn embedded_day_name_splits_the_line() {
        let text = "Måndag\nPasta med pesto och pinjenötter, serveras med\nsallad Tisdag Fiskgryta med saffran och aioli\n";
        let entries = EateryParser.parse(text);
        assert_eq!(entries.len(), 2);
        assert_eq!(
            entries[0].name,
            "Pasta med pesto och pinjenötter, serveras med sallad"
        );
        assert_eq!(entries[0].day, Day::Swedish(Weekday::Mon));
        assert_eq!(entries[1].name, "Fiskgryta med saffran och aioli");
        assert_eq!(entries[1].day, Day::Swedish(Weekday::Tue));
    }

    #[test]
    fn text_before_first_day_is_discarded() {
        let text = "Eatery Lund lunchmeny vecka 12\n11:30 - 14:00\nOnsdag\nBiff med bearnaise och pommes\n";
        let entries = EateryParser.parse(text);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].day, Day::Swedish(Weekday::Wed));
    }

    #[test]
    fn cleaning_collapses_commas_and_whitespace() {
        assert_eq!(
            clean_dish(" , Lax ,  , dill   och citron , "),
            "Lax , dill och citron"
        );
    }

    #[test]
    fn short_fragments_are_not_emitted() {
        let text = "Torsdag\nÄrtsoppa\n12\nMed reservation för ändringar\n";
        assert!(EateryParser.parse(text).is_empty());
    }

    #[test]
    fn finds_and_resolves_pdf_link() {
        let html = r#"<a href="/om-oss">Om oss</a>
            <a href="/menu.html">Lunchmeny (webb)</a>
            <a href="/wp-content/uploads/Lunchmeny-v12.pdf"> Lunchmeny </a>"#;
        let url = find_pdf_link(html, "https://eatery.se/anlaggningar/lund").unwrap();
        assert_eq!(url, "https://eatery.se/wp-content/uploads/Lunchmeny-v12.pdf");
    }

    #[test]
    fn missing_pdf_link_is_an_error() {
        let err = find_pdf_link("<a href=\"/x.pdf\">Meny</a>", "https://eatery.se/").unwrap_err();
        assert!(matches!(err, ScraperError::MissingPdfLink { .. }));
    }
}
