//! Restaurang Edison: day headings followed by `category / price / description`.

use lunch_core::{Day, MenuEntry, SourceId};

use super::line_scan::{scan, CategoryRule, EntryLayout, LineScanProfile};
use super::{MenuParser, SWEDISH_MARKERS};
use crate::segment::TextLines;

const PROFILE: LineScanProfile = LineScanProfile {
    day_markers: SWEDISH_MARKERS,
    layout: EntryLayout::CategoryPriceDescription {
        categories: CategoryRule::Vocabulary(&["Green", "Local", "World Wide"]),
    },
    price_markers: &["kr", ":-", "sek"],
    specials: &[],
    description_denylist: &[],
    min_description_chars: 0,
};

pub struct EdisonParser;

impl MenuParser for EdisonParser {
    fn source(&self) -> SourceId {
        SourceId::Edison
    }

    fn allowed_days(&self) -> &'static [Day] {
        &Day::SWEDISH_WORKDAYS
    }

    fn parse(&self, document: &str) -> Vec<MenuEntry> {
        scan(&PROFILE, &TextLines::from_html(document))
    }
}

#[cfg(test)]
mod tests {
    use chrono::Weekday;

    use super::*;

    const PAGE: &str = r"<html><body>
        <header><nav>Lunch</nav><p>Öppet 11-14</p></header>
        <h3>Måndag</h3>
        <div><p>Green</p><p>115:-</p><p>Grilled halloumi with salad</p></div>
        <div><p>World Wide, vecka 12</p><p>115:-</p><p>Chicken tikka masala</p></div>
        <h3>Tisdag</h3>
        <div><p>Local</p><p>115:-</p><p>Pannbiff med lök</p></div>
        <div><p>Dessert</p><p>45:-</p><p>Chokladmousse</p></div>
        </body></html>";

    #[test]
    fn parses_category_price_description_triples() {
        let entries = EdisonParser.parse(PAGE);
        assert_eq!(
            entries,
            vec![
                MenuEntry::new(
                    "Green: Grilled halloumi with salad",
                    Some(115.0),
                    Day::Swedish(Weekday::Mon)
                ),
                MenuEntry::new(
                    "World Wide: Chicken tikka masala",
                    Some(115.0),
                    Day::Swedish(Weekday::Mon)
                ),
                MenuEntry::new(
                    "Local: Pannbiff med lök",
                    Some(115.0),
                    Day::Swedish(Weekday::Tue)
                ),
            ]
        );
    }

    #[test]
    fn empty_page_yields_nothing() {
        assert!(EdisonParser.parse("<html><body></body></html>").is_empty());
    }
}
