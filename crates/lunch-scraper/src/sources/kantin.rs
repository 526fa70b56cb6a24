//! Kantin: one dish line under each Swedish day heading, published with
//! English day labels, plus weekly and monthly specials.

use chrono::Weekday;
use lunch_core::{Day, MenuEntry, SourceId};

use super::line_scan::{scan, EntryLayout, LineScanProfile};
use super::MenuParser;
use crate::segment::TextLines;

const DAY_MARKERS: &[(&str, Day)] = &[
    ("Måndag", Day::English(Weekday::Mon)),
    ("Tisdag", Day::English(Weekday::Tue)),
    ("Onsdag", Day::English(Weekday::Wed)),
    ("Torsdag", Day::English(Weekday::Thu)),
    ("Fredag", Day::English(Weekday::Fri)),
];

const ALLOWED_DAYS: &[Day] = &[
    Day::English(Weekday::Mon),
    Day::English(Weekday::Tue),
    Day::English(Weekday::Wed),
    Day::English(Weekday::Thu),
    Day::English(Weekday::Fri),
    Day::WeeklySpecial,
    Day::MonthlySpecial,
];

const PROFILE: LineScanProfile = LineScanProfile {
    day_markers: DAY_MARKERS,
    layout: EntryLayout::DescriptionAfterDay {
        price_text: "Se restaurang för pris",
    },
    price_markers: &[],
    specials: &[
        ("Veckans vegetariska", Day::WeeklySpecial),
        ("Månadens alternativ", Day::MonthlySpecial),
    ],
    description_denylist: &["buffé", "Kantins", "Vi skickar"],
    min_description_chars: 10,
};

pub struct KantinParser;

impl MenuParser for KantinParser {
    fn source(&self) -> SourceId {
        SourceId::Kantin
    }

    fn allowed_days(&self) -> &'static [Day] {
        ALLOWED_DAYS
    }

    fn parse(&self, document: &str) -> Vec<MenuEntry> {
        scan(&PROFILE, &TextLines::from_html(document))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r"<html><body>
        <h1>Kantins lunch</h1>
        <h2>Måndag</h2><p>Krämig kycklinggryta med ris</p>
        <h2>Tisdag</h2><p>Salladsbuffé ingår alltid</p>
        <h2>Onsdag</h2><p>Fisk</p>
        <h2>Torsdag</h2><p>Ärtsoppa och pannkakor</p>
        <h3>Veckans vegetariska</h3><p>Linsgryta med koriander</p>
        <h3>Månadens alternativ</h3><p>Caesarsallad</p>
        <footer>Vi skickar gärna catering</footer>
        </body></html>";

    #[test]
    fn parses_days_with_english_labels_and_no_price() {
        let entries = KantinParser.parse(PAGE);
        assert_eq!(
            entries,
            vec![
                MenuEntry::new(
                    "Krämig kycklinggryta med ris",
                    None,
                    Day::English(Weekday::Mon)
                ),
                MenuEntry::new("Ärtsoppa och pannkakor", None, Day::English(Weekday::Thu)),
                MenuEntry::new(
                    "Veckans vegetariska: Linsgryta med koriander",
                    None,
                    Day::WeeklySpecial
                ),
                MenuEntry::new(
                    "Månadens alternativ: Caesarsallad",
                    None,
                    Day::MonthlySpecial
                ),
            ]
        );
    }

    #[test]
    fn every_entry_has_an_allowed_day() {
        let parser = KantinParser;
        assert!(parser
            .parse(PAGE)
            .iter()
            .all(|e| parser.allowed_days().contains(&e.day)));
    }
}
