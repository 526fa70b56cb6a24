//! Menu data model shared by the scraper, server and CLI.

use std::collections::BTreeMap;

use chrono::Weekday;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Day label attached to a [`MenuEntry`].
///
/// Serialized as its display label (`"Måndag"`, `"Hela veckan"`,
/// `"Weekly Special"`, ...), which is what API consumers see.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Day {
    /// A weekday labelled in Swedish (`Måndag`..`Fredag`).
    Swedish(Weekday),
    /// A weekday labelled in English (`Monday`..`Friday`).
    English(Weekday),
    /// `Hela veckan`: served every day of the week.
    WholeWeek,
    WeeklySpecial,
    MonthlySpecial,
}

impl Day {
    /// Swedish labels for Monday..Friday.
    pub const SWEDISH_WORKDAYS: [Day; 5] = [
        Day::Swedish(Weekday::Mon),
        Day::Swedish(Weekday::Tue),
        Day::Swedish(Weekday::Wed),
        Day::Swedish(Weekday::Thu),
        Day::Swedish(Weekday::Fri),
    ];

    /// English labels for Monday..Friday.
    pub const ENGLISH_WORKDAYS: [Day; 5] = [
        Day::English(Weekday::Mon),
        Day::English(Weekday::Tue),
        Day::English(Weekday::Wed),
        Day::English(Weekday::Thu),
        Day::English(Weekday::Fri),
    ];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Day::Swedish(weekday) => swedish_name(weekday),
            Day::English(weekday) => english_name(weekday),
            Day::WholeWeek => "Hela veckan",
            Day::WeeklySpecial => "Weekly Special",
            Day::MonthlySpecial => "Monthly Special",
        }
    }

    /// Parses a display label back into a [`Day`]. Exact match only.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Hela veckan" => return Some(Day::WholeWeek),
            "Weekly Special" => return Some(Day::WeeklySpecial),
            "Monthly Special" => return Some(Day::MonthlySpecial),
            _ => {}
        }
        ALL_WEEKDAYS.iter().find_map(|&weekday| {
            if swedish_name(weekday) == label {
                Some(Day::Swedish(weekday))
            } else if english_name(weekday) == label {
                Some(Day::English(weekday))
            } else {
                None
            }
        })
    }

    /// Recognizes a Swedish weekday name, ignoring case and surrounding
    /// whitespace (`"måndag"`, `"MÅNDAG"`, `" Måndag "`).
    #[must_use]
    pub fn from_swedish_name(name: &str) -> Option<Self> {
        let lower = name.trim().to_lowercase();
        ALL_WEEKDAYS
            .iter()
            .find(|&&weekday| swedish_name(weekday).to_lowercase() == lower)
            .map(|&weekday| Day::Swedish(weekday))
    }

    #[must_use]
    pub fn weekday(self) -> Option<Weekday> {
        match self {
            Day::Swedish(weekday) | Day::English(weekday) => Some(weekday),
            _ => None,
        }
    }

    /// Ordering key: weekdays Monday-first, then the week/month labels.
    #[must_use]
    pub fn sort_key(self) -> u32 {
        match self {
            Day::Swedish(weekday) | Day::English(weekday) => weekday.num_days_from_monday(),
            Day::WholeWeek => 7,
            Day::WeeklySpecial => 8,
            Day::MonthlySpecial => 9,
        }
    }
}

const ALL_WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

fn swedish_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Måndag",
        Weekday::Tue => "Tisdag",
        Weekday::Wed => "Onsdag",
        Weekday::Thu => "Torsdag",
        Weekday::Fri => "Fredag",
        Weekday::Sat => "Lördag",
        Weekday::Sun => "Söndag",
    }
}

fn english_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

impl std::fmt::Display for Day {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for Day {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for Day {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        Day::from_label(&label)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown day label: {label}")))
    }
}

/// One dish (or category + dish) scraped from a restaurant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuEntry {
    pub name: String,
    /// Price in SEK; `None` when the source publishes no usable number.
    pub price: Option<f64>,
    pub day: Day,
}

impl MenuEntry {
    pub fn new(name: impl Into<String>, price: Option<f64>, day: Day) -> Self {
        Self {
            name: name.into(),
            price,
            day,
        }
    }
}

/// Identifier of a scraped restaurant. Serialized in lowercase
/// (`"edison"`, `"foodhall"`), which is also the API response key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceId {
    Edison,
    Bricks,
    Kantin,
    Smakapakina,
    Grenden,
    Eatery,
    FoodHall,
}

impl SourceId {
    pub const ALL: [SourceId; 7] = [
        SourceId::Edison,
        SourceId::Bricks,
        SourceId::Kantin,
        SourceId::Smakapakina,
        SourceId::Grenden,
        SourceId::Eatery,
        SourceId::FoodHall,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SourceId::Edison => "edison",
            SourceId::Bricks => "bricks",
            SourceId::Kantin => "kantin",
            SourceId::Smakapakina => "smakapakina",
            SourceId::Grenden => "grenden",
            SourceId::Eatery => "eatery",
            SourceId::FoodHall => "foodhall",
        }
    }
}

impl std::fmt::Display for SourceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SourceId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        SourceId::ALL
            .into_iter()
            .find(|id| id.as_str() == lower)
            .ok_or_else(|| {
                let known: Vec<&str> = SourceId::ALL.iter().map(|id| id.as_str()).collect();
                format!("unknown source '{s}' (expected one of: {})", known.join(", "))
            })
    }
}

/// Per-restaurant results of one scrape cycle, keyed by [`SourceId`].
///
/// A restaurant whose scrape failed is present with an empty list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RestaurantMenus(BTreeMap<SourceId, Vec<MenuEntry>>);

impl RestaurantMenus {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, source: SourceId, entries: Vec<MenuEntry>) {
        self.0.insert(source, entries);
    }

    #[must_use]
    pub fn get(&self, source: SourceId) -> Option<&[MenuEntry]> {
        self.0.get(&source).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (SourceId, &[MenuEntry])> {
        self.0.iter().map(|(id, entries)| (*id, entries.as_slice()))
    }

    /// Number of restaurants in the result, including failed ones.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Total number of entries across all restaurants.
    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.0.values().map(Vec::len).sum()
    }
}

impl FromIterator<(SourceId, Vec<MenuEntry>)> for RestaurantMenus {
    fn from_iter<I: IntoIterator<Item = (SourceId, Vec<MenuEntry>)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn day_labels_round_trip() {
        for day in Day::SWEDISH_WORKDAYS
            .into_iter()
            .chain(Day::ENGLISH_WORKDAYS)
            .chain([Day::WholeWeek, Day::WeeklySpecial, Day::MonthlySpecial])
        {
            assert_eq!(Day::from_label(day.label()), Some(day));
        }
    }

    #[test]
    fn swedish_name_ignores_case() {
        assert_eq!(
            Day::from_swedish_name("MÅNDAG"),
            Some(Day::Swedish(Weekday::Mon))
        );
        assert_eq!(
            Day::from_swedish_name(" fredag "),
            Some(Day::Swedish(Weekday::Fri))
        );
        assert_eq!(Day::from_swedish_name("Friday"), None);
    }

    #[test]
    fn sort_key_orders_monday_first() {
        assert!(Day::Swedish(Weekday::Mon).sort_key() < Day::Swedish(Weekday::Fri).sort_key());
        assert!(Day::Swedish(Weekday::Fri).sort_key() < Day::WholeWeek.sort_key());
    }

    #[test]
    fn menu_entry_serializes_with_null_price() {
        let entry = MenuEntry::new("Soppa", None, Day::Swedish(Weekday::Tue));
        let json = serde_json::to_value(&entry).expect("serialize");
        assert_eq!(
            json,
            serde_json::json!({"name": "Soppa", "price": null, "day": "Tisdag"})
        );
    }

    #[test]
    fn menu_entry_rejects_unknown_day_label() {
        let result: Result<MenuEntry, _> =
            serde_json::from_str(r#"{"name":"x","price":1.0,"day":"Someday"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn restaurant_menus_serialize_keyed_by_source_id() {
        let menus: RestaurantMenus = [
            (SourceId::FoodHall, vec![]),
            (
                SourceId::Edison,
                vec![MenuEntry::new("Green: Soup", Some(115.0), Day::Swedish(Weekday::Mon))],
            ),
        ]
        .into_iter()
        .collect();

        let json = serde_json::to_value(&menus).expect("serialize");
        assert_eq!(json["edison"][0]["price"], serde_json::json!(115.0));
        assert_eq!(json["foodhall"], serde_json::json!([]));
        assert_eq!(menus.entry_count(), 1);
    }

    #[test]
    fn source_id_parses_case_insensitively() {
        assert_eq!("FoodHall".parse::<SourceId>(), Ok(SourceId::FoodHall));
        assert!("nowhere".parse::<SourceId>().is_err());
    }
}
