//! Free-form price text to SEK amounts.

use std::sync::LazyLock;

use regex::Regex;

static NO_PRICE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)se restaurang|kontakta restaurang|ring restaurangen|contact restaurant|see restaurant",
    )
    .expect("valid regex")
});
static PLACEHOLDER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(?:-+|n/?a)$").expect("valid regex"));
static AMOUNT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d+(?:[.,]\d{2})?)\s*(?:kr|:-|sek)?").expect("valid regex")
});

/// Extracts a SEK amount from price text such as `"115:-"`, `"49,50 kr"`
/// or `"125 SEK"`.
///
/// Returns `None` for "ask the restaurant" phrases, placeholder dashes,
/// `N/A`, and text without a number. Never fails.
#[must_use]
pub fn parse_price(text: &str) -> Option<f64> {
    let normalized = text.trim();

    if NO_PRICE_RE.is_match(normalized) || PLACEHOLDER_RE.is_match(normalized) {
        return None;
    }

    let caps = AMOUNT_RE.captures(normalized)?;
    let amount = caps[1].replace(',', ".").parse::<f64>().ok()?;
    amount.is_finite().then_some(amount)
}

/// Formats a price for display: `"89 kr"`, `"99.50 kr"`, or `"-"` when absent.
#[must_use]
pub fn format_price(amount: Option<f64>) -> String {
    match amount {
        None => "-".to_string(),
        Some(amount) if amount.fract().abs() < f64::EPSILON => format!("{amount:.0} kr"),
        Some(amount) => format!("{amount:.2} kr"),
    }
}

#[cfg(test)]
#[path = "price_test.rs"]
mod tests;
