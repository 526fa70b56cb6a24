//! Document segmentation: visible-text lines and a narrow DOM query
//! capability for the structural parsers.

use scraper::{ElementRef, Html, Selector};

/// Elements whose content never reaches the visible text.
const HIDDEN_ELEMENTS: &[&str] = &["script", "style", "noscript", "template", "head"];

/// Elements that start a new line in the visible text.
const BLOCK_ELEMENTS: &[&str] = &[
    "address",
    "article",
    "aside",
    "blockquote",
    "body",
    "dd",
    "details",
    "div",
    "dl",
    "dt",
    "fieldset",
    "figcaption",
    "figure",
    "footer",
    "form",
    "h1",
    "h2",
    "h3",
    "h4",
    "h5",
    "h6",
    "header",
    "hr",
    "li",
    "main",
    "nav",
    "ol",
    "p",
    "pre",
    "section",
    "summary",
    "table",
    "td",
    "th",
    "tr",
    "ul",
];

/// Collapses every run of whitespace into a single space and trims the ends.
pub(crate) fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Ordered, restartable sequence of trimmed, non-empty lines.
///
/// Iterating does not consume it, and [`TextLines::get`] gives random
/// access for parsers that look ahead.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextLines(Vec<String>);

impl TextLines {
    /// Segments plain text (e.g. PDF output) without any markup handling.
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        Self(
            text.lines()
                .map(collapse_whitespace)
                .filter(|line| !line.is_empty())
                .collect(),
        )
    }

    /// Segments the visible text of an HTML document.
    #[must_use]
    pub fn from_html(html: &str) -> Self {
        HtmlDocument::parse(html).lines()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&str> {
        self.0.get(index).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

/// Parsed HTML document.
pub struct HtmlDocument {
    html: Html,
}

impl HtmlDocument {
    #[must_use]
    pub fn parse(html: &str) -> Self {
        Self {
            html: Html::parse_document(html),
        }
    }

    #[must_use]
    pub fn root(&self) -> Element<'_> {
        Element(self.html.root_element())
    }

    /// Text as a reader would see it: hidden elements dropped, block
    /// elements and `<br>` on their own lines.
    #[must_use]
    pub fn visible_text(&self) -> String {
        let mut out = String::new();
        push_visible_text(self.html.root_element(), &mut out);
        out
    }

    #[must_use]
    pub fn lines(&self) -> TextLines {
        TextLines::from_text(&self.visible_text())
    }
}

fn push_visible_text(element: ElementRef<'_>, out: &mut String) {
    let name = element.value().name();
    if HIDDEN_ELEMENTS.contains(&name) {
        return;
    }
    if name == "br" {
        out.push('\n');
        return;
    }

    let is_block = BLOCK_ELEMENTS.contains(&name);
    if is_block {
        out.push('\n');
    }
    for child in element.children() {
        if let Some(child_element) = ElementRef::wrap(child) {
            push_visible_text(child_element, out);
        } else if let Some(text) = child.value().as_text() {
            out.push_str(text);
        }
    }
    if is_block {
        out.push('\n');
    }
}

/// Read-only DOM queries used by the structural parsers.
///
/// Selectors are CSS strings; an invalid selector matches nothing and is
/// logged rather than failing the parse.
pub trait MarkupNode: Sized {
    /// Descendants matching `selector`, in document order.
    fn select(&self, selector: &str) -> Vec<Self>;
    fn matches(&self, selector: &str) -> bool;
    /// Nearest element, starting with `self`, that matches `selector`.
    fn closest(&self, selector: &str) -> Option<Self>;
    fn parent(&self) -> Option<Self>;
    fn attr(&self, name: &str) -> Option<&str>;
    /// Concatenated text of the whole subtree.
    fn text(&self) -> String;
    /// Text of direct text children only.
    fn own_text(&self) -> String;
}

fn parse_selector(selector: &str) -> Option<Selector> {
    match Selector::parse(selector) {
        Ok(parsed) => Some(parsed),
        Err(e) => {
            tracing::warn!(selector, error = %e, "invalid CSS selector");
            None
        }
    }
}

/// [`MarkupNode`] backed by a `scraper` element.
#[derive(Debug, Clone, Copy)]
pub struct Element<'a>(ElementRef<'a>);

impl MarkupNode for Element<'_> {
    fn select(&self, selector: &str) -> Vec<Self> {
        parse_selector(selector)
            .map(|parsed| self.0.select(&parsed).map(Element).collect())
            .unwrap_or_default()
    }

    fn matches(&self, selector: &str) -> bool {
        parse_selector(selector).is_some_and(|parsed| parsed.matches(&self.0))
    }

    fn closest(&self, selector: &str) -> Option<Self> {
        let parsed = parse_selector(selector)?;
        if parsed.matches(&self.0) {
            return Some(*self);
        }
        self.0
            .ancestors()
            .filter_map(ElementRef::wrap)
            .find(|ancestor| parsed.matches(ancestor))
            .map(Element)
    }

    fn parent(&self) -> Option<Self> {
        self.0.parent().and_then(ElementRef::wrap).map(Element)
    }

    fn attr(&self, name: &str) -> Option<&str> {
        self.0.value().attr(name)
    }

    fn text(&self) -> String {
        self.0.text().collect()
    }

    fn own_text(&self) -> String {
        self.0
            .children()
            .filter_map(|child| child.value().as_text().map(|text| &**text))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_lines_trim_and_drop_empty() {
        let lines = TextLines::from_text("  Måndag \n\n\t Green\n   \n115:-  ");
        assert_eq!(lines.iter().collect::<Vec<_>>(), ["Måndag", "Green", "115:-"]);
    }

    #[test]
    fn text_lines_are_restartable() {
        let lines = TextLines::from_text("a\nb");
        assert_eq!(lines.iter().count(), 2);
        assert_eq!(lines.iter().count(), 2);
        assert_eq!(lines.get(1), Some("b"));
        assert_eq!(lines.get(2), None);
    }

    #[test]
    fn visible_text_skips_scripts_and_styles() {
        let html = "<html><head><title>t</title><style>.x{}</style></head>\
                    <body><script>var a = 1;</script><p>Måndag</p>\
                    <noscript>enable js</noscript><p>Green</p></body></html>";
        let lines = TextLines::from_html(html);
        assert_eq!(lines.iter().collect::<Vec<_>>(), ["Måndag", "Green"]);
    }

    #[test]
    fn visible_text_breaks_on_blocks_and_br() {
        let html = "<body><div>Green<br>115:-</div><span>Soup</span> <b>of</b> the day</body>";
        let lines = TextLines::from_html(html);
        assert_eq!(
            lines.iter().collect::<Vec<_>>(),
            ["Green", "115:-", "Soup of the day"]
        );
    }

    #[test]
    fn select_returns_document_order_for_selector_lists() {
        let doc = HtmlDocument::parse(
            "<body><h2>Måndag</h2><div class='menu-block'>a</div><h3>Tisdag</h3><div class='menu-block'>b</div></body>",
        );
        let texts: Vec<String> = doc
            .root()
            .select("h2, h3, .menu-block")
            .iter()
            .map(MarkupNode::text)
            .collect();
        assert_eq!(texts, ["Måndag", "a", "Tisdag", "b"]);
    }

    #[test]
    fn closest_starts_at_self_and_climbs() {
        let doc = HtmlDocument::parse(
            "<div class='outer'><div class='inner'><h2 id='t'>Title</h2></div></div>",
        );
        let title = doc.root().select("#t")[0];
        let inner = title.closest("div").unwrap();
        assert_eq!(inner.attr("class"), Some("inner"));
        let outer = inner.parent().unwrap().closest(".outer").unwrap();
        assert_eq!(outer.attr("class"), Some("outer"));
        assert!(title.closest("h2").unwrap().matches("#t"));
    }

    #[test]
    fn own_text_excludes_nested_elements() {
        let doc = HtmlDocument::parse("<ul><li>Köttbullar <span>allergener</span></li></ul>");
        let item = doc.root().select("li")[0];
        assert_eq!(item.own_text().trim(), "Köttbullar");
        assert_eq!(item.text(), "Köttbullar allergener");
    }

    #[test]
    fn invalid_selector_matches_nothing() {
        let doc = HtmlDocument::parse("<p>x</p>");
        assert!(doc.root().select("p[").is_empty());
        assert!(!doc.root().matches(":::"));
    }
}
