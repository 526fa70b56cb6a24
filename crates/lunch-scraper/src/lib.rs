pub mod aggregate;
pub mod client;
pub mod error;
pub mod pdf;
pub mod price;
pub mod segment;
pub mod sources;

pub use aggregate::Aggregator;
pub use client::MenuClient;
pub use error::ScraperError;
pub use pdf::{PdfExtractText, PdfTextExtractor};
pub use price::{format_price, parse_price};
pub use segment::{HtmlDocument, MarkupNode, TextLines};
pub use sources::{parse_document, parser_for, scrape, scrape_or_empty, MenuParser};
