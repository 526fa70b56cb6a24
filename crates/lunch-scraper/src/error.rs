use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("page not found: {url}")]
    NotFound { url: String },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("no lunch menu PDF link found on {url}")]
    MissingPdfLink { url: String },

    #[error("invalid URL \"{url}\": {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("PDF text extraction failed: {reason}")]
    PdfExtraction { reason: String },

    #[error("scrape task failed: {0}")]
    Task(String),
}
