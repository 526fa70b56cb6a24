use std::sync::Arc;

use crate::error::ScraperError;

/// Turns PDF bytes into plain text.
pub trait PdfTextExtractor: Send + Sync {
    /// # Errors
    ///
    /// Returns [`ScraperError::PdfExtraction`] if the document cannot be read.
    fn extract_text(&self, bytes: &[u8]) -> Result<String, ScraperError>;
}

/// [`PdfTextExtractor`] backed by the `pdf-extract` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfExtractText;

impl PdfTextExtractor for PdfExtractText {
    fn extract_text(&self, bytes: &[u8]) -> Result<String, ScraperError> {
        pdf_extract::extract_text_from_mem(bytes).map_err(|e| ScraperError::PdfExtraction {
            reason: e.to_string(),
        })
    }
}

/// Runs extraction on the blocking pool. A panic inside the extractor is
/// reported as [`ScraperError::PdfExtraction`].
///
/// # Errors
///
/// Propagates the extractor's error.
pub async fn extract_text_blocking(
    extractor: Arc<dyn PdfTextExtractor>,
    bytes: Vec<u8>,
) -> Result<String, ScraperError> {
    tokio::task::spawn_blocking(move || extractor.extract_text(&bytes))
        .await
        .map_err(|e| ScraperError::PdfExtraction {
            reason: format!("extractor task failed: {e}"),
        })?
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Panicking;

    impl PdfTextExtractor for Panicking {
        fn extract_text(&self, _bytes: &[u8]) -> Result<String, ScraperError> {
            panic!("malformed xref table");
        }
    }

    #[test]
    fn garbage_bytes_are_an_extraction_error() {
        let err = PdfExtractText.extract_text(b"not a pdf").unwrap_err();
        assert!(matches!(err, ScraperError::PdfExtraction { .. }));
    }

    #[tokio::test]
    async fn panic_in_extractor_becomes_error() {
        let err = extract_text_blocking(Arc::new(Panicking), vec![1, 2, 3])
            .await
            .unwrap_err();
        assert!(matches!(err, ScraperError::PdfExtraction { .. }));
    }
}
