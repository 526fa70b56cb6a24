use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use lunch_core::{AppConfig, RestaurantMenus, SourceConfig};

use crate::client::MenuClient;
use crate::error::ScraperError;
use crate::pdf::{PdfExtractText, PdfTextExtractor};
use crate::sources::scrape_or_empty;

/// Runs every enabled source concurrently and gathers the results.
#[derive(Clone)]
pub struct Aggregator {
    client: MenuClient,
    pdf: Arc<dyn PdfTextExtractor>,
    pdf_timeout: Duration,
    sources: Arc<[SourceConfig]>,
}

impl Aggregator {
    pub fn new(
        client: MenuClient,
        pdf: Arc<dyn PdfTextExtractor>,
        pdf_timeout: Duration,
        sources: Vec<SourceConfig>,
    ) -> Self {
        Self {
            client,
            pdf,
            pdf_timeout,
            sources: sources.into(),
        }
    }

    /// Builds the HTTP client and PDF extractor from application config.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the HTTP client cannot be constructed.
    pub fn from_config(config: &AppConfig, sources: Vec<SourceConfig>) -> Result<Self, ScraperError> {
        let client = MenuClient::new(
            config.scraper_request_timeout_secs,
            &config.scraper_user_agent,
        )?;
        Ok(Self::new(
            client,
            Arc::new(PdfExtractText),
            Duration::from_secs(config.scraper_pdf_timeout_secs),
            sources,
        ))
    }

    /// Scrapes all enabled sources, one task each.
    ///
    /// Never fails: a source whose fetch, parse or task fails is present in
    /// the result with an empty list, and the other sources are unaffected.
    pub async fn collect(&self) -> RestaurantMenus {
        let tasks = self
            .sources
            .iter()
            .filter(|source| source.enabled)
            .cloned()
            .map(|source| {
                let client = self.client.clone();
                let pdf = Arc::clone(&self.pdf);
                let pdf_timeout = self.pdf_timeout;
                let id = source.id;
                let handle = tokio::spawn(async move {
                    scrape_or_empty(&client, &pdf, pdf_timeout, &source).await
                });
                async move { (id, handle.await) }
            });

        let mut menus = RestaurantMenus::new();
        for (id, joined) in join_all(tasks).await {
            let entries = joined.unwrap_or_else(|e| {
                let error = ScraperError::Task(e.to_string());
                tracing::error!(source = %id, error = %error, "scrape task failed");
                Vec::new()
            });
            menus.insert(id, entries);
        }

        tracing::info!(
            sources = menus.len(),
            entries = menus.entry_count(),
            "menu aggregation complete"
        );
        menus
    }
}
