use std::time::Duration;

use reqwest::{Client, Response, Url};

use crate::error::ScraperError;

/// HTTP client used by every menu source.
///
/// One attempt per call; non-2xx responses come back as typed errors
/// (404 as [`ScraperError::NotFound`], the rest as
/// [`ScraperError::UnexpectedStatus`]).
#[derive(Debug, Clone)]
pub struct MenuClient {
    client: Client,
}

impl MenuClient {
    /// Creates a `MenuClient` with the default request timeout and `User-Agent`.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed (e.g., invalid TLS config).
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client })
    }

    /// Fetches `url` and returns the response body as text.
    ///
    /// `timeout` overrides the client-wide timeout for this request.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::NotFound`] on HTTP 404.
    /// - [`ScraperError::UnexpectedStatus`] on any other non-2xx status.
    /// - [`ScraperError::Http`] on network, TLS or timeout failure.
    pub async fn fetch_html(
        &self,
        url: &str,
        timeout: Option<Duration>,
    ) -> Result<String, ScraperError> {
        let response = self.get(url, timeout).await?;
        Ok(response.text().await?)
    }

    /// Fetches `url` and returns the raw response body.
    ///
    /// # Errors
    ///
    /// Same as [`Self::fetch_html`].
    pub async fn fetch_bytes(
        &self,
        url: &str,
        timeout: Option<Duration>,
    ) -> Result<Vec<u8>, ScraperError> {
        let response = self.get(url, timeout).await?;
        Ok(response.bytes().await?.to_vec())
    }

    async fn get(&self, url: &str, timeout: Option<Duration>) -> Result<Response, ScraperError> {
        let mut request = self.client.get(url);
        if let Some(timeout) = timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ScraperError::NotFound {
                url: url.to_owned(),
            });
        }

        if !status.is_success() {
            return Err(ScraperError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_owned(),
            });
        }

        tracing::debug!(url, status = status.as_u16(), "fetched");
        Ok(response)
    }
}

/// Resolves `href` against `base`, accepting absolute and relative links.
///
/// # Errors
///
/// Returns [`ScraperError::InvalidUrl`] if `base` is not a valid absolute
/// URL or `href` cannot be joined onto it.
pub fn resolve_url(base: &str, href: &str) -> Result<String, ScraperError> {
    let base_url = Url::parse(base).map_err(|e| ScraperError::InvalidUrl {
        url: base.to_owned(),
        reason: e.to_string(),
    })?;
    base_url
        .join(href.trim())
        .map(String::from)
        .map_err(|e| ScraperError::InvalidUrl {
            url: href.to_owned(),
            reason: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_url_keeps_absolute_href() {
        let resolved = resolve_url(
            "https://eatery.se/anlaggningar/lund",
            "https://cdn.eatery.se/menu.pdf",
        )
        .unwrap();
        assert_eq!(resolved, "https://cdn.eatery.se/menu.pdf");
    }

    #[test]
    fn resolve_url_joins_root_relative_href() {
        let resolved = resolve_url(
            "https://eatery.se/anlaggningar/lund",
            "/wp-content/uploads/lunchmeny.pdf",
        )
        .unwrap();
        assert_eq!(
            resolved,
            "https://eatery.se/wp-content/uploads/lunchmeny.pdf"
        );
    }

    #[test]
    fn resolve_url_rejects_relative_base() {
        let err = resolve_url("/lund", "menu.pdf").unwrap_err();
        assert!(matches!(err, ScraperError::InvalidUrl { .. }));
    }
}
