//! HTTP client for reading post pages.

use std::time::Duration;

use reqwest::Client;

use crate::document::PageDocument;
use crate::error::ScraperError;

const ACCEPT_HTML: &str =
    "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,*/*;q=0.8";
const ACCEPT_LANGUAGE: &str = "zh-CN,zh;q=0.9,en-US;q=0.8,en;q=0.7";
const REFERER: &str = "https://www.google.com/";

/// Fetches post pages the way a mobile browser arriving from a search result
/// would. Redirects are followed automatically; the address the body was
/// finally read from is kept on the returned [`PageDocument`].
pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    /// Creates a `Fetcher` whose requests time out after `timeout_secs`.
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

    /// GETs `url` and wraps the body in a [`PageDocument`].
    ///
    /// # Errors
    ///
    /// - [`ScraperError::UnexpectedStatus`]: any non-2xx final status.
    /// - [`ScraperError::Http`]: network, TLS, timeout, or body decode failure.
    pub async fn fetch_document(&self, url: &str) -> Result<PageDocument, ScraperError> {
        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, ACCEPT_HTML)
            .header(reqwest::header::ACCEPT_LANGUAGE, ACCEPT_LANGUAGE)
            .header(reqwest::header::REFERER, REFERER)
            .send()
            .await?;

        let status = response.status();
        let final_url = response.url().to_string();
        if !status.is_success() {
            tracing::warn!(url, status = status.as_u16(), "page fetch returned non-2xx");
            return Err(ScraperError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_owned(),
            });
        }

        let html = response.text().await?;
        tracing::debug!(url, final_url = %final_url, bytes = html.len(), "fetched page");
        Ok(PageDocument::new(html, final_url))
    }
}
