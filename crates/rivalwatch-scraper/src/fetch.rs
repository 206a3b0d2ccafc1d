//! HTTP client for monitored competitor pages.

use std::time::Duration;

use reqwest::Client;
use rivalwatch_core::AppConfig;

use crate::error::ScraperError;

/// A successfully fetched page: the raw HTML plus where it was served from.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// URL after redirects.
    pub url: String,
    pub status: u16,
    pub body: String,
}

/// Single-attempt page fetcher with a fixed timeout and browser identity.
///
/// Network failures, timeouts, and non-2xx responses are returned as typed
/// errors. Nothing is retried; a failed page is simply picked up again on the
/// next scan.
#[derive(Debug, Clone)]
pub struct PageFetcher {
    client: Client,
    timeout: Duration,
}

impl PageFetcher {
    /// Creates a fetcher whose requests are bounded by `timeout` end to end.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed (e.g., invalid TLS config).
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client, timeout })
    }

    /// Builds a fetcher from the application's scraper settings.
    ///
    /// # Errors
    ///
    /// See [`PageFetcher::new`].
    pub fn from_config(config: &AppConfig) -> Result<Self, ScraperError> {
        Self::new(
            Duration::from_secs(config.scraper_request_timeout_secs),
            &config.scraper_user_agent,
        )
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// GET `url` and return its body.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::InvalidUrl`] if `url` does not parse.
    /// - [`ScraperError::Timeout`] if the request exceeds the configured timeout.
    /// - [`ScraperError::UnexpectedStatus`] for any non-2xx status.
    /// - [`ScraperError::Http`] for other network or TLS failures.
    pub async fn fetch(&self, url: &str) -> Result<FetchedPage, ScraperError> {
        let parsed = reqwest::Url::parse(url).map_err(|e| ScraperError::InvalidUrl {
            url: url.to_owned(),
            reason: e.to_string(),
        })?;

        let response = self
            .client
            .get(parsed)
            .header(
                reqwest::header::ACCEPT,
                "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
            )
            .header(reqwest::header::ACCEPT_LANGUAGE, "en-US,en;q=0.9")
            .send()
            .await
            .map_err(|e| self.classify(e, url))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScraperError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_owned(),
            });
        }

        let final_url = response.url().to_string();
        let body = response.text().await.map_err(|e| self.classify(e, url))?;

        tracing::debug!(url, status = status.as_u16(), bytes = body.len(), "fetched page");

        Ok(FetchedPage {
            url: final_url,
            status: status.as_u16(),
            body,
        })
    }

    fn classify(&self, err: reqwest::Error, url: &str) -> ScraperError {
        if err.is_timeout() {
            ScraperError::Timeout {
                url: url.to_owned(),
                timeout: self.timeout,
            }
        } else {
            ScraperError::Http(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_records_timeout() {
        let fetcher = PageFetcher::new(Duration::from_secs(10), "test-agent").unwrap();
        assert_eq!(fetcher.timeout(), Duration::from_secs(10));
    }

    #[tokio::test]
    async fn fetch_rejects_unparseable_url() {
        let fetcher = PageFetcher::new(Duration::from_secs(1), "test-agent").unwrap();
        let err = fetcher.fetch("not a url").await.unwrap_err();
        assert!(
            matches!(err, ScraperError::InvalidUrl { ref url, .. } if url == "not a url"),
            "expected InvalidUrl, got: {err:?}"
        );
    }
}
