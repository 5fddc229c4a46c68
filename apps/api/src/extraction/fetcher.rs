//! Page retrieval. The extractor only sees `PageFetcher`; `HttpPageFetcher`
//! is the production implementation.

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;
use url::Url;

use super::ExtractionError;

/// Browser-like User-Agent; the encyclopedia throttles anonymous clients.
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
    (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Fetches raw HTML. Non-success statuses and transport failures are both
/// reported as `ExtractionError::Fetch`.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &Url) -> Result<String, ExtractionError>;
}

#[derive(Clone)]
pub struct HttpPageFetcher {
    client: reqwest::Client,
}

impl HttpPageFetcher {
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl PageFetcher for HttpPageFetcher {
    async fn fetch(&self, url: &Url) -> Result<String, ExtractionError> {
        let response = self
            .client
            .get(url.clone())
            .header(reqwest::header::ACCEPT, "text/html,application/xhtml+xml")
            .send()
            .await
            .map_err(|e| ExtractionError::Fetch {
                status: None,
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ExtractionError::Fetch {
                status: Some(status.as_u16()),
                message: format!("HTTP {status} for {url}"),
            });
        }

        let body = response.text().await.map_err(|e| ExtractionError::Fetch {
            status: Some(status.as_u16()),
            message: format!("failed to read response body: {e}"),
        })?;

        debug!("Fetched {} bytes from {}", body.len(), url);
        Ok(body)
    }
}
