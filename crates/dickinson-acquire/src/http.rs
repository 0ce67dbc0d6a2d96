use crate::config::ScrapeConfig;
use crate::error::{AcquireError, Result};
use std::future::Future;

/// Anything that can turn a URL into an HTML body.
///
/// The pipeline only talks to the network through this trait, so tests can
/// hand it a fixed set of pages instead of a live client.
pub trait PageSource {
    fn fetch(&self, url: &str) -> impl Future<Output = Result<String>> + Send;
}

/// The HTTP client shared by every request of a run.
#[derive(Debug)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(config: &ScrapeConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout)
            .build()
            .map_err(AcquireError::Client)?;

        Ok(Self { client })
    }
}

impl PageSource for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| AcquireError::Request {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(AcquireError::Status {
                url: url.to_string(),
                status,
            });
        }

        let body = response.text().await.map_err(|source| AcquireError::Body {
            url: url.to_string(),
            source,
        })?;
        tracing::debug!(url = %url, bytes = body.len(), "Received HTML");

        Ok(body)
    }
}
