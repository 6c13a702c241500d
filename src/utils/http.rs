//! HTTP client utilities.

use reqwest::{Client, RequestBuilder};
use std::time::Duration;
use url::Url;

use crate::config::SiteConfig;
use crate::sources::SourceError;
use crate::utils::urls;

/// HTTP client bound to one site origin
///
/// Every request carries the configured user agent. The configured timeout bounds
/// connecting and each read, so a download that keeps receiving data is never cut
/// off; page fetches additionally get it as a deadline on the whole request.
/// Relative targets are joined onto the base URL.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: Url,
    timeout: Duration,
}

impl HttpClient {
    /// Create a client from site settings
    pub fn new(site: &SiteConfig) -> Result<Self, SourceError> {
        let base_url = urls::parse_base(&site.base_url)?;

        let timeout = Duration::from_secs(site.timeout_secs);

        let client = Client::builder()
            .user_agent(site.user_agent.as_str())
            .connect_timeout(timeout)
            .read_timeout(timeout)
            .build()
            .map_err(|e| SourceError::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url,
            timeout,
        })
    }

    /// The origin relative targets are resolved against
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve `target` against the base URL
    pub fn url_for(&self, target: &str) -> Result<String, SourceError> {
        urls::resolve(target, &self.base_url)
    }

    /// Start a GET request for `target`
    pub fn get(&self, target: &str) -> Result<RequestBuilder, SourceError> {
        Ok(self.client.get(self.url_for(target)?))
    }

    /// Fetch `target` and return its body as text, failing on non-2xx statuses
    pub async fn get_text(&self, target: &str) -> Result<String, SourceError> {
        let response = self
            .get(target)?
            .header("Accept", "text/html")
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| SourceError::Network(format!("Failed to fetch {}: {}", target, e)))?;

        if !response.status().is_success() {
            return Err(SourceError::Api(format!(
                "{} returned status: {}",
                target,
                response.status()
            )));
        }

        response
            .text()
            .await
            .map_err(|e| SourceError::Parse(format!("Failed to read HTML: {}", e)))
    }
}
