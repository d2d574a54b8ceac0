use std::time::Duration;

use tracing::debug;

use crate::settings::Settings;
use crate::error::Result;

/// One-shot HTTP client for the current-icebergs listing page.
pub struct PageFetcher {
    client: reqwest::Client,
    url: String,
}

impl PageFetcher {
    pub fn new(settings: &Settings) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.request_timeout))
            .user_agent(settings.user_agent.clone())
            .build()?;

        Ok(Self {
            client,
            url: settings.source_url.clone(),
        })
    }

    /// Fetch the page body, failing on any non-success status
    pub async fn fetch(&self) -> Result<String> {
        debug!(url = %self.url, "requesting iceberg listing");
        let response = self
            .client
            .get(&self.url)
            .send()
            .await?
            .error_for_status()?;

        Ok(response.text().await?)
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}
