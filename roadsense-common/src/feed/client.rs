//! HTTP client for the 511 road-event API

use std::time::Instant;

use async_trait::async_trait;
use serde_json::Value;

use super::{records_from_payload, EventSource, FeedError};
use crate::config::FeedConfig;
use crate::events::RawEventRecord;

/// Fetches the full event collection with a single GET
pub struct FeedClient {
    http_client: reqwest::Client,
    url: String,
    query: Vec<(String, String)>,
}

impl FeedClient {
    pub fn new(config: &FeedConfig) -> Result<Self, FeedError> {
        let http_client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout())
            .build()
            .map_err(|e| FeedError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            url: config.url.clone(),
            query: config.query(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl EventSource for FeedClient {
    fn source_id(&self) -> &str {
        &self.url
    }

    async fn fetch(&self) -> Result<Vec<RawEventRecord>, FeedError> {
        let start = Instant::now();
        tracing::debug!(url = %self.url, "Fetching road events");

        let response = self
            .http_client
            .get(&self.url)
            .query(&self.query)
            .send()
            .await
            .map_err(|e| FeedError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::warn!(
                url = %self.url,
                status = status.as_u16(),
                "Feed returned an error status"
            );
            return Err(FeedError::Api(status.as_u16(), error_text));
        }

        let payload: Value = response
            .json()
            .await
            .map_err(|e| FeedError::Parse(e.to_string()))?;
        let records = records_from_payload(payload)?;

        tracing::info!(
            url = %self.url,
            records = records.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Fetched road events"
        );

        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = FeedClient::new(&FeedConfig::default());
        assert!(client.is_ok());
        assert_eq!(client.unwrap().url(), crate::config::DEFAULT_FEED_URL);
    }
}
