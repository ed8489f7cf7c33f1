//! Contentful Content Delivery API client

use crate::ContentSource;
use anyhow::{Context, Result};
use async_trait::async_trait;
use bistro_core::{models::MenuEntry, AppError, ContentConfig};
use serde::Deserialize;
use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::time::Duration;

const REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Deserialize)]
struct EntriesResponse {
    #[serde(default)]
    items: Vec<serde_json::Value>,
}

#[derive(Clone)]
struct Credentials {
    space_id: String,
    access_token: String,
}

/// Client for the Contentful delivery API
#[derive(Clone)]
pub struct ContentfulClient {
    http_client: reqwest::Client,
    host: String,
    environment: String,
    credentials: Option<Credentials>,
}

impl Debug for ContentfulClient {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("ContentfulClient")
            .field("host", &self.host)
            .field("environment", &self.environment)
            .field("configured", &self.credentials.is_some())
            .finish()
    }
}

impl ContentfulClient {
    /// Build a client. Missing credentials are accepted here and reported per request.
    pub fn new(config: &ContentConfig) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .context("Failed to create HTTP client for Contentful")?;

        let credentials = match (&config.space_id, &config.access_token) {
            (Some(space_id), Some(access_token)) => Some(Credentials {
                space_id: space_id.clone(),
                access_token: access_token.clone(),
            }),
            _ => None,
        };

        Ok(Self {
            http_client,
            host: config.host.trim_end_matches('/').to_string(),
            environment: config.environment.clone(),
            credentials,
        })
    }

    fn entries_url(&self, space_id: &str) -> String {
        format!(
            "{}/spaces/{}/environments/{}/entries",
            self.host, space_id, self.environment
        )
    }

    async fn fetch_entries(&self, credentials: &Credentials, content_type: &str) -> Result<Vec<MenuEntry>> {
        let url = self.entries_url(&credentials.space_id);

        let response = self
            .http_client
            .get(&url)
            .bearer_auth(&credentials.access_token)
            .query(&[("content_type", content_type)])
            .send()
            .await
            .context("Failed to send request to Contentful")?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(anyhow::anyhow!(
                "Contentful request failed: {} - {}",
                status,
                error_text
            ));
        }

        let body: EntriesResponse = response
            .json()
            .await
            .context("Failed to parse Contentful response")?;

        Ok(body.items.into_iter().map(MenuEntry::from).collect())
    }
}

#[async_trait]
impl ContentSource for ContentfulClient {
    #[tracing::instrument(skip(self), fields(content.environment = %self.environment))]
    async fn list_entries(&self, content_type: &str) -> Result<Vec<MenuEntry>, AppError> {
        let credentials = self.credentials.as_ref().ok_or_else(|| {
            AppError::Upstream(
                "CONTENTFUL_SPACE_ID and CONTENTFUL_ACCESS_TOKEN must be set".to_string(),
            )
        })?;

        let entries = self
            .fetch_entries(credentials, content_type)
            .await
            .map_err(|e| AppError::Upstream(format!("{:#}", e)))?;

        tracing::debug!(count = entries.len(), "Fetched content entries");

        Ok(entries)
    }
}
