// HTTP template source backed by reqwest
use crate::application::template_source::TemplateSource;
use anyhow::{Context, Result};
use async_trait::async_trait;
use bytes::Bytes;
use std::time::Duration;

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct HttpTemplateSource {
    client: reqwest::Client,
}

impl HttpTemplateSource {
    pub fn new(timeout: Duration) -> reqwest::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl TemplateSource for HttpTemplateSource {
    async fn fetch_template(&self, url: &str) -> Result<Bytes> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .with_context(|| format!("Failed to send request to {}", url))?;

        if !response.status().is_success() {
            anyhow::bail!("Template download from {} failed with status {}", url, response.status());
        }

        let body = response
            .bytes()
            .await
            .with_context(|| format!("Failed to read template body from {}", url))?;

        tracing::debug!("Downloaded {} bytes from {}", body.len(), url);
        Ok(body)
    }
}
