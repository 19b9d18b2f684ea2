// Port for fetching raw dashboard templates
use async_trait::async_trait;
use bytes::Bytes;

#[async_trait]
pub trait TemplateSource: Send + Sync {
    /// Fetch the raw template body at `url`; non-success responses are errors
    async fn fetch_template(&self, url: &str) -> anyhow::Result<Bytes>;
}
