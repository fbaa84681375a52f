use crate::ports::outbound::MetricSource;
use crate::roc::domain::MetricDocument;
use crate::shared::Result;
use async_trait::async_trait;
use rand::Rng;
use std::time::Duration;

/// Bounded random delay before each request, in milliseconds. Spreads
/// the batch out so the loading-state UI is exercised and the data
/// source never sees the whole fan-out land in the same instant.
const JITTER_MIN_MS: u64 = 200;
const JITTER_MAX_MS: u64 = 500;

/// HttpMetricSource adapter for fetching metric documents over HTTP.
///
/// Implements the MetricSource port against a base URL serving static
/// `<name>.30d.json` documents. Every failure mode - network error,
/// non-success status, malformed body, `not_implemented` sentinel - is
/// logged to stderr and degraded to `None`, never raised.
pub struct HttpMetricSource {
    client: reqwest::Client,
    base_url: String,
}

impl HttpMetricSource {
    const TIMEOUT_SECONDS: u64 = 10;

    /// Creates a new HTTP metric source for a base URL
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let version = env!("CARGO_PKG_VERSION");
        let user_agent = format!("roc-dash/{}", version);
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(Self::TIMEOUT_SECONDS))
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Validates a document name for URL safety
    fn validate_document_name(name: &str) -> Result<()> {
        if name.contains('/') || name.contains('\\') || name.contains("..") {
            anyhow::bail!("Document name contains path separators which are not allowed");
        }
        if name.contains('#') || name.contains('?') || name.contains('@') {
            anyhow::bail!("Document name contains URL-unsafe characters");
        }
        Ok(())
    }

    async fn fetch_document(&self, name: &str) -> Result<MetricDocument> {
        Self::validate_document_name(name)?;

        let encoded = urlencoding::encode(name);
        let url = format!("{}/{}.30d.json", self.base_url, encoded);

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            anyhow::bail!("Metric source returned status code {}", response.status());
        }

        let body: serde_json::Value = response.json().await?;
        MetricDocument::from_json(body)
            .ok_or_else(|| anyhow::anyhow!("Metric document body is neither object nor array"))
    }
}

#[async_trait]
impl MetricSource for HttpMetricSource {
    async fn fetch(&self, name: &str) -> Option<MetricDocument> {
        let delay = rand::thread_rng().gen_range(JITTER_MIN_MS..=JITTER_MAX_MS);
        tokio::time::sleep(Duration::from_millis(delay)).await;

        match self.fetch_document(name).await {
            Ok(document) if document.not_implemented() => {
                let reason = document
                    .message
                    .as_deref()
                    .unwrap_or("no reason given");
                eprintln!("⚠️  Metric '{}' is not implemented at the source: {}", name, reason);
                None
            }
            Ok(document) => Some(document),
            Err(e) => {
                eprintln!("⚠️  Warning: Failed to fetch metric '{}': {}", name, e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_source_creation() {
        let source = HttpMetricSource::new("https://metrics.example.com/roc/");
        assert!(source.is_ok());
        assert_eq!(source.unwrap().base_url, "https://metrics.example.com/roc");
    }

    #[test]
    fn test_validate_document_name_accepts_plain_names() {
        assert!(HttpMetricSource::validate_document_name("riskExposure").is_ok());
        assert!(HttpMetricSource::validate_document_name("slaHealth").is_ok());
    }

    #[test]
    fn test_validate_document_name_rejects_path_tricks() {
        assert!(HttpMetricSource::validate_document_name("../etc/passwd").is_err());
        assert!(HttpMetricSource::validate_document_name("a/b").is_err());
        assert!(HttpMetricSource::validate_document_name("a?x=1").is_err());
        assert!(HttpMetricSource::validate_document_name("a#frag").is_err());
    }

    #[tokio::test]
    async fn test_fetch_unreachable_host_degrades_to_none() {
        let source = HttpMetricSource::new("http://127.0.0.1:1").unwrap();
        assert!(source.fetch("riskScore").await.is_none());
    }
}
