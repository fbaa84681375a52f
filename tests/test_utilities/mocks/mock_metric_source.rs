use async_trait::async_trait;
use roc_dash::prelude::{MetricDocument, MetricSource};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// In-memory metric source for tests.
///
/// Serves documents from a name -> JSON map and counts fetch calls so
/// tests can assert that window changes never trigger a fetch.
pub struct MockMetricSource {
    documents: HashMap<String, serde_json::Value>,
    fetch_count: Arc<AtomicUsize>,
}

impl MockMetricSource {
    pub fn new(documents: HashMap<String, serde_json::Value>) -> Self {
        Self {
            documents,
            fetch_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn empty() -> Self {
        Self::new(HashMap::new())
    }

    /// Shared handle to the fetch counter
    pub fn fetch_counter(&self) -> Arc<AtomicUsize> {
        self.fetch_count.clone()
    }
}

#[async_trait]
impl MetricSource for MockMetricSource {
    async fn fetch(&self, name: &str) -> Option<MetricDocument> {
        self.fetch_count.fetch_add(1, Ordering::Relaxed);
        self.documents
            .get(name)
            .cloned()
            .and_then(MetricDocument::from_json)
    }
}
