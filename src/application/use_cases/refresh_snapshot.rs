use crate::ports::outbound::{MetricSource, ProgressReporter};
use crate::roc::domain::{MetricDocument, RocSnapshot, DOCUMENT_NAMES};
use futures::stream::{self, StreamExt};
use std::collections::HashMap;

/// Concurrency limit for the batch fetch, to avoid overwhelming the
/// metric source.
const MAX_CONCURRENT: usize = 10;

/// RefreshSnapshotUseCase - fan-out/fan-in fetch of the full ROC
/// document set.
///
/// Every fetch is issued without waiting for the others and the use case
/// suspends only at the single join point where all of them have settled
/// (succeeded or degraded to None). The join itself cannot fail, and the
/// snapshot is built in one assignment after it - a render pass never
/// observes a partially-updated document set.
///
/// # Type Parameters
/// * `S` - MetricSource implementation
/// * `PR` - ProgressReporter implementation
pub struct RefreshSnapshotUseCase<S, PR> {
    source: S,
    progress_reporter: PR,
}

impl<S, PR> RefreshSnapshotUseCase<S, PR>
where
    S: MetricSource,
    PR: ProgressReporter,
{
    /// Creates a new RefreshSnapshotUseCase with injected dependencies
    pub fn new(source: S, progress_reporter: PR) -> Self {
        Self {
            source,
            progress_reporter,
        }
    }

    /// Fetches every ROC metric document and assembles the snapshot.
    ///
    /// Never errors: unavailable documents simply leave their slot empty,
    /// which downstream consumers render as "no visibility".
    pub async fn execute(&self) -> RocSnapshot {
        let total = DOCUMENT_NAMES.len();
        self.progress_reporter
            .report(&format!("⬇️  Fetching {} metric documents...", total));

        let source = &self.source;
        let mut fetches = stream::iter(DOCUMENT_NAMES)
            .map(|name| async move { (name, source.fetch(name).await) })
            .buffer_unordered(MAX_CONCURRENT);

        let mut documents: HashMap<String, MetricDocument> = HashMap::new();
        let mut settled = 0;
        while let Some((name, document)) = fetches.next().await {
            settled += 1;
            self.progress_reporter
                .report_progress(settled, total, Some(name));
            if let Some(document) = document {
                documents.insert(name.to_string(), document);
            }
        }

        let available = documents.len();
        self.progress_reporter.report_completion(&format!(
            "✅ Metric fetch complete: {} available, {} without visibility",
            available,
            total - available
        ));

        RocSnapshot::from_documents(documents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::outbound::MetricSource;
    use async_trait::async_trait;
    use serde_json::json;
    use std::collections::HashMap;

    struct MockMetricSource {
        documents: HashMap<String, serde_json::Value>,
    }

    #[async_trait]
    impl MetricSource for MockMetricSource {
        async fn fetch(&self, name: &str) -> Option<MetricDocument> {
            self.documents
                .get(name)
                .cloned()
                .and_then(MetricDocument::from_json)
        }
    }

    struct MockProgressReporter;

    impl ProgressReporter for MockProgressReporter {
        fn report(&self, _message: &str) {}
        fn report_progress(&self, _current: usize, _total: usize, _message: Option<&str>) {}
        fn report_error(&self, _message: &str) {}
        fn report_completion(&self, _message: &str) {}
    }

    #[tokio::test]
    async fn test_execute_fills_available_slots_only() {
        let mut documents = HashMap::new();
        documents.insert("riskScore".to_string(), json!({"data": 72}));
        documents.insert(
            "riskExposure".to_string(),
            json!({"data": [], "windowEnd": "2024-01-31T00:00:00Z"}),
        );

        let use_case =
            RefreshSnapshotUseCase::new(MockMetricSource { documents }, MockProgressReporter);
        let snapshot = use_case.execute().await;

        assert!(snapshot.risk_score.is_some());
        assert!(snapshot.risk_exposure.is_some());
        assert!(snapshot.sla_health.is_none());
        assert!(snapshot.incidents_by_title.is_none());
    }

    #[tokio::test]
    async fn test_execute_with_empty_source_yields_empty_snapshot() {
        let use_case = RefreshSnapshotUseCase::new(
            MockMetricSource {
                documents: HashMap::new(),
            },
            MockProgressReporter,
        );
        let snapshot = use_case.execute().await;
        assert!(snapshot.is_empty());
    }
}
