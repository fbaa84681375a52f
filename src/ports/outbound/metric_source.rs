use crate::roc::domain::MetricDocument;
use async_trait::async_trait;

/// MetricSource port for retrieving named metric documents.
///
/// Implementations never raise to the caller: a transport failure, a
/// non-success status, a malformed body, or the explicit
/// `not_implemented` sentinel all degrade to `None` after being logged,
/// so every consumer applies uniform "no visibility" handling and the
/// batch join over many fetches cannot fail.
#[async_trait]
pub trait MetricSource: Send + Sync {
    /// Fetches one metric document by name (filename convention
    /// `<name>.30d.json` at the source).
    async fn fetch(&self, name: &str) -> Option<MetricDocument>;
}

#[async_trait]
impl MetricSource for Box<dyn MetricSource> {
    async fn fetch(&self, name: &str) -> Option<MetricDocument> {
        (**self).fetch(name).await
    }
}
