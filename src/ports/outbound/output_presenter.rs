use crate::shared::Result;

/// OutputPresenter port for presenting rendered output
///
/// Abstracts the output destination (stdout, file) so the orchestrator
/// does not depend on where rendered frames end up.
pub trait OutputPresenter {
    /// Presents the rendered content
    ///
    /// # Arguments
    /// * `content` - The rendered output to present
    fn present(&self, content: &str) -> Result<()>;
}
