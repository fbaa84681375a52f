use crate::application::read_models::DashboardFrame;
use crate::shared::Result;

/// DashboardRenderer port for turning an evaluated frame into output.
///
/// This is the seam at which the excluded rendering layer takes over:
/// the core hands a fully-aggregated frame across and never touches
/// presentation concerns itself.
pub trait DashboardRenderer {
    /// Renders a frame to its final textual form
    ///
    /// # Errors
    /// Returns an error if serialization fails
    fn render(&self, frame: &DashboardFrame) -> Result<String>;
}
