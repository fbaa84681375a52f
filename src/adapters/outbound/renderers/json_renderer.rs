use crate::application::read_models::DashboardFrame;
use crate::ports::outbound::DashboardRenderer;
use crate::shared::Result;

/// JsonRenderer adapter producing the machine-readable frame document.
///
/// Output is deterministic: field order follows the struct definitions
/// and widget order is the fixed render order, so rendering the same
/// frame twice yields byte-identical documents.
pub struct JsonRenderer;

impl JsonRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl DashboardRenderer for JsonRenderer {
    fn render(&self, frame: &DashboardFrame) -> Result<String> {
        serde_json::to_string_pretty(frame)
            .map_err(|e| anyhow::anyhow!("Failed to serialize dashboard frame: {}", e))
    }
}
