use crate::roc::domain::{WidgetPayload, WidgetReport};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// The unified render-ready view of one evaluated pass.
///
/// This is what crosses the render seam: the analyst-selected window,
/// the snapshot's freshness metadata, and every widget payload in the
/// fixed render order. Renderers consume it read-only; two frames built
/// from the same snapshot and window are equal field for field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardFrame {
    pub window_days: u32,
    pub reference_instant: Option<DateTime<Utc>>,
    pub generated_at: Option<DateTime<Utc>>,
    pub widgets: Vec<WidgetReport>,
}

impl DashboardFrame {
    /// True when every widget degraded to no-visibility - the signal
    /// that the data source itself is unreachable or empty.
    pub fn all_unavailable(&self) -> bool {
        !self.widgets.is_empty()
            && self
                .widgets
                .iter()
                .all(|report| matches!(report.payload, WidgetPayload::NoVisibility { .. }))
    }

    /// Count of widgets that produced a chart-ready aggregate
    pub fn ready_count(&self) -> usize {
        self.widgets
            .iter()
            .filter(|report| report.payload.is_ready())
            .count()
    }
}
