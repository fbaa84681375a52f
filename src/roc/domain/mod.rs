/// Domain layer for the ROC aggregation core.
///
/// Pure data types and window math; no I/O. The services module holds the
/// pure reducers that turn filtered record sets into chart-ready views.
pub mod document;
pub mod record;
pub mod snapshot;
pub mod widget;
pub mod window;

pub use document::{DocumentStatus, MetricData, MetricDocument, RenderHints};
pub use record::MetricRecord;
pub use snapshot::{RocSnapshot, DOCUMENT_NAMES};
pub use widget::{
    AggregatedView, CategoryCount, Confidence, DepartmentPercent, TrendPoint, ViewKind,
    WidgetId, WidgetPayload, WidgetReport,
};
pub use window::{resolve_window, DateWindow, WindowPreset, DEFAULT_WINDOW_DAYS};
