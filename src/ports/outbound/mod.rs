/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces the aggregation core uses to reach
/// external systems (metric data source, render targets, console).
pub mod metric_source;
pub mod output_presenter;
pub mod progress_reporter;
pub mod renderer;

pub use metric_source::MetricSource;
pub use output_presenter::OutputPresenter;
pub use progress_reporter::ProgressReporter;
pub use renderer::DashboardRenderer;
