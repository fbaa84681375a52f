pub mod mock_metric_source;
pub mod mock_progress_reporter;
pub mod recording_presenter;

pub use mock_metric_source::MockMetricSource;
pub use mock_progress_reporter::MockProgressReporter;
pub use recording_presenter::RecordingPresenter;
