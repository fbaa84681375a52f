pub mod dir_metric_source;
pub mod file_writer;

pub use dir_metric_source::DirMetricSource;
pub use file_writer::{FileSystemWriter, StdoutPresenter};
