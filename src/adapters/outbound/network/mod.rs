pub mod http_metric_source;

pub use http_metric_source::HttpMetricSource;
