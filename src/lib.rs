//! roc-dash - Risk Operations Center dashboard engine
//!
//! This library fetches precomputed security-operations metric documents
//! (static JSON), holds them as an immutable snapshot, and re-derives
//! every ROC widget payload for an analyst-selected trailing window in
//! one deterministic pass. It follows hexagonal architecture: the
//! aggregation core is pure, and rendering, transport, and the console
//! are adapters behind ports.
//!
//! # Architecture
//!
//! - **Domain Layer** (`roc`): snapshot, window math, temporal filter,
//!   and the pure aggregation reducers
//! - **Application Layer** (`application`): the batch-fetch use case and
//!   the render orchestrator
//! - **Ports** (`ports`): interface definitions for infrastructure
//! - **Adapters** (`adapters`): HTTP/directory metric sources, renderers,
//!   presenters, console progress
//! - **Shared** (`shared`): common utilities and error types
//!
//! # Example
//!
//! ```no_run
//! use roc_dash::prelude::*;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<()> {
//! // Create adapters
//! let source = DirMetricSource::new("/var/lib/roc/metrics");
//! let progress_reporter = StderrProgressReporter::new();
//!
//! // Fetch the full document set concurrently
//! let refresh = RefreshSnapshotUseCase::new(source, progress_reporter);
//! let snapshot = refresh.execute().await;
//!
//! // Render the 14-day view
//! let mut orchestrator = DashboardOrchestrator::new(
//!     Box::new(JsonRenderer::new()),
//!     Box::new(StdoutPresenter::new()),
//!     WindowPreset::Fourteen,
//! );
//! orchestrator.replace_snapshot(snapshot)?;
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod config;
pub mod ports;
pub mod roc;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::StderrProgressReporter;
    pub use crate::adapters::outbound::filesystem::{
        DirMetricSource, FileSystemWriter, StdoutPresenter,
    };
    pub use crate::adapters::outbound::network::HttpMetricSource;
    pub use crate::adapters::outbound::renderers::{ConsoleRenderer, JsonRenderer};
    pub use crate::application::factories::{RendererFactory, RendererType};
    pub use crate::application::read_models::DashboardFrame;
    pub use crate::application::use_cases::{
        build_frame, evaluate, DashboardOrchestrator, RefreshSnapshotUseCase,
    };
    pub use crate::ports::outbound::{
        DashboardRenderer, MetricSource, OutputPresenter, ProgressReporter,
    };
    pub use crate::roc::domain::{
        resolve_window, AggregatedView, CategoryCount, Confidence, DateWindow, DepartmentPercent,
        MetricData, MetricDocument, MetricRecord, RocSnapshot, TrendPoint, ViewKind, WidgetId,
        WidgetPayload, WidgetReport, WindowPreset, DOCUMENT_NAMES,
    };
    pub use crate::roc::services::{aggregate, temporal_filter};
    pub use crate::shared::Result;
}
