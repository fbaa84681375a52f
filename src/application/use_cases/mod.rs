pub mod refresh_snapshot;
pub mod render_dashboard;

pub use refresh_snapshot::RefreshSnapshotUseCase;
pub use render_dashboard::{build_frame, evaluate, DashboardOrchestrator};
