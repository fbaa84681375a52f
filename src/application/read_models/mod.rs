pub mod dashboard_frame;

pub use dashboard_frame::DashboardFrame;
