/// Pure reducers for the ROC aggregation pipeline.
///
/// No I/O here: every function maps record sets to chart-ready values
/// deterministically, so the orchestrator's render pass is idempotent.
pub mod aggregate;
pub mod temporal_filter;
