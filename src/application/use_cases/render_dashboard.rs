use crate::application::read_models::DashboardFrame;
use crate::ports::outbound::{DashboardRenderer, OutputPresenter};
use crate::roc::domain::{
    resolve_window, AggregatedView, DateWindow, MetricDocument, MetricRecord, RocSnapshot,
    ViewKind, WidgetId, WidgetPayload, WidgetReport, WindowPreset,
};
use crate::roc::services::{aggregate, temporal_filter};
use crate::shared::Result;

/// Candidate timestamp fields per dataset, tried in order per record.
const EXPOSURE_TS: &[&str] = &["TimeGenerated"];
const DRIVER_TS: &[&str] = &["TimeGenerated"];
const INCIDENT_TS: &[&str] = &["TimeGenerated", "CreatedTime"];
const WORKLOAD_TS: &[&str] = &["TimeGenerated", "CreatedTime"];
const CLOSED_TS: &[&str] = &["ClosedTime", "TimeGenerated"];
const BURNDOWN_TS: &[&str] = &["TimeGenerated"];
const DEBT_TS: &[&str] = &["TimeGenerated"];
const EXCEPTION_TS: &[&str] = &["TimeGenerated", "DueDate"];
const SLA_TS: &[&str] = &["TimeGenerated"];
const DETECTION_TS: &[&str] = &["LastSeen", "TimeGenerated"];

/// Value-field candidates for the time-series widgets.
const EXPOSURE_VALUE: &[&str] = &["DailyRiskScore", "Value"];
const BURNDOWN_VALUE: &[&str] = &["OpenRisks", "Count", "Value"];
const DEBT_VALUE: &[&str] = &["DebtScore", "Value", "Count"];

const BASELINE_DAYS: u32 = 30;

const NO_DOCUMENT: &str = "metric document missing or unavailable";
const NO_REFERENCE: &str = "no usable reference instant in the snapshot";
const NO_VALUE: &str = "metric document carried no value";

/// DashboardOrchestrator - owns the current snapshot and window and
/// drives the render seam.
///
/// Two inputs lead to the same rendered state: a wholesale snapshot
/// replacement (after a fetch cycle) and a window change (analyst
/// control, no fetch). With no snapshot yet the orchestrator is
/// implicitly waiting for data and render passes are skipped.
pub struct DashboardOrchestrator {
    renderer: Box<dyn DashboardRenderer>,
    presenter: Box<dyn OutputPresenter>,
    snapshot: Option<RocSnapshot>,
    window: WindowPreset,
}

impl DashboardOrchestrator {
    pub fn new(
        renderer: Box<dyn DashboardRenderer>,
        presenter: Box<dyn OutputPresenter>,
        window: WindowPreset,
    ) -> Self {
        Self {
            renderer,
            presenter,
            snapshot: None,
            window,
        }
    }

    pub fn window(&self) -> WindowPreset {
        self.window
    }

    /// Replaces the held snapshot atomically and runs one render pass,
    /// returning the evaluated frame.
    pub fn replace_snapshot(&mut self, snapshot: RocSnapshot) -> Result<Option<DashboardFrame>> {
        self.snapshot = Some(snapshot);
        self.render_pass()
    }

    /// Applies a new window and runs exactly one render pass against the
    /// already-held snapshot - no fetch is involved. Returns None while
    /// still waiting for the first snapshot.
    pub fn set_window(&mut self, window: WindowPreset) -> Result<Option<DashboardFrame>> {
        self.window = window;
        self.render_pass()
    }

    fn render_pass(&self) -> Result<Option<DashboardFrame>> {
        let Some(snapshot) = &self.snapshot else {
            return Ok(None);
        };
        let frame = build_frame(snapshot, self.window.days());
        let rendered = self.renderer.render(&frame)?;
        self.presenter.present(&rendered)?;
        Ok(Some(frame))
    }
}

/// Evaluates one full pass: resolves the window, filters and aggregates
/// every dataset, and returns the widget reports in the fixed render
/// order. Pure - same snapshot and window always yield the same frame.
pub fn build_frame(snapshot: &RocSnapshot, window_days: u32) -> DashboardFrame {
    DashboardFrame {
        window_days,
        reference_instant: snapshot.reference_instant(),
        generated_at: snapshot.newest_generated_at(),
        widgets: evaluate(snapshot, window_days),
    }
}

/// The per-widget evaluation fan-out. Order comes from the static widget
/// list, never from data content, and each widget degrades independently:
/// one dataset's absence never blocks a sibling's render.
pub fn evaluate(snapshot: &RocSnapshot, window_days: u32) -> Vec<WidgetReport> {
    let window = snapshot
        .reference_instant()
        .map(|reference| resolve_window(reference, window_days));

    WidgetId::ALL
        .iter()
        .map(|id| {
            WidgetReport::new(
                *id,
                widget_payload(snapshot, *id, window.as_ref(), window_days),
            )
        })
        .collect()
}

fn widget_payload(
    snapshot: &RocSnapshot,
    id: WidgetId,
    window: Option<&DateWindow>,
    window_days: u32,
) -> WidgetPayload {
    match id {
        WidgetId::RiskScore => filtered_widget(
            &snapshot.risk_exposure,
            EXPOSURE_TS,
            window,
            window_days,
            |rows| ViewKind::Scalar(aggregate::sum_of(rows, EXPOSURE_VALUE)),
        ),
        WidgetId::RiskExposureTrend => filtered_widget(
            &snapshot.risk_exposure,
            EXPOSURE_TS,
            window,
            window_days,
            |rows| ViewKind::Series(aggregate::series_points(rows, EXPOSURE_TS, EXPOSURE_VALUE)),
        ),
        WidgetId::RiskDrivers => driver_widget(snapshot, window, window_days),
        WidgetId::IncidentsByTitle => filtered_widget(
            &snapshot.incidents_by_title,
            INCIDENT_TS,
            window,
            window_days,
            |rows| ViewKind::Ranked(aggregate::ranked_totals(rows)),
        ),
        WidgetId::ExecutiveActions => {
            scaled_baseline_widget(&snapshot.executive_actions, window_days)
        }
        WidgetId::WorkloadBySeverity => filtered_widget(
            &snapshot.workload_by_severity,
            WORKLOAD_TS,
            window,
            window_days,
            |rows| ViewKind::Buckets(aggregate::workload_fold(rows)),
        ),
        WidgetId::HighVolumeRisks => high_volume_widget(snapshot, window_days),
        WidgetId::HighRiskAge => scalar_widget(&snapshot.high_risk_age),
        WidgetId::AttackSurfaceCoverage => scalar_widget(&snapshot.attack_surface_coverage),
        WidgetId::ClosedAgeBuckets => closed_age_widget(snapshot, window, window_days),
        WidgetId::RiskBurndown => filtered_widget(
            &snapshot.risk_burndown,
            BURNDOWN_TS,
            window,
            window_days,
            |rows| ViewKind::Series(aggregate::series_points(rows, BURNDOWN_TS, BURNDOWN_VALUE)),
        ),
        WidgetId::RiskDebtTrend => filtered_widget(
            &snapshot.risk_debt_trend,
            DEBT_TS,
            window,
            window_days,
            |rows| ViewKind::Series(aggregate::series_points(rows, DEBT_TS, DEBT_VALUE)),
        ),
        WidgetId::PolicyExceptions => filtered_widget(
            &snapshot.policy_exceptions,
            EXCEPTION_TS,
            window,
            window_days,
            |rows| ViewKind::Scalar(rows.len() as f64),
        ),
        WidgetId::RemediationRoi => scalar_widget(&snapshot.remediation_roi),
        WidgetId::SlaHealth => filtered_widget(
            &snapshot.sla_health,
            SLA_TS,
            window,
            window_days,
            |rows| ViewKind::Percentages(aggregate::sla_rollup(rows)),
        ),
        WidgetId::RepeatedDetections => filtered_widget(
            &snapshot.repeated_detections,
            DETECTION_TS,
            window,
            window_days,
            |rows| ViewKind::Ranked(aggregate::ranked_totals(rows)),
        ),
    }
}

/// Standard shape for a range-filtered widget: missing document means no
/// visibility, missing reference instant skips the widget rather than
/// guessing a range, a surviving record set aggregates as measured data,
/// and an empty one is the high-confidence quiet window.
fn filtered_widget(
    document: &Option<MetricDocument>,
    timestamp_fields: &[&str],
    window: Option<&DateWindow>,
    window_days: u32,
    aggregate_rows: impl Fn(&[MetricRecord]) -> ViewKind,
) -> WidgetPayload {
    let Some(document) = document else {
        return WidgetPayload::no_visibility(NO_DOCUMENT);
    };
    let Some(window) = window else {
        return WidgetPayload::no_visibility(NO_REFERENCE);
    };
    let rows = temporal_filter::filter_by_range(&document.data, timestamp_fields, Some(window));
    if rows.is_empty() {
        WidgetPayload::no_events(no_events_detail(window_days))
    } else {
        WidgetPayload::ready(AggregatedView::measured(aggregate_rows(&rows)))
    }
}

/// Driver totals with the documented fallback: when no granular daily
/// record survives filtering, the 30-day baseline is scaled down to the
/// window and flagged as an estimate rather than presented as measured.
fn driver_widget(
    snapshot: &RocSnapshot,
    window: Option<&DateWindow>,
    window_days: u32,
) -> WidgetPayload {
    if let (Some(document), Some(window)) = (&snapshot.risk_drivers_daily, window) {
        let rows = temporal_filter::filter_by_range(&document.data, DRIVER_TS, Some(window));
        if !rows.is_empty() {
            return WidgetPayload::ready(AggregatedView::measured(ViewKind::Ranked(
                aggregate::ranked_totals(&rows),
            )));
        }
    }

    let baseline = snapshot
        .risk_drivers
        .as_ref()
        .map(|document| aggregate::ranked_totals(document.data.records()));
    match baseline {
        Some(baseline) if !baseline.is_empty() => {
            WidgetPayload::ready(AggregatedView::estimated(ViewKind::Ranked(
                aggregate::scale_ranked(&baseline, window_days, BASELINE_DAYS),
            )))
        }
        _ => match (&snapshot.risk_drivers_daily, window) {
            // Daily data exists and filtered to nothing: the window was
            // genuinely quiet.
            (Some(_), Some(_)) => WidgetPayload::no_events(no_events_detail(window_days)),
            (Some(_), None) => WidgetPayload::no_visibility(NO_REFERENCE),
            (None, _) => WidgetPayload::no_visibility(NO_DOCUMENT),
        },
    }
}

/// High-volume risks come only as a ranked 30-day baseline; shorter
/// windows show it proportionally scaled and flagged as an estimate.
fn high_volume_widget(snapshot: &RocSnapshot, window_days: u32) -> WidgetPayload {
    let Some(document) = &snapshot.high_volume_risks else {
        return WidgetPayload::no_visibility(NO_DOCUMENT);
    };
    let baseline = aggregate::ranked_totals(document.data.records());
    if baseline.is_empty() {
        return WidgetPayload::no_visibility(NO_VALUE);
    }
    let view = ViewKind::Ranked(aggregate::scale_ranked(&baseline, window_days, BASELINE_DAYS));
    WidgetPayload::ready(if window_days == BASELINE_DAYS {
        AggregatedView::measured(view)
    } else {
        AggregatedView::estimated(view)
    })
}

/// A 30-day baseline figure (scalar, or one row per item) scaled down to
/// the window length.
fn scaled_baseline_widget(document: &Option<MetricDocument>, window_days: u32) -> WidgetPayload {
    let Some(document) = document else {
        return WidgetPayload::no_visibility(NO_DOCUMENT);
    };
    let total = document
        .data
        .scalar()
        .or_else(|| match document.data.records() {
            [] => None,
            records => Some(records.len() as f64),
        });
    let Some(total) = total else {
        return WidgetPayload::no_visibility(NO_VALUE);
    };
    let scaled = aggregate::scaled_count(total, window_days, BASELINE_DAYS) as f64;
    let view = ViewKind::Scalar(scaled);
    WidgetPayload::ready(if window_days == BASELINE_DAYS {
        AggregatedView::measured(view)
    } else {
        AggregatedView::estimated(view)
    })
}

/// Direct scalar pass-through for figures that do not scale with the
/// window (an average age, a coverage percentage).
fn scalar_widget(document: &Option<MetricDocument>) -> WidgetPayload {
    let Some(document) = document else {
        return WidgetPayload::no_visibility(NO_DOCUMENT);
    };
    match document.data.scalar() {
        Some(value) => WidgetPayload::ready(AggregatedView::measured(ViewKind::Scalar(value))),
        None => WidgetPayload::no_visibility(NO_VALUE),
    }
}

/// Closed-incident age: granular aging details win when any survive
/// filtering; otherwise the precomputed bucket dataset stands in,
/// unfiltered.
fn closed_age_widget(
    snapshot: &RocSnapshot,
    window: Option<&DateWindow>,
    window_days: u32,
) -> WidgetPayload {
    if let (Some(document), Some(window)) = (&snapshot.closed_aging_details, window) {
        let rows = temporal_filter::filter_by_range(&document.data, CLOSED_TS, Some(window));
        if !rows.is_empty() {
            return WidgetPayload::ready(AggregatedView::measured(ViewKind::Buckets(
                aggregate::age_bucket_counts(&rows),
            )));
        }
    }

    let fallback = snapshot
        .closed_age_buckets
        .as_ref()
        .map(|document| aggregate::bucket_dataset(document.data.records()));
    match fallback {
        Some(buckets) if !buckets.is_empty() => {
            let view = ViewKind::Buckets(buckets);
            WidgetPayload::ready(if window_days == BASELINE_DAYS {
                AggregatedView::measured(view)
            } else {
                AggregatedView::estimated(view)
            })
        }
        _ => match (&snapshot.closed_aging_details, window) {
            (Some(_), Some(_)) => WidgetPayload::no_events(no_events_detail(window_days)),
            (Some(_), None) => WidgetPayload::no_visibility(NO_REFERENCE),
            (None, _) => WidgetPayload::no_visibility(NO_DOCUMENT),
        },
    }
}

fn no_events_detail(window_days: u32) -> String {
    format!("no events in the trailing {} day window", window_days)
}
