use chrono::{DateTime, Utc};
use serde::Serialize;

/// The ROC widgets, in their fixed render order.
///
/// The order is static and never depends on data content, so two render
/// passes over the same snapshot and window produce identical output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum WidgetId {
    RiskScore,
    RiskExposureTrend,
    RiskDrivers,
    IncidentsByTitle,
    ExecutiveActions,
    WorkloadBySeverity,
    HighVolumeRisks,
    HighRiskAge,
    AttackSurfaceCoverage,
    ClosedAgeBuckets,
    RiskBurndown,
    RiskDebtTrend,
    PolicyExceptions,
    RemediationRoi,
    SlaHealth,
    RepeatedDetections,
}

impl WidgetId {
    pub const ALL: [WidgetId; 16] = [
        WidgetId::RiskScore,
        WidgetId::RiskExposureTrend,
        WidgetId::RiskDrivers,
        WidgetId::IncidentsByTitle,
        WidgetId::ExecutiveActions,
        WidgetId::WorkloadBySeverity,
        WidgetId::HighVolumeRisks,
        WidgetId::HighRiskAge,
        WidgetId::AttackSurfaceCoverage,
        WidgetId::ClosedAgeBuckets,
        WidgetId::RiskBurndown,
        WidgetId::RiskDebtTrend,
        WidgetId::PolicyExceptions,
        WidgetId::RemediationRoi,
        WidgetId::SlaHealth,
        WidgetId::RepeatedDetections,
    ];

    /// Display title for the analyst-facing layer
    pub fn title(self) -> &'static str {
        match self {
            WidgetId::RiskScore => "Risk Score",
            WidgetId::RiskExposureTrend => "Risk Exposure Trend",
            WidgetId::RiskDrivers => "Top Risk Drivers",
            WidgetId::IncidentsByTitle => "Incidents by Title",
            WidgetId::ExecutiveActions => "Executive Actions",
            WidgetId::WorkloadBySeverity => "Workload by Severity",
            WidgetId::HighVolumeRisks => "High-Volume Risks",
            WidgetId::HighRiskAge => "Average High-Risk Age",
            WidgetId::AttackSurfaceCoverage => "Attack Surface Coverage",
            WidgetId::ClosedAgeBuckets => "Closed Incident Age",
            WidgetId::RiskBurndown => "Risk Burn-Down",
            WidgetId::RiskDebtTrend => "Risk Debt Trend",
            WidgetId::PolicyExceptions => "Policy Exceptions",
            WidgetId::RemediationRoi => "Remediation ROI",
            WidgetId::SlaHealth => "SLA Health by Business Unit",
            WidgetId::RepeatedDetections => "Repeated Detections",
        }
    }
}

/// Confidence label attached to a widget payload.
///
/// Low confidence means the data source itself is the problem (no
/// visibility); high confidence covers both measured results and the
/// genuinely-empty window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    Low,
    High,
}

/// A ranked or bucketed `{category, count}` entry
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryCount {
    pub category: String,
    pub count: i64,
}

/// A per-department SLA compliance entry, percent before display rounding
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DepartmentPercent {
    pub category: String,
    pub percent: f64,
}

/// One point of a rendered time series
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendPoint {
    pub timestamp: DateTime<Utc>,
    pub value: f64,
}

/// Chart-ready aggregate shapes
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "data", rename_all = "kebab-case")]
pub enum ViewKind {
    Ranked(Vec<CategoryCount>),
    Buckets(Vec<CategoryCount>),
    Percentages(Vec<DepartmentPercent>),
    Series(Vec<TrendPoint>),
    Scalar(f64),
}

/// An aggregated view plus its provenance flag.
///
/// `estimated` marks values approximated by scaling a 30-day baseline to
/// a shorter window; the analyst-facing layer must not present those as
/// equal-confidence with directly filtered data.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregatedView {
    #[serde(flatten)]
    pub kind: ViewKind,
    pub estimated: bool,
}

impl AggregatedView {
    pub fn measured(kind: ViewKind) -> Self {
        Self {
            kind,
            estimated: false,
        }
    }

    pub fn estimated(kind: ViewKind) -> Self {
        Self {
            kind,
            estimated: true,
        }
    }
}

/// The normalized per-widget payload emitted at the render seam.
///
/// `NoVisibility` and `NoEvents` are deliberately distinct: the former
/// says the data source is the problem, the latter that the window
/// genuinely had no activity.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "kebab-case")]
pub enum WidgetPayload {
    NoVisibility { detail: String },
    NoEvents { detail: String },
    Ready { view: AggregatedView },
}

impl WidgetPayload {
    pub fn no_visibility(detail: impl Into<String>) -> Self {
        WidgetPayload::NoVisibility {
            detail: detail.into(),
        }
    }

    pub fn no_events(detail: impl Into<String>) -> Self {
        WidgetPayload::NoEvents {
            detail: detail.into(),
        }
    }

    pub fn ready(view: AggregatedView) -> Self {
        WidgetPayload::Ready { view }
    }

    pub fn confidence(&self) -> Confidence {
        match self {
            WidgetPayload::NoVisibility { .. } => Confidence::Low,
            WidgetPayload::NoEvents { .. } | WidgetPayload::Ready { .. } => Confidence::High,
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, WidgetPayload::Ready { .. })
    }
}

/// One widget's fully-evaluated render input
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WidgetReport {
    pub id: WidgetId,
    pub title: &'static str,
    pub confidence: Confidence,
    pub payload: WidgetPayload,
}

impl WidgetReport {
    pub fn new(id: WidgetId, payload: WidgetPayload) -> Self {
        Self {
            id,
            title: id.title(),
            confidence: payload.confidence(),
            payload,
        }
    }
}
