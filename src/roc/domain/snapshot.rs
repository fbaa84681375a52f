use crate::roc::domain::document::MetricDocument;
use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// Document names the ROC view fetches, by filename convention
/// (`<name>.30d.json`). The order here is the fetch order; render order
/// is owned by the widget list, not this array.
pub const DOCUMENT_NAMES: [&str; 18] = [
    "riskScore",
    "riskExposure",
    "riskDrivers",
    "riskDriversByDay",
    "incidentsByTitle",
    "executiveActions",
    "workloadBySeverity",
    "highVolumeRisks",
    "highRiskAge",
    "attackSurfaceCoverage",
    "closedAgeBuckets",
    "closedAgingDetails",
    "riskBurndown",
    "riskDebtTrend",
    "policyExceptions",
    "remediationRoi",
    "slaHealth",
    "repeatedDetections",
];

/// The complete set of metric documents backing the ROC view.
///
/// Owned exclusively by the orchestrator and replaced wholesale on every
/// refresh cycle - a render pass never observes a mix of old and new
/// documents. A `None` slot means the fetch failed or the feature is not
/// implemented; every consumer treats that as "no visibility", never as
/// "empty".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RocSnapshot {
    pub risk_score: Option<MetricDocument>,
    pub risk_exposure: Option<MetricDocument>,
    pub risk_drivers: Option<MetricDocument>,
    pub risk_drivers_daily: Option<MetricDocument>,
    pub incidents_by_title: Option<MetricDocument>,
    pub executive_actions: Option<MetricDocument>,
    pub workload_by_severity: Option<MetricDocument>,
    pub high_volume_risks: Option<MetricDocument>,
    pub high_risk_age: Option<MetricDocument>,
    pub attack_surface_coverage: Option<MetricDocument>,
    pub closed_age_buckets: Option<MetricDocument>,
    pub closed_aging_details: Option<MetricDocument>,
    pub risk_burndown: Option<MetricDocument>,
    pub risk_debt_trend: Option<MetricDocument>,
    pub policy_exceptions: Option<MetricDocument>,
    pub remediation_roi: Option<MetricDocument>,
    pub sla_health: Option<MetricDocument>,
    pub repeated_detections: Option<MetricDocument>,
}

impl RocSnapshot {
    /// Builds a snapshot from a batch-fetch result keyed by document name.
    /// Names absent from the map (failed or not-implemented fetches)
    /// leave their slot `None`.
    pub fn from_documents(mut documents: HashMap<String, MetricDocument>) -> Self {
        let mut take = |name: &str| documents.remove(name);
        RocSnapshot {
            risk_score: take("riskScore"),
            risk_exposure: take("riskExposure"),
            risk_drivers: take("riskDrivers"),
            risk_drivers_daily: take("riskDriversByDay"),
            incidents_by_title: take("incidentsByTitle"),
            executive_actions: take("executiveActions"),
            workload_by_severity: take("workloadBySeverity"),
            high_volume_risks: take("highVolumeRisks"),
            high_risk_age: take("highRiskAge"),
            attack_surface_coverage: take("attackSurfaceCoverage"),
            closed_age_buckets: take("closedAgeBuckets"),
            closed_aging_details: take("closedAgingDetails"),
            risk_burndown: take("riskBurndown"),
            risk_debt_trend: take("riskDebtTrend"),
            policy_exceptions: take("policyExceptions"),
            remediation_roi: take("remediationRoi"),
            sla_health: take("slaHealth"),
            repeated_detections: take("repeatedDetections"),
        }
    }

    /// The reference instant for range math: the first parseable
    /// freshness timestamp across exposure, burn-down, and risk score,
    /// in that priority order. None means range-dependent rendering must
    /// be skipped rather than guessed.
    pub fn reference_instant(&self) -> Option<DateTime<Utc>> {
        [&self.risk_exposure, &self.risk_burndown, &self.risk_score]
            .into_iter()
            .find_map(|slot| slot.as_ref().and_then(MetricDocument::freshness))
    }

    /// Newest `generated_at` across all slots, used as the snapshot
    /// freshness line in rendered output.
    pub fn newest_generated_at(&self) -> Option<DateTime<Utc>> {
        self.slots()
            .into_iter()
            .flatten()
            .filter_map(|doc| doc.generated_at)
            .max()
    }

    /// True when no document fetched at all - the orchestrator treats
    /// this as still waiting for data.
    pub fn is_empty(&self) -> bool {
        self.slots().into_iter().all(|slot| slot.is_none())
    }

    fn slots(&self) -> [&Option<MetricDocument>; 18] {
        [
            &self.risk_score,
            &self.risk_exposure,
            &self.risk_drivers,
            &self.risk_drivers_daily,
            &self.incidents_by_title,
            &self.executive_actions,
            &self.workload_by_severity,
            &self.high_volume_risks,
            &self.high_risk_age,
            &self.attack_surface_coverage,
            &self.closed_age_buckets,
            &self.closed_aging_details,
            &self.risk_burndown,
            &self.risk_debt_trend,
            &self.policy_exceptions,
            &self.remediation_roi,
            &self.sla_health,
            &self.repeated_detections,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(value: serde_json::Value) -> MetricDocument {
        MetricDocument::from_json(value).unwrap()
    }

    #[test]
    fn test_from_documents_maps_names_to_slots() {
        let mut documents = HashMap::new();
        documents.insert("riskScore".to_string(), doc(json!({"data": 72})));
        documents.insert(
            "slaHealth".to_string(),
            doc(json!([{"Department": "SOC", "Total": 10, "WithinTarget": 8}])),
        );

        let snapshot = RocSnapshot::from_documents(documents);
        assert!(snapshot.risk_score.is_some());
        assert!(snapshot.sla_health.is_some());
        assert!(snapshot.risk_exposure.is_none());
        assert!(!snapshot.is_empty());
    }

    #[test]
    fn test_empty_snapshot() {
        let snapshot = RocSnapshot::from_documents(HashMap::new());
        assert!(snapshot.is_empty());
        assert!(snapshot.reference_instant().is_none());
        assert!(snapshot.newest_generated_at().is_none());
    }

    #[test]
    fn test_reference_instant_priority_order() {
        let mut documents = HashMap::new();
        documents.insert(
            "riskScore".to_string(),
            doc(json!({"data": 72, "generatedAt": "2024-01-29T00:00:00Z"})),
        );
        documents.insert(
            "riskBurndown".to_string(),
            doc(json!({"data": [], "windowEnd": "2024-01-30T00:00:00Z"})),
        );
        let snapshot = RocSnapshot::from_documents(documents.clone());
        // Burn-down outranks risk score
        assert_eq!(
            snapshot.reference_instant().unwrap().to_rfc3339(),
            "2024-01-30T00:00:00+00:00"
        );

        documents.insert(
            "riskExposure".to_string(),
            doc(json!({"data": [], "windowEnd": "2024-01-31T00:00:00Z"})),
        );
        let snapshot = RocSnapshot::from_documents(documents);
        // Exposure outranks both
        assert_eq!(
            snapshot.reference_instant().unwrap().to_rfc3339(),
            "2024-01-31T00:00:00+00:00"
        );
    }

    #[test]
    fn test_reference_instant_skips_unparseable_slots() {
        let mut documents = HashMap::new();
        // Exposure present but carries no freshness metadata
        documents.insert("riskExposure".to_string(), doc(json!({"data": []})));
        documents.insert(
            "riskScore".to_string(),
            doc(json!({"data": 72, "generatedAt": "2024-01-29T00:00:00Z"})),
        );
        let snapshot = RocSnapshot::from_documents(documents);
        assert_eq!(
            snapshot.reference_instant().unwrap().to_rfc3339(),
            "2024-01-29T00:00:00+00:00"
        );
    }

    #[test]
    fn test_newest_generated_at() {
        let mut documents = HashMap::new();
        documents.insert(
            "riskScore".to_string(),
            doc(json!({"data": 72, "generatedAt": "2024-01-29T00:00:00Z"})),
        );
        documents.insert(
            "slaHealth".to_string(),
            doc(json!({"data": [], "generatedAt": "2024-01-31T12:00:00Z"})),
        );
        let snapshot = RocSnapshot::from_documents(documents);
        assert_eq!(
            snapshot.newest_generated_at().unwrap().to_rfc3339(),
            "2024-01-31T12:00:00+00:00"
        );
    }
}
