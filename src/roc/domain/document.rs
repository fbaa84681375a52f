use crate::roc::domain::record::{parse_timestamp, MetricRecord};
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

/// Status marker carried by a metric document.
///
/// `NotImplemented` is an explicit sentinel from the collection pipeline
/// meaning "feature intentionally unavailable" - distinct from a fetch
/// failure at the transport level, but normalized to the same
/// no-visibility signal before the core ever sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentStatus {
    Ok,
    NotImplemented,
}

/// The payload shape union for a metric document.
///
/// Shapes are metric-specific and determined by convention, not a shared
/// schema: time-series and record lists arrive as `Records`, single
/// figures (a gauge value, a percentage) as `Scalar`.
#[derive(Debug, Clone, PartialEq)]
pub enum MetricData {
    Records(Vec<MetricRecord>),
    Scalar(f64),
    Empty,
}

impl MetricData {
    /// Record list view; non-record payloads yield an empty slice
    pub fn records(&self) -> &[MetricRecord] {
        match self {
            MetricData::Records(records) => records,
            _ => &[],
        }
    }

    pub fn scalar(&self) -> Option<f64> {
        match self {
            MetricData::Scalar(v) => Some(*v),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            MetricData::Records(records) => records.is_empty(),
            MetricData::Scalar(_) => false,
            MetricData::Empty => true,
        }
    }
}

/// Render hints certain metrics carry for the display layer. The core
/// passes them through untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderHints {
    pub threshold: Option<f64>,
    pub target: Option<f64>,
    pub label_mode: Option<String>,
    pub severity_order: Option<Vec<String>>,
}

/// One fetched metric document, held immutably until the next refresh
/// cycle replaces the whole snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricDocument {
    pub data: MetricData,
    pub status: DocumentStatus,
    pub message: Option<String>,
    pub generated_at: Option<DateTime<Utc>>,
    pub window_end: Option<DateTime<Utc>>,
    pub hints: RenderHints,
}

impl MetricDocument {
    pub fn not_implemented(&self) -> bool {
        self.status == DocumentStatus::NotImplemented
    }

    /// The document's freshness instant: `window_end` wins over
    /// `generated_at` because it names the end of the measured range
    /// rather than the time the file was written.
    pub fn freshness(&self) -> Option<DateTime<Utc>> {
        self.window_end.or(self.generated_at)
    }

    /// Normalizes a raw JSON body into a document.
    ///
    /// Accepted shapes: an object with `data` plus optional metadata, or
    /// a bare array of records. Alternate field spellings are mapped to
    /// canonical keys here, once, so the aggregation layer never carries
    /// per-key fallback chains. Returns None for bodies that are neither.
    pub fn from_json(value: Value) -> Option<MetricDocument> {
        match value {
            Value::Array(items) => Some(MetricDocument {
                data: records_from(items),
                status: DocumentStatus::Ok,
                message: None,
                generated_at: None,
                window_end: None,
                hints: RenderHints::default(),
            }),
            Value::Object(map) => Some(from_object(map)),
            _ => None,
        }
    }
}

fn from_object(map: Map<String, Value>) -> MetricDocument {
    let status = match first_text(&map, &["status"]) {
        Some(s) if s.eq_ignore_ascii_case("not_implemented") => DocumentStatus::NotImplemented,
        _ => DocumentStatus::Ok,
    };
    let message = first_text(&map, &["message"]).map(String::from);
    let generated_at = first_timestamp(&map, &["generatedAt", "generated_at"]);
    let window_end = first_timestamp(&map, &["windowEnd", "window_end"]);
    let hints = RenderHints {
        threshold: first_number(&map, &["threshold"]),
        target: first_number(&map, &["target"]),
        label_mode: first_text(&map, &["labelMode", "label_mode"]).map(String::from),
        severity_order: map
            .get("severityOrder")
            .or_else(|| map.get("severity_order"))
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(String::from)
                    .collect()
            }),
    };

    let data = match map.get("data") {
        Some(Value::Array(items)) => records_from(items.clone()),
        Some(Value::Object(fields)) => {
            MetricData::Records(vec![canonicalize(MetricRecord::new(fields.clone()))])
        }
        Some(Value::Number(n)) => n.as_f64().map(MetricData::Scalar).unwrap_or(MetricData::Empty),
        Some(Value::String(s)) => s
            .trim()
            .parse::<f64>()
            .map(MetricData::Scalar)
            .unwrap_or(MetricData::Empty),
        _ => first_number(&map, &["value", "score"])
            .map(MetricData::Scalar)
            .unwrap_or(MetricData::Empty),
    };

    MetricDocument {
        data,
        status,
        message,
        generated_at,
        window_end,
        hints,
    }
}

fn records_from(items: Vec<Value>) -> MetricData {
    MetricData::Records(
        items
            .into_iter()
            .filter_map(MetricRecord::from_value)
            .map(canonicalize)
            .collect(),
    )
}

fn first_text<'a>(map: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a str> {
    keys.iter().find_map(|key| map.get(*key).and_then(Value::as_str))
}

fn first_number(map: &Map<String, Value>, keys: &[&str]) -> Option<f64> {
    keys.iter().find_map(|key| map.get(*key).and_then(Value::as_f64))
}

fn first_timestamp(map: &Map<String, Value>, keys: &[&str]) -> Option<DateTime<Utc>> {
    first_text(map, keys).and_then(parse_timestamp)
}

/// Alternate spelling -> canonical record key. The collection pipeline
/// grew several generations of field names; everything downstream of
/// this table sees only the canonical ones.
const KEY_ALIASES: &[(&str, &str)] = &[
    ("timeGenerated", "TimeGenerated"),
    ("timestamp", "TimeGenerated"),
    ("Timestamp", "TimeGenerated"),
    ("time", "TimeGenerated"),
    ("date", "TimeGenerated"),
    ("Date", "TimeGenerated"),
    ("closedTime", "ClosedTime"),
    ("closedDate", "ClosedTime"),
    ("ClosedDate", "ClosedTime"),
    ("createdTime", "CreatedTime"),
    ("lastSeen", "LastSeen"),
    ("dailyRiskScore", "DailyRiskScore"),
    ("dueDate", "DueDate"),
    ("value", "Value"),
    ("openRisks", "OpenRisks"),
    ("debtScore", "DebtScore"),
    ("title", "Title"),
    ("name", "Title"),
    ("Name", "Title"),
    ("driver", "Title"),
    ("Driver", "Title"),
    ("count", "Count"),
    ("category", "Category"),
    ("severity", "Category"),
    ("Severity", "Category"),
    ("ageBucket", "AgeBucket"),
    ("bucket", "AgeBucket"),
    ("Bucket", "AgeBucket"),
    ("department", "Department"),
    ("businessUnit", "Department"),
    ("BusinessUnit", "Department"),
    ("total", "Total"),
    ("withinTarget", "WithinTarget"),
    ("withinSla", "WithinTarget"),
    ("WithinSLA", "WithinTarget"),
];

fn canonicalize(record: MetricRecord) -> MetricRecord {
    let mut fields = Map::new();
    for (key, value) in record.into_fields() {
        let canonical = KEY_ALIASES
            .iter()
            .find(|(alias, _)| *alias == key.as_str())
            .map(|(_, canonical)| (*canonical).to_string())
            .unwrap_or(key);
        // First spelling wins when a record carries both the canonical
        // key and an alias for it.
        fields.entry(canonical).or_insert(value);
    }
    MetricRecord::new(fields)
}
