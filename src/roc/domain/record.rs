use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde_json::{Map, Value};

/// A single loosely-shaped metric record.
///
/// Metric documents are produced by an external collection pipeline and
/// carry no shared schema, so records stay JSON objects at the boundary.
/// The typed accessors here are the only way the core reads them; they
/// tolerate numeric strings and missing fields instead of erroring.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricRecord(Map<String, Value>);

impl MetricRecord {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Wraps a JSON value, returning None for anything that is not an object
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Self(map)),
            _ => None,
        }
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// Non-empty string value of a field
    pub fn text(&self, field: &str) -> Option<&str> {
        match self.0.get(field) {
            Some(Value::String(s)) if !s.trim().is_empty() => Some(s.as_str()),
            _ => None,
        }
    }

    /// Numeric value of a field, accepting JSON numbers and numeric strings
    pub fn number(&self, field: &str) -> Option<f64> {
        match self.0.get(field)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        }
    }

    /// First numeric value among the candidate fields, in order
    pub fn number_in(&self, fields: &[&str]) -> Option<f64> {
        fields.iter().find_map(|field| self.number(field))
    }

    /// Timestamp value of a field, if present and parseable
    pub fn timestamp(&self, field: &str) -> Option<DateTime<Utc>> {
        self.text(field).and_then(parse_timestamp)
    }

    /// Resolves the record's timestamp by trying candidate fields in
    /// order; the first field with a non-empty value that parses to a
    /// valid timestamp wins.
    pub fn timestamp_in(&self, fields: &[&str]) -> Option<DateTime<Utc>> {
        fields.iter().find_map(|field| self.timestamp(field))
    }

    pub(crate) fn into_fields(self) -> Map<String, Value> {
        self.0
    }
}

/// Parses the timestamp spellings the collection pipeline emits:
/// RFC 3339, naive `YYYY-MM-DDTHH:MM:SS`, and date-only `YYYY-MM-DD`
/// (taken as midnight UTC). Everything else is unparseable.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return Some(Utc.from_utc_datetime(&naive));
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date
            .and_hms_opt(0, 0, 0)
            .map(|naive| Utc.from_utc_datetime(&naive));
    }
    None
}
