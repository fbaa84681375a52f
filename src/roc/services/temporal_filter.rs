use crate::roc::domain::{DateWindow, MetricData, MetricRecord};

/// Filters a record set down to the rows whose resolved timestamp falls
/// inside the window, inclusive on both ends.
///
/// Candidate fields are tried in order per record; the first field with a
/// non-empty value that parses to a valid timestamp resolves that record.
/// Records with no parseable candidate are dropped silently - they vanish
/// from aggregated totals but never surface as an error.
pub fn filter_records(
    records: &[MetricRecord],
    fields: &[&str],
    window: &DateWindow,
) -> Vec<MetricRecord> {
    records
        .iter()
        .filter(|record| {
            record
                .timestamp_in(fields)
                .map(|t| window.contains(t))
                .unwrap_or(false)
        })
        .cloned()
        .collect()
}

/// Document-level variant: anything that is not a record list (a scalar
/// payload, an empty document) or a missing window fails closed to an
/// empty result.
pub fn filter_by_range(
    data: &MetricData,
    fields: &[&str],
    window: Option<&DateWindow>,
) -> Vec<MetricRecord> {
    match (data, window) {
        (MetricData::Records(records), Some(window)) => filter_records(records, fields, window),
        _ => Vec::new(),
    }
}
