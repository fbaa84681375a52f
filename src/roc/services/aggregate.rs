use crate::roc::domain::{CategoryCount, DepartmentPercent, MetricRecord, TrendPoint};
use std::collections::HashMap;

/// The three canonical closed-incident age buckets, in render order.
pub const AGE_BUCKETS: [&str; 3] = ["0-7 Days", "8-30 Days", "30+ Days"];

/// Severity categories in render order; anything else sorts after these,
/// alphabetically.
const SEVERITY_ORDER: [&str; 4] = ["high", "medium", "low", "informational"];

/// Proportion of a `base_days` baseline that applies to a shorter window.
/// Never exceeds 1: a window longer than the baseline cannot inflate it.
pub fn scale_factor(window_days: u32, base_days: u32) -> f64 {
    let base = base_days.max(1);
    (f64::from(window_days) / f64::from(base)).min(1.0)
}

/// Approximates how many of a baseline figure fall inside a shorter
/// window. This is an explicit estimate, not a measurement; callers flag
/// the result accordingly.
pub fn scaled_count(value: f64, window_days: u32, base_days: u32) -> i64 {
    (value * scale_factor(window_days, base_days)).round() as i64
}

/// Groups records by `Title`, summing `Count` (1 per record when the
/// field is absent), sorted descending by count with ties broken by
/// title so output order never depends on input order.
pub fn ranked_totals(records: &[MetricRecord]) -> Vec<CategoryCount> {
    let mut totals: HashMap<String, i64> = HashMap::new();
    for record in records {
        let Some(title) = record.text("Title") else {
            continue;
        };
        let count = record.number("Count").map(|v| v.round() as i64).unwrap_or(1);
        *totals.entry(title.to_string()).or_insert(0) += count;
    }
    let mut ranked: Vec<CategoryCount> = totals
        .into_iter()
        .map(|(category, count)| CategoryCount { category, count })
        .collect();
    sort_ranked(&mut ranked);
    ranked
}

/// Scales a ranked 30-day baseline down to a shorter window, rounding
/// each entry, preserving the descending order.
pub fn scale_ranked(baseline: &[CategoryCount], window_days: u32, base_days: u32) -> Vec<CategoryCount> {
    let factor = scale_factor(window_days, base_days);
    let mut scaled: Vec<CategoryCount> = baseline
        .iter()
        .map(|entry| CategoryCount {
            category: entry.category.clone(),
            count: (entry.count as f64 * factor).round() as i64,
        })
        .collect();
    sort_ranked(&mut scaled);
    scaled
}

/// Counts filtered aging-detail records per canonical age bucket, in the
/// fixed bucket order, omitting buckets with zero count.
pub fn age_bucket_counts(details: &[MetricRecord]) -> Vec<CategoryCount> {
    let mut counts = [0i64; 3];
    for record in details {
        let Some(bucket) = record.text("AgeBucket") else {
            continue;
        };
        if let Some(index) = AGE_BUCKETS
            .iter()
            .position(|canonical| canonical.eq_ignore_ascii_case(bucket.trim()))
        {
            counts[index] += 1;
        }
    }
    AGE_BUCKETS
        .iter()
        .zip(counts)
        .filter(|(_, count)| *count > 0)
        .map(|(bucket, count)| CategoryCount {
            category: (*bucket).to_string(),
            count,
        })
        .collect()
}

/// Reads a precomputed bucket dataset (`AgeBucket` + `Count` rows) into
/// the canonical bucket order, omitting zero and missing buckets. Used
/// as the fallback when no granular aging details survive filtering.
pub fn bucket_dataset(records: &[MetricRecord]) -> Vec<CategoryCount> {
    AGE_BUCKETS
        .iter()
        .filter_map(|canonical| {
            let count: i64 = records
                .iter()
                .filter(|record| {
                    record
                        .text("AgeBucket")
                        .map(|bucket| canonical.eq_ignore_ascii_case(bucket.trim()))
                        .unwrap_or(false)
                })
                .filter_map(|record| record.number("Count"))
                .map(|v| v.round() as i64)
                .sum();
            (count > 0).then(|| CategoryCount {
                category: (*canonical).to_string(),
                count,
            })
        })
        .collect()
}

/// Folds workload records into per-severity counts.
///
/// Grouping is case-insensitive, the count field defaults to 1 per
/// record, and `critical` folds into `high`. Output order is the fixed
/// severity order, then unknown categories alphabetically.
pub fn workload_fold(records: &[MetricRecord]) -> Vec<CategoryCount> {
    let mut totals: HashMap<String, i64> = HashMap::new();
    for record in records {
        let Some(category) = record.text("Category") else {
            continue;
        };
        let mut key = category.trim().to_lowercase();
        if key == "critical" {
            key = "high".to_string();
        }
        let count = record.number("Count").map(|v| v.round() as i64).unwrap_or(1);
        *totals.entry(key).or_insert(0) += count;
    }
    let mut folded: Vec<CategoryCount> = totals
        .into_iter()
        .map(|(category, count)| CategoryCount { category, count })
        .collect();
    folded.sort_by(|a, b| {
        severity_rank(&a.category)
            .cmp(&severity_rank(&b.category))
            .then_with(|| a.category.cmp(&b.category))
    });
    folded
}

fn severity_rank(category: &str) -> usize {
    SEVERITY_ORDER
        .iter()
        .position(|known| *known == category)
        .unwrap_or(SEVERITY_ORDER.len())
}

/// Rolls SLA records up per department: sums `Total` and `WithinTarget`,
/// then computes `percent = within / total * 100` (0 when total is 0),
/// sorted descending by percent with ties broken by department name.
pub fn sla_rollup(records: &[MetricRecord]) -> Vec<DepartmentPercent> {
    let mut sums: HashMap<String, (f64, f64)> = HashMap::new();
    for record in records {
        let Some(department) = record.text("Department") else {
            continue;
        };
        let total = record.number("Total").unwrap_or(0.0);
        let within = record.number("WithinTarget").unwrap_or(0.0);
        let entry = sums.entry(department.to_string()).or_insert((0.0, 0.0));
        entry.0 += total;
        entry.1 += within;
    }
    let mut rollup: Vec<DepartmentPercent> = sums
        .into_iter()
        .map(|(category, (total, within))| DepartmentPercent {
            category,
            percent: if total > 0.0 {
                within / total * 100.0
            } else {
                0.0
            },
        })
        .collect();
    rollup.sort_by(|a, b| {
        b.percent
            .partial_cmp(&a.percent)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.category.cmp(&b.category))
    });
    rollup
}

/// Projects filtered records onto a time series, sorted ascending by
/// timestamp. Records missing a timestamp or value are skipped.
pub fn series_points(
    records: &[MetricRecord],
    timestamp_fields: &[&str],
    value_fields: &[&str],
) -> Vec<TrendPoint> {
    let mut points: Vec<TrendPoint> = records
        .iter()
        .filter_map(|record| {
            let timestamp = record.timestamp_in(timestamp_fields)?;
            let value = record.number_in(value_fields)?;
            Some(TrendPoint { timestamp, value })
        })
        .collect();
    points.sort_by_key(|point| point.timestamp);
    points
}

/// Sums the first available value field across records
pub fn sum_of(records: &[MetricRecord], value_fields: &[&str]) -> f64 {
    records
        .iter()
        .filter_map(|record| record.number_in(value_fields))
        .sum()
}

fn sort_ranked(entries: &mut [CategoryCount]) {
    entries.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.category.cmp(&b.category)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roc::domain::{MetricData, MetricDocument};
    use serde_json::json;

    fn records(value: serde_json::Value) -> Vec<MetricRecord> {
        match MetricDocument::from_json(value).unwrap().data {
            MetricData::Records(records) => records,
            _ => panic!("expected records"),
        }
    }

    #[test]
    fn test_scale_factor_caps_at_one() {
        assert_eq!(scale_factor(15, 30), 0.5);
        assert_eq!(scale_factor(30, 30), 1.0);
        assert_eq!(scale_factor(90, 30), 1.0);
    }

    #[test]
    fn test_scaled_count_rounds() {
        assert_eq!(scaled_count(10.0, 15, 30), 5);
        assert_eq!(scaled_count(7.0, 15, 30), 4); // 3.5 rounds up
        assert_eq!(scaled_count(7.0, 7, 30), 2); // 1.633...
        assert_eq!(scaled_count(7.0, 90, 30), 7);
    }

    #[test]
    fn test_ranked_totals_groups_and_sorts_descending() {
        let input = records(json!([
            {"Title": "Phishing", "Count": 2},
            {"Title": "Malware", "Count": 5},
            {"Title": "Phishing", "Count": 4},
            {"Title": "Insider"}
        ]));
        let ranked = ranked_totals(&input);
        assert_eq!(ranked.len(), 3);
        assert_eq!(ranked[0].category, "Phishing");
        assert_eq!(ranked[0].count, 6);
        assert_eq!(ranked[1].category, "Malware");
        assert_eq!(ranked[1].count, 5);
        assert_eq!(ranked[2].category, "Insider");
        assert_eq!(ranked[2].count, 1);
    }

    #[test]
    fn test_ranked_totals_skips_untitled_records() {
        let input = records(json!([{"Count": 9}, {"Title": "Named", "Count": 1}]));
        let ranked = ranked_totals(&input);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].category, "Named");
    }

    #[test]
    fn test_scale_ranked_fallback_law_half_at_fifteen_days() {
        let baseline = vec![
            CategoryCount {
                category: "Phishing".to_string(),
                count: 10,
            },
            CategoryCount {
                category: "Malware".to_string(),
                count: 7,
            },
            CategoryCount {
                category: "Insider".to_string(),
                count: 1,
            },
        ];
        let scaled = scale_ranked(&baseline, 15, 30);
        assert_eq!(scaled[0].count, 5); // 10 * 0.5
        assert_eq!(scaled[1].count, 4); // 3.5 rounds up
        assert_eq!(scaled[2].count, 1); // 0.5 rounds up
    }

    #[test]
    fn test_scale_ranked_identity_at_full_window() {
        let baseline = vec![CategoryCount {
            category: "Phishing".to_string(),
            count: 10,
        }];
        assert_eq!(scale_ranked(&baseline, 30, 30), baseline);
        assert_eq!(scale_ranked(&baseline, 90, 30), baseline);
    }

    #[test]
    fn test_age_bucket_counts_fixed_order_zero_omitted() {
        let details = records(json!([
            {"AgeBucket": "0-7 Days"},
            {"AgeBucket": "0-7 Days"},
            {"AgeBucket": "30+ Days"}
        ]));
        let buckets = age_bucket_counts(&details);
        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[0].category, "0-7 Days");
        assert_eq!(buckets[0].count, 2);
        assert_eq!(buckets[1].category, "30+ Days");
        assert_eq!(buckets[1].count, 1);
    }

    #[test]
    fn test_age_bucket_counts_ignores_unknown_buckets() {
        let details = records(json!([
            {"AgeBucket": "8-30 Days"},
            {"AgeBucket": "90+ Days"},
            {"Count": 2}
        ]));
        let buckets = age_bucket_counts(&details);
        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].category, "8-30 Days");
    }

    #[test]
    fn test_bucket_dataset_reads_precomputed_rows() {
        let rows = records(json!([
            {"AgeBucket": "30+ Days", "Count": 4},
            {"AgeBucket": "0-7 Days", "Count": 11},
            {"AgeBucket": "8-30 Days", "Count": 0}
        ]));
        let buckets = bucket_dataset(&rows);
        assert_eq!(buckets.len(), 2);
        // Canonical order, not input order
        assert_eq!(buckets[0].category, "0-7 Days");
        assert_eq!(buckets[0].count, 11);
        assert_eq!(buckets[1].category, "30+ Days");
        assert_eq!(buckets[1].count, 4);
    }

    #[test]
    fn test_workload_fold_critical_merges_into_high() {
        let input = records(json!([
            {"Category": "Critical", "Count": 3},
            {"Category": "high", "Count": 2}
        ]));
        let folded = workload_fold(&input);
        assert_eq!(folded.len(), 1);
        assert_eq!(folded[0].category, "high");
        assert_eq!(folded[0].count, 5);
    }

    #[test]
    fn test_workload_fold_case_insensitive_and_default_count() {
        let input = records(json!([
            {"Category": "HIGH"},
            {"Category": "High"},
            {"Category": "medium", "Count": 4},
            {"Category": "Informational"},
            {"Category": "unknown-tier"}
        ]));
        let folded = workload_fold(&input);
        let categories: Vec<&str> = folded.iter().map(|c| c.category.as_str()).collect();
        assert_eq!(
            categories,
            vec!["high", "medium", "informational", "unknown-tier"]
        );
        assert_eq!(folded[0].count, 2);
        assert_eq!(folded[1].count, 4);
    }

    #[test]
    fn test_sla_rollup_sums_before_dividing() {
        let input = records(json!([
            {"Department": "SOC", "Total": 10, "WithinTarget": 8},
            {"Department": "SOC", "Total": 5, "WithinTarget": 5}
        ]));
        let rollup = sla_rollup(&input);
        assert_eq!(rollup.len(), 1);
        assert_eq!(rollup[0].category, "SOC");
        // 13/15 before display rounding
        assert!((rollup[0].percent - 86.666_666_666_666_67).abs() < 1e-9);
    }

    #[test]
    fn test_sla_rollup_zero_total_is_zero_percent() {
        let input = records(json!([
            {"Department": "Fraud", "Total": 0, "WithinTarget": 0},
            {"Department": "SOC", "Total": 4, "WithinTarget": 1}
        ]));
        let rollup = sla_rollup(&input);
        assert_eq!(rollup[0].category, "SOC");
        assert_eq!(rollup[1].category, "Fraud");
        assert_eq!(rollup[1].percent, 0.0);
    }

    #[test]
    fn test_sla_rollup_sorted_descending_by_percent() {
        let input = records(json!([
            {"Department": "Fraud", "Total": 10, "WithinTarget": 9},
            {"Department": "SOC", "Total": 10, "WithinTarget": 5},
            {"Department": "IT", "Total": 10, "WithinTarget": 10}
        ]));
        let rollup = sla_rollup(&input);
        let departments: Vec<&str> = rollup.iter().map(|r| r.category.as_str()).collect();
        assert_eq!(departments, vec!["IT", "Fraud", "SOC"]);
    }

    #[test]
    fn test_series_points_sorted_ascending() {
        let input = records(json!([
            {"TimeGenerated": "2024-01-20", "DailyRiskScore": 9},
            {"TimeGenerated": "2024-01-05", "DailyRiskScore": 5},
            {"TimeGenerated": "2024-01-10"}
        ]));
        let points = series_points(&input, &["TimeGenerated"], &["DailyRiskScore"]);
        assert_eq!(points.len(), 2);
        assert!(points[0].timestamp < points[1].timestamp);
        assert_eq!(points[0].value, 5.0);
        assert_eq!(points[1].value, 9.0);
    }

    #[test]
    fn test_sum_of() {
        let input = records(json!([
            {"DailyRiskScore": 5},
            {"DailyRiskScore": 9},
            {"Other": 100}
        ]));
        assert_eq!(sum_of(&input, &["DailyRiskScore"]), 14.0);
        assert_eq!(sum_of(&[], &["DailyRiskScore"]), 0.0);
    }
}
