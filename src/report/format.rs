//! Formatted terminal output for chart models.
//!
//! Formatting lives in one place so the query/reduction code stays clean and
//! testable, and output changes are localized.

use crate::charts::ChartSet;
use crate::domain::{ChartModel, FilterSet};

/// Format the full dashboard report: filters, month counts, age buckets, and
/// sex breakdown.
pub fn format_charts(filters: &FilterSet, charts: &ChartSet) -> String {
    let mut out = String::new();

    out.push_str("=== cdash — filtered crime aggregates ===\n");
    out.push_str(&format!("Types: {}\n", filters.types.join(", ")));
    out.push_str(&format!("Areas: {}\n", filters.areas.join(", ")));
    out.push_str(&format!(
        "Months: {} .. {}\n",
        filters.start_month, filters.end_month
    ));
    out.push('\n');

    out.push_str("Crime count by month:\n");
    if charts.months.status.is_empty() {
        out.push_str(&format_table(&charts.months, "month", "count"));
    } else {
        out.push_str(&format!("  {}\n", charts.months.status));
    }
    out.push('\n');

    out.push_str(&format_bucket_section(&charts.ages, "bucket"));
    out.push('\n');
    out.push_str(&format_bucket_section(&charts.sex, "sex"));

    out
}

/// The chart's status line doubles as the section heading, so the empty and
/// populated cases read consistently.
fn format_bucket_section(chart: &ChartModel, label_header: &str) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}:\n", chart.status));
    if !chart.labels.is_empty() {
        out.push_str(&format_table(chart, label_header, "count"));
    }
    out
}

fn format_table(chart: &ChartModel, label_header: &str, value_header: &str) -> String {
    let width = chart
        .labels
        .iter()
        .map(|label| label.len())
        .chain(std::iter::once(label_header.len()))
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    out.push_str(&format!("  {label_header:<width$}  {value_header:>7}\n"));
    out.push_str(&format!("  {:-<width$}  {:->7}\n", "", ""));
    for (label, value) in chart.labels.iter().zip(chart.series.iter()) {
        out.push_str(&format!("  {label:<width$}  {value:>7}\n"));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::{reconcile, STATUS_NO_AGES};
    use crate::domain::AggregateResult;

    fn sample_report() -> String {
        let agg: AggregateResult = serde_json::from_str(
            r#"{
                "month_counts": {"2024-06": 5, "2024-07": 12},
                "sex_counts": {"M": 3, "F": 2}
            }"#,
        )
        .unwrap();
        let filters = FilterSet {
            types: vec!["theft".into()],
            areas: vec!["Central".into()],
            start_month: "2024-06".into(),
            end_month: "2025-03".into(),
        };
        format_charts(&filters, &reconcile(&agg))
    }

    #[test]
    fn report_carries_all_three_sections() {
        let report = sample_report();
        assert!(report.contains("Crime count by month:"));
        assert!(report.contains(STATUS_NO_AGES));
        assert!(report.contains("Victim Sex:"));
        assert!(report.contains("M (Male)"));
    }

    #[test]
    fn month_table_lists_the_full_axis() {
        let report = sample_report();
        assert!(report.contains("2024-06"));
        assert!(report.contains("2025-03"));
    }
}
