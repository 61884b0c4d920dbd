//! Chart models and the aggregate-to-chart reducer.
//!
//! The three chart models are owned exclusively by the [`Reconciler`];
//! nothing else mutates them. Reduction is total: every aggregate input
//! (including fully empty ones) produces a defined state for all three
//! charts, and a failed query leaves the previous state untouched.

use crate::domain::{AggregateResult, ChartModel, OrderedCounts, MONTH_AXIS};

/// Status line for the age chart when buckets are present.
pub const STATUS_AGES: &str = "Victim Ages";
/// Status line for the age chart when no buckets came back.
pub const STATUS_NO_AGES: &str = "No age data available";
/// Status line for the sex chart when counts are present.
pub const STATUS_SEX: &str = "Victim Sex";
/// Status line for the sex chart when no counts came back.
pub const STATUS_NO_SEX: &str = "No sex data available";
/// Status line for the time-series chart when every axis month is zero.
pub const STATUS_NO_MONTHS: &str = "No data for the selected filters";

/// The three coordinated chart models.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartSet {
    pub months: ChartModel,
    pub ages: ChartModel,
    pub sex: ChartModel,
}

impl ChartSet {
    /// Pre-query state: the fixed axis over an all-zero series, and empty
    /// age/sex charts with cleared status.
    pub fn initial() -> Self {
        Self {
            months: ChartModel {
                labels: month_axis_labels(),
                series: vec![0; MONTH_AXIS.len()],
                status: String::new(),
            },
            ages: ChartModel::default(),
            sex: ChartModel::default(),
        }
    }
}

pub fn month_axis_labels() -> Vec<String> {
    MONTH_AXIS.iter().map(|month| month.to_string()).collect()
}

/// Reduce one aggregate result onto the three chart models.
pub fn reconcile(agg: &AggregateResult) -> ChartSet {
    ChartSet {
        months: reconcile_months(agg),
        ages: bucket_chart(&agg.age_buckets, STATUS_AGES, STATUS_NO_AGES, |label| {
            label.to_string()
        }),
        sex: bucket_chart(&agg.sex_counts, STATUS_SEX, STATUS_NO_SEX, sex_legend_label),
    }
}

/// The time-series chart renders exactly the fixed axis: in-axis months
/// missing from the result become zero, out-of-axis months are dropped.
fn reconcile_months(agg: &AggregateResult) -> ChartModel {
    let series: Vec<u64> = MONTH_AXIS
        .iter()
        .map(|month| agg.month_counts.get(*month).copied().unwrap_or(0))
        .collect();
    let status = if series.iter().all(|&count| count == 0) {
        STATUS_NO_MONTHS.to_string()
    } else {
        String::new()
    };
    ChartModel {
        labels: month_axis_labels(),
        series,
        status,
    }
}

fn bucket_chart(
    counts: &OrderedCounts,
    status_present: &str,
    status_empty: &str,
    label_fn: impl Fn(&str) -> String,
) -> ChartModel {
    if counts.is_empty() {
        return ChartModel {
            labels: Vec::new(),
            series: Vec::new(),
            status: status_empty.to_string(),
        };
    }

    let mut labels = Vec::with_capacity(counts.len());
    let mut series = Vec::with_capacity(counts.len());
    for (label, count) in counts.iter() {
        labels.push(label_fn(label));
        series.push(count);
    }
    ChartModel {
        labels,
        series,
        status: status_present.to_string(),
    }
}

/// Legend text for the sex chart's canonical short codes.
///
/// A presentation rule local to the sex chart; every other chart renders
/// labels verbatim.
pub fn sex_legend_label(code: &str) -> String {
    match code {
        "X" => "X (Unknown)".to_string(),
        "M" => "M (Male)".to_string(),
        "F" => "F (Female)".to_string(),
        "" => "Unknown".to_string(),
        other => other.to_string(),
    }
}

/// Monotonic tag for one initiated query.
///
/// Issuing a new ticket makes every earlier ticket stale; a stale completion
/// is discarded, so displayed chart state always follows the most recently
/// initiated query even when responses resolve out of order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryTicket(u64);

/// Sole owner of the three chart models.
#[derive(Debug)]
pub struct Reconciler {
    charts: ChartSet,
    issued: u64,
}

impl Reconciler {
    pub fn new() -> Self {
        Self {
            charts: ChartSet::initial(),
            issued: 0,
        }
    }

    pub fn charts(&self) -> &ChartSet {
        &self.charts
    }

    /// Tag a newly initiated query.
    pub fn begin(&mut self) -> QueryTicket {
        self.issued += 1;
        QueryTicket(self.issued)
    }

    /// Apply a completed query.
    ///
    /// `None` marks a failed fetch: the prior chart state survives untouched
    /// (the caller raises the generic alert). Returns `false` when the ticket
    /// was stale and the completion was discarded.
    pub fn complete(&mut self, ticket: QueryTicket, result: Option<&AggregateResult>) -> bool {
        if ticket.0 != self.issued {
            return false;
        }
        if let Some(agg) = result {
            self.charts = reconcile(agg);
        }
        true
    }
}

impl Default for Reconciler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn aggregate(json: &str) -> AggregateResult {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn initial_state_is_zeroed_axis_and_empty_buckets() {
        let charts = ChartSet::initial();
        assert_eq!(charts.months.labels, month_axis_labels());
        assert_eq!(charts.months.series, vec![0; 10]);
        assert!(charts.months.status.is_empty());
        assert!(charts.ages.labels.is_empty());
        assert!(charts.sex.series.is_empty());
    }

    #[test]
    fn out_of_axis_months_are_dropped_and_gaps_are_zero() {
        let agg = aggregate(r#"{"month_counts": {"2024-06": 5, "2099-01": 99}}"#);
        let charts = reconcile(&agg);
        assert_eq!(charts.months.series, vec![5, 0, 0, 0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(charts.months.labels.len(), 10);
        assert!(charts.months.status.is_empty());
    }

    #[test]
    fn all_zero_series_raises_the_no_data_status() {
        let agg = aggregate(r#"{"month_counts": {"2099-01": 99}}"#);
        let charts = reconcile(&agg);
        assert_eq!(charts.months.series, vec![0; 10]);
        assert_eq!(charts.months.status, STATUS_NO_MONTHS);
    }

    #[test]
    fn empty_age_buckets_clear_the_chart() {
        let charts = reconcile(&aggregate(r#"{"age_buckets": {}}"#));
        assert!(charts.ages.labels.is_empty());
        assert!(charts.ages.series.is_empty());
        assert_eq!(charts.ages.status, STATUS_NO_AGES);
    }

    #[test]
    fn age_buckets_keep_insertion_order() {
        let agg = aggregate(r#"{"age_buckets": {"0-17": 4, "18-25": 9, "65+": 1}}"#);
        let charts = reconcile(&agg);
        assert_eq!(charts.ages.labels, vec!["0-17", "18-25", "65+"]);
        assert_eq!(charts.ages.series, vec![4, 9, 1]);
        assert_eq!(charts.ages.status, STATUS_AGES);
    }

    #[test]
    fn sex_chart_maps_short_codes_to_legend_text() {
        let agg = aggregate(r#"{"sex_counts": {"M": 3, "F": 2, "": 1}}"#);
        let charts = reconcile(&agg);
        assert_eq!(
            charts.sex.labels,
            vec!["M (Male)", "F (Female)", "Unknown"]
        );
        assert_eq!(charts.sex.series, vec![3, 2, 1]);
        assert_eq!(charts.sex.status, STATUS_SEX);
    }

    #[test]
    fn unknown_sex_codes_render_verbatim() {
        assert_eq!(sex_legend_label("X"), "X (Unknown)");
        assert_eq!(sex_legend_label("H"), "H");
    }

    #[test]
    fn reconcile_is_idempotent() {
        let agg = aggregate(
            r#"{"month_counts": {"2024-08": 7}, "age_buckets": {"18-25": 7}, "sex_counts": {"F": 7}}"#,
        );
        assert_eq!(reconcile(&agg), reconcile(&agg));
    }

    #[test]
    fn failed_query_leaves_prior_state_untouched() {
        let mut reconciler = Reconciler::new();
        let first = reconciler.begin();
        reconciler.complete(first, Some(&aggregate(r#"{"month_counts": {"2024-06": 5}}"#)));
        let before = reconciler.charts().clone();

        let second = reconciler.begin();
        assert!(reconciler.complete(second, None));
        assert_eq!(reconciler.charts(), &before);
    }

    #[test]
    fn stale_completions_are_discarded() {
        let mut reconciler = Reconciler::new();
        let first = reconciler.begin();
        let second = reconciler.begin();

        // The slower first query resolves after the second was initiated.
        let stale = aggregate(r#"{"month_counts": {"2024-06": 1}}"#);
        assert!(!reconciler.complete(first, Some(&stale)));
        assert_eq!(reconciler.charts().months.series, vec![0; 10]);

        let fresh = aggregate(r#"{"month_counts": {"2024-07": 2}}"#);
        assert!(reconciler.complete(second, Some(&fresh)));
        assert_eq!(reconciler.charts().months.series[1], 2);
    }
}
