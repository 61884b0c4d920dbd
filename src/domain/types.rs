//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - read fresh out of the UI surface on every query/export action
//! - sent through the query builder and aggregation client
//! - reduced onto chart models

use std::collections::HashMap;
use std::fmt;

use chrono::NaiveDate;
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

/// The fixed display window for the time-series chart.
///
/// The chart renders exactly these ten months in this order, no matter which
/// months an aggregate covers: out-of-axis months are dropped, in-axis months
/// absent from the result render as zero.
pub const MONTH_AXIS: [&str; 10] = [
    "2024-06", "2024-07", "2024-08", "2024-09", "2024-10", "2024-11", "2024-12", "2025-01",
    "2025-02", "2025-03",
];

/// A set of user-selected facets.
///
/// Built fresh from current UI state on every query or export action; never
/// persisted. `types` and `areas` carry raw submission values in control
/// order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSet {
    pub types: Vec<String>,
    pub areas: Vec<String>,
    pub start_month: String,
    pub end_month: String,
}

impl FilterSet {
    /// Collect the unmet query preconditions, in display order.
    ///
    /// An empty result means the filter set is queryable.
    pub fn unmet_preconditions(&self) -> Vec<&'static str> {
        let mut unmet = Vec::new();
        if self.types.is_empty() {
            unmet.push("at least one crime type");
        }
        if self.areas.is_empty() {
            unmet.push("at least one area");
        }
        if !is_month(&self.start_month) {
            unmet.push("a start month (YYYY-MM)");
        }
        if !is_month(&self.end_month) {
            unmet.push("an end month (YYYY-MM)");
        }
        unmet
    }
}

/// Whether `value` is a `YYYY-MM` month, the only date form the service
/// speaks.
pub fn is_month(value: &str) -> bool {
    // chrono has no year-month-only type; pin the first day to validate.
    value.len() == 7
        && NaiveDate::parse_from_str(&format!("{value}-01"), "%Y-%m-%d").is_ok()
}

/// Counts keyed by label, preserving the order the service emitted them.
///
/// Bucket order in the response is display order, so a sorted or hashed map
/// would scramble the age and sex charts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderedCounts(Vec<(String, u64)>);

impl OrderedCounts {
    pub fn new(pairs: Vec<(String, u64)>) -> Self {
        Self(pairs)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.0.iter().map(|(label, count)| (label.as_str(), *count))
    }
}

impl<'de> Deserialize<'de> for OrderedCounts {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct CountsVisitor;

        impl<'de> Visitor<'de> for CountsVisitor {
            type Value = OrderedCounts;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of labels to integer counts")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut pairs = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some(entry) = access.next_entry::<String, u64>()? {
                    pairs.push(entry);
                }
                Ok(OrderedCounts(pairs))
            }
        }

        deserializer.deserialize_map(CountsVisitor)
    }
}

/// One aggregation response.
///
/// Any of the three maps may be absent or empty; that is a well-formed
/// "no data" state, not an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AggregateResult {
    #[serde(default)]
    pub month_counts: HashMap<String, u64>,
    #[serde(default)]
    pub age_buckets: OrderedCounts,
    #[serde(default)]
    pub sex_counts: OrderedCounts,
}

/// The label/series/status triple driving one visualization widget.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChartModel {
    pub labels: Vec<String>,
    pub series: Vec<u64>,
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_axis_is_ten_months_ascending() {
        assert_eq!(MONTH_AXIS.len(), 10);
        for pair in MONTH_AXIS.windows(2) {
            assert!(pair[0] < pair[1]);
        }
    }

    #[test]
    fn is_month_accepts_yyyy_mm_only() {
        assert!(is_month("2024-06"));
        assert!(is_month("2025-12"));
        assert!(!is_month(""));
        assert!(!is_month("2024"));
        assert!(!is_month("2024-13"));
        assert!(!is_month("2024-6"));
        assert!(!is_month("2024-06-01"));
    }

    #[test]
    fn unmet_preconditions_names_every_missing_facet() {
        let empty = FilterSet::default();
        assert_eq!(empty.unmet_preconditions().len(), 4);

        let partial = FilterSet {
            types: vec!["theft".into()],
            areas: Vec::new(),
            start_month: "2024-06".into(),
            end_month: String::new(),
        };
        let unmet = partial.unmet_preconditions();
        assert_eq!(unmet, vec!["at least one area", "an end month (YYYY-MM)"]);

        let full = FilterSet {
            types: vec!["theft".into()],
            areas: vec!["Central".into()],
            start_month: "2024-06".into(),
            end_month: "2025-03".into(),
        };
        assert!(full.unmet_preconditions().is_empty());
    }

    #[test]
    fn ordered_counts_preserve_document_order() {
        let agg: AggregateResult =
            serde_json::from_str(r#"{"sex_counts": {"M": 3, "F": 2, "": 1}}"#).unwrap();
        let pairs: Vec<_> = agg.sex_counts.iter().collect();
        assert_eq!(pairs, vec![("M", 3), ("F", 2), ("", 1)]);
    }

    #[test]
    fn absent_aggregate_maps_default_to_empty() {
        let agg: AggregateResult = serde_json::from_str("{}").unwrap();
        assert!(agg.month_counts.is_empty());
        assert!(agg.age_buckets.is_empty());
        assert!(agg.sex_counts.is_empty());
    }
}
