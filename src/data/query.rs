//! Aggregation query building.
//!
//! The chart and export endpoints share one builder: identical parameters
//! and encoding, different target paths (chosen by the client).

use crate::domain::FilterSet;
use crate::error::AppError;

/// Build the URL query string for a filter set.
///
/// All four facets are required. A violation surfaces a single validation
/// error naming every unmet precondition; callers must not issue a request
/// on that path. On success the string carries exactly four parameters:
/// `types` and `areas` comma-joined with each value percent-encoded,
/// `start_month` and `end_month` single-valued.
pub fn build_query(filters: &FilterSet) -> Result<String, AppError> {
    let unmet = filters.unmet_preconditions();
    if !unmet.is_empty() {
        return Err(AppError::validation(format!(
            "Please select {}.",
            unmet.join(", ")
        )));
    }

    Ok(format!(
        "types={}&areas={}&start_month={}&end_month={}",
        encode_list(&filters.types),
        encode_list(&filters.areas),
        urlencoding::encode(&filters.start_month),
        urlencoding::encode(&filters.end_month),
    ))
}

fn encode_list(values: &[String]) -> String {
    values
        .iter()
        .map(|value| urlencoding::encode(value).into_owned())
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_filters() -> FilterSet {
        FilterSet {
            types: vec!["vehicle - stolen".into(), "theft".into()],
            areas: vec!["Central".into(), "77th Street".into()],
            start_month: "2024-06".into(),
            end_month: "2025-03".into(),
        }
    }

    /// Invert `build_query` for round-trip checks.
    fn parse_query(query: &str) -> FilterSet {
        let mut filters = FilterSet::default();
        for pair in query.split('&') {
            let (key, value) = pair.split_once('=').unwrap();
            let decode_list = |v: &str| {
                v.split(',')
                    .map(|item| urlencoding::decode(item).unwrap().into_owned())
                    .collect::<Vec<_>>()
            };
            match key {
                "types" => filters.types = decode_list(value),
                "areas" => filters.areas = decode_list(value),
                "start_month" => {
                    filters.start_month = urlencoding::decode(value).unwrap().into_owned();
                }
                "end_month" => {
                    filters.end_month = urlencoding::decode(value).unwrap().into_owned();
                }
                other => panic!("unexpected parameter: {other}"),
            }
        }
        filters
    }

    #[test]
    fn builds_exactly_four_parameters() {
        let query = build_query(&valid_filters()).unwrap();
        assert_eq!(
            query,
            "types=vehicle%20-%20stolen,theft&areas=Central,77th%20Street&start_month=2024-06&end_month=2025-03"
        );
        assert_eq!(query.matches('=').count(), 4);
    }

    #[test]
    fn query_round_trips_back_to_the_filter_set() {
        let filters = valid_filters();
        let query = build_query(&filters).unwrap();
        assert_eq!(parse_query(&query), filters);
    }

    #[test]
    fn commas_inside_values_survive_the_round_trip() {
        let mut filters = valid_filters();
        filters.types = vec!["burglary, attempted".into()];
        let query = build_query(&filters).unwrap();
        assert!(query.contains("burglary%2C%20attempted"));
        assert_eq!(parse_query(&query), filters);
    }

    #[test]
    fn rejects_any_missing_facet() {
        let base = valid_filters();

        let mut no_types = base.clone();
        no_types.types.clear();
        let err = build_query(&no_types).unwrap_err();
        assert!(err.is_validation());
        assert!(err.to_string().contains("at least one crime type"));

        let mut no_areas = base.clone();
        no_areas.areas.clear();
        assert!(build_query(&no_areas).unwrap_err().is_validation());

        let mut no_start = base.clone();
        no_start.start_month.clear();
        assert!(build_query(&no_start).unwrap_err().is_validation());

        let mut bad_end = base;
        bad_end.end_month = "March 2025".into();
        assert!(build_query(&bad_end).unwrap_err().is_validation());
    }

    #[test]
    fn one_warning_names_all_unmet_preconditions() {
        let err = build_query(&FilterSet::default()).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("at least one crime type"));
        assert!(message.contains("at least one area"));
        assert!(message.contains("a start month"));
        assert!(message.contains("an end month"));
    }
}
