//! Shared query pipeline used by both CLI and TUI front-ends.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! selection -> validation/query build -> fetch -> reconcile
//!
//! The CLI and the TUI then focus on presentation (printing vs widgets).

use std::path::Path;

use crate::data::{build_query, ApiClient};
use crate::domain::{AggregateResult, FilterSet};
use crate::error::AppError;

/// Generic user-facing text for any failed fetch. The distinguishing cause
/// (network, status, malformed body) only reaches the log.
pub const GENERIC_FETCH_ALERT: &str = "Error fetching data. Please try again.";

/// All computed outputs of one dashboard query.
#[derive(Debug, Clone)]
pub struct QueryOutput {
    pub filters: FilterSet,
    pub query: String,
    pub aggregates: AggregateResult,
}

/// Validate a filter set, build the aggregation query, and execute it.
///
/// Validation failures return before any network call.
pub fn run_query(client: &ApiClient, filters: &FilterSet) -> Result<QueryOutput, AppError> {
    let query = build_query(filters)?;
    let aggregates = client.fetch_aggregates(&query)?;
    Ok(QueryOutput {
        filters: filters.clone(),
        query,
        aggregates,
    })
}

/// Validate a filter set, build the export query, and save the CSV stream
/// to `dest`. Returns the number of bytes written.
pub fn run_export(
    client: &ApiClient,
    filters: &FilterSet,
    dest: &Path,
) -> Result<u64, AppError> {
    let query = build_query(filters)?;
    let bytes = client.fetch_csv_export(&query)?;
    crate::io::write_csv_export(dest, &bytes)?;
    Ok(bytes.len() as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_filters_never_reach_the_network() {
        // The client points at a reserved, unroutable origin; a validation
        // failure must return before any connection is attempted.
        let client = ApiClient::new("http://192.0.2.1:9");
        let err = run_query(&client, &FilterSet::default()).unwrap_err();
        assert!(err.is_validation());

        let err = run_export(
            &client,
            &FilterSet::default(),
            Path::new("unused.csv"),
        )
        .unwrap_err();
        assert!(err.is_validation());
    }
}
