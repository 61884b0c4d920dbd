//! HTTP client for the crime-incident aggregation service.
//!
//! All five endpoints live under one origin plus the fixed `/api` suffix;
//! the client never targets any other host. Calls are blocking, read-only,
//! and never retried: a failure is terminal for that attempt and the user
//! re-triggers.

use reqwest::blocking::Client;
use serde::de::DeserializeOwned;

use crate::domain::AggregateResult;
use crate::error::AppError;

/// Fixed path suffix appended to the service origin.
const API_PREFIX: &str = "/api";

/// Origin used when `CRIME_API_URL` is not set.
const DEFAULT_ORIGIN: &str = "http://127.0.0.1:5000";

pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Build a client from the `CRIME_API_URL` environment variable (`.env`
    /// supported), falling back to the local development origin.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let origin =
            std::env::var("CRIME_API_URL").unwrap_or_else(|_| DEFAULT_ORIGIN.to_string());
        Self::new(&origin)
    }

    pub fn new(origin: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: format!("{}{API_PREFIX}", origin.trim_end_matches('/')),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Enumerate the crime-type facet domain.
    pub fn fetch_types(&self) -> Result<Vec<String>, AppError> {
        self.get_json("/types")
    }

    /// Enumerate the area facet domain.
    pub fn fetch_areas(&self) -> Result<Vec<String>, AppError> {
        self.get_json("/areas")
    }

    /// Enumerate the month facet domain. The service returns months
    /// unsorted; ordering is the catalog's job.
    pub fn fetch_dates(&self) -> Result<Vec<String>, AppError> {
        self.get_json("/dates")
    }

    /// Fetch aggregate statistics for a built query string.
    pub fn fetch_aggregates(&self, query: &str) -> Result<AggregateResult, AppError> {
        self.get_json(&format!("/charts/filtered?{query}"))
    }

    /// Fetch the filtered raw records as a CSV byte stream.
    ///
    /// The content is opaque to the client; it is written to disk verbatim.
    pub fn fetch_csv_export(&self, query: &str) -> Result<Vec<u8>, AppError> {
        let url = format!("{}/filteredcsv?{query}", self.base_url);
        log::debug!("GET {url}");
        let resp = self
            .client
            .get(&url)
            .send()
            .map_err(|e| AppError::transport(format!("Export request failed: {e}")))?;

        if !resp.status().is_success() {
            return Err(AppError::transport(format!(
                "Export request failed with status {}.",
                resp.status()
            )));
        }

        let bytes = resp
            .bytes()
            .map_err(|e| AppError::transport(format!("Failed to read export body: {e}")))?;
        Ok(bytes.to_vec())
    }

    fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, AppError> {
        let url = format!("{}{path}", self.base_url);
        log::debug!("GET {url}");
        let resp = self
            .client
            .get(&url)
            .send()
            .map_err(|e| AppError::transport(format!("Request to {url} failed: {e}")))?;

        // A non-success status is a distinct cause from a transport fault;
        // both fold into the same generic alert upstream, so the detail only
        // reaches the log.
        if !resp.status().is_success() {
            return Err(AppError::transport(format!(
                "Request to {url} failed with status {}.",
                resp.status()
            )));
        }

        resp.json()
            .map_err(|e| AppError::transport(format!("Failed to parse response from {url}: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_carries_the_api_suffix() {
        let client = ApiClient::new("http://dashboard.example:8080");
        assert_eq!(client.base_url(), "http://dashboard.example:8080/api");
    }

    #[test]
    fn trailing_slash_on_the_origin_is_tolerated() {
        let client = ApiClient::new("http://localhost:5000/");
        assert_eq!(client.base_url(), "http://localhost:5000/api");
    }
}
