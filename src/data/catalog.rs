//! Facet catalog loading.
//!
//! The three filter domains (types, areas, months) are fetched once at
//! startup and are immutable afterwards except by explicit reload. Each
//! fetch is independent: a failure is logged and leaves that domain empty
//! without blocking the other two.

use crate::data::api::ApiClient;
use crate::domain::{FacetGroup, FacetToggle};
use crate::error::AppError;

/// The enumerable filter domains.
#[derive(Debug, Clone, Default)]
pub struct FacetCatalog {
    /// Raw crime-type values, service order.
    pub types: Vec<String>,
    /// Area names, service order.
    pub areas: Vec<String>,
    /// Months, sorted ascending (`YYYY-MM` is lexicographic-safe).
    pub months: Vec<String>,
}

impl FacetCatalog {
    /// Fetch all three domains. The fetches are independent and may complete
    /// in any order; no shared state exists between them.
    pub fn load(client: &ApiClient) -> Self {
        let (types, (areas, months)) = rayon::join(
            || fetch_or_empty("types", || client.fetch_types()),
            || {
                rayon::join(
                    || fetch_or_empty("areas", || client.fetch_areas()),
                    || fetch_or_empty("dates", || client.fetch_dates()),
                )
            },
        );

        let mut months = months;
        months.sort();

        Self {
            types,
            areas,
            months,
        }
    }

    /// Selector entries for the crime-type panel: capitalized display
    /// labels over raw submission values.
    pub fn types_group(&self) -> FacetGroup {
        FacetGroup::new(
            self.types
                .iter()
                .map(|raw| FacetToggle::new(raw.clone(), type_display_label(raw)))
                .collect(),
        )
    }

    /// Selector entries for the area panel. Area names render verbatim.
    pub fn areas_group(&self) -> FacetGroup {
        FacetGroup::new(
            self.areas
                .iter()
                .map(|raw| FacetToggle::new(raw.clone(), raw.clone()))
                .collect(),
        )
    }
}

fn fetch_or_empty(
    facet: &str,
    fetch: impl FnOnce() -> Result<Vec<String>, AppError>,
) -> Vec<String> {
    match fetch() {
        Ok(values) => values,
        Err(err) => {
            log::warn!("Failed to load {facet} facet: {err}");
            Vec::new()
        }
    }
}

/// Cosmetic display form for a crime-type label: capitalize each word.
///
/// Display only; the raw value is what gets submitted.
pub fn type_display_label(raw: &str) -> String {
    raw.split(' ')
        .map(capitalize_first)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize_first(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
