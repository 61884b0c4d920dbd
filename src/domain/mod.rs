//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - filter-set and facet-selection state (`FilterSet`, `FacetGroup`)
//! - the aggregate wire shape (`AggregateResult`, `OrderedCounts`)
//! - chart models and the fixed month axis (`ChartModel`, `MONTH_AXIS`)

pub mod selection;
pub mod types;

pub use selection::*;
pub use types::*;
