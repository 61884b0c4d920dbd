//! Data access: the aggregation service client, the facet catalog, and the
//! query builder.

pub mod api;
pub mod catalog;
pub mod query;

pub use api::*;
pub use catalog::*;
pub use query::*;
