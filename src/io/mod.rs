//! Input/output helpers.
//!
//! - CSV export writing (`export`)

pub mod export;

pub use export::*;
