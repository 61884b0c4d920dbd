//! Reporting utilities: formatted terminal output for the one-shot CLI.

pub mod format;

pub use format::*;
