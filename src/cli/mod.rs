//! Command-line parsing for the crime dashboard client.
//!
//! The goal of this module is to keep **argument parsing** and **command
//! dispatch** separate from the query/chart code.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::FilterSet;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "cdash", version, about = "Crime-incident dashboard (terminal client)")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch aggregates for a filter set and print the chart report.
    Charts(ChartsArgs),
    /// Download the filtered raw records as a CSV file.
    Export(ExportArgs),
    /// List the available filter facets (types, areas, months).
    Facets(BaseArgs),
    /// Launch the interactive TUI dashboard.
    ///
    /// This uses the same underlying query pipeline as `cdash charts`, but
    /// renders results in a terminal UI using Ratatui.
    Tui(BaseArgs),
}

/// Options shared by every subcommand.
#[derive(Debug, Parser, Clone)]
pub struct BaseArgs {
    /// Aggregation service origin (defaults to $CRIME_API_URL, then
    /// http://127.0.0.1:5000). The fixed `/api` suffix is appended.
    #[arg(long)]
    pub base_url: Option<String>,
}

/// Filter facets shared by the chart and export commands.
///
/// Left non-required on purpose: the query builder is the single gate for
/// the "all four facets" precondition, so its warning covers the CLI too.
#[derive(Debug, Parser, Clone)]
pub struct FilterArgs {
    /// Crime types to include (comma-separated raw values).
    #[arg(long, value_delimiter = ',')]
    pub types: Vec<String>,

    /// Areas to include (comma-separated).
    #[arg(long, value_delimiter = ',')]
    pub areas: Vec<String>,

    /// First month of the range (YYYY-MM).
    #[arg(long)]
    pub start: Option<String>,

    /// Last month of the range (YYYY-MM).
    #[arg(long)]
    pub end: Option<String>,
}

impl FilterArgs {
    pub fn to_filter_set(&self) -> FilterSet {
        FilterSet {
            types: self.types.clone(),
            areas: self.areas.clone(),
            start_month: self.start.clone().unwrap_or_default(),
            end_month: self.end.clone().unwrap_or_default(),
        }
    }
}

/// Options for the one-shot chart report.
#[derive(Debug, Parser, Clone)]
pub struct ChartsArgs {
    #[command(flatten)]
    pub base: BaseArgs,

    #[command(flatten)]
    pub filters: FilterArgs,

    /// Render an ASCII month chart under the report (enabled by default).
    #[arg(long, default_value_t = true)]
    pub plot: bool,

    /// Disable the ASCII month chart.
    #[arg(long)]
    pub no_plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 60)]
    pub width: usize,
}

/// Options for the CSV export.
#[derive(Debug, Parser, Clone)]
pub struct ExportArgs {
    #[command(flatten)]
    pub base: BaseArgs,

    #[command(flatten)]
    pub filters: FilterArgs,

    /// Output file path.
    #[arg(long, default_value = crate::io::DEFAULT_EXPORT_FILENAME)]
    pub out: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comma_separated_facets_parse_into_a_filter_set() {
        let cli = Cli::parse_from([
            "cdash",
            "charts",
            "--types",
            "theft,vehicle - stolen",
            "--areas",
            "Central",
            "--start",
            "2024-06",
            "--end",
            "2025-03",
        ]);
        let Command::Charts(args) = cli.command else {
            panic!("expected charts subcommand");
        };
        let filters = args.filters.to_filter_set();
        assert_eq!(filters.types, vec!["theft", "vehicle - stolen"]);
        assert_eq!(filters.areas, vec!["Central"]);
        assert_eq!(filters.start_month, "2024-06");
        assert_eq!(filters.end_month, "2025-03");
    }

    #[test]
    fn missing_facets_parse_as_empty_for_the_builder_to_reject() {
        let cli = Cli::parse_from(["cdash", "charts"]);
        let Command::Charts(args) = cli.command else {
            panic!("expected charts subcommand");
        };
        let filters = args.filters.to_filter_set();
        assert_eq!(filters.unmet_preconditions().len(), 4);
    }

    #[test]
    fn export_defaults_to_the_suggested_filename() {
        let cli = Cli::parse_from(["cdash", "export"]);
        let Command::Export(args) = cli.command else {
            panic!("expected export subcommand");
        };
        assert_eq!(args.out, PathBuf::from("crime_data.csv"));
    }
}
