//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - builds the aggregation service client
//! - dispatches to the one-shot commands or the TUI

use clap::Parser;

use crate::cli::{BaseArgs, ChartsArgs, Command, ExportArgs};
use crate::data::{ApiClient, FacetCatalog};
use crate::error::AppError;

pub mod pipeline;

use pipeline::GENERIC_FETCH_ALERT;

/// Entry point for the `cdash` binary.
pub fn run() -> Result<(), AppError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    // We want a bare `cdash` to behave like `cdash tui`.
    //
    // Clap requires a subcommand name, so we do a small, explicit rewrite of
    // the argv list before parsing. This preserves a clean clap structure
    // while keeping the dashboard one keystroke away.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Charts(args) => handle_charts(args),
        Command::Export(args) => handle_export(args),
        Command::Facets(args) => handle_facets(args),
        Command::Tui(args) => crate::tui::run(client_for(&args)),
    }
}

fn client_for(base: &BaseArgs) -> ApiClient {
    match &base.base_url {
        Some(origin) => ApiClient::new(origin),
        None => ApiClient::from_env(),
    }
}

fn handle_charts(args: ChartsArgs) -> Result<(), AppError> {
    let client = client_for(&args.base);
    let filters = args.filters.to_filter_set();

    let run = match pipeline::run_query(&client, &filters) {
        Ok(run) => run,
        Err(err) if err.is_validation() => return Err(err),
        Err(err) => {
            log::warn!("chart data request failed: {err}");
            return Err(AppError::transport(GENERIC_FETCH_ALERT));
        }
    };

    let charts = crate::charts::reconcile(&run.aggregates);
    println!("{}", crate::report::format_charts(&run.filters, &charts));

    if args.plot && !args.no_plot {
        println!("{}", crate::plot::render_month_bars(&charts.months, args.width));
    }

    Ok(())
}

fn handle_export(args: ExportArgs) -> Result<(), AppError> {
    let client = client_for(&args.base);
    let filters = args.filters.to_filter_set();

    match pipeline::run_export(&client, &filters, &args.out) {
        Ok(bytes) => {
            println!("Wrote {bytes} bytes to {}", args.out.display());
            Ok(())
        }
        Err(err) if err.is_validation() => Err(err),
        Err(err) => {
            log::warn!("csv export failed: {err}");
            Err(AppError::transport(GENERIC_FETCH_ALERT))
        }
    }
}

fn handle_facets(args: BaseArgs) -> Result<(), AppError> {
    let client = client_for(&args);
    let catalog = FacetCatalog::load(&client);

    println!("Crime types ({}):", catalog.types.len());
    for entry in catalog.types_group().entries() {
        println!("  {} ({})", entry.label, entry.raw);
    }

    println!("\nAreas ({}):", catalog.areas.len());
    for area in &catalog.areas {
        println!("  {area}");
    }

    println!("\nMonths ({}):", catalog.months.len());
    for month in &catalog.months {
        println!("  {month}");
    }

    Ok(())
}

/// Rewrite argv so `cdash` defaults to `cdash tui`.
///
/// Rules:
/// - `cdash`                     -> `cdash tui`
/// - `cdash --base-url X`        -> `cdash tui --base-url X`
/// - `cdash --help/--version/-h` -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("tui".to_string());
        return argv;
    };

    let is_top_level_help_or_version =
        matches!(arg1.as_str(), "-h" | "--help" | "-V" | "--version" | "help");
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "charts" | "export" | "facets" | "tui");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "tui flags".
    if arg1.starts_with('-') {
        argv.insert(1, "tui".to_string());
        return argv;
    }

    // Otherwise, leave as-is.
    argv
}
