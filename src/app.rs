//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - launches the TUI dashboard
//! - runs the non-interactive fetch/print paths

use clap::Parser;

use crate::cli::{Command, EcoArgs, TrendsArgs};
use crate::data::api::TrendsClient;
use crate::data::eco::{EMISSION_PER_KM, MODAL_SHARE};
use crate::domain::EcoTab;
use crate::error::AppError;
use crate::tui::trends::TrendsView;

/// Entry point for the `cbd` binary.
pub fn run() -> Result<(), AppError> {
    // We want `cbd` and `cbd -m congestion` to behave like `cbd tui ...`.
    //
    // Clap requires a subcommand name, so we do a small, explicit rewrite of the
    // argv list before parsing. This preserves a clean clap structure while
    // retaining the requested UX.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Tui(args) => crate::tui::run(args),
        Command::Trends(args) => handle_trends(args),
        Command::Eco(args) => handle_eco(args),
    }
}

fn handle_trends(args: TrendsArgs) -> Result<(), AppError> {
    let client = match &args.base {
        Some(base) => TrendsClient::with_base(base),
        None => TrendsClient::from_env(),
    };

    // Reuse the view state so the printed title/range go through the same
    // derivation as the TUI. There is no concurrency here: the fetch is
    // synchronous, so the ticket's generation is applied immediately.
    let (mut view, ticket) = TrendsView::new(args.metric);
    let result = client.fetch_rows(ticket.metric);
    let failed = result.is_err();
    view.apply(ticket.generation, result);

    if !args.table_only {
        print!("{}", crate::report::format_trend_summary(&view));
    }

    match view.state() {
        crate::domain::LoadState::Success(rows) => {
            print!("{}", crate::report::format_trend_table(args.metric, rows));
        }
        crate::domain::LoadState::Error(message) => {
            return Err(AppError::new(4, format!("Error: {message}")));
        }
        crate::domain::LoadState::Loading => {
            // Unreachable: the synchronous apply above always resolves.
            debug_assert!(!failed);
        }
    }

    Ok(())
}

fn handle_eco(args: EcoArgs) -> Result<(), AppError> {
    let out = match args.tab {
        EcoTab::Co2 => crate::report::format_emission_table(EMISSION_PER_KM),
        EcoTab::Mode => crate::report::format_modal_share_table(MODAL_SHARE),
    };
    print!("{out}");
    Ok(())
}

/// Rewrite argv so `cbd` defaults to `cbd tui`.
///
/// Rules:
/// - `cbd`                       -> `cbd tui`
/// - `cbd -m congestion ...`     -> `cbd tui -m congestion ...`
/// - `cbd --help/--version/-h`   -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("tui".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "tui" | "trends" | "eco");
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
