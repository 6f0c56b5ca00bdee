//! Command-line parsing for the CBD trends dashboard.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the data-loading/view code.

use clap::{Parser, Subcommand};

use crate::domain::{EcoTab, Metric};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "cbd", version, about = "Melbourne CBD parking & traffic dashboard")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Launch the interactive TUI dashboard.
    Tui(TuiArgs),
    /// Fetch one trends metric and print it as a table (useful for scripting).
    Trends(TrendsArgs),
    /// Print the static eco-insights datasets.
    Eco(EcoArgs),
}

/// Options shared by the TUI and the trends fetch.
#[derive(Debug, Parser, Clone)]
pub struct TuiArgs {
    /// Metric tab to open the trends page with.
    #[arg(short = 'm', long, value_enum, default_value_t = Metric::Population)]
    pub metric: Metric,

    /// Base URL of the trends API (overrides `CBD_API_BASE`).
    #[arg(long)]
    pub base: Option<String>,
}

#[derive(Debug, Parser, Clone)]
pub struct TrendsArgs {
    /// Metric to fetch.
    #[arg(short = 'm', long, value_enum, default_value_t = Metric::Population)]
    pub metric: Metric,

    /// Base URL of the trends API (overrides `CBD_API_BASE`).
    #[arg(long)]
    pub base: Option<String>,

    /// Skip the summary header and print only the table.
    #[arg(long)]
    pub table_only: bool,
}

#[derive(Debug, Parser, Clone)]
pub struct EcoArgs {
    /// Which dataset to print.
    #[arg(short = 't', long, value_enum, default_value_t = EcoTab::Co2)]
    pub tab: EcoTab,
}
