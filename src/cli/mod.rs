use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub mod formatters;

#[derive(Parser)]
#[command(name = "quarra")]
#[command(
    version,
    about = "Weekly operations dashboard for costs, production and cash flow"
)]
#[command(
    long_about = "Aggregate dated cost, production and cash records from an Excel workbook into calendar weeks, show trend indicators, and export the weekly summary."
)]
pub struct Cli {
    /// Path to the TOML configuration file (defaults to the built-in layout)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Override the input workbook path from the configuration
    #[arg(long, global = true)]
    pub input: Option<PathBuf>,

    /// Disable colorized/ANSI output
    #[arg(long = "no-color", global = true)]
    pub no_color: bool,

    /// Output results in JSON format
    #[arg(long = "json", global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show weekly indicators and the per-category weekly tables
    Report,

    /// Export the weekly summary workbook
    Export {
        /// Output path (defaults to riepilogo_settimanale.xlsx)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Inspect workbook structure (sheet names and header rows)
    Inspect {
        /// Path to the Excel file
        file: PathBuf,
    },
}
