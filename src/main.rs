use anyhow::Result;
use clap::Parser;
use colored::Colorize;

use quarra_weekly::cli::{formatters, Cli, Commands};
use quarra_weekly::config::DashboardConfig;
use quarra_weekly::export::DEFAULT_EXPORT_FILENAME;
use quarra_weekly::pipeline;

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }

    let config = load_config(&cli)?;

    match &cli.command {
        Commands::Report => {
            let report = pipeline::run(&config)?;
            if cli.json {
                println!("{}", formatters::format_report_json(&report)?);
            } else {
                formatters::print_report(&report);
            }
            Ok(())
        }

        Commands::Export { output } => {
            let report = pipeline::run(&config)?;
            let path = output
                .clone()
                .unwrap_or_else(|| DEFAULT_EXPORT_FILENAME.into());
            report.export_document().write_file(&path)?;
            println!(
                "{} Exported weekly summary to {}",
                "✓".green().bold(),
                path.display()
            );
            Ok(())
        }

        Commands::Inspect { file } => formatters::print_inspect(file),
    }
}

fn load_config(cli: &Cli) -> Result<DashboardConfig> {
    let mut config = match &cli.config {
        Some(path) => DashboardConfig::load(path)?,
        None => DashboardConfig::default(),
    };
    if let Some(input) = &cli.input {
        config.input_path = input.clone();
    }
    Ok(config)
}
