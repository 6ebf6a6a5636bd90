//! Output formatting for CLI display, separating data calculation from
//! presentation.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Result;
use calamine::{DataType, Reader};
use colored::{ColoredString, Colorize};
use serde::Serialize;
use tabled::builder::Builder;
use tabled::settings::Style;

use crate::importers::open_workbook_file;
use crate::pipeline::{CategorySection, DashboardReport};
use crate::records::Category;
use crate::reports::TrendDirection;
use crate::utils::{format_amount, format_currency};

/// Print the indicator block and the three weekly tables.
pub fn print_report(report: &DashboardReport) {
    println!("{}", "Indicatori settimanali".bold());
    for section in &report.sections {
        println!(
            "  {} {:<18} {:>14}  ({})",
            trend_arrow(section.trend),
            section.category.indicator_title(),
            headline_value(section),
            section.trend
        );
    }

    for section in &report.sections {
        println!("\n{}", section.category.export_sheet().bold());
        println!("{}", weekly_table(section));
    }
}

fn trend_arrow(trend: TrendDirection) -> ColoredString {
    match trend {
        TrendDirection::Up => trend.arrow().green(),
        TrendDirection::Down => trend.arrow().red(),
        TrendDirection::Stable => trend.arrow().yellow(),
    }
}

fn headline_value(section: &CategorySection) -> String {
    match section.category {
        Category::Production => format_amount(section.latest),
        Category::Cost | Category::Cash => format_currency(section.latest),
    }
}

fn weekly_table(section: &CategorySection) -> String {
    let mut builder = Builder::default();

    let mut header = vec!["Settimana".to_string()];
    header.extend(section.table.columns.iter().cloned());
    builder.push_record(header);

    for row in &section.table.rows {
        let mut cells = vec![row.label()];
        for column in &section.table.columns {
            let value = row.get(column).unwrap_or_default();
            cells.push(format_amount(value));
        }
        builder.push_record(cells);
    }

    builder.build().with(Style::rounded()).to_string()
}

/// Serialize the report for `--json` output. Decimal values are emitted as
/// strings to avoid float re-interpretation by consumers.
pub fn format_report_json(report: &DashboardReport) -> Result<String> {
    #[derive(Serialize)]
    struct JsonWeek {
        week_start: String,
        week_end: String,
        label: String,
        values: BTreeMap<String, String>,
    }

    #[derive(Serialize)]
    struct JsonSection {
        category: Category,
        headline: String,
        latest: String,
        trend: TrendDirection,
        weeks: Vec<JsonWeek>,
    }

    #[derive(Serialize)]
    struct JsonReport {
        sections: Vec<JsonSection>,
    }

    let sections = report
        .sections
        .iter()
        .map(|section| JsonSection {
            category: section.category,
            headline: section.headline.clone(),
            latest: section.latest.to_string(),
            trend: section.trend,
            weeks: section
                .table
                .rows
                .iter()
                .map(|row| JsonWeek {
                    week_start: row.week_start().to_string(),
                    week_end: row.week_end().to_string(),
                    label: row.label(),
                    values: section
                        .table
                        .columns
                        .iter()
                        .map(|column| {
                            (
                                column.clone(),
                                row.get(column).unwrap_or_default().to_string(),
                            )
                        })
                        .collect(),
                })
                .collect(),
        })
        .collect();

    Ok(serde_json::to_string_pretty(&JsonReport { sections })?)
}

/// Print sheet names and header rows of an arbitrary workbook.
pub fn print_inspect(path: &Path) -> Result<()> {
    let mut workbook = open_workbook_file(path)?;
    let sheet_names = workbook.sheet_names();

    println!("Sheets in {:?}:", path);
    for name in sheet_names {
        println!("\n  {}", name.bold());
        let range = match workbook.worksheet_range(&name) {
            Ok(range) => range,
            Err(e) => {
                println!("    (unreadable: {})", e);
                continue;
            }
        };
        match range.rows().find(|row| row.iter().any(|c| !c.is_empty())) {
            Some(header) => {
                let cells: Vec<String> = header.iter().map(|c| c.to_string()).collect();
                println!("    {}", cells.join(" | "));
                println!("    {} data rows", range.rows().count().saturating_sub(1));
            }
            None => println!("    (empty)"),
        }
    }

    Ok(())
}
