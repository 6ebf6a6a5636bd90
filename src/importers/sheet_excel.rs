//! Excel sheet parsing for one category schema.
//!
//! Locates the sheet, scans for the header row, maps the schema's columns to
//! indices and parses each data row into a `Record`. Dates and numbers accept
//! both native Excel cells and common string formats.

use std::io::{Read, Seek};
use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result};
use calamine::{open_workbook, Data, DataType, Reader, Xlsx};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::debug;

use crate::config::CategorySchema;
use crate::error::DashboardError;
use crate::records::Record;

/// Open an .xlsx workbook from disk.
pub fn open_workbook_file<P: AsRef<Path>>(
    path: P,
) -> Result<Xlsx<std::io::BufReader<std::fs::File>>> {
    let path = path.as_ref();
    let workbook: Xlsx<_> =
        open_workbook(path).with_context(|| format!("failed to open Excel file {:?}", path))?;
    Ok(workbook)
}

/// Column indices resolved from the header row against a schema.
#[derive(Debug)]
struct ColumnMapping {
    date: usize,
    values: Vec<(String, usize)>,
}

impl ColumnMapping {
    fn from_header(header: &[Data], schema: &CategorySchema) -> Result<Self> {
        let find = |name: &str| -> Option<usize> {
            header.iter().position(|cell| {
                cell.to_string().trim().eq_ignore_ascii_case(name)
            })
        };

        let date = find(&schema.date_column).ok_or_else(|| {
            DashboardError::MalformedInput(format!(
                "sheet '{}' has no date column '{}'",
                schema.sheet, schema.date_column
            ))
        })?;

        let mut values = Vec::with_capacity(schema.value_columns.len());
        for name in &schema.value_columns {
            let idx = find(name).ok_or_else(|| {
                DashboardError::MalformedInput(format!(
                    "sheet '{}' has no column '{}'",
                    schema.sheet, name
                ))
            })?;
            values.push((name.clone(), idx));
        }

        Ok(Self { date, values })
    }
}

/// Parse one category sheet into records.
pub fn read_sheet_records<RS: Read + Seek>(
    workbook: &mut Xlsx<RS>,
    schema: &CategorySchema,
) -> Result<Vec<Record>> {
    let sheet_name = find_sheet(workbook, &schema.sheet)?;

    let range = workbook
        .worksheet_range(&sheet_name)
        .with_context(|| format!("failed to read worksheet '{}'", sheet_name))?;

    // The header is the first row carrying the configured date column.
    let mut header_row_idx = None;
    let mut mapping = None;
    for (idx, row) in range.rows().enumerate() {
        let has_date_column = row.iter().any(|cell| {
            cell.to_string()
                .trim()
                .eq_ignore_ascii_case(&schema.date_column)
        });
        if has_date_column {
            header_row_idx = Some(idx);
            mapping = Some(ColumnMapping::from_header(row, schema)?);
            break;
        }
    }

    let header_idx = header_row_idx.ok_or_else(|| {
        DashboardError::MalformedInput(format!(
            "sheet '{}' has no header row with date column '{}'",
            schema.sheet, schema.date_column
        ))
    })?;
    let mapping = mapping.expect("mapping set together with header index");
    debug!("Column mapping for '{}': {:?}", sheet_name, mapping);

    let mut records = Vec::new();
    for (idx, row) in range.rows().enumerate() {
        if idx <= header_idx {
            continue;
        }
        if row.iter().all(|cell| cell.is_empty()) {
            continue;
        }

        let record = parse_row(row, &mapping).map_err(|e| {
            DashboardError::MalformedInput(format!(
                "sheet '{}' row {}: {}",
                schema.sheet,
                idx + 1,
                e
            ))
        })?;
        records.push(record);
    }

    Ok(records)
}

/// Resolve the configured sheet name, tolerating case differences.
fn find_sheet<RS: Read + Seek>(workbook: &Xlsx<RS>, wanted: &str) -> Result<String> {
    let sheet_names = workbook.sheet_names();

    if sheet_names.iter().any(|name| name == wanted) {
        return Ok(wanted.to_string());
    }

    for name in &sheet_names {
        if name.eq_ignore_ascii_case(wanted) {
            return Ok(name.clone());
        }
    }

    Err(DashboardError::MalformedInput(format!(
        "workbook has no sheet '{}' (found: {})",
        wanted,
        sheet_names.join(", ")
    ))
    .into())
}

fn parse_row(row: &[Data], mapping: &ColumnMapping) -> Result<Record> {
    let date_cell = row
        .get(mapping.date)
        .filter(|cell| !cell.is_empty())
        .ok_or_else(|| anyhow::anyhow!("missing date"))?;
    let date = parse_date(date_cell)?;

    let mut values = std::collections::HashMap::with_capacity(mapping.values.len());
    for (name, idx) in &mapping.values {
        // A blank cell sums as zero; a non-empty cell must parse.
        let value = match row.get(*idx) {
            Some(cell) if !cell.is_empty() => parse_decimal(cell)
                .with_context(|| format!("column '{}'", name))?,
            _ => Decimal::ZERO,
        };
        values.insert(name.clone(), value);
    }

    Ok(Record::new(date, values))
}

/// Parse a date cell: native Excel datetimes or ISO/European strings.
fn parse_date(cell: &Data) -> Result<NaiveDate> {
    match cell {
        Data::DateTime(dt) => {
            let days_since_epoch = dt.as_f64().floor() as i64;
            let excel_epoch = NaiveDate::from_ymd_opt(1899, 12, 30)
                .ok_or_else(|| anyhow::anyhow!("invalid Excel epoch"))?;
            excel_epoch
                .checked_add_signed(chrono::Duration::days(days_since_epoch))
                .ok_or_else(|| anyhow::anyhow!("date overflow"))
        }
        _ => {
            let date_str = cell.to_string();
            let date_str = date_str.trim();

            if let Ok(date) = NaiveDate::parse_from_str(date_str, "%Y-%m-%d") {
                return Ok(date);
            }
            if let Ok(date) = NaiveDate::parse_from_str(date_str, "%d/%m/%Y") {
                return Ok(date);
            }
            if let Ok(date) = NaiveDate::parse_from_str(date_str, "%d-%m-%Y") {
                return Ok(date);
            }

            Err(anyhow::anyhow!("could not parse date: {}", date_str))
        }
    }
}

/// Parse a numeric cell (handles numbers, strings in Italian format).
fn parse_decimal(cell: &Data) -> Result<Decimal> {
    match cell {
        Data::Int(i) => Ok(Decimal::from(*i)),
        Data::Float(f) => rust_decimal::prelude::FromPrimitive::from_f64(*f)
            .ok_or_else(|| anyhow::anyhow!("invalid decimal: {}", f)),
        _ => {
            let text = cell
                .to_string()
                .replace('€', "")
                .replace(' ', "")
                .replace('.', "") // Remove thousand separators
                .replace(',', "."); // Replace decimal comma with dot

            Decimal::from_str(&text)
                .with_context(|| format!("failed to parse decimal '{}'", cell))
        }
    }
}
