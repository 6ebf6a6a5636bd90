//! Summary export: the weekly tables flattened into a downloadable workbook,
//! one sheet per category.
//!
//! The layout is re-parseable: each sheet carries the week start date in a
//! `Data` column, so loading an exported sheet with a matching schema and
//! re-aggregating reproduces the same weekly values.

use std::path::Path;

use anyhow::{anyhow, Context, Result};
use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_xlsxwriter::{DocProperties, ExcelDateTime, Workbook};
use tracing::info;

use crate::reports::WeeklyTable;

/// Default name of the exported summary workbook.
pub const DEFAULT_EXPORT_FILENAME: &str = "riepilogo_settimanale.xlsx";

pub const DATE_COLUMN: &str = "Data";
pub const LABEL_COLUMN: &str = "Settimana";

/// One exported sheet: header plus one row per week, ascending.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportSheet {
    pub name: String,
    pub columns: Vec<String>,
    pub rows: Vec<ExportRow>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExportRow {
    pub week_start: NaiveDate,
    pub label: String,
    pub values: Vec<Decimal>,
}

/// The structured multi-sheet summary derived from the weekly tables.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportDocument {
    pub sheets: Vec<ExportSheet>,
}

impl ExportDocument {
    pub fn from_tables<'a, I>(tables: I) -> Self
    where
        I: IntoIterator<Item = &'a WeeklyTable>,
    {
        let sheets = tables
            .into_iter()
            .map(|table| {
                let mut columns =
                    vec![DATE_COLUMN.to_string(), LABEL_COLUMN.to_string()];
                columns.extend(table.columns.iter().cloned());

                let rows = table
                    .rows
                    .iter()
                    .map(|row| ExportRow {
                        week_start: row.week_start(),
                        label: row.label(),
                        values: table
                            .columns
                            .iter()
                            .map(|column| row.get(column).unwrap_or(Decimal::ZERO))
                            .collect(),
                    })
                    .collect();

                ExportSheet {
                    name: table.category.export_sheet().to_string(),
                    columns,
                    rows,
                }
            })
            .collect();

        Self { sheets }
    }

    /// Serialize to xlsx bytes (the download stream).
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut workbook = self.build_workbook()?;
        let bytes = workbook
            .save_to_buffer()
            .context("failed to serialize summary workbook")?;
        Ok(bytes)
    }

    /// Write the workbook to disk.
    pub fn write_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let mut workbook = self.build_workbook()?;
        workbook
            .save(path)
            .with_context(|| format!("failed to write summary workbook {:?}", path))?;
        info!("Wrote weekly summary to {:?}", path);
        Ok(())
    }

    fn build_workbook(&self) -> Result<Workbook> {
        let mut workbook = Workbook::new();

        // Fixed creation date keeps the output byte-identical across runs.
        let properties =
            DocProperties::new().set_creation_datetime(&ExcelDateTime::from_ymd(2000, 1, 1)?);
        workbook.set_properties(&properties);

        for sheet in &self.sheets {
            let worksheet = workbook.add_worksheet();
            worksheet.set_name(&sheet.name)?;

            for (col, header) in sheet.columns.iter().enumerate() {
                worksheet.write_string(0, col as u16, header)?;
            }

            for (row_idx, row) in sheet.rows.iter().enumerate() {
                let excel_row = (row_idx + 1) as u32;
                worksheet.write_string(
                    excel_row,
                    0,
                    &row.week_start.format("%Y-%m-%d").to_string(),
                )?;
                worksheet.write_string(excel_row, 1, &row.label)?;
                for (col, value) in row.values.iter().enumerate() {
                    let number = value
                        .to_f64()
                        .ok_or_else(|| anyhow!("value {} not representable as number", value))?;
                    worksheet.write_number(excel_row, (col + 2) as u16, number)?;
                }
            }
        }

        Ok(workbook)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DashboardConfig;
    use crate::records::{Category, Record};
    use crate::reports::aggregate_weekly;
    use chrono::Weekday;
    use rust_decimal_macros::dec;
    use std::collections::HashMap;

    fn cost_table() -> WeeklyTable {
        let config = DashboardConfig::default();
        let schema = config.schema(Category::Cost);
        let records: Vec<Record> = [(1, dec!(200)), (8, dec!(150))]
            .into_iter()
            .map(|(day, amount)| {
                let mut values = HashMap::new();
                values.insert("Costo".to_string(), amount);
                Record::new(
                    NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
                    values,
                )
            })
            .collect();
        aggregate_weekly(Category::Cost, schema, &records, Weekday::Mon).unwrap()
    }

    #[test]
    fn test_sheet_layout() {
        let table = cost_table();
        let document = ExportDocument::from_tables([&table]);

        assert_eq!(document.sheets.len(), 1);
        let sheet = &document.sheets[0];
        assert_eq!(sheet.name, "Costi Settimanali");
        assert_eq!(sheet.columns, vec!["Data", "Settimana", "Costo"]);
        assert_eq!(sheet.rows.len(), 2);
        assert_eq!(sheet.rows[0].label, "01-Jan → 07-Jan");
        assert_eq!(sheet.rows[0].values, vec![dec!(200)]);
        assert_eq!(sheet.rows[1].values, vec![dec!(150)]);
    }

    #[test]
    fn test_serialization_is_deterministic() {
        let table = cost_table();
        let document = ExportDocument::from_tables([&table]);
        let first = document.to_bytes().unwrap();
        let second = document.to_bytes().unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_bytes_look_like_a_zip_container() {
        let table = cost_table();
        let document = ExportDocument::from_tables([&table]);
        let bytes = document.to_bytes().unwrap();
        assert_eq!(&bytes[0..2], b"PK");
    }
}
