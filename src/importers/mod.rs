// Import module - schema-driven Excel workbook loader

pub mod sheet_excel;

use std::path::Path;

use anyhow::Result;
use tracing::info;

use crate::config::DashboardConfig;
use crate::error::DashboardError;
use crate::records::{Category, Record};

pub use sheet_excel::{open_workbook_file, read_sheet_records};

/// Load every category's raw records from the configured input workbook.
///
/// Pure read: records come back exactly as the sheets hold them, with no
/// derived fields applied. Sheet order follows `Category::ALL`.
pub fn load_records<P: AsRef<Path>>(
    path: P,
    config: &DashboardConfig,
) -> Result<Vec<(Category, Vec<Record>)>> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();

    if extension != "xlsx" && extension != "xls" {
        return Err(DashboardError::MalformedInput(format!(
            "unsupported input format '{}': expected .xlsx or .xls",
            extension
        ))
        .into());
    }

    info!("Loading workbook: {:?}", path);
    let mut workbook = open_workbook_file(path)?;

    let mut loaded = Vec::with_capacity(Category::ALL.len());
    for category in Category::ALL {
        let schema = config.schema(category);
        let records = read_sheet_records(&mut workbook, schema)?;
        info!(
            "Loaded {} records from sheet '{}'",
            records.len(),
            schema.sheet
        );
        loaded.push((category, records));
    }

    Ok(loaded)
}
