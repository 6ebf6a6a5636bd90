//! The full derivation pipeline: load → derive → bucket/aggregate →
//! classify/export.
//!
//! Each run is an independent, stateless derivation from one input snapshot;
//! nothing is cached between invocations and the same input always produces
//! the same report and the same export bytes.

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use tracing::info;

use crate::config::DashboardConfig;
use crate::derive::apply_derived;
use crate::export::ExportDocument;
use crate::importers::load_records;
use crate::records::Category;
use crate::reports::{aggregate_weekly, TrendDirection, WeeklyTable};

/// One category's slice of the report: the weekly table plus its headline
/// indicator (latest value and trend of the configured metric).
#[derive(Debug, Clone)]
pub struct CategorySection {
    pub category: Category,
    pub table: WeeklyTable,
    pub headline: String,
    pub latest: Decimal,
    pub trend: TrendDirection,
}

/// The complete weekly report for one input snapshot.
#[derive(Debug, Clone)]
pub struct DashboardReport {
    pub sections: Vec<CategorySection>,
}

impl DashboardReport {
    pub fn section(&self, category: Category) -> Option<&CategorySection> {
        self.sections.iter().find(|s| s.category == category)
    }

    /// The exportable summary document derived from the weekly tables.
    pub fn export_document(&self) -> ExportDocument {
        ExportDocument::from_tables(self.sections.iter().map(|s| &s.table))
    }
}

/// Run the whole pipeline against the configured input workbook.
pub fn run(config: &DashboardConfig) -> Result<DashboardReport> {
    let loaded = load_records(&config.input_path, config)?;

    let mut sections = Vec::with_capacity(loaded.len());
    for (category, records) in loaded {
        let schema = config.schema(category);

        let records = apply_derived(records, &schema.derived)
            .with_context(|| format!("failed to derive fields for category '{}'", category))?;

        let table = aggregate_weekly(category, schema, &records, config.week_start)
            .with_context(|| format!("failed to aggregate category '{}'", category))?;

        let latest = table.latest(&schema.headline)?;
        let trend = table.trend(&schema.headline)?;
        info!(
            "Category '{}': {} weeks, latest {} = {}, trend {}",
            category,
            table.rows.len(),
            schema.headline,
            latest,
            trend
        );

        sections.push(CategorySection {
            category,
            table,
            headline: schema.headline.clone(),
            latest,
            trend,
        });
    }

    Ok(DashboardReport { sections })
}
