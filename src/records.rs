//! Data model for raw transactional records.

use std::collections::HashMap;
use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The three record categories tracked by the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Cost,
    Production,
    Cash,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Cost, Category::Production, Category::Cash];

    /// Sheet name used for this category in the exported summary workbook.
    pub fn export_sheet(&self) -> &'static str {
        match self {
            Category::Cost => "Costi Settimanali",
            Category::Production => "Produzione Settimanale",
            Category::Cash => "Cassa Settimanale",
        }
    }

    /// Heading used for the category's indicator in the report view.
    pub fn indicator_title(&self) -> &'static str {
        match self {
            Category::Cost => "Weekly Costs",
            Category::Production => "Weekly Production",
            Category::Cash => "Weekly Cash Flow",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Category::Cost => "cost",
            Category::Production => "production",
            Category::Cash => "cash",
        };
        write!(f, "{}", name)
    }
}

/// One raw row of input: a calendar date plus named numeric fields.
///
/// Records are immutable once loaded; the derived-field calculator produces
/// extended copies rather than mutating in place.
#[derive(Debug, Clone)]
pub struct Record {
    pub date: NaiveDate,
    values: HashMap<String, Decimal>,
}

impl Record {
    pub fn new(date: NaiveDate, values: HashMap<String, Decimal>) -> Self {
        Self { date, values }
    }

    pub fn get(&self, field: &str) -> Option<Decimal> {
        self.values.get(field).copied()
    }

    /// Copy of this record with one extra field appended.
    pub fn with_field(&self, name: &str, value: Decimal) -> Self {
        let mut values = self.values.clone();
        values.insert(name.to_string(), value);
        Self {
            date: self.date,
            values,
        }
    }
}
