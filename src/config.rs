//! Dashboard configuration: input location, week anchor and per-category
//! sheet schemas. Loadable from TOML; defaults reproduce the standard
//! workbook layout (Costi / Produzione / Cassa, weeks starting Monday).

use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::derive::{DerivedField, Formula};
use crate::error::Result;
use crate::records::Category;

pub const DEFAULT_INPUT_FILE: &str = "dati_quarra.xlsx";

/// Schema for one category's sheet: where the records live and which columns
/// carry dates, values and derived fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategorySchema {
    /// Sheet name in the input workbook
    pub sheet: String,
    /// Column holding the record date
    pub date_column: String,
    /// Numeric columns summed per week
    pub value_columns: Vec<String>,
    /// Derived columns computed per record before bucketing
    #[serde(default)]
    pub derived: Vec<DerivedField>,
    /// Metric used for the category's indicator and trend
    pub headline: String,
}

impl CategorySchema {
    /// All numeric columns in stable output order: declared values first,
    /// then derived fields in declaration order.
    pub fn columns(&self) -> Vec<String> {
        self.value_columns
            .iter()
            .cloned()
            .chain(self.derived.iter().map(|d| d.name.clone()))
            .collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategorySchemas {
    pub cost: CategorySchema,
    pub production: CategorySchema,
    pub cash: CategorySchema,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Path of the input workbook
    #[serde(default = "default_input_path")]
    pub input_path: PathBuf,
    /// Weekday on which buckets begin
    #[serde(default = "default_week_start", with = "weekday_name")]
    pub week_start: Weekday,
    #[serde(default = "default_schemas")]
    pub categories: CategorySchemas,
}

impl DashboardConfig {
    /// Load from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {:?}", path))?;
        let config: DashboardConfig = toml::from_str(&text)
            .with_context(|| format!("failed to parse config file {:?}", path))?;
        Ok(config)
    }

    pub fn schema(&self, category: Category) -> &CategorySchema {
        match category {
            Category::Cost => &self.categories.cost,
            Category::Production => &self.categories.production,
            Category::Cash => &self.categories.cash,
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            input_path: default_input_path(),
            week_start: default_week_start(),
            categories: default_schemas(),
        }
    }
}

fn default_input_path() -> PathBuf {
    PathBuf::from(DEFAULT_INPUT_FILE)
}

fn default_week_start() -> Weekday {
    Weekday::Mon
}

fn default_schemas() -> CategorySchemas {
    CategorySchemas {
        cost: CategorySchema {
            sheet: "Costi".to_string(),
            date_column: "Data".to_string(),
            value_columns: vec!["Costo".to_string()],
            derived: vec![],
            headline: "Costo".to_string(),
        },
        production: CategorySchema {
            sheet: "Produzione".to_string(),
            date_column: "Data".to_string(),
            value_columns: vec!["Quantità Prodotte".to_string()],
            derived: vec![],
            headline: "Quantità Prodotte".to_string(),
        },
        cash: CategorySchema {
            sheet: "Cassa".to_string(),
            date_column: "Data".to_string(),
            value_columns: vec!["Entrate".to_string(), "Uscite".to_string()],
            derived: vec![DerivedField {
                name: "Saldo Netto".to_string(),
                formula: Formula::Difference {
                    minuend: "Entrate".to_string(),
                    subtrahend: "Uscite".to_string(),
                },
            }],
            headline: "Saldo Netto".to_string(),
        },
    }
}

/// Serialize weekdays as lowercase names ("monday"); accept anything chrono's
/// parser does ("mon", "Monday", ...).
mod weekday_name {
    use chrono::Weekday;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(day: &Weekday, serializer: S) -> Result<S::Ok, S::Error> {
        let name = match day {
            Weekday::Mon => "monday",
            Weekday::Tue => "tuesday",
            Weekday::Wed => "wednesday",
            Weekday::Thu => "thursday",
            Weekday::Fri => "friday",
            Weekday::Sat => "saturday",
            Weekday::Sun => "sunday",
        };
        serializer.serialize_str(name)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Weekday, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse::<Weekday>()
            .map_err(|_| de::Error::custom(format!("invalid weekday '{}'", text)))
    }
}
