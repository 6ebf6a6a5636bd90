//! Weekly aggregation: grouping a category's records into week buckets and
//! summing every declared column per bucket.

use std::collections::HashMap;

use anyhow::Result;
use chrono::{NaiveDate, Weekday};
use rust_decimal::Decimal;

use crate::config::CategorySchema;
use crate::error::DashboardError;
use crate::records::{Category, Record};
use crate::reports::trend::{classify, TrendDirection};
use crate::week::WeekBucket;

/// Summed values for one (category, week) pair.
#[derive(Debug, Clone, PartialEq)]
pub struct WeeklyAggregate {
    pub week: WeekBucket,
    values: HashMap<String, Decimal>,
}

impl WeeklyAggregate {
    pub fn week_start(&self) -> NaiveDate {
        self.week.start
    }

    pub fn week_end(&self) -> NaiveDate {
        self.week.end()
    }

    pub fn label(&self) -> String {
        self.week.label()
    }

    pub fn get(&self, column: &str) -> Option<Decimal> {
        self.values.get(column).copied()
    }
}

/// One category's weekly table: stable column order, rows ascending by week.
#[derive(Debug, Clone)]
pub struct WeeklyTable {
    pub category: Category,
    pub columns: Vec<String>,
    pub rows: Vec<WeeklyAggregate>,
}

impl WeeklyTable {
    /// The metric's values in ascending week order.
    pub fn series(&self, metric: &str) -> Result<Vec<Decimal>> {
        if !self.columns.iter().any(|c| c == metric) {
            return Err(DashboardError::UnknownField {
                target: self.category.to_string(),
                field: metric.to_string(),
            }
            .into());
        }
        Ok(self
            .rows
            .iter()
            .map(|row| row.get(metric).unwrap_or(Decimal::ZERO))
            .collect())
    }

    /// The metric's value in the chronologically latest bucket.
    pub fn latest(&self, metric: &str) -> Result<Decimal> {
        let series = self.series(metric)?;
        series.last().copied().ok_or_else(|| {
            DashboardError::EmptyCategory(self.category.to_string()).into()
        })
    }

    /// Trend of the metric across the last two buckets.
    pub fn trend(&self, metric: &str) -> Result<TrendDirection> {
        Ok(classify(&self.series(metric)?))
    }
}

/// Group records into week buckets and sum every schema column per bucket.
///
/// Only weeks holding at least one record appear; gaps are never fabricated.
/// Zero records is an `EmptyCategory` error so downstream trend and export
/// logic cannot silently assume a latest value.
pub fn aggregate_weekly(
    category: Category,
    schema: &CategorySchema,
    records: &[Record],
    week_start: Weekday,
) -> Result<WeeklyTable> {
    if records.is_empty() {
        return Err(DashboardError::EmptyCategory(schema.sheet.clone()).into());
    }

    let columns = schema.columns();

    let mut buckets: HashMap<WeekBucket, HashMap<String, Decimal>> = HashMap::new();
    for record in records {
        let bucket = WeekBucket::containing(record.date, week_start);
        let sums = buckets.entry(bucket).or_default();
        for column in &columns {
            // Sum only fields the record actually carries.
            if let Some(value) = record.get(column) {
                *sums.entry(column.clone()).or_insert(Decimal::ZERO) += value;
            }
        }
    }

    let mut rows: Vec<WeeklyAggregate> = buckets
        .into_iter()
        .map(|(week, values)| WeeklyAggregate { week, values })
        .collect();
    rows.sort_by_key(|row| row.week.start);

    Ok(WeeklyTable {
        category,
        columns,
        rows,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DashboardConfig;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn cost_record(d: NaiveDate, amount: Decimal) -> Record {
        let mut values = HashMap::new();
        values.insert("Costo".to_string(), amount);
        Record::new(d, values)
    }

    fn cost_schema() -> CategorySchema {
        DashboardConfig::default().schema(Category::Cost).clone()
    }

    #[test]
    fn test_records_in_same_week_are_summed() {
        let records = vec![
            cost_record(date(2024, 1, 1), dec!(100)),
            cost_record(date(2024, 1, 3), dec!(50)),
        ];
        let table =
            aggregate_weekly(Category::Cost, &cost_schema(), &records, Weekday::Mon).unwrap();

        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows[0].week_start(), date(2024, 1, 1));
        assert_eq!(table.rows[0].week_end(), date(2024, 1, 7));
        assert_eq!(table.rows[0].get("Costo"), Some(dec!(150)));
    }

    #[test]
    fn test_rows_sorted_ascending_even_from_unordered_input() {
        let records = vec![
            cost_record(date(2024, 1, 17), dec!(30)),
            cost_record(date(2024, 1, 2), dec!(10)),
            cost_record(date(2024, 1, 10), dec!(20)),
        ];
        let table =
            aggregate_weekly(Category::Cost, &cost_schema(), &records, Weekday::Mon).unwrap();

        let starts: Vec<NaiveDate> = table.rows.iter().map(|r| r.week_start()).collect();
        assert_eq!(
            starts,
            vec![date(2024, 1, 1), date(2024, 1, 8), date(2024, 1, 15)]
        );
    }

    #[test]
    fn test_missing_weeks_are_not_fabricated() {
        let records = vec![
            cost_record(date(2024, 1, 1), dec!(10)),
            cost_record(date(2024, 1, 29), dec!(20)),
        ];
        let table =
            aggregate_weekly(Category::Cost, &cost_schema(), &records, Weekday::Mon).unwrap();
        assert_eq!(table.rows.len(), 2);
    }

    #[test]
    fn test_empty_category_is_an_error() {
        let err =
            aggregate_weekly(Category::Cost, &cost_schema(), &[], Weekday::Mon).unwrap_err();
        let root = err.downcast_ref::<DashboardError>().unwrap();
        assert!(matches!(root, DashboardError::EmptyCategory(_)));
    }

    #[test]
    fn test_trend_on_table() {
        let records = vec![
            cost_record(date(2024, 1, 1), dec!(200)),
            cost_record(date(2024, 1, 8), dec!(150)),
        ];
        let table =
            aggregate_weekly(Category::Cost, &cost_schema(), &records, Weekday::Mon).unwrap();
        assert_eq!(table.trend("Costo").unwrap(), TrendDirection::Down);
        assert_eq!(table.latest("Costo").unwrap(), dec!(150));
    }

    #[test]
    fn test_unknown_metric_is_an_error() {
        let records = vec![cost_record(date(2024, 1, 1), dec!(200))];
        let table =
            aggregate_weekly(Category::Cost, &cost_schema(), &records, Weekday::Mon).unwrap();
        let err = table.trend("Ricavi").unwrap_err();
        let root = err.downcast_ref::<DashboardError>().unwrap();
        assert!(matches!(root, DashboardError::UnknownField { .. }));
    }
}
