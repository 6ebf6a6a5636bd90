//! Derived fields computed per record before bucketing.
//!
//! Applying formulas per record (rather than to weekly sums) keeps the
//! contract unambiguous when a formula is not distributive over summation.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{DashboardError, Result};
use crate::records::Record;

/// Declarative formula for a derived field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Formula {
    /// minuend − subtrahend
    Difference { minuend: String, subtrahend: String },
    /// Sum of the named fields
    Sum { fields: Vec<String> },
}

impl Formula {
    /// Evaluate against a single record. Referencing a field the record's
    /// schema does not carry is an `UnknownField` error, not a zero.
    pub fn evaluate(&self, target: &str, record: &Record) -> Result<Decimal> {
        let lookup = |field: &str| -> Result<Decimal> {
            record.get(field).ok_or_else(|| {
                DashboardError::UnknownField {
                    target: target.to_string(),
                    field: field.to_string(),
                }
                .into()
            })
        };

        match self {
            Formula::Difference {
                minuend,
                subtrahend,
            } => Ok(lookup(minuend)? - lookup(subtrahend)?),
            Formula::Sum { fields } => {
                let mut total = Decimal::ZERO;
                for field in fields {
                    total += lookup(field)?;
                }
                Ok(total)
            }
        }
    }
}

/// A named derived column and the formula that produces it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedField {
    pub name: String,
    pub formula: Formula,
}

/// Extend every record with the configured derived fields, in declaration
/// order so later formulas may reference earlier derived values.
pub fn apply_derived(records: Vec<Record>, derived: &[DerivedField]) -> Result<Vec<Record>> {
    if derived.is_empty() {
        return Ok(records);
    }

    records
        .into_iter()
        .map(|record| {
            let mut extended = record;
            for field in derived {
                let value = field.formula.evaluate(&field.name, &extended)?;
                extended = extended.with_field(&field.name, value);
            }
            Ok(extended)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use std::collections::HashMap;

    fn cash_record(inflow: Decimal, outflow: Decimal) -> Record {
        let mut values = HashMap::new();
        values.insert("Entrate".to_string(), inflow);
        values.insert("Uscite".to_string(), outflow);
        Record::new(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(), values)
    }

    fn net_balance() -> DerivedField {
        DerivedField {
            name: "Saldo Netto".to_string(),
            formula: Formula::Difference {
                minuend: "Entrate".to_string(),
                subtrahend: "Uscite".to_string(),
            },
        }
    }

    #[test]
    fn test_difference_per_record() {
        let records = vec![cash_record(dec!(100), dec!(40)), cash_record(dec!(50), dec!(10))];
        let extended = apply_derived(records, &[net_balance()]).unwrap();
        assert_eq!(extended[0].get("Saldo Netto"), Some(dec!(60)));
        assert_eq!(extended[1].get("Saldo Netto"), Some(dec!(40)));
    }

    #[test]
    fn test_sum_formula() {
        let derived = DerivedField {
            name: "Movimento".to_string(),
            formula: Formula::Sum {
                fields: vec!["Entrate".to_string(), "Uscite".to_string()],
            },
        };
        let extended = apply_derived(vec![cash_record(dec!(100), dec!(40))], &[derived]).unwrap();
        assert_eq!(extended[0].get("Movimento"), Some(dec!(140)));
    }

    #[test]
    fn test_unknown_field_fails_loudly() {
        let derived = DerivedField {
            name: "Saldo Netto".to_string(),
            formula: Formula::Difference {
                minuend: "Entrate".to_string(),
                subtrahend: "Spese".to_string(),
            },
        };
        let err = apply_derived(vec![cash_record(dec!(100), dec!(40))], &[derived]).unwrap_err();
        let root = err.downcast_ref::<DashboardError>().unwrap();
        match root {
            DashboardError::UnknownField { target, field } => {
                assert_eq!(target, "Saldo Netto");
                assert_eq!(field, "Spese");
            }
            other => panic!("expected UnknownField, got {other:?}"),
        }
    }

    #[test]
    fn test_later_formula_sees_earlier_derived_field() {
        let chained = vec![
            net_balance(),
            DerivedField {
                name: "Saldo Doppio".to_string(),
                formula: Formula::Sum {
                    fields: vec!["Saldo Netto".to_string(), "Saldo Netto".to_string()],
                },
            },
        ];
        let extended = apply_derived(vec![cash_record(dec!(100), dec!(40))], &chained).unwrap();
        assert_eq!(extended[0].get("Saldo Doppio"), Some(dec!(120)));
    }
}
