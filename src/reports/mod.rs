// Reports module - weekly aggregation and trend classification

pub mod trend;
pub mod weekly;

pub use trend::{classify, TrendDirection};
pub use weekly::{aggregate_weekly, WeeklyAggregate, WeeklyTable};
