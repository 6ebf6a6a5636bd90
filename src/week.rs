//! Week bucketing: assigning dates to 7-day spans anchored on a configurable
//! weekday, and the human-readable labels for those spans.

use chrono::{Datelike, Duration, NaiveDate, Weekday};

/// A 7-day bucket identified by its start date.
///
/// The start date always falls on the configured anchor weekday, on or before
/// the record's date, so buckets are contiguous and non-overlapping by
/// construction. A record dated exactly on the anchor weekday starts its own
/// bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WeekBucket {
    pub start: NaiveDate,
}

impl WeekBucket {
    /// The bucket containing `date` for weeks starting on `anchor`.
    pub fn containing(date: NaiveDate, anchor: Weekday) -> Self {
        let days_back = (date.weekday().num_days_from_monday() + 7
            - anchor.num_days_from_monday())
            % 7;
        Self {
            start: date - Duration::days(days_back as i64),
        }
    }

    /// Last day of the bucket (start + 6 days).
    pub fn end(&self) -> NaiveDate {
        self.start + Duration::days(6)
    }

    /// Label in the form "01-Jan → 07-Jan". Month abbreviations come from
    /// chrono's `%b`, which is always English regardless of locale.
    pub fn label(&self) -> String {
        let end = self.end();
        format!(
            "{:02}-{} → {:02}-{}",
            self.start.day(),
            self.start.format("%b"),
            end.day(),
            end.format("%b")
        )
    }
}
