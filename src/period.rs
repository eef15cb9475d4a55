//! Time-window selectors that narrow which purchases participate in a
//! summary.

use serde::Deserialize;
use time::{Date, Duration};

/// Selects which purchases participate in a summary based on their calendar
/// date in the reference time zone.
///
/// Deserializes from the `period` query parameter; an absent parameter means
/// [PeriodFilter::All].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PeriodFilter {
    /// All purchases, regardless of date.
    #[default]
    All,
    /// Purchases whose calendar date equals the current date.
    Today,
    /// Purchases dated on or after seven days before the current date.
    #[serde(rename = "last-7-days")]
    Last7Days,
    /// Purchases whose month and year match the current month and year.
    CurrentMonth,
}

impl PeriodFilter {
    /// The inclusive date window for this filter, anchored at `today`.
    ///
    /// `None` means the window is unbounded on that side. Both the in-memory
    /// filter and the SQL pushdown derive their comparisons from this single
    /// policy, so the two backends cannot disagree on boundary days.
    pub fn bounds(self, today: Date) -> (Option<Date>, Option<Date>) {
        match self {
            PeriodFilter::All => (None, None),
            PeriodFilter::Today => (Some(today), Some(today)),
            PeriodFilter::Last7Days => (Some(today - Duration::days(7)), None),
            PeriodFilter::CurrentMonth => {
                let length = time::util::days_in_month(today.month(), today.year());
                let first = today.replace_day(1).expect("day 1 is valid in every month");
                let last = today
                    .replace_day(length)
                    .expect("month length is a valid day");

                (Some(first), Some(last))
            }
        }
    }

    /// Whether a purchase dated `date` falls inside the window anchored at
    /// `today`.
    pub fn matches(self, date: Date, today: Date) -> bool {
        let (start, end) = self.bounds(today);

        start.is_none_or(|start| date >= start) && end.is_none_or(|end| date <= end)
    }
}
