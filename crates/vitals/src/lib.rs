//! Monthly vital-sign aggregation.
//!
//! Raw heart and breath readings go in, a calendar-complete month comes out:
//! one key per day of the month, each holding the per-type integer averages
//! for that day.

pub mod aggregate;
pub mod calendar;
pub mod reading;

pub use aggregate::{aggregate, DailyAverages};
pub use calendar::{days_in_month, fill_month, MonthRange, MonthView};
pub use reading::{DailyAggregate, Reading, ReadingKind, UnknownReadingKind};

use chrono::NaiveDate;

/// Aggregate `readings` and lay them out over the month containing `reference`.
///
/// Days after `today` are left out of the result.
#[must_use]
pub fn month_view<I>(readings: I, reference: NaiveDate, today: NaiveDate) -> MonthView
where
	I: IntoIterator<Item = Reading>,
{
	fill_month(&aggregate(readings), reference, today)
}
