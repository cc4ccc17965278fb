use crate::aggregate::DailyAverages;
use crate::reading::DailyAggregate;
use chrono::{Datelike, Months, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

const DATE_KEY_FORMAT: &str = "%Y-%m-%d";

/// One key per day of a month, each holding that day's averages.
///
/// Keys are `YYYY-MM-DD`, so the map iterates (and serializes) in date order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MonthView {
	days: BTreeMap<String, Vec<DailyAggregate>>,
}

impl MonthView {
	#[must_use]
	pub fn get(&self, date: NaiveDate) -> Option<&[DailyAggregate]> {
		self.days.get(&date_key(date)).map(Vec::as_slice)
	}

	#[must_use]
	pub fn contains(&self, date: NaiveDate) -> bool {
		self.days.contains_key(&date_key(date))
	}

	#[must_use]
	pub fn keys(&self) -> impl Iterator<Item = &str> {
		self.days.keys().map(String::as_str)
	}

	#[must_use]
	pub fn iter(&self) -> impl Iterator<Item = (&str, &[DailyAggregate])> {
		self.days.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
	}

	#[must_use]
	pub fn len(&self) -> usize {
		self.days.len()
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.days.is_empty()
	}
}

/// Number of days in `month` of `year`, zero when the month does not exist.
#[must_use]
pub fn days_in_month(year: i32, month: u32) -> u32 {
	NaiveDate::from_ymd_opt(year, month, 1)
		.and_then(MonthRange::containing)
		.and_then(|range| range.end.date().pred_opt())
		.map_or(0, |last| last.day())
}

fn date_key(date: NaiveDate) -> String {
	date.format(DATE_KEY_FORMAT).to_string()
}

fn month_days(reference: NaiveDate) -> impl Iterator<Item = NaiveDate> {
	MonthRange::containing(reference)
		.into_iter()
		.flat_map(|range| range.start.date().iter_days().take_while(move |day| *day < range.end.date()))
}

/// Lay `averages` out over the month containing `reference`.
///
/// Every day of the month gets an entry, empty when nothing was recorded.
/// Averages dated outside the month are ignored, and days after `today`
/// are dropped entirely; `today` itself is kept.
#[must_use]
pub fn fill_month(averages: &DailyAverages, reference: NaiveDate, today: NaiveDate) -> MonthView {
	let days = month_days(reference)
		.filter(|date| *date <= today)
		.map(|date| {
			let entries = averages.day(date).iter().map(|&(kind, value)| DailyAggregate { date, kind, value }).collect();
			(date_key(date), entries)
		})
		.collect();

	MonthView { days }
}

/// Half-open timestamp range `[start, end)` covering one calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthRange {
	pub start: NaiveDateTime,
	pub end: NaiveDateTime,
}

impl MonthRange {
	#[must_use]
	pub fn containing(reference: NaiveDate) -> Option<Self> {
		let first = reference.with_day(1)?;
		let next = first.checked_add_months(Months::new(1))?;

		Some(Self {
			start: first.and_hms_opt(0, 0, 0)?,
			end: next.and_hms_opt(0, 0, 0)?,
		})
	}

	#[must_use]
	pub fn contains(&self, ts: NaiveDateTime) -> bool {
		self.start <= ts && ts < self.end
	}
}
