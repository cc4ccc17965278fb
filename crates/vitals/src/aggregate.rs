use crate::reading::{Reading, ReadingKind};
use chrono::NaiveDate;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy)]
struct Tally {
	sum: i64,
	count: i64,
}

impl Tally {
	const fn first(value: i64) -> Self {
		Self { sum: value, count: 1 }
	}

	fn add(&mut self, value: i64) {
		self.sum += value;
		self.count += 1;
	}

	/// Integer mean rounded towards positive infinity.
	const fn ceil_mean(self) -> i64 {
		let floor = self.sum.div_euclid(self.count);
		if self.sum.rem_euclid(self.count) > 0 {
			floor + 1
		} else {
			floor
		}
	}
}

/// Per-day, per-type averages.
///
/// A `(date, kind)` pair is only present when at least one reading of that
/// kind was taken on that date. Kinds within a day keep the order in which
/// they first showed up in the input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DailyAverages {
	days: BTreeMap<NaiveDate, Vec<(ReadingKind, i64)>>,
}

impl DailyAverages {
	#[must_use]
	pub fn get(&self, date: NaiveDate, kind: ReadingKind) -> Option<i64> {
		self.days.get(&date)?.iter().find(|(k, _)| *k == kind).map(|(_, v)| *v)
	}

	#[must_use]
	pub fn day(&self, date: NaiveDate) -> &[(ReadingKind, i64)] {
		self.days.get(&date).map(Vec::as_slice).unwrap_or_default()
	}

	#[must_use]
	pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
		self.days.keys().copied()
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.days.is_empty()
	}

	#[must_use]
	pub fn len(&self) -> usize {
		self.days.len()
	}
}

#[must_use]
pub fn aggregate<I>(readings: I) -> DailyAverages
where
	I: IntoIterator<Item = Reading>,
{
	let mut groups: BTreeMap<NaiveDate, Vec<(ReadingKind, Tally)>> = BTreeMap::new();

	for reading in readings {
		let day = groups.entry(reading.date()).or_default();
		match day.iter_mut().find(|(kind, _)| *kind == reading.kind) {
			Some((_, tally)) => tally.add(reading.value),
			None => day.push((reading.kind, Tally::first(reading.value))),
		}
	}

	let days = groups
		.into_iter()
		.map(|(date, tallies)| (date, tallies.into_iter().map(|(kind, tally)| (kind, tally.ceil_mean())).collect()))
		.collect();

	DailyAverages { days }
}
