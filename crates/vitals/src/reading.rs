use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadingKind {
	Heart,
	Breath,
}

impl ReadingKind {
	pub const ALL: [Self; 2] = [Self::Heart, Self::Breath];

	#[must_use]
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Heart => "heart",
			Self::Breath => "breath",
		}
	}
}

impl fmt::Display for ReadingKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown reading type: {0}")]
pub struct UnknownReadingKind(pub String);

impl FromStr for ReadingKind {
	type Err = UnknownReadingKind;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"heart" => Ok(Self::Heart),
			"breath" => Ok(Self::Breath),
			other => Err(UnknownReadingKind(other.to_string())),
		}
	}
}

/// A single measurement, tagged with its type by whoever fetched it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reading {
	pub value: i64,
	pub created_at: NaiveDateTime,
	pub kind: ReadingKind,
}

impl Reading {
	#[must_use]
	pub const fn new(kind: ReadingKind, value: i64, created_at: NaiveDateTime) -> Self {
		Self { value, created_at, kind }
	}

	#[must_use]
	pub fn date(&self) -> NaiveDate {
		self.created_at.date()
	}
}

/// The average of one reading type over one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyAggregate {
	pub date: NaiveDate,
	#[serde(rename = "type")]
	pub kind: ReadingKind,
	pub value: i64,
}
