use crate::model::RecordedReading;
use async_trait::async_trait;
use chrono::NaiveDateTime;
use sqlx::{Error, SqlitePool};
use vitals::{MonthRange, Reading, ReadingKind};

/// Where raw readings for a month come from.
#[async_trait]
pub trait ReadingSource: Send + Sync {
	/// Readings of `kind` for `user_id` with `created_at` in `[range.start, range.end)`.
	async fn readings_between(&self, user_id: i64, kind: ReadingKind, range: MonthRange) -> Result<Vec<Reading>, Error>;
}

/// Both reading types for one user and month, heart first, each tagged with its type.
pub async fn fetch_month<S>(source: &S, user_id: i64, range: MonthRange) -> Result<Vec<Reading>, Error>
where
	S: ReadingSource + ?Sized,
{
	let mut readings = Vec::new();
	for kind in ReadingKind::ALL {
		readings.extend(source.readings_between(user_id, kind, range).await?);
	}
	Ok(readings)
}

const fn table(kind: ReadingKind) -> &'static str {
	match kind {
		ReadingKind::Heart => "heart_readings",
		ReadingKind::Breath => "breath_readings",
	}
}

#[derive(sqlx::FromRow)]
struct ReadingRow {
	value: i64,
	created_at: NaiveDateTime,
}

pub struct ReadingRepository {
	pub pool: SqlitePool,
}

impl ReadingRepository {
	#[must_use]
	pub const fn new(pool: SqlitePool) -> Self {
		Self { pool }
	}

	pub async fn record(&self, user_id: i64, kind: ReadingKind, value: i64, created_at: NaiveDateTime) -> Result<RecordedReading, Error> {
		let id = sqlx::query(&format!("INSERT INTO {} (user_id, value, created_at) VALUES (?, ?, ?)", table(kind)))
			.bind(user_id)
			.bind(value)
			.bind(created_at)
			.execute(&self.pool)
			.await?
			.last_insert_rowid();

		Ok(RecordedReading {
			id,
			user_id,
			kind,
			value,
			created_at,
		})
	}
}

#[async_trait]
impl ReadingSource for ReadingRepository {
	async fn readings_between(&self, user_id: i64, kind: ReadingKind, range: MonthRange) -> Result<Vec<Reading>, Error> {
		let rows = sqlx::query_as::<_, ReadingRow>(&format!(
			"SELECT value, created_at FROM {} WHERE user_id = ? AND created_at >= ? AND created_at < ? ORDER BY created_at ASC",
			table(kind)
		))
		.bind(user_id)
		.bind(range.start)
		.bind(range.end)
		.fetch_all(&self.pool)
		.await?;

		Ok(rows.into_iter().map(|row| Reading::new(kind, row.value, row.created_at)).collect())
	}
}
