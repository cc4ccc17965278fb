use crate::model::VerificationCode;
use chrono::{DateTime, Utc};
use sqlx::{Error, SqlitePool};

pub struct VerificationRepository {
	pub pool: SqlitePool,
}

impl VerificationRepository {
	#[must_use]
	pub const fn new(pool: SqlitePool) -> Self {
		Self { pool }
	}

	pub async fn issue(&self, number: &str, code: &str, purpose: Option<&str>) -> Result<VerificationCode, Error> {
		let now = Utc::now();
		let id = sqlx::query("INSERT INTO verification_codes (number, code, purpose, created_at) VALUES (?, ?, ?, ?)")
			.bind(number)
			.bind(code)
			.bind(purpose)
			.bind(now)
			.execute(&self.pool)
			.await?
			.last_insert_rowid();

		Ok(VerificationCode {
			id,
			number: number.to_string(),
			code: code.to_string(),
			purpose: purpose.map(str::to_string),
			attempts: 0,
			created_at: now,
			deleted_at: None,
		})
	}

	/// Most recent unconsumed code for `number` issued at or after `issued_after`.
	pub async fn latest_live(&self, number: &str, issued_after: DateTime<Utc>) -> Result<Option<VerificationCode>, Error> {
		sqlx::query_as::<_, VerificationCode>(
			r#"
            SELECT id, number, code, purpose, attempts, created_at, deleted_at
            FROM verification_codes
            WHERE number = ? AND deleted_at IS NULL AND created_at >= ?
            ORDER BY created_at DESC, id DESC
            LIMIT 1
            "#,
		)
		.bind(number)
		.bind(issued_after)
		.fetch_optional(&self.pool)
		.await
	}

	pub async fn consume(&self, id: i64) -> Result<bool, Error> {
		let rows_affected = sqlx::query("UPDATE verification_codes SET deleted_at = ? WHERE id = ? AND deleted_at IS NULL")
			.bind(Utc::now())
			.bind(id)
			.execute(&self.pool)
			.await?
			.rows_affected();

		Ok(rows_affected > 0)
	}

	/// Count a wrong guess against a live code, consuming it once
	/// `max_attempts` is reached. Returns the new count, `None` when the
	/// code was already consumed.
	pub async fn record_failure(&self, id: i64, max_attempts: i64) -> Result<Option<i64>, Error> {
		sqlx::query_scalar(
			r#"
            UPDATE verification_codes
            SET attempts = attempts + 1,
                deleted_at = CASE WHEN attempts + 1 >= ? THEN ? ELSE deleted_at END
            WHERE id = ? AND deleted_at IS NULL
            RETURNING attempts
            "#,
		)
		.bind(max_attempts)
		.bind(Utc::now())
		.bind(id)
		.fetch_optional(&self.pool)
		.await
	}
}
