use crate::model::{GuardianSettings, GuardianUpdate};
use chrono::Utc;
use sqlx::{Error, SqlitePool};

pub struct GuardianRepository {
	pub pool: SqlitePool,
}

impl GuardianRepository {
	#[must_use]
	pub const fn new(pool: SqlitePool) -> Self {
		Self { pool }
	}

	pub async fn find(&self, user_id: i64) -> Result<Option<GuardianSettings>, Error> {
		sqlx::query_as::<_, GuardianSettings>(
			r#"
            SELECT id, user_id, notify_self, notify_wecare, heart_min, heart_max, breath_min, breath_max, created_at, updated_at
            FROM guardians
            WHERE user_id = ?
            "#,
		)
		.bind(user_id)
		.fetch_optional(&self.pool)
		.await
	}

	/// Create or replace the settings; one row per user.
	pub async fn upsert(&self, user_id: i64, update: GuardianUpdate) -> Result<GuardianSettings, Error> {
		let now = Utc::now();

		sqlx::query_as::<_, GuardianSettings>(
			r#"
            INSERT INTO guardians (user_id, notify_self, notify_wecare, heart_min, heart_max, breath_min, breath_max, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(user_id) DO UPDATE SET
                notify_self = excluded.notify_self,
                notify_wecare = excluded.notify_wecare,
                heart_min = excluded.heart_min,
                heart_max = excluded.heart_max,
                breath_min = excluded.breath_min,
                breath_max = excluded.breath_max,
                updated_at = excluded.updated_at
            RETURNING id, user_id, notify_self, notify_wecare, heart_min, heart_max, breath_min, breath_max, created_at, updated_at
            "#,
		)
		.bind(user_id)
		.bind(update.notify_self)
		.bind(update.notify_wecare)
		.bind(update.heart_min)
		.bind(update.heart_max)
		.bind(update.breath_min)
		.bind(update.breath_max)
		.bind(now)
		.bind(now)
		.fetch_one(&self.pool)
		.await
	}
}
