use crate::model::{Onboarding, OnboardingAction};
use chrono::Utc;
use sqlx::{Error, SqlitePool};

pub struct OnboardingRepository {
	pub pool: SqlitePool,
}

impl OnboardingRepository {
	#[must_use]
	pub const fn new(pool: SqlitePool) -> Self {
		Self { pool }
	}

	/// Latest report wins.
	pub async fn report(&self, user_id: i64, action: OnboardingAction) -> Result<Onboarding, Error> {
		let now = Utc::now();

		sqlx::query_as::<_, Onboarding>(
			r#"
            INSERT INTO onboardings (user_id, action, created_at, updated_at)
            VALUES (?, ?, ?, ?)
            ON CONFLICT(user_id) DO UPDATE SET
                action = excluded.action,
                updated_at = excluded.updated_at
            RETURNING id, user_id, action, created_at, updated_at
            "#,
		)
		.bind(user_id)
		.bind(action.as_str())
		.bind(now)
		.bind(now)
		.fetch_one(&self.pool)
		.await
	}

	pub async fn find(&self, user_id: i64) -> Result<Option<Onboarding>, Error> {
		sqlx::query_as::<_, Onboarding>("SELECT id, user_id, action, created_at, updated_at FROM onboardings WHERE user_id = ?")
			.bind(user_id)
			.fetch_optional(&self.pool)
			.await
	}
}
