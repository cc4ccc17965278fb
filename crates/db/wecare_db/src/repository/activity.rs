use crate::model::{AuthAction, AuthActivity};
use chrono::Utc;
use sqlx::{Error, SqliteExecutor, SqlitePool};

pub async fn insert_activity<'e, E>(executor: E, user_id: i64, action: AuthAction) -> Result<i64, Error>
where
	E: SqliteExecutor<'e>,
{
	let id = sqlx::query("INSERT INTO auth_activities (user_id, action, created_at) VALUES (?, ?, ?)")
		.bind(user_id)
		.bind(action.as_str())
		.bind(Utc::now())
		.execute(executor)
		.await?
		.last_insert_rowid();

	Ok(id)
}

pub struct ActivityRepository {
	pub pool: SqlitePool,
}

impl ActivityRepository {
	#[must_use]
	pub const fn new(pool: SqlitePool) -> Self {
		Self { pool }
	}

	pub async fn record(&self, user_id: i64, action: AuthAction) -> Result<i64, Error> {
		insert_activity(&self.pool, user_id, action).await
	}

	pub async fn history(&self, user_id: i64) -> Result<Vec<AuthActivity>, Error> {
		sqlx::query_as::<_, AuthActivity>(
			r#"
            SELECT id, user_id, action, created_at
            FROM auth_activities
            WHERE user_id = ?
            ORDER BY created_at DESC, id DESC
            "#,
		)
		.bind(user_id)
		.fetch_all(&self.pool)
		.await
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[tokio::test]
	async fn history_is_newest_first() {
		let pool = crate::connect_in_memory().await.unwrap();
		let activity = ActivityRepository::new(pool);

		let first = activity.record(4, AuthAction::Signup).await.unwrap();
		let second = activity.record(4, AuthAction::VerifyNumber).await.unwrap();
		activity.record(5, AuthAction::Signup).await.unwrap();

		let ids: Vec<i64> = activity.history(4).await.unwrap().iter().map(|a| a.id).collect();
		assert_eq!(ids, vec![second, first]);
	}
}
