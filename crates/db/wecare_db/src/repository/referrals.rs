use crate::model::{Referral, ReferralStatus};
use chrono::Utc;
use sqlx::{Error, SqlitePool};

pub struct ReferralRepository {
	pub pool: SqlitePool,
}

impl ReferralRepository {
	#[must_use]
	pub const fn new(pool: SqlitePool) -> Self {
		Self { pool }
	}

	/// `referrer_id` referred `new_user_id`; a user can only be referred once.
	pub async fn create(&self, referrer_id: i64, new_user_id: i64) -> Result<Referral, Error> {
		let now = Utc::now();
		let id = sqlx::query("INSERT INTO referrals (user_id, new_user_id, created_at) VALUES (?, ?, ?)")
			.bind(referrer_id)
			.bind(new_user_id)
			.bind(now)
			.execute(&self.pool)
			.await?
			.last_insert_rowid();

		Ok(Referral {
			id,
			user_id: referrer_id,
			new_user_id,
			credit_applied_at: None,
			created_at: now,
		})
	}

	pub async fn find(&self, id: i64) -> Result<Option<Referral>, Error> {
		sqlx::query_as::<_, Referral>("SELECT id, user_id, new_user_id, credit_applied_at, created_at FROM referrals WHERE id = ?")
			.bind(id)
			.fetch_optional(&self.pool)
			.await
	}

	pub async fn find_by_new_user(&self, new_user_id: i64) -> Result<Option<Referral>, Error> {
		sqlx::query_as::<_, Referral>("SELECT id, user_id, new_user_id, credit_applied_at, created_at FROM referrals WHERE new_user_id = ?")
			.bind(new_user_id)
			.fetch_optional(&self.pool)
			.await
	}

	pub async fn list_by_referrer(&self, referrer_id: i64, status: Option<ReferralStatus>) -> Result<Vec<Referral>, Error> {
		let filter = match status {
			None => "",
			Some(ReferralStatus::Unused) => "AND credit_applied_at IS NULL",
			Some(ReferralStatus::Credited) => "AND credit_applied_at IS NOT NULL",
		};

		sqlx::query_as::<_, Referral>(&format!(
			"SELECT id, user_id, new_user_id, credit_applied_at, created_at FROM referrals WHERE user_id = ? {filter} ORDER BY id ASC"
		))
		.bind(referrer_id)
		.fetch_all(&self.pool)
		.await
	}

	/// Returns `None` when the referral is missing or was already credited.
	pub async fn mark_credited(&self, id: i64) -> Result<Option<Referral>, Error> {
		let rows_affected = sqlx::query("UPDATE referrals SET credit_applied_at = ? WHERE id = ? AND credit_applied_at IS NULL")
			.bind(Utc::now())
			.bind(id)
			.execute(&self.pool)
			.await?
			.rows_affected();

		if rows_affected == 0 {
			return Ok(None);
		}

		self.find(id).await
	}
}
