use super::activity::insert_activity;
use crate::model::{AuthAction, NewUser, Rank, User};
use chrono::Utc;
use sqlx::{Error, SqlitePool};

const USER_COLUMNS: &str = "id, firstname, lastname, email, password_hash, rank_id, number, number_verified, referral_code, created_at, updated_at, deleted_at";

pub struct UserRepository {
	pub pool: SqlitePool,
}

impl UserRepository {
	#[must_use]
	pub const fn new(pool: SqlitePool) -> Self {
		Self { pool }
	}

	/// Insert the user and its `SIGNUP` activity in one transaction.
	pub async fn create(&self, user: NewUser) -> Result<User, Error> {
		let now = Utc::now();
		let mut tx = self.pool.begin().await?;

		let id = sqlx::query(
			r#"
            INSERT INTO users (firstname, lastname, email, password_hash, number, referral_code, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
		)
		.bind(&user.firstname)
		.bind(&user.lastname)
		.bind(&user.email)
		.bind(&user.password_hash)
		.bind(&user.number)
		.bind(&user.referral_code)
		.bind(now)
		.bind(now)
		.execute(&mut *tx)
		.await?
		.last_insert_rowid();

		insert_activity(&mut *tx, id, AuthAction::Signup).await?;
		tx.commit().await?;

		Ok(User {
			id,
			firstname: user.firstname,
			lastname: user.lastname,
			email: user.email,
			password_hash: user.password_hash,
			rank_id: 0,
			number: user.number,
			number_verified: false,
			referral_code: user.referral_code,
			created_at: now,
			updated_at: now,
			deleted_at: None,
		})
	}

	pub async fn find_active(&self, id: i64) -> Result<Option<User>, Error> {
		sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = ? AND deleted_at IS NULL"))
			.bind(id)
			.fetch_optional(&self.pool)
			.await
	}

	pub async fn list_active(&self) -> Result<Vec<User>, Error> {
		sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE deleted_at IS NULL ORDER BY id ASC"))
			.fetch_all(&self.pool)
			.await
	}

	pub async fn find_by_referral_code(&self, code: &str) -> Result<Option<User>, Error> {
		sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE referral_code = ? AND deleted_at IS NULL"))
			.bind(code)
			.fetch_optional(&self.pool)
			.await
	}

	// Uniqueness checks include soft-deleted rows, the constraints do too.
	pub async fn email_taken(&self, email: &str) -> Result<bool, Error> {
		self.exists("SELECT EXISTS(SELECT 1 FROM users WHERE email = ?)", email).await
	}

	pub async fn number_taken(&self, number: &str) -> Result<bool, Error> {
		self.exists("SELECT EXISTS(SELECT 1 FROM users WHERE number = ?)", number).await
	}

	pub async fn referral_code_taken(&self, code: &str) -> Result<bool, Error> {
		self.exists("SELECT EXISTS(SELECT 1 FROM users WHERE referral_code = ?)", code).await
	}

	async fn exists(&self, sql: &str, value: &str) -> Result<bool, Error> {
		sqlx::query_scalar::<_, bool>(sql).bind(value).fetch_one(&self.pool).await
	}

	pub async fn rank(&self, rank_id: i64) -> Result<Option<Rank>, Error> {
		sqlx::query_as::<_, Rank>("SELECT id, level, title FROM ranks WHERE id = ?")
			.bind(rank_id)
			.fetch_optional(&self.pool)
			.await
	}

	/// Mark the number as verified and record the activity.
	pub async fn verify_number(&self, id: i64) -> Result<bool, Error> {
		let mut tx = self.pool.begin().await?;

		let rows_affected = sqlx::query("UPDATE users SET number_verified = 1, updated_at = ? WHERE id = ? AND deleted_at IS NULL")
			.bind(Utc::now())
			.bind(id)
			.execute(&mut *tx)
			.await?
			.rows_affected();

		if rows_affected > 0 {
			insert_activity(&mut *tx, id, AuthAction::VerifyNumber).await?;
		}

		tx.commit().await?;
		Ok(rows_affected > 0)
	}

	pub async fn soft_delete(&self, id: i64) -> Result<bool, Error> {
		let rows_affected = sqlx::query("UPDATE users SET deleted_at = ? WHERE id = ? AND deleted_at IS NULL")
			.bind(Utc::now())
			.bind(id)
			.execute(&self.pool)
			.await?
			.rows_affected();

		Ok(rows_affected > 0)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::repository::ActivityRepository;

	fn new_user(email: &str, number: &str, code: &str) -> NewUser {
		NewUser {
			email: email.to_string(),
			password_hash: "$argon2id$stub".to_string(),
			number: number.to_string(),
			firstname: Some("Ada".to_string()),
			lastname: None,
			referral_code: code.to_string(),
		}
	}

	#[tokio::test]
	async fn create_records_signup_activity() {
		let pool = crate::connect_in_memory().await.unwrap();
		let users = UserRepository::new(pool.clone());

		let user = users.create(new_user("ada@example.com", "5550001", "ABC123")).await.unwrap();
		let history = ActivityRepository::new(pool).history(user.id).await.unwrap();

		assert_eq!(history.len(), 1);
		assert_eq!(history[0].action, "SIGNUP");
		assert_eq!(users.find_active(user.id).await.unwrap().unwrap().email, "ada@example.com");
	}

	#[tokio::test]
	async fn uniqueness_checks() {
		let pool = crate::connect_in_memory().await.unwrap();
		let users = UserRepository::new(pool);
		users.create(new_user("ada@example.com", "5550001", "ABC123")).await.unwrap();

		assert!(users.email_taken("ada@example.com").await.unwrap());
		assert!(!users.email_taken("bob@example.com").await.unwrap());
		assert!(users.number_taken("5550001").await.unwrap());
		assert!(users.referral_code_taken("ABC123").await.unwrap());
	}

	#[tokio::test]
	async fn soft_deleted_users_disappear() {
		let pool = crate::connect_in_memory().await.unwrap();
		let users = UserRepository::new(pool);
		let user = users.create(new_user("ada@example.com", "5550001", "ABC123")).await.unwrap();

		assert!(users.soft_delete(user.id).await.unwrap());
		assert!(!users.soft_delete(user.id).await.unwrap());
		assert!(users.find_active(user.id).await.unwrap().is_none());
		assert!(users.list_active().await.unwrap().is_empty());
		assert!(users.email_taken("ada@example.com").await.unwrap());
	}

	#[tokio::test]
	async fn verify_number_flips_flag() {
		let pool = crate::connect_in_memory().await.unwrap();
		let users = UserRepository::new(pool);
		let user = users.create(new_user("ada@example.com", "5550001", "ABC123")).await.unwrap();

		assert!(users.verify_number(user.id).await.unwrap());
		assert!(users.find_active(user.id).await.unwrap().unwrap().number_verified);
	}

	#[tokio::test]
	async fn duplicate_inserts_name_the_column() {
		let pool = crate::connect_in_memory().await.unwrap();
		let users = UserRepository::new(pool);
		users.create(new_user("ada@example.com", "5550001", "ABC123")).await.unwrap();

		let err = users.create(new_user("ada@example.com", "5550002", "DEF456")).await.unwrap_err();
		assert_eq!(crate::unique_violation(&err), Some("email"));

		let err = users.create(new_user("bob@example.com", "5550001", "DEF456")).await.unwrap_err();
		assert_eq!(crate::unique_violation(&err), Some("number"));

		assert_eq!(crate::unique_violation(&Error::RowNotFound), None);
		assert_eq!(users.list_active().await.unwrap().len(), 1);
	}
}
