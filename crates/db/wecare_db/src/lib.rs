pub mod model;
pub mod repository;
pub mod schema;

// Re-export commonly used types
pub use model::*;
pub use repository::{
	fetch_month, ActivityRepository, ContactRepository, GuardianRepository, OnboardingRepository, ReadingRepository, ReadingSource, ReferralRepository, UserRepository,
	VerificationRepository,
};

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;

/// Open a pool on `database_url`, creating the database file when missing.
pub async fn connect(database_url: &str, max_connections: u32) -> Result<SqlitePool, sqlx::Error> {
	let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

	SqlitePoolOptions::new().max_connections(max_connections).connect_with(options).await
}

/// Column behind a unique-constraint failure, `email` for `users.email`.
#[must_use]
pub fn unique_violation(err: &sqlx::Error) -> Option<&str> {
	match err {
		sqlx::Error::Database(e) if e.is_unique_violation() => {
			let columns = e.message().rsplit(": ").next()?;
			columns.split(", ").next()?.rsplit('.').next()
		}
		_ => None,
	}
}

/// A single-connection in-memory database with the schema applied.
///
/// The pool never recycles its connection, which would otherwise drop the data.
pub async fn connect_in_memory() -> Result<SqlitePool, sqlx::Error> {
	let pool = SqlitePoolOptions::new()
		.max_connections(1)
		.idle_timeout(None)
		.max_lifetime(None)
		.connect("sqlite::memory:")
		.await?;

	schema::init_schema(&pool).await?;
	Ok(pool)
}
