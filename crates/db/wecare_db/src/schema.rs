use sqlx::{Error, SqlitePool};

const STATEMENTS: &[&str] = &[
	r#"
        CREATE TABLE IF NOT EXISTS ranks (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            level INTEGER NOT NULL,
            title TEXT NOT NULL,
            created_at DATETIME DEFAULT CURRENT_TIMESTAMP
        )
        "#,
	r#"
        CREATE TABLE IF NOT EXISTS users (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            firstname TEXT,
            lastname TEXT,
            email TEXT NOT NULL UNIQUE,
            password_hash TEXT NOT NULL,
            rank_id INTEGER NOT NULL DEFAULT 0,
            number TEXT NOT NULL UNIQUE,
            number_verified BOOLEAN NOT NULL DEFAULT 0,
            referral_code TEXT NOT NULL UNIQUE,
            created_at DATETIME NOT NULL,
            updated_at DATETIME NOT NULL,
            deleted_at DATETIME
        )
        "#,
	r#"
        CREATE TABLE IF NOT EXISTS auth_activities (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id INTEGER NOT NULL,
            action TEXT NOT NULL,
            created_at DATETIME NOT NULL
        )
        "#,
	r#"
        CREATE TABLE IF NOT EXISTS we_care_contacts (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id INTEGER NOT NULL,
            name TEXT NOT NULL,
            number TEXT NOT NULL,
            created_at DATETIME NOT NULL,
            updated_at DATETIME NOT NULL,
            deleted_at DATETIME
        )
        "#,
	r#"
        CREATE TABLE IF NOT EXISTS guardians (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id INTEGER NOT NULL UNIQUE,
            notify_self BOOLEAN NOT NULL,
            notify_wecare BOOLEAN NOT NULL,
            heart_min INTEGER NOT NULL,
            heart_max INTEGER NOT NULL,
            breath_min INTEGER NOT NULL,
            breath_max INTEGER NOT NULL,
            created_at DATETIME NOT NULL,
            updated_at DATETIME NOT NULL
        )
        "#,
	r#"
        CREATE TABLE IF NOT EXISTS heart_readings (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id INTEGER NOT NULL,
            value INTEGER NOT NULL,
            created_at DATETIME NOT NULL
        )
        "#,
	r#"
        CREATE TABLE IF NOT EXISTS breath_readings (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id INTEGER NOT NULL,
            value INTEGER NOT NULL,
            created_at DATETIME NOT NULL
        )
        "#,
	r#"
        CREATE TABLE IF NOT EXISTS referrals (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id INTEGER NOT NULL,
            new_user_id INTEGER NOT NULL UNIQUE,
            credit_applied_at DATETIME,
            created_at DATETIME NOT NULL
        )
        "#,
	r#"
        CREATE TABLE IF NOT EXISTS onboardings (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id INTEGER NOT NULL UNIQUE,
            action TEXT NOT NULL,
            created_at DATETIME NOT NULL,
            updated_at DATETIME NOT NULL
        )
        "#,
	r#"
        CREATE TABLE IF NOT EXISTS verification_codes (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            number TEXT NOT NULL,
            code TEXT NOT NULL,
            purpose TEXT,
            attempts INTEGER NOT NULL DEFAULT 0,
            created_at DATETIME NOT NULL,
            deleted_at DATETIME
        )
        "#,
	"CREATE INDEX IF NOT EXISTS idx_heart_readings_user_created ON heart_readings(user_id, created_at)",
	"CREATE INDEX IF NOT EXISTS idx_breath_readings_user_created ON breath_readings(user_id, created_at)",
	"CREATE INDEX IF NOT EXISTS idx_we_care_contacts_user ON we_care_contacts(user_id)",
	"CREATE INDEX IF NOT EXISTS idx_auth_activities_user ON auth_activities(user_id)",
	"CREATE INDEX IF NOT EXISTS idx_referrals_user ON referrals(user_id)",
	"CREATE INDEX IF NOT EXISTS idx_verification_codes_number ON verification_codes(number)",
];

pub async fn init_schema(pool: &SqlitePool) -> Result<(), Error> {
	for statement in STATEMENTS {
		sqlx::query(statement).execute(pool).await?;
	}

	tracing::debug!(statements = STATEMENTS.len(), "schema initialized");
	Ok(())
}
