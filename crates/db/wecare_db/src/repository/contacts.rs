use crate::model::{Contact, ContactFields};
use chrono::Utc;
use sqlx::{Error, SqlitePool};

pub struct ContactRepository {
	pub pool: SqlitePool,
}

impl ContactRepository {
	#[must_use]
	pub const fn new(pool: SqlitePool) -> Self {
		Self { pool }
	}

	pub async fn list_for_user(&self, user_id: i64) -> Result<Vec<Contact>, Error> {
		sqlx::query_as::<_, Contact>(
			r#"
            SELECT id, user_id, name, number, created_at, updated_at
            FROM we_care_contacts
            WHERE user_id = ? AND deleted_at IS NULL
            ORDER BY id ASC
            "#,
		)
		.bind(user_id)
		.fetch_all(&self.pool)
		.await
	}

	pub async fn find_for_user(&self, user_id: i64, id: i64) -> Result<Option<Contact>, Error> {
		sqlx::query_as::<_, Contact>(
			r#"
            SELECT id, user_id, name, number, created_at, updated_at
            FROM we_care_contacts
            WHERE id = ? AND user_id = ? AND deleted_at IS NULL
            "#,
		)
		.bind(id)
		.bind(user_id)
		.fetch_optional(&self.pool)
		.await
	}

	pub async fn create(&self, user_id: i64, fields: ContactFields) -> Result<Contact, Error> {
		let now = Utc::now();
		let id = sqlx::query("INSERT INTO we_care_contacts (user_id, name, number, created_at, updated_at) VALUES (?, ?, ?, ?, ?)")
			.bind(user_id)
			.bind(&fields.name)
			.bind(&fields.number)
			.bind(now)
			.bind(now)
			.execute(&self.pool)
			.await?
			.last_insert_rowid();

		Ok(Contact {
			id,
			user_id,
			name: fields.name,
			number: fields.number,
			created_at: now,
			updated_at: now,
		})
	}

	pub async fn update(&self, user_id: i64, id: i64, fields: ContactFields) -> Result<Option<Contact>, Error> {
		let rows_affected = sqlx::query("UPDATE we_care_contacts SET name = ?, number = ?, updated_at = ? WHERE id = ? AND user_id = ? AND deleted_at IS NULL")
			.bind(&fields.name)
			.bind(&fields.number)
			.bind(Utc::now())
			.bind(id)
			.bind(user_id)
			.execute(&self.pool)
			.await?
			.rows_affected();

		if rows_affected == 0 {
			return Ok(None);
		}

		self.find_for_user(user_id, id).await
	}

	pub async fn soft_delete(&self, user_id: i64, id: i64) -> Result<bool, Error> {
		let rows_affected = sqlx::query("UPDATE we_care_contacts SET deleted_at = ? WHERE id = ? AND user_id = ? AND deleted_at IS NULL")
			.bind(Utc::now())
			.bind(id)
			.bind(user_id)
			.execute(&self.pool)
			.await?
			.rows_affected();

		Ok(rows_affected > 0)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn fields(name: &str, number: &str) -> ContactFields {
		ContactFields {
			name: name.to_string(),
			number: number.to_string(),
		}
	}

	#[tokio::test]
	async fn contacts_are_scoped_to_their_owner() {
		let pool = crate::connect_in_memory().await.unwrap();
		let contacts = ContactRepository::new(pool);

		let mine = contacts.create(1, fields("Mom", "5551234")).await.unwrap();
		contacts.create(2, fields("Someone else", "5559999")).await.unwrap();

		let listed: Vec<i64> = contacts.list_for_user(1).await.unwrap().iter().map(|c| c.id).collect();
		assert_eq!(listed, vec![mine.id]);
		assert!(contacts.find_for_user(2, mine.id).await.unwrap().is_none());
		assert!(contacts.update(2, mine.id, fields("Hijack", "1")).await.unwrap().is_none());
		assert!(!contacts.soft_delete(2, mine.id).await.unwrap());
	}

	#[tokio::test]
	async fn update_then_soft_delete() {
		let pool = crate::connect_in_memory().await.unwrap();
		let contacts = ContactRepository::new(pool);
		let contact = contacts.create(1, fields("Mom", "5551234")).await.unwrap();

		let updated = contacts.update(1, contact.id, fields("Mother", "5554321")).await.unwrap().unwrap();
		assert_eq!(updated.name, "Mother");
		assert_eq!(updated.number, "5554321");

		assert!(contacts.soft_delete(1, contact.id).await.unwrap());
		assert!(contacts.find_for_user(1, contact.id).await.unwrap().is_none());
		assert!(contacts.list_for_user(1).await.unwrap().is_empty());
	}
}
