use crate::extract::Json;
use crate::validation::{required, validated};
use crate::{ApiError, AppState, AuthUser};
use axum::{
	extract::{Path, State},
	http::StatusCode,
};
use garde::Validate;
use serde::Deserialize;
use tracing::instrument;
use wecare_db::{Contact, ContactFields, ContactRepository};

const CONTACT_GONE: &str = "This contact no longer exists in our database.";

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ContactBody {
	#[garde(required, length(min = 1, max = 255))]
	pub name: Option<String>,

	#[garde(required, length(min = 1, max = 10))]
	pub number: Option<String>,
}

impl ContactBody {
	fn into_fields(self) -> Result<ContactFields, ApiError> {
		let body = validated(self)?;
		Ok(ContactFields {
			name: required(body.name, "name")?,
			number: required(body.number, "number")?,
		})
	}
}

#[axum::debug_handler]
#[instrument(name = "list_contacts", skip(state, user), fields(user_id = user.id))]
pub async fn list(State(state): State<AppState>, AuthUser(user): AuthUser) -> Result<Json<Vec<Contact>>, ApiError> {
	Ok(Json(ContactRepository::new(state.core.db).list_for_user(user.id).await?))
}

#[axum::debug_handler]
#[instrument(name = "show_contact", skip(state, user), fields(user_id = user.id, id = %id))]
pub async fn show(State(state): State<AppState>, AuthUser(user): AuthUser, Path(id): Path<i64>) -> Result<Json<Contact>, ApiError> {
	ContactRepository::new(state.core.db)
		.find_for_user(user.id, id)
		.await?
		.map(Json)
		.ok_or_else(|| ApiError::not_found(CONTACT_GONE))
}

#[axum::debug_handler]
#[instrument(name = "create_contact", skip(state, user, body), fields(user_id = user.id))]
pub async fn create(State(state): State<AppState>, AuthUser(user): AuthUser, Json(body): Json<ContactBody>) -> Result<(StatusCode, Json<Contact>), ApiError> {
	let fields = body.into_fields()?;
	let contact = ContactRepository::new(state.core.db).create(user.id, fields).await?;

	Ok((StatusCode::CREATED, Json(contact)))
}

#[axum::debug_handler]
#[instrument(name = "update_contact", skip(state, user, body), fields(user_id = user.id, id = %id))]
pub async fn update(State(state): State<AppState>, AuthUser(user): AuthUser, Path(id): Path<i64>, Json(body): Json<ContactBody>) -> Result<Json<Contact>, ApiError> {
	let fields = body.into_fields()?;

	ContactRepository::new(state.core.db)
		.update(user.id, id, fields)
		.await?
		.map(Json)
		.ok_or_else(|| ApiError::not_found(CONTACT_GONE))
}

#[axum::debug_handler]
#[instrument(name = "delete_contact", skip(state, user), fields(user_id = user.id, id = %id))]
pub async fn delete(State(state): State<AppState>, AuthUser(user): AuthUser, Path(id): Path<i64>) -> Result<StatusCode, ApiError> {
	if ContactRepository::new(state.core.db).soft_delete(user.id, id).await? {
		Ok(StatusCode::NO_CONTENT)
	} else {
		Err(ApiError::not_found(CONTACT_GONE))
	}
}
