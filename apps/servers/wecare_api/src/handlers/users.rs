use crate::extract::Json;
use crate::validation::{required, validated};
use crate::{AdminUser, ApiError, AppState, AuthUser};
use argon2::password_hash::{PasswordHasher, SaltString};
use argon2::Argon2;
use axum::{
	extract::{Path, Query, State},
	http::StatusCode,
};
use garde::Validate;
use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};
use tracing::instrument;
use wecare_db::{ActivityRepository, AuthActivity, Contact, ContactRepository, NewUser, Rank, User, UserRepository};

const REFERRAL_CODE_ATTEMPTS: usize = 8;
const EMAIL_TAKEN: &str = "The email has already been taken.";
const NUMBER_TAKEN: &str = "The number has already been taken.";

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterUser {
	#[garde(required, email)]
	pub email: Option<String>,

	#[garde(required, length(min = 1))]
	pub password: Option<String>,

	#[garde(required, length(min = 1, max = 15))]
	pub number: Option<String>,

	#[garde(skip)]
	pub firstname: Option<String>,

	#[garde(skip)]
	pub lastname: Option<String>,
}

/// Relations to embed; a bare `?with_rank` counts as set.
#[derive(Debug, Default, Deserialize)]
pub struct ProfileQuery {
	pub with_rank: Option<String>,
	pub with_contacts: Option<String>,
	pub with_auth_history: Option<String>,
}

fn flag(value: Option<&String>) -> bool {
	value.is_some_and(|v| !matches!(v.as_str(), "false" | "0"))
}

#[derive(Debug, Serialize)]
pub struct UserProfile {
	#[serde(flatten)]
	pub user: User,

	#[serde(skip_serializing_if = "Option::is_none")]
	pub rank: Option<Rank>,

	#[serde(skip_serializing_if = "Option::is_none")]
	pub contacts: Option<Vec<Contact>>,

	#[serde(skip_serializing_if = "Option::is_none")]
	pub auth_history: Option<Vec<AuthActivity>>,
}

fn hash_password(password: &str) -> anyhow::Result<String> {
	let salt = SaltString::generate(&mut OsRng);
	let hash = Argon2::default()
		.hash_password(password.as_bytes(), &salt)
		.map_err(|e| anyhow::anyhow!("password hashing failed: {e}"))?;

	Ok(hash.to_string())
}

fn referral_code() -> String {
	hex::encode_upper(rand::random::<[u8; 3]>())
}

async fn unused_referral_code(users: &UserRepository) -> Result<String, ApiError> {
	for _ in 0..REFERRAL_CODE_ATTEMPTS {
		let code = referral_code();
		if !users.referral_code_taken(&code).await? {
			return Ok(code);
		}
	}

	Err(anyhow::anyhow!("no free referral code after {REFERRAL_CODE_ATTEMPTS} attempts").into())
}

#[axum::debug_handler]
#[instrument(name = "register_user", skip(state, body))]
pub async fn register(State(state): State<AppState>, Json(body): Json<RegisterUser>) -> Result<(StatusCode, Json<User>), ApiError> {
	let body = validated(body)?;
	let email = required(body.email, "email")?;
	let password = required(body.password, "password")?;
	let number = required(body.number, "number")?;

	let users = UserRepository::new(state.core.db);

	let mut conflicts = Vec::new();
	if users.email_taken(&email).await? {
		conflicts.push(("email", EMAIL_TAKEN));
	}
	if users.number_taken(&number).await? {
		conflicts.push(("number", NUMBER_TAKEN));
	}
	if !conflicts.is_empty() {
		return Err(ApiError::unprocessable_entity(conflicts));
	}

	let user = users
		.create(NewUser {
			email,
			password_hash: hash_password(&password)?,
			number,
			firstname: body.firstname,
			lastname: body.lastname,
			referral_code: unused_referral_code(&users).await?,
		})
		.await
		.map_err(|e| ApiError::unique_or_database(e, &[("email", "email", EMAIL_TAKEN), ("number", "number", NUMBER_TAKEN)]))?;

	tracing::info!(user_id = user.id, "user registered");
	Ok((StatusCode::CREATED, Json(user)))
}

#[axum::debug_handler]
#[instrument(name = "current_user", skip(state, user), fields(user_id = user.id))]
pub async fn me(State(state): State<AppState>, AuthUser(user): AuthUser, Query(query): Query<ProfileQuery>) -> Result<Json<UserProfile>, ApiError> {
	let db = state.core.db;

	let rank = if flag(query.with_rank.as_ref()) {
		UserRepository::new(db.clone()).rank(user.rank_id).await?
	} else {
		None
	};

	let contacts = if flag(query.with_contacts.as_ref()) {
		Some(ContactRepository::new(db.clone()).list_for_user(user.id).await?)
	} else {
		None
	};

	let auth_history = if flag(query.with_auth_history.as_ref()) {
		Some(ActivityRepository::new(db).history(user.id).await?)
	} else {
		None
	};

	Ok(Json(UserProfile {
		user,
		rank,
		contacts,
		auth_history,
	}))
}

#[axum::debug_handler]
#[instrument(name = "list_users", skip(state, _admin))]
pub async fn list(State(state): State<AppState>, _admin: AdminUser) -> Result<Json<Vec<User>>, ApiError> {
	Ok(Json(UserRepository::new(state.core.db).list_active().await?))
}

#[axum::debug_handler]
#[instrument(name = "show_user", skip(state, _viewer), fields(id = %id))]
pub async fn show(State(state): State<AppState>, _viewer: AuthUser, Path(id): Path<i64>) -> Result<Json<User>, ApiError> {
	UserRepository::new(state.core.db)
		.find_active(id)
		.await?
		.map(Json)
		.ok_or_else(|| ApiError::not_found("This user no longer exists in our database."))
}

#[axum::debug_handler]
#[instrument(name = "delete_current_user", skip(state, user), fields(user_id = user.id))]
pub async fn delete_me(State(state): State<AppState>, AuthUser(user): AuthUser) -> Result<StatusCode, ApiError> {
	UserRepository::new(state.core.db).soft_delete(user.id).await?;
	tracing::info!(user_id = user.id, "user soft deleted");
	Ok(StatusCode::NO_CONTENT)
}
