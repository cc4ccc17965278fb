use crate::{error::ApiError, AppState};
use async_trait::async_trait;
use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use wecare_db::{User, UserRepository};

/// The active user named by the gateway identity header.
#[derive(Debug, Clone)]
pub struct AuthUser(pub User);

/// An [`AuthUser`] whose rank clears the admin level.
#[derive(Debug, Clone)]
pub struct AdminUser(pub User);

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
	S: Send + Sync,
	AppState: FromRef<S>,
{
	type Rejection = ApiError;

	async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
		let state = AppState::from_ref(state);

		let user_id = parts
			.headers
			.get(state.core.config.identity_header.as_str())
			.and_then(|value| value.to_str().ok())
			.and_then(|value| value.trim().parse::<i64>().ok())
			.ok_or(ApiError::Unauthorized)?;

		let user = UserRepository::new(state.core.db).find_active(user_id).await?.ok_or(ApiError::Unauthorized)?;

		Ok(Self(user))
	}
}

#[async_trait]
impl<S> FromRequestParts<S> for AdminUser
where
	S: Send + Sync,
	AppState: FromRef<S>,
{
	type Rejection = ApiError;

	async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
		let AuthUser(user) = AuthUser::from_request_parts(parts, state).await?;
		let state = AppState::from_ref(state);

		let rank = UserRepository::new(state.core.db).rank(user.rank_id).await?;

		match rank {
			Some(rank) if rank.level >= state.core.config.admin_rank_level => Ok(Self(user)),
			_ => {
				tracing::warn!(user_id = user.id, "admin route refused");
				Err(ApiError::Forbidden)
			}
		}
	}
}
