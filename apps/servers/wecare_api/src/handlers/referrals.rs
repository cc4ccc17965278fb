use crate::extract::Json;
use crate::validation::{required, validated};
use crate::{AdminUser, ApiError, AppState, AuthUser};
use axum::{
	extract::{Path, Query, State},
	http::StatusCode,
};
use garde::Validate;
use serde::Deserialize;
use tracing::instrument;
use wecare_db::{Referral, ReferralRepository, ReferralStatus, UserRepository};

const ALREADY_APPLIED: &str = "A referral code has already been applied to this account.";

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ApplyReferral {
	#[garde(required, length(min = 1, max = 32))]
	pub referral_code: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ReferralQuery {
	pub status: Option<ReferralStatus>,
}

#[axum::debug_handler]
#[instrument(name = "apply_referral", skip(state, user, body), fields(user_id = user.id))]
pub async fn apply(State(state): State<AppState>, AuthUser(user): AuthUser, Json(body): Json<ApplyReferral>) -> Result<(StatusCode, Json<Referral>), ApiError> {
	let body = validated(body)?;
	let code = required(body.referral_code, "referral_code")?;

	let referrer = UserRepository::new(state.core.db.clone())
		.find_by_referral_code(code.trim())
		.await?
		.ok_or_else(|| ApiError::field("referral_code", "The referral code entered does not exist."))?;

	if referrer.id == user.id {
		return Err(ApiError::field("referral_code", "You cannot use your own referral code."));
	}

	let referrals = ReferralRepository::new(state.core.db);
	if referrals.find_by_new_user(user.id).await?.is_some() {
		return Err(ApiError::field("referral_code", ALREADY_APPLIED));
	}

	let referral = referrals
		.create(referrer.id, user.id)
		.await
		.map_err(|e| ApiError::unique_or_database(e, &[("new_user_id", "referral_code", ALREADY_APPLIED)]))?;
	tracing::info!(referrer_id = referrer.id, new_user_id = user.id, "referral applied");

	Ok((StatusCode::CREATED, Json(referral)))
}

#[axum::debug_handler]
#[instrument(name = "list_referrals", skip(state, user), fields(user_id = user.id))]
pub async fn list(State(state): State<AppState>, AuthUser(user): AuthUser, Query(query): Query<ReferralQuery>) -> Result<Json<Vec<Referral>>, ApiError> {
	Ok(Json(ReferralRepository::new(state.core.db).list_by_referrer(user.id, query.status).await?))
}

#[axum::debug_handler]
#[instrument(name = "credit_referral", skip(state, _admin), fields(id = %id))]
pub async fn credit(State(state): State<AppState>, _admin: AdminUser, Path(id): Path<i64>) -> Result<Json<Referral>, ApiError> {
	let referrals = ReferralRepository::new(state.core.db);

	if referrals.find(id).await?.is_none() {
		return Err(ApiError::not_found("This referral no longer exists in our database."));
	}

	let referral = referrals
		.mark_credited(id)
		.await?
		.ok_or_else(|| ApiError::field("referral", "This referral has already been credited."))?;

	tracing::info!(id, referrer_id = referral.user_id, "referral credited");
	Ok(Json(referral))
}
