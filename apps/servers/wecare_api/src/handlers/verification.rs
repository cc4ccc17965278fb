use crate::extract::Json;
use crate::validation::{required, validated};
use crate::{ApiError, AppState, AuthUser};
use axum::{extract::State, http::StatusCode};
use chrono::{Duration, Utc};
use garde::Validate;
use rand::Rng;
use serde::Deserialize;
use tracing::instrument;
use wecare_db::{UserRepository, VerificationRepository};

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct RequestCode {
	#[garde(length(max = 50))]
	pub purpose: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ConfirmCode {
	#[garde(required, length(min = 5, max = 5))]
	pub code: Option<String>,
}

fn invalid_code() -> ApiError {
	ApiError::field("code", "The verification code is invalid or has expired.")
}

fn verification_code() -> String {
	rand::thread_rng().gen_range(10_000..=99_999).to_string()
}

#[axum::debug_handler]
#[instrument(name = "request_verification_code", skip(state, user, body), fields(user_id = user.id))]
pub async fn request_code(State(state): State<AppState>, AuthUser(user): AuthUser, Json(body): Json<RequestCode>) -> Result<StatusCode, ApiError> {
	let body = validated(body)?;
	let code = verification_code();

	VerificationRepository::new(state.core.db)
		.issue(&user.number, &code, body.purpose.as_deref())
		.await?;

	state.services.sms.send(&user.number, &format!("Your WeCare verification code is {code}")).await?;

	Ok(StatusCode::ACCEPTED)
}

#[axum::debug_handler]
#[instrument(name = "confirm_verification_code", skip(state, user, body), fields(user_id = user.id))]
pub async fn confirm_code(State(state): State<AppState>, AuthUser(user): AuthUser, Json(body): Json<ConfirmCode>) -> Result<StatusCode, ApiError> {
	let body = validated(body)?;
	let code = required(body.code, "code")?;

	let codes = VerificationRepository::new(state.core.db.clone());
	let config = &state.core.config;
	let issued_after = Utc::now() - Duration::seconds(config.verification_code_ttl_secs);

	let live = codes.latest_live(&user.number, issued_after).await?.ok_or_else(invalid_code)?;

	if live.code != code {
		let attempts = codes.record_failure(live.id, config.verification_max_attempts).await?;
		if attempts.is_some_and(|n| n >= config.verification_max_attempts) {
			tracing::warn!(user_id = user.id, "verification code exhausted");
		}
		return Err(invalid_code());
	}

	codes.consume(live.id).await?;
	UserRepository::new(state.core.db).verify_number(user.id).await?;

	tracing::info!(user_id = user.id, "number verified");
	Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn codes_have_five_digits() {
		for _ in 0..100 {
			let code = verification_code();
			assert_eq!(code.len(), 5);
			assert!(code.parse::<u32>().is_ok_and(|n| (10_000..=99_999).contains(&n)));
		}
	}
}
