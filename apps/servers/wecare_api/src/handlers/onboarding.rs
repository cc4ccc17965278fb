use crate::extract::Json;
use crate::validation::{required, validated};
use crate::{ApiError, AppState, AuthUser};
use axum::{extract::State, http::StatusCode};
use garde::Validate;
use serde::Deserialize;
use tracing::instrument;
use wecare_db::{OnboardingAction, OnboardingRepository};

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct OnboardingReport {
	#[garde(required)]
	pub action: Option<OnboardingAction>,
}

#[axum::debug_handler]
#[instrument(name = "report_onboarding", skip(state, user), fields(user_id = user.id))]
pub async fn report(State(state): State<AppState>, AuthUser(user): AuthUser, Json(body): Json<OnboardingReport>) -> Result<StatusCode, ApiError> {
	let body = validated(body)?;
	let action = required(body.action, "action")?;

	OnboardingRepository::new(state.core.db).report(user.id, action).await?;
	Ok(StatusCode::NO_CONTENT)
}
