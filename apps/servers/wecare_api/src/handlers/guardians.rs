use crate::extract::Json;
use crate::validation::{required, validated};
use crate::{ApiError, AppState, AuthUser};
use axum::extract::State;
use garde::Validate;
use serde::Deserialize;
use tracing::instrument;
use wecare_db::{GuardianRepository, GuardianSettings, GuardianUpdate};

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct GuardianBody {
	#[garde(required)]
	pub notify_self: Option<bool>,

	#[garde(required)]
	pub notify_wecare: Option<bool>,

	#[garde(required, range(min = 0))]
	pub heart_min: Option<i64>,

	#[garde(required, range(min = 0))]
	pub heart_max: Option<i64>,

	#[garde(required, range(min = 0))]
	pub breath_min: Option<i64>,

	#[garde(required, range(min = 0))]
	pub breath_max: Option<i64>,
}

impl GuardianBody {
	fn into_update(self) -> Result<GuardianUpdate, ApiError> {
		let body = validated(self)?;
		let update = GuardianUpdate {
			notify_self: required(body.notify_self, "notify_self")?,
			notify_wecare: required(body.notify_wecare, "notify_wecare")?,
			heart_min: required(body.heart_min, "heart_min")?,
			heart_max: required(body.heart_max, "heart_max")?,
			breath_min: required(body.breath_min, "breath_min")?,
			breath_max: required(body.breath_max, "breath_max")?,
		};

		let mut errors = Vec::new();
		if update.heart_min > update.heart_max {
			errors.push(("heart_min", "The minimum heart beat must not exceed the maximum."));
		}
		if update.breath_min > update.breath_max {
			errors.push(("breath_min", "The minimum breath rate must not exceed the maximum."));
		}
		if !errors.is_empty() {
			return Err(ApiError::unprocessable_entity(errors));
		}

		Ok(update)
	}
}

#[axum::debug_handler]
#[instrument(name = "show_guardian", skip(state, user), fields(user_id = user.id))]
pub async fn show(State(state): State<AppState>, AuthUser(user): AuthUser) -> Result<Json<GuardianSettings>, ApiError> {
	GuardianRepository::new(state.core.db)
		.find(user.id)
		.await?
		.map(Json)
		.ok_or_else(|| ApiError::not_found("No Guardian settings have been saved yet."))
}

#[axum::debug_handler]
#[instrument(name = "update_guardian", skip(state, user, body), fields(user_id = user.id))]
pub async fn update(State(state): State<AppState>, AuthUser(user): AuthUser, Json(body): Json<GuardianBody>) -> Result<Json<GuardianSettings>, ApiError> {
	let update = body.into_update()?;
	Ok(Json(GuardianRepository::new(state.core.db).upsert(user.id, update).await?))
}

#[cfg(test)]
mod tests {
	use super::*;

	fn body(heart: (i64, i64), breath: (i64, i64)) -> GuardianBody {
		GuardianBody {
			notify_self: Some(true),
			notify_wecare: Some(false),
			heart_min: Some(heart.0),
			heart_max: Some(heart.1),
			breath_min: Some(breath.0),
			breath_max: Some(breath.1),
		}
	}

	#[test]
	fn min_may_equal_max() {
		assert!(body((60, 60), (12, 12)).into_update().is_ok());
	}

	#[test]
	fn inverted_bounds_are_rejected_per_type() {
		let Err(ApiError::UnprocessableEntity { errors }) = body((130, 60), (10, 20)).into_update() else {
			panic!("expected a validation error");
		};
		assert!(errors.contains_key("heart_min"));
		assert!(!errors.contains_key("breath_min"));
	}

	#[test]
	fn missing_fields_are_reported() {
		let mut missing = body((50, 120), (8, 25));
		missing.breath_max = None;

		let Err(ApiError::UnprocessableEntity { errors }) = missing.into_update() else {
			panic!("expected a validation error");
		};
		assert!(errors.contains_key("breath_max"));
	}
}
