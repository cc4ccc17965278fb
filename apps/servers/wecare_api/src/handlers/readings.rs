use crate::extract::Json;
use crate::validation::{parse_calendar_date, required, validated};
use crate::{ApiError, AppState, AuthUser};
use axum::{
	extract::{Path, State},
	http::StatusCode,
};
use chrono::{Local, NaiveDate, NaiveDateTime};
use garde::Validate;
use serde::{Deserialize, Serialize};
use tracing::instrument;
use vitals::{month_view, MonthRange, MonthView, ReadingKind};
use wecare_db::{fetch_month, Breach, GuardianRepository, ReadingRepository, RecordedReading};

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewReading {
	#[garde(required, range(min = 1, max = 400))]
	pub value: Option<i64>,

	#[garde(skip)]
	pub recorded_at: Option<NaiveDateTime>,
}

#[derive(Debug, Serialize)]
pub struct RecordedResponse {
	#[serde(flatten)]
	pub reading: RecordedReading,
	pub breach: Option<Breach>,
}

fn reading_kind(raw: &str) -> Result<ReadingKind, ApiError> {
	raw.parse().map_err(|e: vitals::UnknownReadingKind| ApiError::field("type", e.to_string()))
}

async fn month_for(state: AppState, user_id: i64, reference: NaiveDate, today: NaiveDate) -> Result<MonthView, ApiError> {
	let range = MonthRange::containing(reference).ok_or_else(|| ApiError::field("date", "is outside the supported calendar"))?;
	let readings = fetch_month(&ReadingRepository::new(state.core.db), user_id, range).await?;

	Ok(month_view(readings, reference, today))
}

#[axum::debug_handler]
#[instrument(name = "record_reading", skip(state, user, body), fields(user_id = user.id, kind = %kind))]
pub async fn record(State(state): State<AppState>, AuthUser(user): AuthUser, Path(kind): Path<String>, Json(body): Json<NewReading>) -> Result<(StatusCode, Json<RecordedResponse>), ApiError> {
	let kind = reading_kind(&kind)?;
	let body = validated(body)?;
	let value = required(body.value, "value")?;
	let recorded_at = body.recorded_at.unwrap_or_else(|| Local::now().naive_local());

	let reading = ReadingRepository::new(state.core.db.clone()).record(user.id, kind, value, recorded_at).await?;

	let breach = GuardianRepository::new(state.core.db).find(user.id).await?.and_then(|settings| settings.breach(kind, value));

	if let Some(breach) = breach {
		tracing::warn!(
			user_id = user.id,
			kind = %breach.kind,
			value = breach.value,
			min = breach.min,
			max = breach.max,
			notify_self = breach.notify_self,
			notify_wecare = breach.notify_wecare,
			"reading outside guardian bounds"
		);
	}

	Ok((StatusCode::CREATED, Json(RecordedResponse { reading, breach })))
}

#[axum::debug_handler]
#[instrument(name = "current_month", skip(state, user), fields(user_id = user.id))]
pub async fn current_month(State(state): State<AppState>, AuthUser(user): AuthUser) -> Result<Json<MonthView>, ApiError> {
	let today = Local::now().date_naive();
	Ok(Json(month_for(state, user.id, today, today).await?))
}

#[axum::debug_handler]
#[instrument(name = "month_of", skip(state, user), fields(user_id = user.id, date = %date))]
pub async fn month_of(State(state): State<AppState>, AuthUser(user): AuthUser, Path(date): Path<String>) -> Result<Json<MonthView>, ApiError> {
	let reference = parse_calendar_date(&date, "date")?;
	let today = Local::now().date_naive();

	Ok(Json(month_for(state, user.id, reference, today).await?))
}
