use axum::body::Body;
use axum::http::header::WWW_AUTHENTICATE;
use axum::http::{HeaderValue, Response, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use std::borrow::Cow;
use std::collections::HashMap;

pub type FieldErrors = HashMap<Cow<'static, str>, Vec<Cow<'static, str>>>;

#[derive(thiserror::Error, Debug)]
pub enum ApiError {
	#[error("authentication required")]
	Unauthorized,

	#[error("You are not authorized to view this page.")]
	Forbidden,

	#[error("{0}")]
	BadRequest(String),

	#[error("{0}")]
	UnsupportedMediaType(String),

	#[error("{0}")]
	NotFound(Cow<'static, str>),

	#[error("error in the request body")]
	UnprocessableEntity { errors: FieldErrors },

	#[error("database error: {0}")]
	Database(#[from] sqlx::Error),

	#[error("an internal server error occurred")]
	Anyhow(#[from] anyhow::Error),

	#[error("Request timeout")]
	RequestTimeout,

	#[error("Service temporarily overloaded")]
	ServiceOverloaded,

	#[error("Unexpected Tower Service error: {0}")]
	TowerError(#[from] tower::BoxError),
}

impl ApiError {
	#[must_use]
	pub fn unprocessable_entity<K, V>(errors: impl IntoIterator<Item = (K, V)>) -> Self
	where
		K: Into<Cow<'static, str>>,
		V: Into<Cow<'static, str>>,
	{
		let mut error_map = HashMap::new();

		for (key, val) in errors {
			error_map.entry(key.into()).or_insert_with(Vec::new).push(val.into());
		}

		Self::UnprocessableEntity { errors: error_map }
	}

	/// Shorthand for a single field failure.
	#[must_use]
	pub fn field(field: &'static str, message: impl Into<Cow<'static, str>>) -> Self {
		Self::unprocessable_entity([(field, message)])
	}

	/// A unique-constraint failure on a listed `(column, field, message)`
	/// becomes that field error; anything else stays a database error.
	#[must_use]
	pub fn unique_or_database(err: sqlx::Error, conflicts: &[(&str, &'static str, &'static str)]) -> Self {
		let conflict = wecare_db::unique_violation(&err).and_then(|column| conflicts.iter().find(|(c, ..)| *c == column));

		match conflict {
			Some(&(_, field, message)) => Self::field(field, message),
			None => Self::Database(err),
		}
	}

	#[must_use]
	pub fn not_found(message: impl Into<Cow<'static, str>>) -> Self {
		Self::NotFound(message.into())
	}

	const fn status_code(&self) -> StatusCode {
		match self {
			Self::Unauthorized => StatusCode::UNAUTHORIZED,
			Self::Forbidden => StatusCode::FORBIDDEN,
			Self::BadRequest(_) => StatusCode::BAD_REQUEST,
			Self::UnsupportedMediaType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
			Self::NotFound(_) => StatusCode::NOT_FOUND,
			Self::UnprocessableEntity { .. } => StatusCode::UNPROCESSABLE_ENTITY,
			Self::RequestTimeout => StatusCode::REQUEST_TIMEOUT,
			Self::ServiceOverloaded => StatusCode::SERVICE_UNAVAILABLE,
			Self::Database(_) | Self::Anyhow(_) | Self::TowerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
		}
	}
}

#[derive(serde::Serialize)]
struct Message {
	message: String,
}

impl IntoResponse for ApiError {
	fn into_response(self) -> Response<Body> {
		match self {
			Self::UnprocessableEntity { errors } => {
				#[derive(serde::Serialize)]
				struct Errors {
					errors: FieldErrors,
				}

				(StatusCode::UNPROCESSABLE_ENTITY, Json(Errors { errors })).into_response()
			}
			Self::Unauthorized => (
				self.status_code(),
				[(WWW_AUTHENTICATE, HeaderValue::from_static("Token"))],
				Json(Message { message: self.to_string() }),
			)
				.into_response(),
			Self::Database(ref e) => {
				tracing::error!("Database error: {:?}", e);
				(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
			}
			Self::Anyhow(ref e) => {
				tracing::error!("Generic error: {:?}", e);
				(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
			}
			_ => (self.status_code(), Json(Message { message: self.to_string() })).into_response(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn field_errors_collect_per_key() {
		let err = ApiError::unprocessable_entity([("email", "is required"), ("email", "is invalid"), ("number", "too long")]);

		let ApiError::UnprocessableEntity { errors } = err else {
			panic!("expected a validation error");
		};
		assert_eq!(errors["email"].len(), 2);
		assert_eq!(errors["number"], vec![Cow::Borrowed("too long")]);
	}

	#[test]
	fn statuses() {
		assert_eq!(ApiError::Unauthorized.into_response().status(), StatusCode::UNAUTHORIZED);
		assert_eq!(ApiError::Forbidden.into_response().status(), StatusCode::FORBIDDEN);
		assert_eq!(ApiError::not_found("gone").into_response().status(), StatusCode::NOT_FOUND);
		assert_eq!(ApiError::field("code", "bad").into_response().status(), StatusCode::UNPROCESSABLE_ENTITY);
		assert_eq!(ApiError::Database(sqlx::Error::RowNotFound).into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
	}

	#[tokio::test]
	async fn unique_violations_become_field_errors() {
		let pool = wecare_db::connect_in_memory().await.unwrap();
		let referrals = wecare_db::ReferralRepository::new(pool);
		referrals.create(1, 2).await.unwrap();
		let duplicate = referrals.create(3, 2).await.unwrap_err();

		let err = ApiError::unique_or_database(duplicate, &[("new_user_id", "referral_code", "already applied")]);
		let ApiError::UnprocessableEntity { errors } = err else {
			panic!("expected a validation error");
		};
		assert_eq!(errors["referral_code"], vec![Cow::Borrowed("already applied")]);

		let duplicate = referrals.create(3, 2).await.unwrap_err();
		let err = ApiError::unique_or_database(duplicate, &[("email", "email", "taken")]);
		assert!(matches!(err, ApiError::Database(_)));
	}

	#[test]
	fn unauthorized_sets_challenge_header() {
		let response = ApiError::Unauthorized.into_response();
		assert_eq!(response.headers()[WWW_AUTHENTICATE], "Token");
	}
}
