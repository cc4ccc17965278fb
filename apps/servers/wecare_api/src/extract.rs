use crate::error::ApiError;
use axum::extract::rejection::JsonRejection;
use axum::extract::FromRequest;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// `axum::Json` whose rejections are reported as [`ApiError`].
#[derive(Debug, Clone, Copy, Default, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct Json<T>(pub T);

impl<T: Serialize> IntoResponse for Json<T> {
	fn into_response(self) -> Response {
		axum::Json(self.0).into_response()
	}
}

impl From<JsonRejection> for ApiError {
	fn from(rejection: JsonRejection) -> Self {
		match rejection {
			JsonRejection::JsonDataError(e) => Self::field("body", e.body_text()),
			JsonRejection::MissingJsonContentType(e) => Self::UnsupportedMediaType(e.body_text()),
			other => Self::BadRequest(other.body_text()),
		}
	}
}
