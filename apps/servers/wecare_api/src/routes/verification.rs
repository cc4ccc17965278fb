use crate::handlers::verification as handlers;
use crate::AppState;
use axum::routing::{post};
use axum::{extract::FromRef, http::Method, Router};

#[must_use]
pub fn verification<S>() -> Router<S>
where
	S: Clone + Send + Sync + 'static,
	AppState: FromRef<S>,
{
	Router::new()
		.route("/verification", post(handlers::request_code))
		.route("/verification/confirm", post(handlers::confirm_code))
		.layer(super::cors([Method::POST]))
}
