use crate::handlers::onboarding as handlers;
use crate::AppState;
use axum::routing::{post};
use axum::{extract::FromRef, http::Method, Router};

#[must_use]
pub fn onboarding<S>() -> Router<S>
where
	S: Clone + Send + Sync + 'static,
	AppState: FromRef<S>,
{
	Router::new()
		.route("/onboarding", post(handlers::report))
		.layer(super::cors([Method::POST]))
}
