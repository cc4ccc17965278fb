use crate::handlers::health as handlers;
use crate::AppState;
use axum::routing::{get};
use axum::{extract::FromRef, http::Method, Router};

#[must_use]
pub fn get_health<S>() -> Router<S>
where
	S: Clone + Send + Sync + 'static,
	AppState: FromRef<S>,
{
	Router::new()
		.route("/health", get(handlers::health))
		.layer(super::cors([Method::GET]))
}
