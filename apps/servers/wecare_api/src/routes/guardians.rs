use crate::handlers::guardians as handlers;
use crate::AppState;
use axum::routing::{get};
use axum::{extract::FromRef, http::Method, Router};

#[must_use]
pub fn guardian<S>() -> Router<S>
where
	S: Clone + Send + Sync + 'static,
	AppState: FromRef<S>,
{
	Router::new()
		.route("/guardian", get(handlers::show).put(handlers::update))
		.layer(super::cors([Method::GET, Method::PUT]))
}
