use crate::handlers::root as handlers;
use crate::AppState;
use axum::routing::{get};
use axum::{extract::FromRef, http::Method, Router};

#[must_use]
pub fn get_root<S>() -> Router<S>
where
	S: Clone + Send + Sync + 'static,
	AppState: FromRef<S>,
{
	Router::new()
		.route("/", get(handlers::root))
		.layer(super::cors([Method::GET]))
}
