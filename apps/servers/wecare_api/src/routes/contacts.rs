use crate::handlers::contacts as handlers;
use crate::AppState;
use axum::routing::{get};
use axum::{extract::FromRef, http::Method, Router};

#[must_use]
pub fn contacts<S>() -> Router<S>
where
	S: Clone + Send + Sync + 'static,
	AppState: FromRef<S>,
{
	Router::new()
		.route("/contacts", get(handlers::list).post(handlers::create))
		.route("/contacts/:id", get(handlers::show).put(handlers::update).delete(handlers::delete))
		.layer(super::cors([Method::GET, Method::POST, Method::PUT, Method::DELETE]))
}
