use crate::handlers::users as handlers;
use crate::AppState;
use axum::routing::{get, post};
use axum::{extract::FromRef, http::Method, Router};

#[must_use]
pub fn users<S>() -> Router<S>
where
	S: Clone + Send + Sync + 'static,
	AppState: FromRef<S>,
{
	Router::new()
		.route("/users", post(handlers::register).get(handlers::list))
		.route("/users/me", get(handlers::me).delete(handlers::delete_me))
		.route("/users/:id", get(handlers::show))
		.layer(super::cors([Method::GET, Method::POST, Method::DELETE]))
}
