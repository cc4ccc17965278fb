use crate::handlers::referrals as handlers;
use crate::AppState;
use axum::routing::{get, post};
use axum::{extract::FromRef, http::Method, Router};

#[must_use]
pub fn referrals<S>() -> Router<S>
where
	S: Clone + Send + Sync + 'static,
	AppState: FromRef<S>,
{
	Router::new()
		.route("/referrals", get(handlers::list).post(handlers::apply))
		.route("/referrals/:id/credit", post(handlers::credit))
		.layer(super::cors([Method::GET, Method::POST]))
}
