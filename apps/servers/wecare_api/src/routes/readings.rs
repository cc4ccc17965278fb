use crate::handlers::readings as handlers;
use crate::AppState;
use axum::routing::{get, post};
use axum::{extract::FromRef, http::Method, Router};

#[must_use]
pub fn readings<S>() -> Router<S>
where
	S: Clone + Send + Sync + 'static,
	AppState: FromRef<S>,
{
	Router::new()
		.route("/readings/month", get(handlers::current_month))
		.route("/readings/month/:date", get(handlers::month_of))
		.route("/readings/:type", post(handlers::record))
		.layer(super::cors([Method::GET, Method::POST]))
}
