use axum::extract::FromRef;
use axum::Router;
use sqlx::SqlitePool;
use std::sync::Arc;

pub mod auth;
pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod routes;
pub mod sms;
pub mod validation;

pub use auth::{AdminUser, AuthUser};
pub use config::*;
pub use error::ApiError;
pub use sms::{LogSmsGateway, SmsGateway};

/// Core: configuration and storage shared by every request
#[derive(Clone)]
pub struct CoreContext {
	pub config: Arc<Config>,
	pub db: SqlitePool,
}

/// Outbound integrations
#[derive(Clone)]
pub struct Services {
	pub sms: Arc<dyn SmsGateway>,
}

#[derive(Clone)]
pub struct AppState {
	pub core: CoreContext,
	pub services: Services,
}

impl AppState {
	#[must_use]
	pub fn new(config: Arc<Config>, db: SqlitePool, sms: Arc<dyn SmsGateway>) -> Self {
		Self {
			core: CoreContext { config, db },
			services: Services { sms },
		}
	}
}

impl FromRef<AppState> for Arc<Config> {
	fn from_ref(state: &AppState) -> Self {
		state.core.config.clone()
	}
}

impl FromRef<AppState> for SqlitePool {
	fn from_ref(state: &AppState) -> Self {
		state.core.db.clone()
	}
}

impl FromRef<AppState> for Arc<dyn SmsGateway> {
	fn from_ref(state: &AppState) -> Self {
		state.services.sms.clone()
	}
}

/// Every route, bound to `state`.
#[must_use]
pub fn app(state: AppState) -> Router {
	Router::new()
		.merge(routes::root::get_root())
		.merge(routes::health::get_health())
		.merge(routes::users::users())
		.merge(routes::verification::verification())
		.merge(routes::contacts::contacts())
		.merge(routes::guardians::guardian())
		.merge(routes::readings::readings())
		.merge(routes::referrals::referrals())
		.merge(routes::onboarding::onboarding())
		.with_state(state)
}
