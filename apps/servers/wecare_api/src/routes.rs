use axum::http::{
	header::{ACCEPT, CONTENT_TYPE},
	HeaderName, Method,
};
use tower_http::cors::{Any, CorsLayer};

pub mod contacts;
pub mod guardians;
pub mod health;
pub mod onboarding;
pub mod readings;
pub mod referrals;
pub mod root;
pub mod users;
pub mod verification;

/// Browser access for `methods`. The identity header is not allowed cross-origin.
pub(crate) fn cors(methods: impl Into<Vec<Method>>) -> CorsLayer {
	const HEADERS: [HeaderName; 2] = [CONTENT_TYPE, ACCEPT];

	CorsLayer::new().allow_origin(Any).allow_methods(methods.into()).allow_headers(HEADERS)
}
