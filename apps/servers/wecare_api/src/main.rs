use anyhow::Result;
use axum::error_handling::HandleErrorLayer;
use clap::Parser;
use std::sync::Arc;
use tokio::{net::TcpListener, time::Duration};
use tokio_util::sync::CancellationToken;
use tower::{limit::ConcurrencyLimitLayer, load_shed::LoadShedLayer, timeout::TimeoutLayer, BoxError, ServiceBuilder};
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};
use tracing_subscriber::{filter::EnvFilter, fmt::format::JsonFields, util::SubscriberInitExt, Layer};
use wecare_api::{app, ApiError, AppState, Config, LogSmsGateway};

async fn handle_tower_error(error: BoxError) -> ApiError {
	if error.is::<tower::timeout::error::Elapsed>() {
		tracing::warn!("Request timeout: {}", error);
		ApiError::RequestTimeout
	} else if error.is::<tower::load_shed::error::Overloaded>() {
		tracing::warn!("Service overloaded: {}", error);
		ApiError::ServiceOverloaded
	} else {
		tracing::error!("Unhandled tower error: {}", error);
		ApiError::TowerError(error)
	}
}

#[tokio::main]
async fn main() -> Result<()> {
	dotenv::dotenv().ok();
	let config = Arc::new(Config::parse());

	init_tracing(&config)?;

	let pool = wecare_db::connect(&config.database_url, config.db_max_connections).await?;
	wecare_db::schema::init_schema(&pool).await?;

	let state = AppState::new(config.clone(), pool.clone(), Arc::new(LogSmsGateway));

	let app = app(state).layer(
		ServiceBuilder::new()
			.layer(TraceLayer::new_for_http())
			.layer(HandleErrorLayer::new(handle_tower_error))
			.layer(RequestBodyLimitLayer::new(config.max_request_size * 1024 * 1024))
			.layer(ConcurrencyLimitLayer::new(config.max_concurrent_req))
			.layer(TimeoutLayer::new(Duration::from_millis(config.task_timeout_ms)))
			.layer(LoadShedLayer::new()),
	);

	let listener = TcpListener::bind(config.bind_addr()).await?;
	tracing::info!("listening on {}", listener.local_addr()?);

	let shutdown_token = CancellationToken::new();
	let signal_shutdown_token = shutdown_token.clone();
	tokio::spawn(async move {
		tokio::signal::ctrl_c().await.ok();
		tracing::info!("Received Ctrl+C, initiating shutdown...");
		signal_shutdown_token.cancel();
	});

	axum::serve(listener, app)
		.with_graceful_shutdown(async move {
			shutdown_token.cancelled().await;
		})
		.await?;
	tracing::info!("Server stopped");

	match tokio::time::timeout(Duration::from_secs(5), pool.close()).await {
		Ok(()) => tracing::info!("Database closed"),
		Err(_) => tracing::error!("Database close timed out"),
	}

	tracing::info!("Shutdown complete");
	Ok(())
}

fn init_tracing(config: &Config) -> Result<()> {
	use tracing_subscriber::layer::SubscriberExt;

	let filter = EnvFilter::try_new(&config.rust_log)?;

	tracing_subscriber::registry()
		.with(if config.log_json {
			Box::new(
				tracing_subscriber::fmt::layer()
					.fmt_fields(JsonFields::default())
					.event_format(tracing_subscriber::fmt::format().json().flatten_event(true).with_span_list(false))
					.with_filter(filter),
			) as Box<dyn Layer<_> + Send + Sync>
		} else {
			Box::new(
				tracing_subscriber::fmt::layer()
					.event_format(tracing_subscriber::fmt::format().pretty())
					.with_filter(filter),
			)
		})
		.try_init()?;

	Ok(())
}
