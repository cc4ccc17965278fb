use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Parser, Clone, Debug, Serialize, Deserialize)]
#[command(author, version, about, long_about = None)]
pub struct Config {
	/// Use JSON formatting for tracing
	#[arg(long, env = "LOG_JSON", default_value = "false")]
	pub log_json: bool,

	/// Log filter directives
	#[arg(long, env = "RUST_LOG", default_value = "info")]
	pub rust_log: String,

	/// SQLite connection string
	#[arg(long, env = "DATABASE_URL", default_value = "sqlite://wecare.db")]
	pub database_url: String,

	/// Maximum pooled database connections
	#[arg(long, env = "DB_MAX_CONNECTIONS", default_value = "5")]
	pub db_max_connections: u32,

	/// Server host
	#[arg(long, env = "HOST", default_value = "127.0.0.1")]
	pub host: String,

	/// Server port
	#[arg(long, env = "PORT", default_value = "8080")]
	pub port: u16,

	/// Request body limit in MiB
	#[arg(long, env = "MAX_REQUEST_SIZE", default_value = "2")]
	pub max_request_size: usize,

	/// Requests served concurrently before shedding load
	#[arg(long, env = "MAX_CONCURRENT_REQ", default_value = "256")]
	pub max_concurrent_req: usize,

	/// Per-request timeout
	#[arg(long, env = "TASK_TIMEOUT_MS", default_value = "10000")]
	pub task_timeout_ms: u64,

	/// Header carrying the user id set by the upstream gateway
	#[arg(long, env = "IDENTITY_HEADER", default_value = "x-user-id")]
	pub identity_header: String,

	/// Minimum rank level for admin routes
	#[arg(long, env = "ADMIN_RANK_LEVEL", default_value = "4")]
	pub admin_rank_level: i64,

	/// How long an issued verification code stays usable
	#[arg(long, env = "VERIFICATION_CODE_TTL_SECS", default_value = "600")]
	pub verification_code_ttl_secs: i64,

	/// Wrong guesses allowed before a verification code is consumed
	#[arg(long, env = "VERIFICATION_MAX_ATTEMPTS", default_value = "5")]
	pub verification_max_attempts: i64,
}

impl Config {
	#[must_use]
	pub fn bind_addr(&self) -> String {
		format!("{}:{}", self.host, self.port)
	}
}
