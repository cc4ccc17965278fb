#![allow(dead_code)]

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header::CONTENT_TYPE, Method, Request, StatusCode};
use axum::Router;
use clap::Parser;
use serde_json::{json, Value};
use sqlx::SqlitePool;
use std::sync::{Arc, Mutex};
use tower::ServiceExt;
use wecare_api::{app, AppState, Config, SmsGateway};

#[derive(Default)]
pub struct RecordingSms {
	pub sent: Mutex<Vec<(String, String)>>,
}

#[async_trait]
impl SmsGateway for RecordingSms {
	async fn send(&self, number: &str, message: &str) -> anyhow::Result<()> {
		self.sent.lock().unwrap().push((number.to_string(), message.to_string()));
		Ok(())
	}
}

impl RecordingSms {
	pub fn last_code(&self) -> String {
		let sent = self.sent.lock().unwrap();
		let (_, message) = sent.last().expect("no sms sent");
		message.rsplit(' ').next().unwrap().to_string()
	}
}

pub struct TestApp {
	pub router: Router,
	pub pool: SqlitePool,
	pub sms: Arc<RecordingSms>,
}

impl TestApp {
	pub async fn new() -> Self {
		let pool = wecare_db::connect_in_memory().await.unwrap();
		let config = Arc::new(Config::parse_from(["wecare-api"]));
		let sms = Arc::new(RecordingSms::default());

		let router = app(AppState::new(config, pool.clone(), sms.clone()));

		Self { router, pool, sms }
	}

	pub async fn request(&self, method: Method, uri: &str, user: Option<i64>, body: Option<Value>) -> (StatusCode, Value) {
		let mut builder = Request::builder().method(method).uri(uri);
		if let Some(id) = user {
			builder = builder.header("x-user-id", id.to_string());
		}

		let request = match body {
			Some(body) => builder.header(CONTENT_TYPE, "application/json").body(Body::from(body.to_string())).unwrap(),
			None => builder.body(Body::empty()).unwrap(),
		};

		self.send(request).await
	}

	/// Runs a hand-built request; non-JSON bodies come back as a string.
	pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
		let response = self.router.clone().oneshot(request).await.unwrap();
		let status = response.status();
		let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
		let value = if bytes.is_empty() {
			Value::Null
		} else {
			serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
		};

		(status, value)
	}

	pub async fn get(&self, uri: &str, user: i64) -> (StatusCode, Value) {
		self.request(Method::GET, uri, Some(user), None).await
	}

	pub async fn post(&self, uri: &str, user: i64, body: Value) -> (StatusCode, Value) {
		self.request(Method::POST, uri, Some(user), Some(body)).await
	}

	pub async fn put(&self, uri: &str, user: i64, body: Value) -> (StatusCode, Value) {
		self.request(Method::PUT, uri, Some(user), Some(body)).await
	}

	pub async fn delete(&self, uri: &str, user: i64) -> (StatusCode, Value) {
		self.request(Method::DELETE, uri, Some(user), None).await
	}

	/// Registers a user and returns the created body.
	pub async fn register(&self, email: &str, number: &str) -> Value {
		let body = json!({ "email": email, "password": "secret", "number": number, "firstname": "Test" });
		let (status, user) = self.request(Method::POST, "/users", None, Some(body)).await;
		assert_eq!(status, StatusCode::CREATED, "{user}");
		user
	}

	pub async fn register_id(&self, email: &str, number: &str) -> i64 {
		self.register(email, number).await["id"].as_i64().unwrap()
	}

	pub async fn promote(&self, user_id: i64, level: i64) {
		let rank_id = sqlx::query("INSERT INTO ranks (level, title) VALUES (?, ?)")
			.bind(level)
			.bind("Admin")
			.execute(&self.pool)
			.await
			.unwrap()
			.last_insert_rowid();

		sqlx::query("UPDATE users SET rank_id = ? WHERE id = ?")
			.bind(rank_id)
			.bind(user_id)
			.execute(&self.pool)
			.await
			.unwrap();
	}
}
