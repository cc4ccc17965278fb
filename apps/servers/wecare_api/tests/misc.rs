mod common;

use axum::http::{Method, StatusCode};
use common::TestApp;
use serde_json::json;

#[tokio::test]
async fn root_and_health_are_public() {
	let app = TestApp::new().await;

	let (status, body) = app.request(Method::GET, "/", None, None).await;
	assert_eq!(status, StatusCode::OK);
	assert!(body["greeting"].is_string());

	let (status, body) = app.request(Method::GET, "/health", None, None).await;
	assert_eq!(status, StatusCode::OK);
	assert_eq!(body["status"], "healthy");
	assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn onboarding_reports_upsert() {
	let app = TestApp::new().await;
	let user = app.register_id("ada@example.com", "5550001").await;

	let (status, _) = app.post("/onboarding", user, json!({ "action": "SKIP" })).await;
	assert_eq!(status, StatusCode::NO_CONTENT);

	let (status, _) = app.post("/onboarding", user, json!({ "action": "THROUGH" })).await;
	assert_eq!(status, StatusCode::NO_CONTENT);

	let action: String = sqlx::query_scalar("SELECT action FROM onboardings WHERE user_id = ?")
		.bind(user)
		.fetch_one(&app.pool)
		.await
		.unwrap();
	assert_eq!(action, "THROUGH");

	let (status, body) = app.post("/onboarding", user, json!({})).await;
	assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
	assert!(body["errors"]["action"].is_array());
}

#[tokio::test]
async fn guardian_settings_round_trip() {
	let app = TestApp::new().await;
	let user = app.register_id("ada@example.com", "5550001").await;

	let (status, _) = app.get("/guardian", user).await;
	assert_eq!(status, StatusCode::NOT_FOUND);

	let (status, body) = app
		.put(
			"/guardian",
			user,
			json!({ "notify_self": true, "notify_wecare": true, "heart_min": 130, "heart_max": 60, "breath_min": 8, "breath_max": 25 }),
		)
		.await;
	assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
	assert!(body["errors"]["heart_min"].is_array());

	let settings = json!({ "notify_self": true, "notify_wecare": false, "heart_min": 50, "heart_max": 120, "breath_min": 8, "breath_max": 25 });
	let (status, saved) = app.put("/guardian", user, settings).await;
	assert_eq!(status, StatusCode::OK);

	let (_, shown) = app.get("/guardian", user).await;
	assert_eq!(shown["id"], saved["id"]);
	assert_eq!(shown["heart_max"], 120);
}
