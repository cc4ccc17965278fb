mod common;

use axum::http::{Method, StatusCode};
use common::TestApp;
use serde_json::json;

#[tokio::test]
async fn registration_returns_the_public_user() {
	let app = TestApp::new().await;
	let user = app.register("ada@example.com", "5550001").await;

	assert_eq!(user["email"], "ada@example.com");
	assert_eq!(user["number_verified"], false);
	assert!(user.get("password_hash").is_none());
	assert!(user.get("deleted_at").is_none());

	let code = user["referral_code"].as_str().unwrap();
	assert_eq!(code.len(), 6);
	assert!(code.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_lowercase()));
}

#[tokio::test]
async fn registration_rules() {
	let app = TestApp::new().await;
	app.register("ada@example.com", "5550001").await;

	let (status, body) = app
		.request(Method::POST, "/users", None, Some(json!({ "email": "ada@example.com", "password": "x", "number": "5550001" })))
		.await;
	assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
	assert!(body["errors"]["email"].is_array());
	assert!(body["errors"]["number"].is_array());

	let (status, body) = app
		.request(Method::POST, "/users", None, Some(json!({ "email": "not-an-email", "password": "x", "number": "1234567890123456" })))
		.await;
	assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
	assert!(body["errors"]["email"].is_array());
	assert!(body["errors"]["number"].is_array());

	let (status, body) = app.request(Method::POST, "/users", None, Some(json!({ "email": "bob@example.com" }))).await;
	assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
	assert!(body["errors"]["password"].is_array());
	assert!(body["errors"]["number"].is_array());
}

#[tokio::test]
async fn profile_embeds_requested_relations() {
	let app = TestApp::new().await;
	let user = app.register_id("ada@example.com", "5550001").await;
	app.post("/contacts", user, json!({ "name": "Mom", "number": "5551234" })).await;

	let (status, plain) = app.get("/users/me", user).await;
	assert_eq!(status, StatusCode::OK);
	assert!(plain.get("contacts").is_none());
	assert!(plain.get("auth_history").is_none());

	let (_, full) = app.get("/users/me?with_contacts&with_auth_history=true", user).await;
	assert_eq!(full["id"], user);
	assert_eq!(full["contacts"].as_array().unwrap().len(), 1);
	assert_eq!(full["auth_history"][0]["action"], "SIGNUP");
}

#[tokio::test]
async fn listing_users_needs_an_admin_rank() {
	let app = TestApp::new().await;
	let ada = app.register_id("ada@example.com", "5550001").await;
	let bob = app.register_id("bob@example.com", "5550002").await;

	let (status, body) = app.get("/users", ada).await;
	assert_eq!(status, StatusCode::FORBIDDEN);
	assert_eq!(body["message"], "You are not authorized to view this page.");

	app.promote(bob, 3).await;
	let (status, _) = app.get("/users", bob).await;
	assert_eq!(status, StatusCode::FORBIDDEN);

	app.promote(ada, 4).await;
	let (status, users) = app.get("/users", ada).await;
	assert_eq!(status, StatusCode::OK);
	assert_eq!(users.as_array().unwrap().len(), 2);

	let (_, me) = app.get("/users/me?with_rank", ada).await;
	assert_eq!(me["rank"]["level"], 4);
}

#[tokio::test]
async fn soft_deleted_users_lose_access() {
	let app = TestApp::new().await;
	let ada = app.register_id("ada@example.com", "5550001").await;
	let bob = app.register_id("bob@example.com", "5550002").await;

	let (status, shown) = app.get(&format!("/users/{ada}"), bob).await;
	assert_eq!(status, StatusCode::OK);
	assert_eq!(shown["email"], "ada@example.com");

	let (status, _) = app.delete("/users/me", ada).await;
	assert_eq!(status, StatusCode::NO_CONTENT);

	let (status, _) = app.get("/users/me", ada).await;
	assert_eq!(status, StatusCode::UNAUTHORIZED);

	let (status, _) = app.get(&format!("/users/{ada}"), bob).await;
	assert_eq!(status, StatusCode::NOT_FOUND);
}
