use axum::Json;
use serde::Serialize;

#[derive(Serialize)]
pub struct Greeting {
	greeting: &'static str,
}

pub async fn root() -> Json<Greeting> {
	Json(Greeting {
		greeting: "Hello from the WeCare API.",
	})
}
