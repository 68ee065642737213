#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use vigil_api::config::ServerConfig;
use vigil_api::router::build_app_router;
use vigil_api::state::AppState;
use vigil_db::ConnectionProvider;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        database_url: String::new(),
        request_timeout_secs: 30,
    }
}

/// Build the full application router against the test database.
///
/// Handlers open their own connections with the pool's connect options,
/// exactly as production does with `DATABASE_URL`.
pub fn build_test_app(pool: &PgPool) -> Router {
    let db = ConnectionProvider::new(pool.connect_options().as_ref().clone());
    build_app_router(AppState { db }, &test_config())
}

/// Bootstrap schema and seed rows.
pub async fn seed(pool: &PgPool) {
    let mut conn = pool.acquire().await.unwrap();
    vigil_db::bootstrap::bootstrap(&mut conn).await.unwrap();
}

/// Bootstrap schema and seed rows, then build the app.
pub async fn seeded_app(pool: &PgPool) -> Router {
    seed(pool).await;
    build_test_app(pool)
}

/// Send a GET request.
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a POST with an urlencoded form body.
pub async fn post_form(app: Router, uri: &str, form: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from(form.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// The `Location` header of a redirect.
pub fn location(response: &Response<Body>) -> &str {
    response
        .headers()
        .get("location")
        .expect("redirect must carry a Location header")
        .to_str()
        .unwrap()
}
