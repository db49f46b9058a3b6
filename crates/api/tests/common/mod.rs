#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use shelf_core::tier::Tier;
use shelf_db::models::user::{CreateUser, User};
use shelf_db::repositories::{OrganizationRepo, UserRepo};
use sqlx::PgPool;
use tower::ServiceExt;

use shelf_api::auth::jwt::{generate_access_token, JwtConfig};
use shelf_api::config::ServerConfig;
use shelf_api::router::build_app_router;
use shelf_api::state::AppState;

const BOUNDARY: &str = "shelf-test-boundary";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        import_max_bytes: 1024 * 1024,
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            access_token_expiry_mins: 15,
        },
    }
}

/// Build the full application router (same middleware stack as `main.rs`).
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

/// A user with a personal organization and a valid access token.
pub struct TestUser {
    pub user: User,
    pub organization_id: i64,
    pub token: String,
}

pub async fn create_user(pool: &PgPool, email: &str, tier: Tier) -> TestUser {
    let user = UserRepo::create(
        pool,
        &CreateUser {
            email: email.to_string(),
            first_name: Some("Test".to_string()),
            last_name: Some("User".to_string()),
            tier,
        },
    )
    .await
    .unwrap();
    let organization = OrganizationRepo::find_personal_for_user(pool, user.id)
        .await
        .unwrap()
        .unwrap();
    let token = generate_access_token(user.id, &test_config().jwt).unwrap();
    TestUser {
        user,
        organization_id: organization.id,
        token,
    }
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Collect a response body as UTF-8 text.
pub async fn body_text(response: Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn authorized(builder: axum::http::request::Builder, token: Option<&str>) -> axum::http::request::Builder {
    match token {
        Some(token) => builder.header(AUTHORIZATION, format!("Bearer {token}")),
        None => builder,
    }
}

pub async fn get(app: Router, uri: &str, token: Option<&str>) -> Response {
    let request = authorized(Request::builder().method(Method::GET).uri(uri), token)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(
    app: Router,
    uri: &str,
    token: Option<&str>,
    body: serde_json::Value,
) -> Response {
    let request = authorized(Request::builder().method(Method::POST).uri(uri), token)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// One part of a multipart form.
pub enum Part<'a> {
    Text(&'a str, &'a str),
    File(&'a str, &'a str, &'a [u8]),
}

fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match part {
            Part::Text(name, value) => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
                );
                body.extend_from_slice(value.as_bytes());
            }
            Part::File(name, filename, data) => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\n\
                         Content-Type: text/csv\r\n\r\n"
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(data);
            }
        }
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

pub async fn post_multipart(
    app: Router,
    uri: &str,
    token: Option<&str>,
    parts: &[Part<'_>],
) -> Response {
    let request = authorized(Request::builder().method(Method::POST).uri(uri), token)
        .header(
            CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(multipart_body(parts)))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Submit a CSV to the import action.
pub async fn import_csv(app: Router, token: Option<&str>, intent: &str, csv: &str) -> Response {
    post_multipart(
        app,
        "/api/v1/assets/import",
        token,
        &[
            Part::Text("intent", intent),
            Part::File("file", "assets.csv", csv.as_bytes()),
        ],
    )
    .await
}
