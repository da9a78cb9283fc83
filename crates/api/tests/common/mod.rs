#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use taskmgmt_api::auth::jwt::{generate_access_token, JwtConfig};
use taskmgmt_api::config::ServerConfig;
use taskmgmt_api::router::build_app_router;
use taskmgmt_api::state::AppState;
use taskmgmt_core::managers::SpaceAttribution;
use taskmgmt_db::models::project::CreateProject;
use taskmgmt_db::models::space::{CreateSpace, Space};
use taskmgmt_db::models::user::CreateUser;
use taskmgmt_db::repositories::{MembershipRepo, ProjectRepo, SpaceRepo, StatusRepo, UserRepo};

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        space_attribution: SpaceAttribution::LastResolved,
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            access_token_expiry_mins: 15,
        },
    }
}

/// Build the full application router (same middleware stack as production).
pub fn build_test_app(pool: PgPool) -> Router {
    build_app_with(pool, test_config())
}

pub fn build_app_with(pool: PgPool, config: ServerConfig) -> Router {
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

/// A valid Bearer token for `username`.
pub fn token_for(username: &str) -> String {
    generate_access_token(username, &test_config().jwt).expect("token generation should succeed")
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Body,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {token}"));
    }
    builder = builder.header("Content-Type", "application/json");
    app.oneshot(builder.body(body).unwrap()).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, Body::empty()).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::GET, uri, Some(token), Body::empty()).await
}

pub async fn post_json(app: Router, uri: &str, json: serde_json::Value) -> Response<Body> {
    send(app, Method::POST, uri, None, Body::from(json.to_string())).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    json: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), Body::from(json.to_string())).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, Some(token), Body::empty()).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Seed helpers
// ---------------------------------------------------------------------------

pub async fn create_user(pool: &PgPool, username: &str, display_name: &str) {
    UserRepo::create(
        pool,
        &CreateUser {
            username: username.to_string(),
            display_name: display_name.to_string(),
            email: Some(format!("{username}@example.com")),
            avatar: None,
            url: None,
        },
    )
    .await
    .expect("user creation should succeed");
}

pub async fn create_space(pool: &PgPool, group_id: &str, pretty_name: &str) -> Space {
    SpaceRepo::create(
        pool,
        &CreateSpace {
            group_id: group_id.to_string(),
            pretty_name: pretty_name.to_string(),
            display_name: pretty_name.to_uppercase(),
            url: None,
            avatar_url: None,
            description: None,
        },
    )
    .await
    .expect("space creation should succeed")
}

pub async fn add_membership(pool: &PgPool, username: &str, group_id: &str, kind: &str) {
    MembershipRepo::add(pool, username, group_id, kind)
        .await
        .expect("membership should be granted");
}

/// Insert a project with the given roles and initial statuses; returns its id.
pub async fn seed_project(
    pool: &PgPool,
    name: &str,
    parent_id: Option<i64>,
    managers: &[&str],
    participators: &[&str],
) -> i64 {
    let mut conn = pool.acquire().await.unwrap();
    let project = ProjectRepo::create(
        &mut conn,
        &CreateProject {
            parent_id,
            name: name.to_string(),
            color: None,
            description: None,
            due_date: None,
            calendar_integrated: false,
            managers: managers.iter().map(|m| m.to_string()).collect(),
            participators: participators.iter().map(|p| p.to_string()).collect(),
        },
    )
    .await
    .expect("project creation should succeed");
    StatusRepo::create_initial(&mut conn, project.id)
        .await
        .expect("status seeding should succeed");
    project.id
}
