mod common;

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use common::{InMemoryEventRepo, InMemoryUserRepo};
use scoutbase_backend::config::JwtConfig;
use scoutbase_backend::middlewares::auth_middleware::AuthState;
use scoutbase_backend::repository::event_repo::EventRepository;
use scoutbase_backend::repository::user_repo::UserRepository;
use scoutbase_backend::router::auth_router::auth_router;
use scoutbase_backend::router::event_router::event_router;
use scoutbase_backend::router::user_router::user_router;
use scoutbase_backend::service::event_service::EventServiceImpl;
use scoutbase_backend::service::user_service::UserServiceImpl;
use scoutbase_backend::util::jwt::{JwtTokenUtils, JwtTokenUtilsImpl};
use serde_json::{json, Value};
use tower::ServiceExt; // for .oneshot()

/// Builds the full /api surface over in-memory stores.
fn test_app() -> (Router, Arc<JwtTokenUtilsImpl>) {
    let user_repo: Arc<dyn UserRepository> = InMemoryUserRepo::new();
    let event_repo: Arc<dyn EventRepository> = InMemoryEventRepo::new();
    let jwt_utils = Arc::new(JwtTokenUtilsImpl::new(JwtConfig::default()));

    let user_service = Arc::new(UserServiceImpl::new(user_repo.clone(), jwt_utils.clone()));
    let event_service = Arc::new(EventServiceImpl::new(event_repo, user_repo.clone()));
    let auth_state = Arc::new(AuthState {
        jwt_utils: jwt_utils.clone(),
        user_repo,
    });

    let api = Router::new()
        .merge(auth_router(user_service.clone()))
        .merge(user_router(user_service, auth_state.clone()))
        .merge(event_router(event_service, auth_state));

    (Router::new().nest("/api", api), jwt_utils)
}

fn request(method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }
    match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn body_json(resp: axum::response::Response) -> Value {
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn register(app: &Router, email: &str, password: &str, role: &str) -> String {
    let resp = app
        .clone()
        .oneshot(request(
            "POST",
            "/api/auth/register",
            None,
            Some(json!({
                "name": "Test Scout",
                "email": email,
                "password": password,
                "role": role,
            })),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    body["token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_me_without_header_is_unauthorized() {
    let (app, _) = test_app();
    let resp = app
        .oneshot(request("GET", "/api/users/me", None, None))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_me_with_foreign_secret_token_is_unauthorized() {
    let (app, _) = test_app();

    let foreign = JwtTokenUtilsImpl::new(JwtConfig {
        jwt_secret: "some_other_service_secret_key_that_is_long_enough".to_string(),
        access_token_expiration: 10080,
    });
    let token = foreign.issue_token("a@x.com").unwrap();

    let resp = app
        .oneshot(request("GET", "/api/users/me", Some(&token), None))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_valid_token_for_missing_subject_is_unauthorized() {
    let (app, jwt_utils) = test_app();

    // Correctly signed token for a subject that has no user record
    let token = jwt_utils.issue_token("ghost@x.com").unwrap();
    let resp = app
        .oneshot(request("GET", "/api/users/me", Some(&token), None))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_me_returns_caller_without_hash() {
    let (app, _) = test_app();
    let token = register(&app, "a@x.com", "pw1", "user").await;

    let resp = app
        .oneshot(request("GET", "/api/users/me", Some(&token), None))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["email"], "a@x.com");
    assert!(body.get("password_hash").is_none());
}

#[tokio::test]
async fn test_admin_endpoints_forbidden_for_plain_user() {
    let (app, _) = test_app();
    let token = register(&app, "user@x.com", "pw1", "user").await;

    let resp = app
        .clone()
        .oneshot(request("GET", "/api/users", Some(&token), None))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    // The gated mutation must not run either
    let resp = app
        .clone()
        .oneshot(request(
            "POST",
            "/api/users/user@x.com/achievements",
            Some(&token),
            Some(json!({"achievement": "Firecraft"})),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let resp = app
        .oneshot(request("GET", "/api/users/me", Some(&token), None))
        .await
        .unwrap();
    let body = body_json(resp).await;
    assert_eq!(body["achievements"], json!([]));
}

#[tokio::test]
async fn test_list_users_excludes_password_hash() {
    let (app, _) = test_app();
    let admin_token = register(&app, "admin@x.com", "pw1", "admin").await;
    register(&app, "b@x.com", "pw2", "user").await;

    let resp = app
        .oneshot(request("GET", "/api/users", Some(&admin_token), None))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    let users = body.as_array().unwrap();
    assert_eq!(users.len(), 2);
    for user in users {
        assert!(user.get("password_hash").is_none());
        assert!(user.get("_id").is_none());
    }
}

#[tokio::test]
async fn test_register_duplicate_email_is_bad_request() {
    let (app, _) = test_app();
    register(&app, "a@x.com", "pw1", "user").await;

    let resp = app
        .oneshot(request(
            "POST",
            "/api/auth/register",
            None,
            Some(json!({
                "name": "Again",
                "email": "a@x.com",
                "password": "different",
            })),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_full_event_scenario() {
    let (app, _) = test_app();

    // register a@x.com as admin, then login with the same credentials
    register(&app, "a@x.com", "pw1", "admin").await;
    let resp = app
        .clone()
        .oneshot(request(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({"email": "a@x.com", "password": "pw1"})),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let token = body_json(resp).await["token"].as_str().unwrap().to_string();

    // pre-existing plain user
    register(&app, "b@x.com", "pw2", "user").await;

    // create event "Camp"
    let resp = app
        .clone()
        .oneshot(request(
            "POST",
            "/api/events",
            Some(&token),
            Some(json!({
                "event_name": "Camp",
                "date": "2026-09-12",
                "description": "Autumn camp",
            })),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["created_by"], "a@x.com");

    // assign b@x.com
    let resp = app
        .clone()
        .oneshot(request(
            "POST",
            "/api/events/Camp/assign-user?user_email=b@x.com",
            Some(&token),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    // second assignment of b@x.com to "Camp" is a 400
    let resp = app
        .clone()
        .oneshot(request(
            "POST",
            "/api/events/Camp/assign-user?user_email=b@x.com",
            Some(&token),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // the assignment and counter are visible to any authenticated caller
    let resp = app
        .clone()
        .oneshot(request("GET", "/api/events", Some(&token), None))
        .await
        .unwrap();
    let body = body_json(resp).await;
    assert_eq!(body[0]["users_assigned"], json!(["b@x.com"]));

    // admin joins, duplicate join rejected
    let resp = app
        .clone()
        .oneshot(request("POST", "/api/events/Camp/join", Some(&token), None))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let resp = app
        .clone()
        .oneshot(request("POST", "/api/events/Camp/join", Some(&token), None))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // stats reflect one user, one admin, one event
    let resp = app
        .oneshot(request("GET", "/api/stats", Some(&token), None))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["total_users"], 1);
    assert_eq!(body["total_admins"], 1);
    assert_eq!(body["total_events"], 1);
}

#[tokio::test]
async fn test_assign_user_missing_event_is_not_found() {
    let (app, _) = test_app();
    let token = register(&app, "admin@x.com", "pw1", "admin").await;

    let resp = app
        .oneshot(request(
            "POST",
            "/api/events/Nowhere/assign-user?user_email=admin@x.com",
            Some(&token),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
