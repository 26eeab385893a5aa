#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use callerid::config::TokenSettings;
use callerid::db;
use callerid::models::contact_models::NewContact;
use callerid::repositories::{ContactRepository, UserRepository};
use callerid::services::tokens::TokenService;
use callerid::{create_app, AppState};

pub const PASSWORD: &str = "password123";

pub fn token_settings() -> TokenSettings {
    TokenSettings {
        access_secret: "test-access-secret".to_string().into(),
        refresh_secret: "test-refresh-secret".to_string().into(),
        access_ttl_minutes: 15,
        refresh_ttl_days: 7,
    }
}

/// Fresh in-memory database. A single pooled connection keeps it alive.
pub fn test_state() -> AppState {
    let pool = db::create_pool(":memory:", 1).unwrap();
    {
        let conn = &mut pool.get().unwrap();
        db::run_migrations(conn).unwrap();
    }
    AppState::new(pool, TokenService::new(&token_settings()), 4)
}

pub fn test_app() -> (AppState, Router) {
    let state = test_state();
    let app = create_app(state.clone());
    (state, app)
}

pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = hyper::body::to_bytes(response.into_body()).await.unwrap();
    let body = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap()
    };
    (status, body)
}

pub async fn post_json(app: &Router, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
    let mut builder = Request::builder()
        .uri(uri)
        .method(Method::POST)
        .header(header::CONTENT_TYPE, mime::APPLICATION_JSON.as_ref());
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    send(app, builder.body(Body::from(body.to_string())).unwrap()).await
}

pub async fn get(app: &Router, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
    let mut builder = Request::builder().uri(uri).method(Method::GET);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    send(app, builder.body(Body::empty()).unwrap()).await
}

pub async fn register(app: &Router, name: &str, phone_number: &str, email: Option<&str>) -> (StatusCode, Value) {
    post_json(
        app,
        "/auth/register",
        None,
        json!({
            "name": name,
            "phone_number": phone_number,
            "email": email,
            "password": PASSWORD,
        }),
    )
    .await
}

/// Register and log in, returning `(access_token, refresh_token)`.
pub async fn signed_in(app: &Router, name: &str, phone_number: &str, email: Option<&str>) -> (String, String) {
    let (status, body) = register(app, name, phone_number, email).await;
    assert_eq!(status, StatusCode::CREATED, "{body}");

    let (status, body) = post_json(
        app,
        "/auth/login",
        None,
        json!({"phone_number": phone_number, "password": PASSWORD}),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");

    (
        body["access_token"].as_str().unwrap().to_string(),
        body["refresh_token"].as_str().unwrap().to_string(),
    )
}

/// Save a contact in the address book of the user registered as `owner_phone`.
pub fn add_contact(state: &AppState, owner_phone: &str, name: &str, phone_number: &str) {
    let conn = &mut state.pool.get().unwrap();
    let owner = UserRepository::find_by_phone_number(conn, owner_phone).unwrap().unwrap();
    ContactRepository::create_many(
        conn,
        &[NewContact {
            user_id: owner.id,
            name: name.to_string(),
            phone_number: phone_number.to_string(),
        }],
    )
    .unwrap();
}
