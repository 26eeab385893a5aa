//! Caller identification and spam reporting service.
//!
//! Users register with a phone number, log in for a JWT pair, and use the
//! bearer-protected `/api` routes to look up names and numbers, report spam
//! and see who owns a number. Persistence is SQLite through Diesel.

use axum::{
    http::{header, Method},
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod schema;
pub mod services;
pub mod state;

use handlers::{api_handlers, auth_handlers};
pub use state::AppState;

pub fn create_app(state: AppState) -> Router {
    let auth_routes = Router::new()
        .route("/register", post(auth_handlers::register))
        .route("/login", post(auth_handlers::login))
        .route("/logout", post(auth_handlers::logout))
        .route("/token/refresh", post(auth_handlers::refresh_token));

    let api_routes = Router::new()
        .route("/spam-report", post(api_handlers::report_spam))
        .route("/search-by-name", get(api_handlers::search_by_name))
        .route("/search-by-number", get(api_handlers::search_by_number))
        .route("/spam-counter", get(api_handlers::spam_counter))
        .route("/display-detail", get(api_handlers::display_detail));

    Router::new()
        .nest("/auth", auth_routes)
        .nest("/api", api_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
                .expose_headers([header::CONTENT_TYPE]),
        )
        .with_state(state)
}
