pub mod config;
pub mod error;
pub mod state;
pub mod models;
pub mod form;
pub mod submit;
pub mod views;

use std::sync::Arc;

use axum::http::{HeaderName, HeaderValue};
use axum::Router;
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::state::{AppState, SharedState};
use crate::submit::{DishClient, SubmissionGate};

pub fn build_app(config: Config) -> Result<Router, reqwest::Error> {
    let dishes = DishClient::new(config.api_url.clone(), config.api_timeout)?;
    tracing::info!(api_url = %dishes.url(), "Dish API configured");

    let state: SharedState = Arc::new(AppState {
        dishes,
        gate: SubmissionGate::new(),
    });

    let app = Router::new()
        .merge(views::view_routes())
        .nest_service("/static", ServeDir::new("static"))
        .route("/health", axum::routing::get(health))
        .layer(TraceLayer::new_for_http())
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("x-content-type-options"),
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("x-frame-options"),
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("referrer-policy"),
            HeaderValue::from_static("strict-origin-when-cross-origin"),
        ))
        .with_state(state);

    Ok(app)
}

async fn health() -> &'static str {
    "ok"
}
