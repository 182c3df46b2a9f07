//! HTTP API layer with Axum routes and plugin wiring.
//!
//! This crate provides:
//! - REST API routes for leads, media, and health
//! - Uniform cross-origin and method-not-allowed semantics
//! - The application state shared across handlers

pub mod routes;

use axum::http::{Method, StatusCode, header};
use axum::response::IntoResponse;
use axum::{Json, Router};
use serde_json::json;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use veyra_core::lead::LeadService;
use veyra_core::plugin::PluginDispatcher;
use veyra_store::MemoryLeadStore;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Lead lifecycle service.
    pub leads: Arc<LeadService<MemoryLeadStore>>,
    /// Dispatcher routing capability calls to active adapters.
    pub dispatcher: Arc<PluginDispatcher>,
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(routes::api_routes())
        .method_not_allowed_fallback(method_not_allowed)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PUT,
                    Method::DELETE,
                    Method::OPTIONS,
                ])
                .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]),
        )
        .with_state(state)
}

/// Fallback for requests whose path exists but whose method is not routed.
async fn method_not_allowed() -> impl IntoResponse {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(json!({"error": "Method not allowed"})),
    )
}
