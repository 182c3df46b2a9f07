//! Lead capture and management routes.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use serde_json::json;
use tracing::{error, info};

use crate::AppState;
use crate::routes::error_response;
use veyra_core::lead::{LeadError, LeadFilter, LeadPatch, NewLead};

/// Creates the lead routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/leads", post(create_lead))
        .route("/leads", get(list_leads))
        .route("/leads/{lead_id}", get(get_lead))
        .route("/leads/{lead_id}", put(update_lead))
        .route("/leads/{lead_id}", delete(delete_lead))
}

/// POST /leads - Capture a new lead.
async fn create_lead(
    State(state): State<AppState>,
    Json(payload): Json<NewLead>,
) -> impl IntoResponse {
    match state.leads.create(payload).await {
        Ok(lead) => {
            info!(lead_id = lead.id, source = %lead.source, "Lead captured");
            (StatusCode::CREATED, Json(lead)).into_response()
        }
        Err(LeadError::Validation(message)) => (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "validation_error",
                "message": message
            })),
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "Failed to create lead");
            error_response(&e.into())
        }
    }
}

/// GET /leads - List leads matching optional exact-match filters.
async fn list_leads(
    State(state): State<AppState>,
    Query(filter): Query<LeadFilter>,
) -> impl IntoResponse {
    match state.leads.list(&filter).await {
        Ok(leads) => (StatusCode::OK, Json(leads)).into_response(),
        Err(e) => {
            error!(error = %e, "Failed to list leads");
            error_response(&e.into())
        }
    }
}

/// GET `/leads/{lead_id}` - Fetch a single lead.
async fn get_lead(State(state): State<AppState>, Path(lead_id): Path<u64>) -> impl IntoResponse {
    match state.leads.get(lead_id).await {
        Ok(lead) => (StatusCode::OK, Json(lead)).into_response(),
        Err(LeadError::NotFound(_)) => lead_not_found(lead_id),
        Err(e) => {
            error!(error = %e, lead_id, "Failed to fetch lead");
            error_response(&e.into())
        }
    }
}

/// PUT `/leads/{lead_id}` - Merge a partial update into a lead.
async fn update_lead(
    State(state): State<AppState>,
    Path(lead_id): Path<u64>,
    Json(patch): Json<LeadPatch>,
) -> impl IntoResponse {
    match state.leads.update(lead_id, patch).await {
        Ok(lead) => {
            info!(lead_id, status = lead.status.as_str(), "Lead updated");
            (StatusCode::OK, Json(lead)).into_response()
        }
        Err(LeadError::NotFound(_)) => lead_not_found(lead_id),
        Err(e) => {
            error!(error = %e, lead_id, "Failed to update lead");
            error_response(&e.into())
        }
    }
}

/// DELETE `/leads/{lead_id}` - Remove a lead.
async fn delete_lead(State(state): State<AppState>, Path(lead_id): Path<u64>) -> impl IntoResponse {
    match state.leads.delete(lead_id).await {
        Ok(()) => {
            info!(lead_id, "Lead deleted");
            StatusCode::NO_CONTENT.into_response()
        }
        Err(LeadError::NotFound(_)) => lead_not_found(lead_id),
        Err(e) => {
            error!(error = %e, lead_id, "Failed to delete lead");
            error_response(&e.into())
        }
    }
}

fn lead_not_found(lead_id: u64) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": "not_found",
            "message": format!("Lead {lead_id} not found")
        })),
    )
        .into_response()
}
