//! Media routes fronting the plugin dispatcher.

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info, warn};

use crate::AppState;
use crate::routes::error_response;
use veyra_core::plugin::{Capability, NewAsset, NewRecord, StoredAsset};

/// Creates the media routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/media", post(upload_media))
        .route("/media/{*key}", delete(delete_media))
        .route("/media/thumbnails", post(generate_thumbnails))
}

/// Request body for thumbnail generation.
#[derive(Debug, Deserialize)]
pub struct ThumbnailRequest {
    /// Storage key of the source asset.
    pub source_key: String,
    /// Desired thumbnail widths in pixels.
    pub widths: Vec<u32>,
}

/// POST /media - Upload an asset through the active upload adapter.
async fn upload_media(State(state): State<AppState>, mut multipart: Multipart) -> impl IntoResponse {
    let asset = match read_file_field(&mut multipart).await {
        Ok(Some(asset)) => asset,
        Ok(None) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "error": "validation_error",
                    "message": "multipart field 'file' is required"
                })),
            )
                .into_response();
        }
        Err(response) => return response,
    };

    match state.dispatcher.upload(asset).await {
        Ok(stored) => {
            record_upload_metadata(&state, &stored).await;
            info!(key = %stored.key, size = stored.size, "Media uploaded");
            (StatusCode::CREATED, Json(stored)).into_response()
        }
        Err(e) => {
            error!(error = %e, "Media upload failed");
            error_response(&e.into())
        }
    }
}

/// DELETE `/media/{*key}` - Remove an uploaded asset.
async fn delete_media(State(state): State<AppState>, Path(key): Path<String>) -> impl IntoResponse {
    match state.dispatcher.delete_upload(&key).await {
        Ok(()) => {
            info!(key = %key, "Media deleted");
            StatusCode::NO_CONTENT.into_response()
        }
        Err(e) => {
            error!(error = %e, key = %key, "Media delete failed");
            error_response(&e.into())
        }
    }
}

/// POST /media/thumbnails - Generate thumbnails for a stored asset.
async fn generate_thumbnails(
    State(state): State<AppState>,
    Json(payload): Json<ThumbnailRequest>,
) -> impl IntoResponse {
    match state
        .dispatcher
        .generate_thumbnails(&payload.source_key, &payload.widths)
        .await
    {
        Ok(thumbnails) => (StatusCode::OK, Json(thumbnails)).into_response(),
        Err(e) => {
            error!(error = %e, source_key = %payload.source_key, "Thumbnail generation failed");
            error_response(&e.into())
        }
    }
}

/// Pulls the `file` field out of a multipart body.
async fn read_file_field(multipart: &mut Multipart) -> Result<Option<NewAsset>, Response> {
    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => return Ok(None),
            Err(e) => {
                return Err((
                    StatusCode::BAD_REQUEST,
                    Json(json!({
                        "error": "validation_error",
                        "message": format!("malformed multipart body: {e}")
                    })),
                )
                    .into_response());
            }
        };

        if field.name() != Some("file") {
            continue;
        }

        let filename = field.file_name().unwrap_or("upload.bin").to_string();
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();

        match field.bytes().await {
            Ok(bytes) => {
                return Ok(Some(NewAsset {
                    filename,
                    content_type,
                    bytes,
                }));
            }
            Err(e) => {
                return Err((
                    StatusCode::BAD_REQUEST,
                    Json(json!({
                        "error": "validation_error",
                        "message": format!("failed to read 'file' field: {e}")
                    })),
                )
                    .into_response());
            }
        }
    }
}

/// Best-effort metadata record; upload success does not depend on it.
async fn record_upload_metadata(state: &AppState, stored: &StoredAsset) {
    if !state.dispatcher.has_plugin(Capability::Storage) {
        return;
    }

    let record = NewRecord::keyless(json!({
        "kind": "upload",
        "key": stored.key,
        "url": stored.url,
        "size": stored.size,
        "content_type": stored.content_type,
        "uploaded_at": stored.uploaded_at,
    }));

    if let Err(e) = state.dispatcher.store(record).await {
        warn!(error = %e, key = %stored.key, "Failed to record upload metadata");
    }
}

#[cfg(test)]
mod integration_tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Method, Request, header};
    use http_body_util::BodyExt;
    use tempfile::TempDir;
    use tower::ServiceExt;

    use crate::create_router;
    use veyra_core::audit::TracingAuditLog;
    use veyra_core::lead::LeadService;
    use veyra_core::plugin::adapters::LocalFsAdapter;
    use veyra_core::plugin::{ActiveAdapterSet, DispatchSettings, PluginDispatcher};
    use veyra_shared::config::ProviderSettings;
    use veyra_store::MemoryLeadStore;

    fn local_state(root: &std::path::Path) -> AppState {
        let settings = ProviderSettings {
            root: Some(root.to_path_buf()),
            ..ProviderSettings::default()
        };
        let handle = LocalFsAdapter::handle(&settings).expect("local adapter builds");

        let mut active = ActiveAdapterSet::new();
        for capability in Capability::ALL {
            active.insert(capability, handle.clone());
        }

        state_with(active)
    }

    fn empty_state() -> AppState {
        state_with(ActiveAdapterSet::new())
    }

    fn state_with(active: ActiveAdapterSet) -> AppState {
        let leads = LeadService::new(Arc::new(MemoryLeadStore::new()), Arc::new(TracingAuditLog));
        let dispatcher = PluginDispatcher::new(active, DispatchSettings::default());
        AppState {
            leads: Arc::new(leads),
            dispatcher: Arc::new(dispatcher),
        }
    }

    fn multipart_request(field_name: &str, filename: &str, content: &[u8]) -> Request<Body> {
        let boundary = "veyra-test-boundary";
        let mut body = Vec::new();
        body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{field_name}\"; filename=\"{filename}\"\r\n\
                 Content-Type: image/png\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(content);
        body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

        Request::builder()
            .method(Method::POST)
            .uri("/media")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(body))
            .expect("request builds")
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("body collects")
            .to_bytes();
        serde_json::from_slice(&bytes).expect("body is JSON")
    }

    #[tokio::test]
    async fn test_upload_then_delete_roundtrip() {
        let dir = TempDir::new().unwrap();
        let app = create_router(local_state(dir.path()));

        let response = app
            .clone()
            .oneshot(multipart_request("file", "photo.png", b"not-really-a-png"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let stored = body_json(response).await;
        let key = stored["key"].as_str().expect("key is a string").to_string();
        assert!(key.starts_with("media/"));
        assert!(key.ends_with("photo.png"));
        assert_eq!(stored["url"], format!("/{key}"));
        assert_eq!(stored["size"], 16);

        let deleted = app
            .clone()
            .oneshot(
                Request::builder()
                    .method(Method::DELETE)
                    .uri(format!("/media/{key}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(deleted.status(), StatusCode::NO_CONTENT);

        let again = app
            .oneshot(
                Request::builder()
                    .method(Method::DELETE)
                    .uri(format!("/media/{key}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(again.status(), StatusCode::NOT_FOUND);
        let body = body_json(again).await;
        assert_eq!(body["error"], "not_found");
    }

    #[tokio::test]
    async fn test_delete_with_traversal_key_is_rejected() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("store");
        std::fs::create_dir(&root).unwrap();
        let victim = dir.path().join("victim.txt");
        std::fs::write(&victim, b"keep me").unwrap();
        let app = create_router(local_state(&root));

        let response = app
            .oneshot(
                Request::builder()
                    .method(Method::DELETE)
                    .uri("/media/../victim.txt")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"], "validation_error");
        assert!(victim.exists());
    }

    #[tokio::test]
    async fn test_upload_records_metadata_through_storage() {
        let dir = TempDir::new().unwrap();
        let state = local_state(dir.path());
        let app = create_router(state.clone());

        let response = app
            .oneshot(multipart_request("file", "doc.pdf", b"pdf bytes"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let stored = body_json(response).await;

        let records = state.dispatcher.fetch_all().await.expect("records listed");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].value["kind"], "upload");
        assert_eq!(records[0].value["key"], stored["key"]);
    }

    #[tokio::test]
    async fn test_upload_without_file_field_is_rejected() {
        let dir = TempDir::new().unwrap();
        let app = create_router(local_state(dir.path()));

        let response = app
            .oneshot(multipart_request("avatar", "photo.png", b"bytes"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"], "validation_error");
    }

    #[tokio::test]
    async fn test_upload_without_provider_is_unavailable() {
        let app = create_router(empty_state());

        let response = app
            .oneshot(multipart_request("file", "photo.png", b"bytes"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        let body = body_json(response).await;
        assert_eq!(body["error"], "service_unavailable");
    }

    #[tokio::test]
    async fn test_thumbnails_for_uploaded_asset() {
        let dir = TempDir::new().unwrap();
        let app = create_router(local_state(dir.path()));

        let uploaded = app
            .clone()
            .oneshot(multipart_request("file", "banner.png", b"source bytes"))
            .await
            .unwrap();
        let uploaded = body_json(uploaded).await;
        let key = uploaded["key"].as_str().unwrap();

        let response = app
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/media/thumbnails")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(
                        json!({"source_key": key, "widths": [160, 320]}).to_string(),
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let thumbnails = body_json(response).await;
        let thumbnails = thumbnails.as_array().expect("array body");
        assert_eq!(thumbnails.len(), 2);
        assert_eq!(thumbnails[0]["width"], 160);
        assert!(
            thumbnails[0]["key"]
                .as_str()
                .unwrap()
                .contains("_w160")
        );
    }

    #[tokio::test]
    async fn test_thumbnails_for_missing_source_not_found() {
        let dir = TempDir::new().unwrap();
        let app = create_router(local_state(dir.path()));

        let response = app
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/media/thumbnails")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(
                        json!({"source_key": "media/missing.png", "widths": [160]}).to_string(),
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_thumbnails_with_empty_widths_rejected() {
        let dir = TempDir::new().unwrap();
        let app = create_router(local_state(dir.path()));

        let response = app
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/media/thumbnails")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(
                        json!({"source_key": "media/x.png", "widths": []}).to_string(),
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"], "validation_error");
    }
}
