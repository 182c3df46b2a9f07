//! Payload types flowing through the plugin dispatch layer.

use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A media asset waiting to be uploaded.
#[derive(Debug, Clone)]
pub struct NewAsset {
    /// Original filename as supplied by the client.
    pub filename: String,
    /// MIME type of the payload.
    pub content_type: String,
    /// Raw file bytes.
    pub bytes: Bytes,
}

/// A media asset that has been persisted by an upload adapter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredAsset {
    /// Storage key the asset lives under.
    pub key: String,
    /// URL the asset can be fetched from.
    pub url: String,
    /// Size in bytes.
    pub size: u64,
    /// MIME type of the payload.
    pub content_type: String,
    /// When the upload completed.
    pub uploaded_at: DateTime<Utc>,
}

/// A structured record waiting to be stored.
#[derive(Debug, Clone)]
pub struct NewRecord {
    /// Storage key; a fresh one is generated when absent or blank.
    pub key: Option<String>,
    /// Arbitrary JSON payload.
    pub value: serde_json::Value,
}

impl NewRecord {
    /// Create a record with a generated key.
    #[must_use]
    pub const fn keyless(value: serde_json::Value) -> Self {
        Self { key: None, value }
    }

    /// Create a record under an explicit key.
    #[must_use]
    pub fn keyed(key: impl Into<String>, value: serde_json::Value) -> Self {
        Self {
            key: Some(key.into()),
            value,
        }
    }
}

/// A structured record persisted by a storage adapter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataRecord {
    /// Storage key the record lives under.
    pub key: String,
    /// JSON payload.
    pub value: serde_json::Value,
    /// When the record was last written.
    pub stored_at: DateTime<Utc>,
}

/// A media processing request.
#[derive(Debug, Clone)]
pub struct ProcessingJob {
    /// Storage key of the source asset.
    pub source_key: String,
    /// Named operations to apply, in order.
    pub operations: Vec<String>,
}

/// Outcome of a completed processing job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessingReport {
    /// Identifier assigned to this job run.
    pub job_id: Uuid,
    /// Storage key of the source asset.
    pub source_key: String,
    /// Operations that were applied.
    pub completed: Vec<String>,
    /// When processing finished.
    pub finished_at: DateTime<Utc>,
}

/// A generated thumbnail.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Thumbnail {
    /// Width in pixels.
    pub width: u32,
    /// Storage key of the thumbnail.
    pub key: String,
    /// URL the thumbnail can be fetched from.
    pub url: String,
}
