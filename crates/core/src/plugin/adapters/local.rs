//! Local filesystem adapter backed by Apache OpenDAL.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use opendal::{ErrorKind, Operator, services};
use tracing::warn;
use uuid::Uuid;
use veyra_shared::config::ProviderSettings;

use crate::plugin::adapter::{AdapterHandle, ProcessingAdapter, StorageAdapter, UploadAdapter};
use crate::plugin::error::AdapterError;
use crate::plugin::types::{
    DataRecord, NewAsset, NewRecord, ProcessingJob, ProcessingReport, StoredAsset, Thumbnail,
};

/// Filesystem-backed adapter used for local development.
///
/// One instance serves all three capabilities: media assets land under
/// `media/`, records under `records/`, processing artifacts under
/// `processing/` and `thumbnails/`.
pub struct LocalFsAdapter {
    op: Operator,
}

impl LocalFsAdapter {
    /// Provider name this adapter registers under.
    pub const PROVIDER: &'static str = "local";

    const DEFAULT_ROOT: &'static str = "./data";

    /// Create an adapter rooted at the configured directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the filesystem operator cannot be initialized.
    pub fn new(settings: &ProviderSettings) -> Result<Self, AdapterError> {
        let root = settings
            .root
            .clone()
            .unwrap_or_else(|| std::path::PathBuf::from(Self::DEFAULT_ROOT));
        let root = root
            .to_str()
            .ok_or_else(|| AdapterError::configuration("invalid root path"))?;

        let builder = services::Fs::default().root(root);
        let op = Operator::new(builder)
            .map_err(|e| AdapterError::configuration(e.to_string()))?
            .finish();

        Ok(Self { op })
    }

    /// Build a handle exposing all three capability views.
    ///
    /// # Errors
    ///
    /// Returns an error if the adapter cannot be constructed.
    pub fn handle(settings: &ProviderSettings) -> Result<AdapterHandle, AdapterError> {
        let adapter = Arc::new(Self::new(settings)?);
        Ok(AdapterHandle::new(Self::PROVIDER)
            .with_upload(adapter.clone())
            .with_storage(adapter.clone())
            .with_processing(adapter))
    }

    fn record_path(key: &str) -> String {
        format!("records/{key}.json")
    }

    /// Record keys become path segments, so they must be flat.
    fn validate_record_key(key: &str) -> Result<(), AdapterError> {
        if key.trim().is_empty() {
            return Err(AdapterError::invalid_input("record key is required"));
        }
        if key.contains('/') {
            return Err(AdapterError::invalid_input(
                "record key must not contain '/'",
            ));
        }
        Ok(())
    }

    /// Media keys arrive off the wire, so they are pinned to the upload
    /// namespace before any operator call.
    fn validate_media_key(key: &str) -> Result<(), AdapterError> {
        if key.trim().is_empty() {
            return Err(AdapterError::invalid_input("media key is required"));
        }
        if !key.starts_with("media/") {
            return Err(AdapterError::invalid_input(
                "media key must start with 'media/'",
            ));
        }
        if key.split('/').any(|segment| segment == "..") {
            return Err(AdapterError::invalid_input(
                "media key must not contain '..' segments",
            ));
        }
        Ok(())
    }

    async fn read_record(&self, path: &str) -> Result<DataRecord, AdapterError> {
        let buf = self.op.read(path).await?;
        serde_json::from_slice(&buf.to_vec())
            .map_err(|e| AdapterError::Storage(format!("corrupt record at '{path}': {e}")))
    }

    async fn write_record(&self, record: &DataRecord) -> Result<(), AdapterError> {
        let bytes = serde_json::to_vec(record)
            .map_err(|e| AdapterError::invalid_input(format!("unserializable payload: {e}")))?;
        self.op
            .write(&Self::record_path(&record.key), bytes)
            .await?;
        Ok(())
    }
}

#[async_trait]
impl UploadAdapter for LocalFsAdapter {
    async fn upload(&self, asset: NewAsset) -> Result<StoredAsset, AdapterError> {
        if asset.filename.trim().is_empty() {
            return Err(AdapterError::invalid_input("filename is required"));
        }

        let key = format!(
            "media/{}/{}",
            Uuid::new_v4(),
            sanitize_filename(&asset.filename)
        );
        let size = asset.bytes.len() as u64;
        self.op.write(&key, asset.bytes).await?;

        Ok(StoredAsset {
            url: format!("/{key}"),
            key,
            size,
            content_type: asset.content_type,
            uploaded_at: Utc::now(),
        })
    }

    async fn delete(&self, key: &str) -> Result<(), AdapterError> {
        Self::validate_media_key(key)?;

        // stat first: OpenDAL delete is a no-op on missing paths.
        self.op.stat(key).await?;
        self.op.delete(key).await?;
        Ok(())
    }
}

#[async_trait]
impl StorageAdapter for LocalFsAdapter {
    async fn store(&self, record: NewRecord) -> Result<DataRecord, AdapterError> {
        let key = match record.key.as_deref().map(str::trim) {
            Some(key) if !key.is_empty() => {
                Self::validate_record_key(key)?;
                key.to_string()
            }
            _ => Uuid::new_v4().to_string(),
        };

        let stored = DataRecord {
            key,
            value: record.value,
            stored_at: Utc::now(),
        };
        self.write_record(&stored).await?;
        Ok(stored)
    }

    async fn get(&self, key: &str) -> Result<DataRecord, AdapterError> {
        Self::validate_record_key(key)?;
        self.read_record(&Self::record_path(key)).await
    }

    async fn get_all(&self) -> Result<Vec<DataRecord>, AdapterError> {
        let entries = match self.op.list("records/").await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut records = Vec::new();
        for entry in entries {
            if !entry.path().ends_with(".json") {
                continue;
            }
            match self.read_record(entry.path()).await {
                Ok(record) => records.push(record),
                Err(e) => {
                    warn!(path = entry.path(), error = %e, "Skipping unreadable record");
                }
            }
        }

        records.sort_by(|a, b| a.key.cmp(&b.key));
        Ok(records)
    }

    async fn update(
        &self,
        key: &str,
        value: serde_json::Value,
    ) -> Result<DataRecord, AdapterError> {
        Self::validate_record_key(key)?;

        let mut record = self.read_record(&Self::record_path(key)).await?;
        record.value = value;
        record.stored_at = Utc::now();
        self.write_record(&record).await?;
        Ok(record)
    }

    async fn delete(&self, key: &str) -> Result<(), AdapterError> {
        Self::validate_record_key(key)?;

        let path = Self::record_path(key);
        self.op.stat(&path).await?;
        self.op.delete(&path).await?;
        Ok(())
    }
}

#[async_trait]
impl ProcessingAdapter for LocalFsAdapter {
    async fn process(&self, job: ProcessingJob) -> Result<ProcessingReport, AdapterError> {
        Self::validate_media_key(&job.source_key)?;
        self.op.stat(&job.source_key).await?;

        let report = ProcessingReport {
            job_id: Uuid::new_v4(),
            source_key: job.source_key,
            completed: job.operations,
            finished_at: Utc::now(),
        };
        let bytes = serde_json::to_vec(&report)
            .map_err(|e| AdapterError::Storage(format!("unserializable report: {e}")))?;
        self.op
            .write(&format!("processing/{}.json", report.job_id), bytes)
            .await?;

        Ok(report)
    }

    async fn generate_thumbnails(
        &self,
        source_key: &str,
        widths: &[u32],
    ) -> Result<Vec<Thumbnail>, AdapterError> {
        if widths.is_empty() {
            return Err(AdapterError::invalid_input(
                "at least one thumbnail width is required",
            ));
        }
        Self::validate_media_key(source_key)?;

        let source = self.op.read(source_key).await?.to_vec();

        // Keys keep the source's scope segment; bare stems collide across
        // same-named uploads.
        let scoped = source_key.strip_prefix("media/").unwrap_or(source_key);
        let (stem, ext) = match scoped.rsplit_once('.') {
            Some((stem, ext)) if !stem.is_empty() => (stem, ext),
            _ => (scoped, "bin"),
        };

        // Source bytes are copied as-is under width-tagged keys; actual
        // resizing is left to dedicated processing providers.
        let mut thumbnails = Vec::with_capacity(widths.len());
        for &width in widths {
            let key = format!("thumbnails/{stem}_w{width}.{ext}");
            self.op.write(&key, source.clone()).await?;
            thumbnails.push(Thumbnail {
                width,
                url: format!("/{key}"),
                key,
            });
        }

        Ok(thumbnails)
    }
}

/// Sanitize a client-supplied filename for use inside a storage key.
///
/// Only ASCII alphanumerics, dots, hyphens, and underscores survive.
fn sanitize_filename(filename: &str) -> String {
    filename
        .chars()
        .map(|c| match c {
            c if c.is_ascii_alphanumeric() => c,
            '.' | '-' | '_' => c,
            _ => '_',
        })
        .collect()
}
