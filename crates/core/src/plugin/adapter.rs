//! Capability interfaces and the adapter handle.
//!
//! Each capability has a closed trait listing exactly the operations an
//! adapter for it must support. A provider that cannot perform an operation
//! still implements the method and returns [`AdapterError::NotImplemented`],
//! so "unknown method" failures cannot occur at dispatch time.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

use super::capability::Capability;
use super::error::AdapterError;
use super::types::{
    DataRecord, NewAsset, NewRecord, ProcessingJob, ProcessingReport, StoredAsset, Thumbnail,
};

/// Operations an upload adapter must support.
#[async_trait]
pub trait UploadAdapter: Send + Sync {
    /// Persist a new media asset and return where it landed.
    async fn upload(&self, asset: NewAsset) -> Result<StoredAsset, AdapterError>;

    /// Delete a previously uploaded asset by storage key.
    async fn delete(&self, key: &str) -> Result<(), AdapterError>;
}

/// Operations a storage adapter must support.
#[async_trait]
pub trait StorageAdapter: Send + Sync {
    /// Persist a structured record.
    async fn store(&self, record: NewRecord) -> Result<DataRecord, AdapterError>;

    /// Fetch a record by key.
    async fn get(&self, key: &str) -> Result<DataRecord, AdapterError>;

    /// Fetch every stored record, ordered by key.
    async fn get_all(&self) -> Result<Vec<DataRecord>, AdapterError>;

    /// Replace a record's payload, refreshing its timestamp.
    async fn update(&self, key: &str, value: serde_json::Value)
    -> Result<DataRecord, AdapterError>;

    /// Delete a record by key.
    async fn delete(&self, key: &str) -> Result<(), AdapterError>;
}

/// Operations a processing adapter must support.
#[async_trait]
pub trait ProcessingAdapter: Send + Sync {
    /// Run a processing job against a stored asset.
    async fn process(&self, job: ProcessingJob) -> Result<ProcessingReport, AdapterError>;

    /// Generate thumbnails for a stored asset at the given widths.
    async fn generate_thumbnails(
        &self,
        source_key: &str,
        widths: &[u32],
    ) -> Result<Vec<Thumbnail>, AdapterError>;
}

/// A constructed adapter instance, exposing one view per capability it backs.
///
/// A single provider object may implement several capability traits; the
/// handle records which views it exposes so the dispatcher can check support
/// without downcasting.
#[derive(Clone)]
pub struct AdapterHandle {
    provider: String,
    upload: Option<Arc<dyn UploadAdapter>>,
    storage: Option<Arc<dyn StorageAdapter>>,
    processing: Option<Arc<dyn ProcessingAdapter>>,
}

impl AdapterHandle {
    /// Create an empty handle for a named provider.
    #[must_use]
    pub fn new(provider: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            upload: None,
            storage: None,
            processing: None,
        }
    }

    /// Attach an upload view.
    #[must_use]
    pub fn with_upload(mut self, adapter: Arc<dyn UploadAdapter>) -> Self {
        self.upload = Some(adapter);
        self
    }

    /// Attach a storage view.
    #[must_use]
    pub fn with_storage(mut self, adapter: Arc<dyn StorageAdapter>) -> Self {
        self.storage = Some(adapter);
        self
    }

    /// Attach a processing view.
    #[must_use]
    pub fn with_processing(mut self, adapter: Arc<dyn ProcessingAdapter>) -> Self {
        self.processing = Some(adapter);
        self
    }

    /// Name of the provider this handle was built from.
    #[must_use]
    pub fn provider(&self) -> &str {
        &self.provider
    }

    /// The upload view, if this provider backs uploads.
    #[must_use]
    pub fn upload(&self) -> Option<Arc<dyn UploadAdapter>> {
        self.upload.clone()
    }

    /// The storage view, if this provider backs record storage.
    #[must_use]
    pub fn storage(&self) -> Option<Arc<dyn StorageAdapter>> {
        self.storage.clone()
    }

    /// The processing view, if this provider backs media processing.
    #[must_use]
    pub fn processing(&self) -> Option<Arc<dyn ProcessingAdapter>> {
        self.processing.clone()
    }

    /// Whether this handle exposes a view for the capability.
    #[must_use]
    pub fn supports(&self, capability: Capability) -> bool {
        match capability {
            Capability::Upload => self.upload.is_some(),
            Capability::Storage => self.storage.is_some(),
            Capability::Processing => self.processing.is_some(),
        }
    }

    /// Capabilities this handle exposes views for.
    #[must_use]
    pub fn exposed(&self) -> Vec<Capability> {
        Capability::ALL
            .into_iter()
            .filter(|c| self.supports(*c))
            .collect()
    }
}

impl fmt::Debug for AdapterHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdapterHandle")
            .field("provider", &self.provider)
            .field("exposed", &self.exposed())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NullUpload;

    #[async_trait]
    impl UploadAdapter for NullUpload {
        async fn upload(&self, _asset: NewAsset) -> Result<StoredAsset, AdapterError> {
            Err(AdapterError::not_implemented("null", "upload"))
        }

        async fn delete(&self, _key: &str) -> Result<(), AdapterError> {
            Err(AdapterError::not_implemented("null", "delete"))
        }
    }

    #[test]
    fn test_handle_tracks_exposed_views() {
        let handle = AdapterHandle::new("null").with_upload(Arc::new(NullUpload));

        assert_eq!(handle.provider(), "null");
        assert!(handle.supports(Capability::Upload));
        assert!(!handle.supports(Capability::Storage));
        assert!(!handle.supports(Capability::Processing));
        assert_eq!(handle.exposed(), vec![Capability::Upload]);
        assert!(handle.upload().is_some());
        assert!(handle.storage().is_none());
    }

    #[test]
    fn test_empty_handle_supports_nothing() {
        let handle = AdapterHandle::new("empty");
        assert!(handle.exposed().is_empty());
    }
}
