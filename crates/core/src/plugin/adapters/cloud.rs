//! Cloud provider adapters.
//!
//! These adapters validate their connection settings up front but do not
//! talk to the remote services yet; every operation reports
//! [`AdapterError::NotImplemented`]. Registering them keeps provider names
//! and configuration stable while the integrations are built out.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;
use veyra_shared::config::ProviderSettings;

use crate::plugin::adapter::{AdapterHandle, ProcessingAdapter, StorageAdapter, UploadAdapter};
use crate::plugin::error::AdapterError;
use crate::plugin::types::{
    DataRecord, NewAsset, NewRecord, ProcessingJob, ProcessingReport, StoredAsset, Thumbnail,
};

/// S3-compatible object storage adapter.
#[derive(Debug)]
pub struct S3Adapter {
    endpoint: String,
    bucket: String,
}

impl S3Adapter {
    /// Provider name this adapter registers under.
    pub const PROVIDER: &'static str = "s3";

    /// Create an adapter from provider settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint or bucket setting is missing.
    pub fn new(settings: &ProviderSettings) -> Result<Self, AdapterError> {
        let endpoint = settings
            .endpoint
            .clone()
            .ok_or_else(|| AdapterError::configuration("s3 provider requires an 'endpoint'"))?;
        let bucket = settings
            .bucket
            .clone()
            .ok_or_else(|| AdapterError::configuration("s3 provider requires a 'bucket'"))?;

        Ok(Self { endpoint, bucket })
    }

    /// Build a handle exposing the upload and storage views.
    ///
    /// # Errors
    ///
    /// Returns an error if the adapter cannot be constructed.
    pub fn handle(settings: &ProviderSettings) -> Result<AdapterHandle, AdapterError> {
        let adapter = Arc::new(Self::new(settings)?);
        Ok(AdapterHandle::new(Self::PROVIDER)
            .with_upload(adapter.clone())
            .with_storage(adapter))
    }

    fn unimplemented<T>(&self, operation: &'static str) -> Result<T, AdapterError> {
        debug!(
            provider = Self::PROVIDER,
            endpoint = %self.endpoint,
            bucket = %self.bucket,
            operation,
            "Cloud adapter invoked before integration is available"
        );
        Err(AdapterError::not_implemented(Self::PROVIDER, operation))
    }
}

#[async_trait]
impl UploadAdapter for S3Adapter {
    async fn upload(&self, _asset: NewAsset) -> Result<StoredAsset, AdapterError> {
        self.unimplemented("upload")
    }

    async fn delete(&self, _key: &str) -> Result<(), AdapterError> {
        self.unimplemented("delete")
    }
}

#[async_trait]
impl StorageAdapter for S3Adapter {
    async fn store(&self, _record: NewRecord) -> Result<DataRecord, AdapterError> {
        self.unimplemented("store")
    }

    async fn get(&self, _key: &str) -> Result<DataRecord, AdapterError> {
        self.unimplemented("get")
    }

    async fn get_all(&self) -> Result<Vec<DataRecord>, AdapterError> {
        self.unimplemented("get_all")
    }

    async fn update(
        &self,
        _key: &str,
        _value: serde_json::Value,
    ) -> Result<DataRecord, AdapterError> {
        self.unimplemented("update")
    }

    async fn delete(&self, _key: &str) -> Result<(), AdapterError> {
        self.unimplemented("delete")
    }
}

/// Cloudinary media processing adapter.
#[derive(Debug)]
pub struct CloudinaryAdapter {
    endpoint: String,
}

impl CloudinaryAdapter {
    /// Provider name this adapter registers under.
    pub const PROVIDER: &'static str = "cloudinary";

    /// Create an adapter from provider settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint setting is missing.
    pub fn new(settings: &ProviderSettings) -> Result<Self, AdapterError> {
        let endpoint = settings.endpoint.clone().ok_or_else(|| {
            AdapterError::configuration("cloudinary provider requires an 'endpoint'")
        })?;

        Ok(Self { endpoint })
    }

    /// Build a handle exposing the processing view.
    ///
    /// # Errors
    ///
    /// Returns an error if the adapter cannot be constructed.
    pub fn handle(settings: &ProviderSettings) -> Result<AdapterHandle, AdapterError> {
        let adapter = Arc::new(Self::new(settings)?);
        Ok(AdapterHandle::new(Self::PROVIDER).with_processing(adapter))
    }

    fn unimplemented<T>(&self, operation: &'static str) -> Result<T, AdapterError> {
        debug!(
            provider = Self::PROVIDER,
            endpoint = %self.endpoint,
            operation,
            "Cloud adapter invoked before integration is available"
        );
        Err(AdapterError::not_implemented(Self::PROVIDER, operation))
    }
}

#[async_trait]
impl ProcessingAdapter for CloudinaryAdapter {
    async fn process(&self, _job: ProcessingJob) -> Result<ProcessingReport, AdapterError> {
        self.unimplemented("process")
    }

    async fn generate_thumbnails(
        &self,
        _source_key: &str,
        _widths: &[u32],
    ) -> Result<Vec<Thumbnail>, AdapterError> {
        self.unimplemented("generate_thumbnails")
    }
}
