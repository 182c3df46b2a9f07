//! Uniform dispatch over active adapters, with capability fallback.
//!
//! Every operation goes through the same path: find the handle active for
//! the capability, take its typed view, invoke. When the invocation fails
//! and fallback is enabled, the operation is retried once against the
//! adapter active for the configured fallback capability, provided that
//! adapter exposes the same view. A failed fallback never masks the
//! primary error.

use std::future::Future;
use std::sync::Arc;

use tracing::warn;
use veyra_shared::config::ServiceSettings;

use super::adapter::AdapterHandle;
use super::capability::Capability;
use super::error::{AdapterError, PluginError};
use super::resolver::ActiveAdapterSet;
use super::types::{
    DataRecord, NewAsset, NewRecord, ProcessingJob, ProcessingReport, StoredAsset, Thumbnail,
};

/// Fallback behavior for the dispatcher.
#[derive(Debug, Clone)]
pub struct DispatchSettings {
    /// Whether a failed dispatch is retried on the fallback capability's adapter.
    pub fallback_enabled: bool,
    /// Capability whose adapter receives fallback invocations.
    pub fallback_capability: Capability,
}

impl DispatchSettings {
    /// Build dispatch settings from configuration.
    ///
    /// An unrecognized fallback capability name is logged and replaced with
    /// the default target.
    #[must_use]
    pub fn from_config(settings: &ServiceSettings) -> Self {
        let fallback_capability = match Capability::parse(&settings.fallback_capability) {
            Some(capability) => capability,
            None => {
                warn!(
                    name = %settings.fallback_capability,
                    "Unknown fallback capability in config, defaulting to 'upload'"
                );
                Capability::Upload
            }
        };

        Self {
            fallback_enabled: settings.fallback,
            fallback_capability,
        }
    }
}

impl Default for DispatchSettings {
    fn default() -> Self {
        Self {
            fallback_enabled: true,
            fallback_capability: Capability::Upload,
        }
    }
}

/// Dispatches operations to the adapters active for each capability.
pub struct PluginDispatcher {
    active: ActiveAdapterSet,
    settings: DispatchSettings,
}

impl PluginDispatcher {
    /// Create a dispatcher over a resolved adapter set.
    #[must_use]
    pub fn new(active: ActiveAdapterSet, settings: DispatchSettings) -> Self {
        Self { active, settings }
    }

    /// The handle active for a capability, if any. Pure lookup, no I/O.
    #[must_use]
    pub fn plugin(&self, capability: Capability) -> Option<&AdapterHandle> {
        self.active.handle(capability)
    }

    /// Whether an adapter is active for the capability.
    #[must_use]
    pub fn has_plugin(&self, capability: Capability) -> bool {
        self.active.contains(capability)
    }

    /// Capabilities with an active adapter.
    #[must_use]
    pub fn active_capabilities(&self) -> Vec<Capability> {
        self.active.capabilities()
    }

    /// The dispatch settings in effect.
    #[must_use]
    pub fn settings(&self) -> &DispatchSettings {
        &self.settings
    }

    /// Persist a media asset via the upload capability.
    pub async fn upload(&self, asset: NewAsset) -> Result<StoredAsset, PluginError> {
        self.dispatch(
            Capability::Upload,
            "upload",
            AdapterHandle::upload,
            move |adapter| {
                let asset = asset.clone();
                async move { adapter.upload(asset).await }
            },
        )
        .await
    }

    /// Delete an uploaded asset via the upload capability.
    pub async fn delete_upload(&self, key: &str) -> Result<(), PluginError> {
        let key = key.to_string();
        self.dispatch(
            Capability::Upload,
            "delete",
            AdapterHandle::upload,
            move |adapter| {
                let key = key.clone();
                async move { adapter.delete(&key).await }
            },
        )
        .await
    }

    /// Persist a structured record via the storage capability.
    pub async fn store(&self, record: NewRecord) -> Result<DataRecord, PluginError> {
        self.dispatch(
            Capability::Storage,
            "store",
            AdapterHandle::storage,
            move |adapter| {
                let record = record.clone();
                async move { adapter.store(record).await }
            },
        )
        .await
    }

    /// Fetch a record by key via the storage capability.
    pub async fn fetch(&self, key: &str) -> Result<DataRecord, PluginError> {
        let key = key.to_string();
        self.dispatch(
            Capability::Storage,
            "get",
            AdapterHandle::storage,
            move |adapter| {
                let key = key.clone();
                async move { adapter.get(&key).await }
            },
        )
        .await
    }

    /// Fetch every stored record via the storage capability.
    pub async fn fetch_all(&self) -> Result<Vec<DataRecord>, PluginError> {
        self.dispatch(
            Capability::Storage,
            "get_all",
            AdapterHandle::storage,
            |adapter| async move { adapter.get_all().await },
        )
        .await
    }

    /// Replace a record's payload via the storage capability.
    pub async fn update_record(
        &self,
        key: &str,
        value: serde_json::Value,
    ) -> Result<DataRecord, PluginError> {
        let key = key.to_string();
        self.dispatch(
            Capability::Storage,
            "update",
            AdapterHandle::storage,
            move |adapter| {
                let key = key.clone();
                let value = value.clone();
                async move { adapter.update(&key, value).await }
            },
        )
        .await
    }

    /// Delete a record by key via the storage capability.
    pub async fn delete_record(&self, key: &str) -> Result<(), PluginError> {
        let key = key.to_string();
        self.dispatch(
            Capability::Storage,
            "delete",
            AdapterHandle::storage,
            move |adapter| {
                let key = key.clone();
                async move { adapter.delete(&key).await }
            },
        )
        .await
    }

    /// Run a processing job via the processing capability.
    pub async fn process(&self, job: ProcessingJob) -> Result<ProcessingReport, PluginError> {
        self.dispatch(
            Capability::Processing,
            "process",
            AdapterHandle::processing,
            move |adapter| {
                let job = job.clone();
                async move { adapter.process(job).await }
            },
        )
        .await
    }

    /// Generate thumbnails via the processing capability.
    pub async fn generate_thumbnails(
        &self,
        source_key: &str,
        widths: &[u32],
    ) -> Result<Vec<Thumbnail>, PluginError> {
        let source_key = source_key.to_string();
        let widths = widths.to_vec();
        self.dispatch(
            Capability::Processing,
            "generate_thumbnails",
            AdapterHandle::processing,
            move |adapter| {
                let source_key = source_key.clone();
                let widths = widths.clone();
                async move { adapter.generate_thumbnails(&source_key, &widths).await }
            },
        )
        .await
    }

    /// Core dispatch path shared by every operation.
    ///
    /// `view` projects the typed adapter out of a handle; `call` runs the
    /// operation against it and may run a second time on the fallback
    /// adapter.
    async fn dispatch<A, T, F, Fut>(
        &self,
        capability: Capability,
        operation: &'static str,
        view: fn(&AdapterHandle) -> Option<Arc<A>>,
        call: F,
    ) -> Result<T, PluginError>
    where
        A: ?Sized,
        F: Fn(Arc<A>) -> Fut,
        Fut: Future<Output = Result<T, AdapterError>>,
    {
        let adapter = self
            .active
            .handle(capability)
            .and_then(|handle| view(handle))
            .ok_or(PluginError::PluginNotFound { capability })?;

        let primary_err = match call(adapter).await {
            Ok(value) => return Ok(value),
            Err(e) => e,
        };

        let Some(fallback) = self.fallback_view(capability, view) else {
            warn!(
                capability = %capability,
                operation,
                error = %primary_err,
                "Dispatch failed, no fallback applies"
            );
            return Err(PluginError::execution(capability, primary_err));
        };

        warn!(
            capability = %capability,
            operation,
            fallback = %self.settings.fallback_capability,
            error = %primary_err,
            "Dispatch failed, retrying on fallback adapter"
        );

        match call(fallback).await {
            Ok(value) => Ok(value),
            Err(fallback_err) => {
                warn!(
                    capability = %self.settings.fallback_capability,
                    operation,
                    error = %fallback_err,
                    "Fallback adapter failed as well"
                );
                Err(PluginError::execution(capability, primary_err))
            }
        }
    }

    /// The fallback adapter's view for a failed capability, when one applies.
    ///
    /// No fallback applies when fallback is disabled, when the failed
    /// capability is itself the fallback target, or when the target's
    /// adapter does not expose the needed view.
    fn fallback_view<A: ?Sized>(
        &self,
        failed: Capability,
        view: fn(&AdapterHandle) -> Option<Arc<A>>,
    ) -> Option<Arc<A>> {
        if !self.settings.fallback_enabled || failed == self.settings.fallback_capability {
            return None;
        }
        self.active
            .handle(self.settings.fallback_capability)
            .and_then(|handle| view(handle))
    }
}
