//! Service plugin layer.
//!
//! This module provides the dispatch path between the application and its
//! pluggable service providers:
//! - Capability identifiers and closed per-capability interfaces
//! - A registry of adapter factories keyed by (capability, provider)
//! - Config-driven resolution into an active adapter set
//! - A dispatcher with uniform invocation and capability fallback

pub mod adapters;

mod adapter;
mod capability;
mod dispatcher;
mod error;
mod registry;
mod resolver;
mod types;

pub use adapter::{AdapterHandle, ProcessingAdapter, StorageAdapter, UploadAdapter};
pub use capability::Capability;
pub use dispatcher::{DispatchSettings, PluginDispatcher};
pub use error::{AdapterError, PluginError};
pub use registry::{AdapterFactory, CapabilityRegistry};
pub use resolver::{ActiveAdapterSet, build_active_adapters};
pub use types::{
    DataRecord, NewAsset, NewRecord, ProcessingJob, ProcessingReport, StoredAsset, Thumbnail,
};
