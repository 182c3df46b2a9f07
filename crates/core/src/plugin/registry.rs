//! Capability registry mapping (capability, provider) pairs to adapter factories.

use std::collections::HashMap;

use veyra_shared::config::ProviderSettings;

use super::adapter::AdapterHandle;
use super::adapters::{CloudinaryAdapter, LocalFsAdapter, S3Adapter};
use super::capability::Capability;
use super::error::AdapterError;

/// Factory that builds an adapter handle from provider settings.
pub type AdapterFactory =
    Box<dyn Fn(&ProviderSettings) -> Result<AdapterHandle, AdapterError> + Send + Sync>;

/// Registry of adapter factories, keyed by capability and provider name.
///
/// Registration is last-write-wins: re-registering a (capability, provider)
/// pair replaces the previous factory.
#[derive(Default)]
pub struct CapabilityRegistry {
    bindings: HashMap<(Capability, String), AdapterFactory>,
}

impl CapabilityRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry preloaded with the built-in providers.
    #[must_use]
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();

        registry.register(Capability::Upload, "local", Box::new(LocalFsAdapter::handle));
        registry.register(
            Capability::Storage,
            "local",
            Box::new(LocalFsAdapter::handle),
        );
        registry.register(
            Capability::Processing,
            "local",
            Box::new(LocalFsAdapter::handle),
        );

        registry.register(Capability::Upload, "s3", Box::new(S3Adapter::handle));
        registry.register(Capability::Storage, "s3", Box::new(S3Adapter::handle));

        registry.register(
            Capability::Processing,
            "cloudinary",
            Box::new(CloudinaryAdapter::handle),
        );

        registry
    }

    /// Register a factory for a (capability, provider) pair.
    pub fn register(
        &mut self,
        capability: Capability,
        provider: impl Into<String>,
        factory: AdapterFactory,
    ) {
        self.bindings.insert((capability, provider.into()), factory);
    }

    /// Look up the factory registered for a (capability, provider) pair.
    #[must_use]
    pub fn resolve(&self, capability: Capability, provider: &str) -> Option<&AdapterFactory> {
        self.bindings.get(&(capability, provider.to_string()))
    }

    /// Provider names registered for a capability, sorted.
    #[must_use]
    pub fn providers_for(&self, capability: Capability) -> Vec<&str> {
        let mut providers: Vec<&str> = self
            .bindings
            .keys()
            .filter(|(c, _)| *c == capability)
            .map(|(_, p)| p.as_str())
            .collect();
        providers.sort_unstable();
        providers
    }

    /// Number of registered bindings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Whether the registry has no bindings.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}
