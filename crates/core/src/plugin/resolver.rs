//! Provider resolution: turning configuration into active adapters.

use std::collections::HashMap;

use tracing::{debug, info, warn};
use veyra_shared::config::{ProviderSettings, ServicesConfig};

use super::adapter::AdapterHandle;
use super::capability::Capability;
use super::registry::CapabilityRegistry;

/// The adapters that survived resolution, one per configured capability.
#[derive(Debug, Default)]
pub struct ActiveAdapterSet {
    handles: HashMap<Capability, AdapterHandle>,
}

impl ActiveAdapterSet {
    /// Create an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Activate a handle for a capability, replacing any previous one.
    pub fn insert(&mut self, capability: Capability, handle: AdapterHandle) {
        self.handles.insert(capability, handle);
    }

    /// The handle active for a capability, if any.
    #[must_use]
    pub fn handle(&self, capability: Capability) -> Option<&AdapterHandle> {
        self.handles.get(&capability)
    }

    /// Whether a capability has an active adapter.
    #[must_use]
    pub fn contains(&self, capability: Capability) -> bool {
        self.handles.contains_key(&capability)
    }

    /// Capabilities with an active adapter, in resolution order.
    #[must_use]
    pub fn capabilities(&self) -> Vec<Capability> {
        Capability::ALL
            .into_iter()
            .filter(|c| self.contains(*c))
            .collect()
    }

    /// Number of active adapters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    /// Whether no adapters are active.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}

/// Build the active adapter set from configuration.
///
/// Resolution is tolerant of partial failure: a capability with no configured
/// provider, an unknown provider name, or a factory that errors is logged and
/// skipped, and the remaining capabilities still come up. A capability absent
/// from the returned set simply has no adapter and will fail dispatch with
/// a plugin-not-found error.
#[must_use]
pub fn build_active_adapters(
    registry: &CapabilityRegistry,
    config: &ServicesConfig,
) -> ActiveAdapterSet {
    let default_settings = ProviderSettings::default();
    let mut active = ActiveAdapterSet::new();

    for capability in Capability::ALL {
        let Some(provider) = config.provider(capability.as_str()) else {
            debug!(capability = %capability, "No provider configured, capability disabled");
            continue;
        };

        let Some(factory) = registry.resolve(capability, provider) else {
            warn!(
                capability = %capability,
                provider,
                "Unknown provider for capability, capability disabled"
            );
            continue;
        };

        let settings = config.provider_settings(provider).unwrap_or(&default_settings);

        match factory(settings) {
            Ok(handle) if handle.supports(capability) => {
                info!(capability = %capability, provider, "Capability adapter activated");
                active.insert(capability, handle);
            }
            Ok(handle) => {
                warn!(
                    capability = %capability,
                    provider = handle.provider(),
                    "Adapter does not expose the requested capability, capability disabled"
                );
            }
            Err(e) => {
                warn!(
                    capability = %capability,
                    provider,
                    error = %e,
                    "Adapter construction failed, capability disabled"
                );
            }
        }
    }

    active
}
