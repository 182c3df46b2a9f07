//! Application configuration management.

use std::collections::HashMap;
use std::path::PathBuf;

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Service plugin configuration.
    #[serde(default)]
    pub services: ServicesConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Service plugin configuration: which provider backs each capability.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServicesConfig {
    /// Provider name for the upload capability.
    #[serde(default)]
    pub upload: Option<String>,
    /// Provider name for the storage capability.
    #[serde(default)]
    pub storage: Option<String>,
    /// Provider name for the processing capability.
    #[serde(default)]
    pub processing: Option<String>,
    /// Dispatch behavior settings.
    #[serde(default)]
    pub settings: ServiceSettings,
    /// Per-provider connection settings, keyed by provider name.
    #[serde(default)]
    pub providers: HashMap<String, ProviderSettings>,
}

impl ServicesConfig {
    /// Returns the configured provider name for a capability, if any.
    ///
    /// Blank names count as unconfigured.
    #[must_use]
    pub fn provider(&self, capability: &str) -> Option<&str> {
        let name = match capability {
            "upload" => self.upload.as_deref(),
            "storage" => self.storage.as_deref(),
            "processing" => self.processing.as_deref(),
            _ => None,
        };
        name.map(str::trim).filter(|n| !n.is_empty())
    }

    /// Returns the settings block for a provider, if one was configured.
    #[must_use]
    pub fn provider_settings(&self, provider: &str) -> Option<&ProviderSettings> {
        self.providers.get(provider)
    }
}

/// Dispatch behavior settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceSettings {
    /// Whether a failed dispatch is retried on the fallback capability's adapter.
    #[serde(default = "default_fallback")]
    pub fallback: bool,
    /// Capability whose adapter receives fallback invocations.
    #[serde(default = "default_fallback_capability")]
    pub fallback_capability: String,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            fallback: default_fallback(),
            fallback_capability: default_fallback_capability(),
        }
    }
}

fn default_fallback() -> bool {
    true
}

fn default_fallback_capability() -> String {
    "upload".to_string()
}

/// Connection settings for a single provider.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProviderSettings {
    /// Root directory for filesystem-backed providers.
    #[serde(default)]
    pub root: Option<PathBuf>,
    /// Service endpoint URL for remote providers.
    #[serde(default)]
    pub endpoint: Option<String>,
    /// Bucket or container name.
    #[serde(default)]
    pub bucket: Option<String>,
    /// Region for providers that require one.
    #[serde(default)]
    pub region: Option<String>,
    /// API key or access token.
    #[serde(default)]
    pub api_key: Option<String>,
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("VEYRA").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn parse(toml: &str) -> AppConfig {
        config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()
            .and_then(config::Config::try_deserialize)
            .unwrap()
    }

    #[test]
    fn test_defaults_apply_when_sections_missing() {
        let cfg = parse("");
        assert_eq!(cfg.server.host, "0.0.0.0");
        assert_eq!(cfg.server.port, 8080);
        assert!(cfg.services.settings.fallback);
        assert_eq!(cfg.services.settings.fallback_capability, "upload");
        assert!(cfg.services.provider("upload").is_none());
    }

    #[rstest]
    #[case("upload", Some("local"))]
    #[case("storage", None)]
    #[case("processing", None)]
    #[case("unknown", None)]
    fn test_provider_lookup_ignores_blank_names(#[case] capability: &str, #[case] expected: Option<&str>) {
        let cfg = parse(
            r#"
            [services]
            upload = "local"
            storage = "   "
        "#,
        );
        assert_eq!(cfg.services.provider(capability), expected);
    }

    #[test]
    fn test_provider_settings_parse_per_provider() {
        let cfg = parse(
            r#"
            [services.providers.local]
            root = "/tmp/veyra"

            [services.providers.s3]
            endpoint = "https://minio.internal:9000"
            bucket = "veyra-media"
        "#,
        );
        let local = cfg.services.provider_settings("local").unwrap();
        assert_eq!(
            local.root.as_deref(),
            Some(std::path::Path::new("/tmp/veyra"))
        );
        let s3 = cfg.services.provider_settings("s3").unwrap();
        assert_eq!(s3.endpoint.as_deref(), Some("https://minio.internal:9000"));
        assert_eq!(s3.bucket.as_deref(), Some("veyra-media"));
        assert!(cfg.services.provider_settings("cloudinary").is_none());
    }

    #[test]
    fn test_fallback_settings_override() {
        let cfg = parse(
            r#"
            [services.settings]
            fallback = false
            fallback_capability = "storage"
        "#,
        );
        assert!(!cfg.services.settings.fallback);
        assert_eq!(cfg.services.settings.fallback_capability, "storage");
    }
}
