//! Capability identifiers for the service plugin layer.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A service capability that an adapter can provide.
///
/// Every adapter binding in the registry is keyed by a capability, and the
/// dispatcher routes each operation to the adapter active for that capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// Media upload and deletion.
    Upload,
    /// Structured record storage.
    Storage,
    /// Media processing and thumbnail generation.
    Processing,
}

impl Capability {
    /// All capabilities, in resolution order.
    pub const ALL: [Self; 3] = [Self::Upload, Self::Storage, Self::Processing];

    /// Returns the canonical lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Upload => "upload",
            Self::Storage => "storage",
            Self::Processing => "processing",
        }
    }

    /// Parses a capability from its canonical name.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "upload" => Some(Self::Upload),
            "storage" => Some(Self::Storage),
            "processing" => Some(Self::Processing),
            _ => None,
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("upload", Some(Capability::Upload))]
    #[case("storage", Some(Capability::Storage))]
    #[case("processing", Some(Capability::Processing))]
    #[case("  Upload  ", Some(Capability::Upload))]
    #[case("thumbnails", None)]
    #[case("", None)]
    fn test_parse(#[case] name: &str, #[case] expected: Option<Capability>) {
        assert_eq!(Capability::parse(name), expected);
    }

    #[test]
    fn test_roundtrip_through_name() {
        for capability in Capability::ALL {
            assert_eq!(Capability::parse(capability.as_str()), Some(capability));
        }
    }

    #[test]
    fn test_serde_uses_snake_case() {
        let json = serde_json::to_string(&Capability::Processing).unwrap();
        assert_eq!(json, "\"processing\"");
        let parsed: Capability = serde_json::from_str("\"upload\"").unwrap();
        assert_eq!(parsed, Capability::Upload);
    }
}
