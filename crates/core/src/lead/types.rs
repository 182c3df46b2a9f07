//! Lead domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Default acquisition channel for new leads.
pub const DEFAULT_SOURCE: &str = "website";

/// Lifecycle status of a lead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeadStatus {
    /// Just captured, not yet worked.
    #[default]
    New,
    /// An admin has reached out.
    Contacted,
    /// Qualified as a real opportunity.
    Qualified,
    /// Closed, won or lost.
    Closed,
}

impl LeadStatus {
    /// Returns the canonical lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Contacted => "contacted",
            Self::Qualified => "qualified",
            Self::Closed => "closed",
        }
    }
}

/// A captured sales lead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lead {
    /// Monotonically assigned identifier.
    pub id: u64,
    /// Contact name.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Optional phone number.
    pub phone: Option<String>,
    /// Optional free-form message.
    pub message: Option<String>,
    /// Acquisition channel.
    pub source: String,
    /// Lifecycle status.
    pub status: LeadStatus,
    /// When the lead was created.
    pub created_at: DateTime<Utc>,
    /// When the lead was last modified.
    pub updated_at: DateTime<Utc>,
}

impl Lead {
    /// Apply a partial update. Does not touch `updated_at`; the service
    /// stamps it after a successful merge.
    pub fn merge(&mut self, patch: LeadPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(email) = patch.email {
            self.email = email;
        }
        if let Some(phone) = patch.phone {
            self.phone = phone;
        }
        if let Some(message) = patch.message {
            self.message = message;
        }
        if let Some(source) = patch.source {
            self.source = source;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
    }
}

/// Payload for creating a lead.
///
/// Presence of `name` and `email` is enforced by the service rather than the
/// deserializer, so a missing field surfaces as a validation error instead of
/// a parse failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewLead {
    /// Contact name.
    #[serde(default)]
    pub name: Option<String>,
    /// Contact email.
    #[serde(default)]
    pub email: Option<String>,
    /// Optional phone number.
    #[serde(default)]
    pub phone: Option<String>,
    /// Optional free-form message.
    #[serde(default)]
    pub message: Option<String>,
    /// Acquisition channel; defaults to [`DEFAULT_SOURCE`] when absent.
    #[serde(default)]
    pub source: Option<String>,
}

/// Partial update for a lead.
///
/// `phone` and `message` distinguish "leave unchanged" (absent) from
/// "clear" (explicit null) via the double option.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LeadPatch {
    /// Replacement contact name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Replacement contact email.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Replacement phone number; explicit null clears it.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_with::rust::double_option"
    )]
    pub phone: Option<Option<String>>,
    /// Replacement message; explicit null clears it.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_with::rust::double_option"
    )]
    pub message: Option<Option<String>>,
    /// Replacement acquisition channel.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Replacement lifecycle status.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<LeadStatus>,
}

/// Fully stamped lead awaiting an identifier from the repository.
#[derive(Debug, Clone)]
pub struct CreateLeadInput {
    /// Contact name.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Optional phone number.
    pub phone: Option<String>,
    /// Optional free-form message.
    pub message: Option<String>,
    /// Acquisition channel.
    pub source: String,
    /// Initial lifecycle status.
    pub status: LeadStatus,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last-modified timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Filter for lead listings. Conditions are conjunctive.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LeadFilter {
    /// Match this lifecycle status.
    #[serde(default)]
    pub status: Option<LeadStatus>,
    /// Match this acquisition channel exactly.
    #[serde(default)]
    pub source: Option<String>,
    /// Match this email exactly.
    #[serde(default)]
    pub email: Option<String>,
}

impl LeadFilter {
    /// Whether a lead satisfies every condition in the filter.
    #[must_use]
    pub fn matches(&self, lead: &Lead) -> bool {
        if let Some(status) = self.status {
            if lead.status != status {
                return false;
            }
        }
        if let Some(source) = &self.source {
            if &lead.source != source {
                return false;
            }
        }
        if let Some(email) = &self.email {
            if &lead.email != email {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn lead() -> Lead {
        Lead {
            id: 1,
            name: "Ari Wibowo".to_string(),
            email: "ari@example.com".to_string(),
            phone: Some("+62 812 0001".to_string()),
            message: None,
            source: "website".to_string(),
            status: LeadStatus::New,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_merge_replaces_only_present_fields() {
        let mut lead = lead();
        lead.merge(LeadPatch {
            name: Some("Ari W.".to_string()),
            status: Some(LeadStatus::Contacted),
            ..LeadPatch::default()
        });

        assert_eq!(lead.name, "Ari W.");
        assert_eq!(lead.status, LeadStatus::Contacted);
        assert_eq!(lead.email, "ari@example.com");
        assert_eq!(lead.phone.as_deref(), Some("+62 812 0001"));
    }

    #[test]
    fn test_merge_clears_phone_on_explicit_null() {
        let mut lead = lead();
        lead.merge(LeadPatch {
            phone: Some(None),
            ..LeadPatch::default()
        });

        assert_eq!(lead.phone, None);
    }

    #[test]
    fn test_patch_distinguishes_absent_from_null() {
        let patch: LeadPatch = serde_json::from_str("{}").unwrap();
        assert_eq!(patch.phone, None);

        let patch: LeadPatch = serde_json::from_str(r#"{"phone": null}"#).unwrap();
        assert_eq!(patch.phone, Some(None));

        let patch: LeadPatch = serde_json::from_str(r#"{"phone": "+62 812"}"#).unwrap();
        assert_eq!(patch.phone, Some(Some("+62 812".to_string())));
    }

    #[test]
    fn test_patch_serializes_only_present_fields() {
        let patch = LeadPatch {
            status: Some(LeadStatus::Qualified),
            phone: Some(None),
            ..LeadPatch::default()
        };
        let value = serde_json::to_value(&patch).unwrap();

        assert_eq!(value["status"], "qualified");
        assert!(value["phone"].is_null());
        assert!(value.get("name").is_none());
        assert!(value.get("email").is_none());
    }

    #[test]
    fn test_status_serde_snake_case() {
        let json = serde_json::to_string(&LeadStatus::Contacted).unwrap();
        assert_eq!(json, "\"contacted\"");
        let parsed: LeadStatus = serde_json::from_str("\"closed\"").unwrap();
        assert_eq!(parsed, LeadStatus::Closed);
    }

    #[rstest]
    #[case(LeadFilter::default(), true)]
    #[case(LeadFilter { status: Some(LeadStatus::New), ..LeadFilter::default() }, true)]
    #[case(LeadFilter { status: Some(LeadStatus::Closed), ..LeadFilter::default() }, false)]
    #[case(LeadFilter { source: Some("website".to_string()), ..LeadFilter::default() }, true)]
    #[case(LeadFilter { source: Some("referral".to_string()), ..LeadFilter::default() }, false)]
    #[case(LeadFilter { email: Some("ari@example.com".to_string()), ..LeadFilter::default() }, true)]
    #[case(LeadFilter { email: Some("ARI@EXAMPLE.COM".to_string()), ..LeadFilter::default() }, false)]
    #[case(
        LeadFilter {
            status: Some(LeadStatus::New),
            source: Some("website".to_string()),
            email: Some("other@example.com".to_string()),
        },
        false
    )]
    fn test_filter_matches(#[case] filter: LeadFilter, #[case] expected: bool) {
        assert_eq!(filter.matches(&lead()), expected);
    }
}
