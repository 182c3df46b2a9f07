//! Admin action audit logging.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

/// A recorded administrative action.
#[derive(Debug, Clone, Serialize)]
pub struct AdminAction {
    /// Machine-readable action name, e.g. `lead_created`.
    pub action: String,
    /// Identifier of the lead the action touched.
    pub lead_id: u64,
    /// Action-specific details.
    pub details: serde_json::Value,
    /// When the action happened.
    pub timestamp: DateTime<Utc>,
}

impl AdminAction {
    /// Create an action stamped with the current time.
    #[must_use]
    pub fn new(action: impl Into<String>, lead_id: u64, details: serde_json::Value) -> Self {
        Self {
            action: action.into(),
            lead_id,
            details,
            timestamp: Utc::now(),
        }
    }
}

/// Sink for admin actions.
///
/// Entries are append-only side effects; nothing reads them back.
pub trait AuditLog: Send + Sync {
    /// Record one action.
    fn record(&self, entry: AdminAction);
}

/// Audit sink that emits entries on the `audit` tracing target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingAuditLog;

impl AuditLog for TracingAuditLog {
    fn record(&self, entry: AdminAction) {
        info!(
            target: "audit",
            action = %entry.action,
            lead_id = entry.lead_id,
            details = %entry.details,
            "Admin action recorded"
        );
    }
}
