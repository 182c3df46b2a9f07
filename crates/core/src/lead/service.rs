//! Lead service implementation.

use std::sync::Arc;

use chrono::Utc;
use serde_json::json;

use super::error::LeadError;
use super::types::{CreateLeadInput, DEFAULT_SOURCE, Lead, LeadFilter, LeadPatch, LeadStatus, NewLead};
use crate::audit::{AdminAction, AuditLog};

/// Repository trait for lead persistence.
///
/// Implementations own identifier assignment: `create` receives a fully
/// stamped lead and returns it with a fresh monotonic id.
pub trait LeadRepository: Send + Sync {
    /// Persist a new lead, assigning its identifier.
    fn create(
        &self,
        input: CreateLeadInput,
    ) -> impl std::future::Future<Output = Result<Lead, LeadError>> + Send;

    /// Find a lead by id.
    fn find(
        &self,
        id: u64,
    ) -> impl std::future::Future<Output = Result<Option<Lead>, LeadError>> + Send;

    /// All leads, ordered by ascending id.
    fn all(&self) -> impl std::future::Future<Output = Result<Vec<Lead>, LeadError>> + Send;

    /// Replace an existing lead. Returns false when the id is unknown.
    fn replace(
        &self,
        lead: Lead,
    ) -> impl std::future::Future<Output = Result<bool, LeadError>> + Send;

    /// Remove a lead by id. Returns false when the id is unknown.
    fn remove(&self, id: u64) -> impl std::future::Future<Output = Result<bool, LeadError>> + Send;
}

/// Lead service for managing the lead lifecycle.
///
/// Every mutation is recorded on the audit sink after it succeeds.
pub struct LeadService<R: LeadRepository> {
    repo: Arc<R>,
    audit: Arc<dyn AuditLog>,
}

impl<R: LeadRepository> LeadService<R> {
    /// Create a new lead service.
    #[must_use]
    pub fn new(repo: Arc<R>, audit: Arc<dyn AuditLog>) -> Self {
        Self { repo, audit }
    }

    /// Capture a new lead.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Name or email is missing or blank
    /// - The repository fails
    pub async fn create(&self, input: NewLead) -> Result<Lead, LeadError> {
        let name = input.name.as_deref().map_or("", str::trim);
        if name.is_empty() {
            return Err(LeadError::validation("name is required"));
        }

        let email = input.email.as_deref().map_or("", str::trim);
        if email.is_empty() {
            return Err(LeadError::validation("email is required"));
        }

        let source = input
            .source
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_SOURCE.to_string());

        let now = Utc::now();
        let lead = self
            .repo
            .create(CreateLeadInput {
                name: name.to_string(),
                email: email.to_string(),
                phone: input.phone,
                message: input.message,
                source,
                status: LeadStatus::New,
                created_at: now,
                updated_at: now,
            })
            .await?;

        self.audit.record(AdminAction::new(
            "lead_created",
            lead.id,
            json!({"source": lead.source, "email": lead.email}),
        ));

        Ok(lead)
    }

    /// Fetch a lead by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the lead does not exist or the repository fails.
    pub async fn get(&self, id: u64) -> Result<Lead, LeadError> {
        self.repo
            .find(id)
            .await?
            .ok_or_else(|| LeadError::not_found(id))
    }

    /// List leads matching a filter, ordered by ascending id.
    ///
    /// # Errors
    ///
    /// Returns an error if the repository fails.
    pub async fn list(&self, filter: &LeadFilter) -> Result<Vec<Lead>, LeadError> {
        let leads = self.repo.all().await?;
        Ok(leads.into_iter().filter(|l| filter.matches(l)).collect())
    }

    /// Apply a partial update to a lead.
    ///
    /// `updated_at` is refreshed on every successful update, whether or not
    /// the patch changed anything.
    ///
    /// # Errors
    ///
    /// Returns an error if the lead does not exist or the repository fails.
    pub async fn update(&self, id: u64, patch: LeadPatch) -> Result<Lead, LeadError> {
        let mut lead = self.get(id).await?;

        let details = serde_json::to_value(&patch).unwrap_or_default();
        lead.merge(patch);
        lead.updated_at = Utc::now();

        if !self.repo.replace(lead.clone()).await? {
            return Err(LeadError::not_found(id));
        }

        self.audit
            .record(AdminAction::new("lead_updated", id, details));

        Ok(lead)
    }

    /// Delete a lead by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the lead does not exist or the repository fails.
    pub async fn delete(&self, id: u64) -> Result<(), LeadError> {
        if !self.repo.remove(id).await? {
            return Err(LeadError::not_found(id));
        }

        self.audit
            .record(AdminAction::new("lead_deleted", id, json!({})));

        Ok(())
    }
}
