//! In-memory lead store.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::RwLock;

use veyra_core::lead::{CreateLeadInput, Lead, LeadError, LeadRepository};

/// Lead repository backed by process memory.
///
/// Leads live in a `BTreeMap` keyed by id, so listings come back in
/// ascending id order. Identifiers come from an atomic counter and are never
/// reused within a process lifetime.
#[derive(Debug)]
pub struct MemoryLeadStore {
    leads: RwLock<BTreeMap<u64, Lead>>,
    next_id: AtomicU64,
}

impl MemoryLeadStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            leads: RwLock::new(BTreeMap::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Number of stored leads.
    pub async fn len(&self) -> usize {
        self.leads.read().await.len()
    }

    /// Whether the store holds no leads.
    pub async fn is_empty(&self) -> bool {
        self.leads.read().await.is_empty()
    }
}

impl Default for MemoryLeadStore {
    fn default() -> Self {
        Self::new()
    }
}

impl LeadRepository for MemoryLeadStore {
    async fn create(&self, input: CreateLeadInput) -> Result<Lead, LeadError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let lead = Lead {
            id,
            name: input.name,
            email: input.email,
            phone: input.phone,
            message: input.message,
            source: input.source,
            status: input.status,
            created_at: input.created_at,
            updated_at: input.updated_at,
        };

        self.leads.write().await.insert(id, lead.clone());
        Ok(lead)
    }

    async fn find(&self, id: u64) -> Result<Option<Lead>, LeadError> {
        Ok(self.leads.read().await.get(&id).cloned())
    }

    async fn all(&self) -> Result<Vec<Lead>, LeadError> {
        Ok(self.leads.read().await.values().cloned().collect())
    }

    async fn replace(&self, lead: Lead) -> Result<bool, LeadError> {
        let mut leads = self.leads.write().await;
        match leads.get_mut(&lead.id) {
            Some(slot) => {
                *slot = lead;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn remove(&self, id: u64) -> Result<bool, LeadError> {
        Ok(self.leads.write().await.remove(&id).is_some())
    }
}
