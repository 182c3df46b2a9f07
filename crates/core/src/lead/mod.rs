//! Lead lifecycle management.
//!
//! This module provides business logic for captured sales leads including:
//! - Creation with required-field validation and source defaulting
//! - Partial updates with explicit-null clearing
//! - Filtered listing in stable id order
//! - Deletion with strict existence checks

mod error;
mod service;
mod types;

pub use error::LeadError;
pub use service::{LeadRepository, LeadService};
pub use types::{
    CreateLeadInput, DEFAULT_SOURCE, Lead, LeadFilter, LeadPatch, LeadStatus, NewLead,
};
