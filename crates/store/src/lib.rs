//! In-memory persistence for Veyra.
//!
//! This crate provides the process-local repository implementations behind
//! the core service traits. Data does not survive a restart.

pub mod leads;

pub use leads::MemoryLeadStore;
