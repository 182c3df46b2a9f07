//! Core business logic for Veyra.
//!
//! This crate contains pure business logic with ZERO web dependencies.
//! All domain types, validation rules, and dispatch logic live here,
//! along with the built-in provider adapters.
//!
//! # Modules
//!
//! - `plugin` - Capability registry, provider resolution, and plugin dispatch
//! - `lead` - Lead lifecycle management
//! - `audit` - Admin action audit logging

pub mod audit;
pub mod lead;
pub mod plugin;
