//! Shared types, errors, and configuration for Veyra.
//!
//! This crate provides common types used across all other crates:
//! - Application-wide error types with HTTP status mappings
//! - Configuration management for the server and service plugins

pub mod config;
pub mod error;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
