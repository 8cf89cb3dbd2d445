//! Shared utilities and common types for the ShareIt server
//!
//! This crate provides functionality used across all server crates:
//! - Configuration types
//! - Client-facing error and response structures

pub mod config;
pub mod types;

// Re-export commonly used items at crate root
pub use config::{AppConfig, DatabaseConfig, ServerConfig};
pub use types::response::ErrorBody;
