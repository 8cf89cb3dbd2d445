//! Configuration types for the ShareIt server.

mod database;
mod server;

pub use database::DatabaseConfig;
pub use server::ServerConfig;

/// Top-level application configuration
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    /// HTTP server settings
    pub server: ServerConfig,

    /// Database settings
    pub database: DatabaseConfig,
}

impl AppConfig {
    /// Assemble the full configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            server: ServerConfig::from_env(),
            database: DatabaseConfig::from_env(),
        }
    }
}
