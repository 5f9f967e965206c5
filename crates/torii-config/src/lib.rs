//! # torii-config
//!
//! Configuration schema and loader for the torii RPC dispatch service.

pub mod loader;
pub mod schema;

pub use loader::{load_config, ConfigError};
pub use schema::{LoggingConfig, ServerConfig, StoreConfig, ToriiConfig};
