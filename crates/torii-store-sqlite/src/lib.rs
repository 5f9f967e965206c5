//! # torii-store-sqlite
//!
//! SQLite adapter for the torii auth token store.
//! Implements `TokenStore` with full principal and token CRUD.

pub mod migrations;
pub mod store;

pub use store::SqliteTokenStore;
