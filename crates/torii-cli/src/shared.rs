//! Shared helpers used across CLI commands.

use std::sync::Arc;

use torii_config::ToriiConfig;
use torii_dispatch::Mapper;
use torii_store_sqlite::SqliteTokenStore;

/// Opens the SQLite token store configured in `config`, creating the
/// parent directory if needed.
///
/// # Errors
///
/// Returns an error if the database file cannot be created or opened.
pub fn open_store(config: &ToriiConfig) -> anyhow::Result<Arc<SqliteTokenStore>> {
    let path = &config.store.db_path;
    if let Some(parent) = std::path::Path::new(path).parent() {
        std::fs::create_dir_all(parent)?;
    }
    let store =
        SqliteTokenStore::open(path).map_err(|e| anyhow::anyhow!("token store error: {e}"))?;
    Ok(Arc::new(store))
}

/// Builds the mapper served by this process.
///
/// Only the introspection namespace is registered here; embedding
/// applications register their own handler groups before building the
/// dispatcher.
pub fn build_mapper() -> Arc<Mapper> {
    let mapper = Arc::new(Mapper::new());
    mapper.register_introspection_methods();
    mapper
}
