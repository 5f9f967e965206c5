//! `torii serve` command.
//!
//! Starts the RPC server over HTTP, exposing registered handler groups
//! with Bearer token authentication.

use std::sync::Arc;

use clap::Args;

use torii_config::ToriiConfig;
use torii_dispatch::Dispatcher;
use torii_transport_http::{AppState, HttpServer};

use crate::shared;

/// Start the RPC server over HTTP.
#[derive(Debug, Args)]
pub struct ServeArgs {
    /// TCP port to listen on (overrides the configured port).
    #[arg(long)]
    pub port: Option<u16>,
}

/// Executes the serve command.
pub async fn execute(args: &ServeArgs, config: &ToriiConfig) -> anyhow::Result<()> {
    let store = shared::open_store(config)?;
    let mapper = shared::build_mapper();
    let dispatcher = Arc::new(
        Dispatcher::new(Arc::clone(&mapper)).with_allow_nil(config.server.allow_nil),
    );

    let state = AppState {
        dispatcher,
        mapper,
        store,
    };
    let port = args.port.unwrap_or(config.server.port);
    let server = HttpServer::new(state, port);

    tokio::select! {
        result = server.run() => {
            result.map_err(|e| anyhow::anyhow!("server error: {e}"))?;
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("shutdown signal received");
        }
    }

    Ok(())
}
