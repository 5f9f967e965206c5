//! `torii principal` commands.

use clap::{Args, Subcommand};

use torii_config::ToriiConfig;
use torii_store::TokenStore;

use crate::shared;

/// Manage principals.
#[derive(Debug, Subcommand)]
pub enum PrincipalCommand {
    /// Allow a principal to authenticate (created if missing).
    Activate(PrincipalArgs),
    /// Stop a principal from authenticating without revoking its tokens.
    Deactivate(PrincipalArgs),
}

#[derive(Debug, Args)]
pub struct PrincipalArgs {
    /// The principal's username.
    pub username: String,
}

/// Executes a principal subcommand.
pub async fn execute(command: &PrincipalCommand, config: &ToriiConfig) -> anyhow::Result<()> {
    let store = shared::open_store(config)?;

    match command {
        PrincipalCommand::Activate(args) => {
            store.ensure_principal(&args.username).await?;
            store.set_principal_active(&args.username, true).await?;
            println!("{} activated", args.username);
        }
        PrincipalCommand::Deactivate(args) => {
            store.set_principal_active(&args.username, false).await?;
            println!("{} deactivated", args.username);
        }
    }

    Ok(())
}
