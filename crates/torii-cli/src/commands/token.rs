//! `torii token` commands: token lifecycle CRUD against the store.

use clap::{Args, Subcommand};

use torii_config::ToriiConfig;
use torii_store::TokenStore;

use crate::shared;

/// Manage authentication tokens.
#[derive(Debug, Subcommand)]
pub enum TokenCommand {
    /// Issue a new token for a principal.
    Create(CreateArgs),
    /// List tokens, optionally for one owner.
    List(ListArgs),
    /// Revoke a token by secret.
    Revoke(RevokeArgs),
}

#[derive(Debug, Args)]
pub struct CreateArgs {
    /// Username the token is issued for (created if missing).
    #[arg(long)]
    pub owner: String,
    /// What the token is for.
    #[arg(long, default_value = "")]
    pub description: String,
}

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Restrict the listing to one owner.
    #[arg(long)]
    pub owner: Option<String>,
}

#[derive(Debug, Args)]
pub struct RevokeArgs {
    /// The secret of the token to revoke.
    pub secret: String,
}

/// Executes a token subcommand.
pub async fn execute(command: &TokenCommand, config: &ToriiConfig) -> anyhow::Result<()> {
    let store = shared::open_store(config)?;

    match command {
        TokenCommand::Create(args) => {
            store.ensure_principal(&args.owner).await?;
            let token = store.create_token(&args.owner, &args.description).await?;
            println!("{}", token.secret);
        }
        TokenCommand::List(args) => {
            let tokens = store.list_tokens(args.owner.as_deref()).await?;
            for token in tokens {
                let last_used = token.last_used_at.as_deref().unwrap_or("never");
                println!(
                    "{}  owner={}  created={}  last_used={}  {}",
                    token.secret, token.owner, token.created_at, last_used, token.description
                );
            }
        }
        TokenCommand::Revoke(args) => {
            if store.revoke_token(&args.secret).await? {
                println!("token revoked");
            } else {
                anyhow::bail!("no such token");
            }
        }
    }

    Ok(())
}
