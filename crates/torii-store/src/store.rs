//! Abstract store trait (port) for principals and auth tokens.

use async_trait::async_trait;
use thiserror::Error;

use crate::token::{AuthToken, Principal};

/// Errors returned by store implementations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The referenced principal does not exist.
    #[error("unknown principal: {username}")]
    UnknownPrincipal { username: String },
    /// A database or I/O error occurred.
    #[error("storage error: {message}")]
    Storage { message: String },
}

/// Abstract trait for principal and token persistence.
///
/// Implementations live in adapter crates (e.g., `torii-store-sqlite`).
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// Creates the principal if it does not exist, returning it either
    /// way. New principals start active.
    async fn ensure_principal(&self, username: &str) -> Result<Principal, StoreError>;

    /// Activates or deactivates a principal.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::UnknownPrincipal`] if the principal does
    /// not exist.
    async fn set_principal_active(&self, username: &str, active: bool)
        -> Result<(), StoreError>;

    /// Issues a new token for a principal, generating a fresh secret.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::UnknownPrincipal`] if the owner does not
    /// exist.
    async fn create_token(
        &self,
        owner: &str,
        description: &str,
    ) -> Result<AuthToken, StoreError>;

    /// Lists tokens, optionally restricted to one owner.
    async fn list_tokens(&self, owner: Option<&str>) -> Result<Vec<AuthToken>, StoreError>;

    /// Revokes a token by secret. Returns true if it existed.
    async fn revoke_token(&self, secret: &str) -> Result<bool, StoreError>;

    /// Looks up the principal owning a secret, or `None` on a miss.
    ///
    /// A successful lookup bumps the token's `last_used_at`.
    async fn lookup_principal_by_secret(
        &self,
        secret: &str,
    ) -> Result<Option<Principal>, StoreError>;
}
