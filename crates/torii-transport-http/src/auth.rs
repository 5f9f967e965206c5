//! Bearer token authentication against the token store.
//!
//! Authentication happens before any method is resolved, so failures
//! here surface as HTTP statuses, never as RPC faults.

use axum::http::{header, HeaderMap};

use torii_dispatch::Identity;
use torii_store::TokenStore;

/// Authentication failures at the transport boundary.
#[derive(Debug, PartialEq, Eq)]
pub enum AuthError {
    /// The credential is malformed, uses a different scheme, is unknown,
    /// or belongs to an inactive principal.
    Unauthorized,
    /// The token store could not answer. The request fails rather than
    /// silently degrading to anonymous.
    StoreUnavailable,
}

/// Resolves the `Authorization: Bearer <secret>` header to an identity.
///
/// An absent header means an anonymous call (`Ok(None)`). A present
/// header must carry a Bearer secret that resolves to an active
/// principal; anything else is rejected.
///
/// # Errors
///
/// Returns [`AuthError::Unauthorized`] for bad credentials and
/// [`AuthError::StoreUnavailable`] when the store lookup itself fails.
pub async fn authenticate(
    headers: &HeaderMap,
    store: &dyn TokenStore,
) -> Result<Option<Identity>, AuthError> {
    let Some(value) = headers.get(header::AUTHORIZATION) else {
        return Ok(None);
    };
    let secret = value
        .to_str()
        .ok()
        .and_then(|v| v.strip_prefix("Bearer "))
        .ok_or(AuthError::Unauthorized)?;

    let principal = store
        .lookup_principal_by_secret(secret)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "token store lookup failed");
            AuthError::StoreUnavailable
        })?;

    match principal {
        Some(principal) if principal.active => Ok(Some(Identity::new(principal.username))),
        Some(principal) => {
            tracing::debug!(username = %principal.username, "inactive principal rejected");
            Err(AuthError::Unauthorized)
        }
        None => Err(AuthError::Unauthorized),
    }
}
