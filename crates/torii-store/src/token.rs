//! Auth token and principal records.

use rand::distributions::Alphanumeric;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Length of a generated token secret.
pub const SECRET_LEN: usize = 128;

/// A principal that tokens can be issued for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    /// Unique username.
    pub username: String,
    /// Whether the principal may authenticate. Inactive principals are
    /// never handed to application code as an identity.
    pub active: bool,
}

/// An authentication token.
///
/// Associates a request with a principal. Similar to an OAuth resource
/// token but much more primitive: the secret itself is the credential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthToken {
    /// Randomly generated secret that grants access in place of the
    /// owner's regular password. Unique store-wide.
    pub secret: String,
    /// Username of the owning principal.
    pub owner: String,
    /// Arbitrary text that helps the owner associate the token with its
    /// intended purpose.
    pub description: String,
    /// When the token was created.
    pub created_at: String,
    /// When the token was last used to authenticate, if ever.
    pub last_used_at: Option<String>,
}

/// Generates a fresh token secret from a high-entropy alphabet.
pub fn generate_secret() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(SECRET_LEN)
        .map(char::from)
        .collect()
}
