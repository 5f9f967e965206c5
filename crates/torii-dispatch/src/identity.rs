//! The authenticated-caller value threaded into handler construction.

use std::fmt;

/// An authenticated principal attached to one RPC call.
///
/// An `Identity` reaching a handler group always denotes a positively
/// authenticated, active principal. Anonymous callers, unknown secrets and
/// inactive principals are normalised to `None` by the transport layer
/// before dispatch, so application code never sees a half-authenticated
/// placeholder.
///
/// Constructed fresh per request, moved into handler-group construction,
/// dropped when the call completes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    username: String,
}

impl Identity {
    /// Creates an identity for an authenticated, active principal.
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
        }
    }

    /// The principal's username.
    pub fn username(&self) -> &str {
        &self.username
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.username)
    }
}
