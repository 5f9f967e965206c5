//! Fault values and the fault code taxonomy.
//!
//! A `Fault` is the only structured failure that crosses the dispatch
//! boundary to a caller. Anything else (panics, decode errors, storage
//! failures) is converted to a fault before it leaves the dispatcher.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Standard fault codes, grouped by band.
///
/// See: <http://xmlrpc-epi.sourceforge.net/specs/rfc.fault_codes.php>
pub mod fault_codes {
    /// Malformed envelope (could not be decoded at all).
    pub mod parse_error {
        /// The request body is not well formed.
        pub const NOT_WELL_FORMED: i32 = -32700;
        /// The request uses an unsupported encoding.
        pub const UNSUPPORTED_ENCODING: i32 = -32701;
        /// The request contains characters invalid for its encoding.
        pub const INVALID_CHARACTER_FOR_ENCODING: i32 = -32702;
    }

    /// Errors detected by the server while dispatching.
    pub mod server_error {
        /// The envelope decoded but is not a valid request.
        pub const INVALID_RPC: i32 = -32600;
        /// The requested method does not exist.
        pub const METHOD_NOT_FOUND: i32 = -32601;
        /// Invalid method parameters.
        pub const INVALID_METHOD_PARAMETERS: i32 = -32602;
        /// Internal error while executing the method.
        pub const INTERNAL_RPC_ERROR: i32 = -32603;
    }

    /// Reserved band for application-defined errors.
    pub const APPLICATION_ERROR: i32 = -32500;
    /// Reserved band for system errors.
    pub const SYSTEM_ERROR: i32 = -32400;
    /// Reserved band for transport errors.
    pub const TRANSPORT_ERROR: i32 = -32300;
}

/// A structured RPC fault (numeric code + message).
///
/// Constructed once, never mutated. Handler groups raise faults by
/// returning `Err(Fault)`; the dispatcher forwards them to the caller
/// verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fault {
    /// Numeric fault code (see [`fault_codes`]).
    pub code: i32,
    /// Human-readable message.
    pub message: String,
}

impl Fault {
    /// Creates a new fault.
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// A parse-error fault for a request body that could not be decoded.
    pub fn not_well_formed(message: impl Into<String>) -> Self {
        Self::new(fault_codes::parse_error::NOT_WELL_FORMED, message)
    }

    /// A server-error fault for an envelope that decoded but is not a
    /// valid request.
    pub fn invalid_rpc(message: impl Into<String>) -> Self {
        Self::new(fault_codes::server_error::INVALID_RPC, message)
    }

    /// A server-error fault for an unknown method name.
    pub fn method_not_found(method: &str) -> Self {
        Self::new(
            fault_codes::server_error::METHOD_NOT_FOUND,
            format!("no such method: {method:?}"),
        )
    }

    /// A server-error fault for invalid method parameters.
    pub fn invalid_params(message: impl Into<String>) -> Self {
        Self::new(
            fault_codes::server_error::INVALID_METHOD_PARAMETERS,
            message,
        )
    }

    /// The generic internal-error fault. Deliberately carries no detail
    /// about the underlying failure.
    pub fn internal_error() -> Self {
        Self::new(
            fault_codes::server_error::INTERNAL_RPC_ERROR,
            "internal server error",
        )
    }

    /// An application-band fault.
    pub fn application(message: impl Into<String>) -> Self {
        Self::new(fault_codes::APPLICATION_ERROR, message)
    }
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "fault {}: {}", self.code, self.message)
    }
}

impl std::error::Error for Fault {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_not_found_names_the_method() {
        let fault = Fault::method_not_found("does.not.exist");
        assert_eq!(fault.code, fault_codes::server_error::METHOD_NOT_FOUND);
        assert!(fault.message.contains("does.not.exist"));
    }

    #[test]
    fn internal_error_carries_no_detail() {
        let fault = Fault::internal_error();
        assert_eq!(fault.code, fault_codes::server_error::INTERNAL_RPC_ERROR);
        assert_eq!(fault.message, "internal server error");
    }

    #[test]
    fn fault_serde_roundtrip() {
        let fault = Fault::new(fault_codes::APPLICATION_ERROR, "boom");
        let json = serde_json::to_string(&fault).expect("ser");
        let back: Fault = serde_json::from_str(&json).expect("de");
        assert_eq!(back, fault);
    }
}
