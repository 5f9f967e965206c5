//! Request and response envelope types.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::fault::Fault;

/// A decoded RPC request: a qualified method name plus positional
/// parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcRequest {
    /// Qualified method name (`namespace.method` or bare `method`).
    pub method: String,
    /// Positional parameters.
    #[serde(default)]
    pub params: Vec<Value>,
}

impl RpcRequest {
    /// Creates a new request.
    pub fn new(method: impl Into<String>, params: Vec<Value>) -> Self {
        Self {
            method: method.into(),
            params,
        }
    }

    /// Encodes the request as JSON bytes.
    ///
    /// The inverse of `Dispatcher::decode_request`; used by clients and
    /// tests.
    pub fn encode(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }
}

/// A response envelope: either a single result value or a fault.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RpcResponse {
    /// Successful call; the method's single return value.
    Success {
        /// The return value.
        result: Value,
    },
    /// Failed call.
    Fault {
        /// The fault describing the failure.
        fault: Fault,
    },
}

impl RpcResponse {
    /// Wraps a return value in a success envelope.
    pub fn success(result: Value) -> Self {
        Self::Success { result }
    }

    /// Wraps a fault in a fault envelope.
    pub fn fault(fault: Fault) -> Self {
        Self::Fault { fault }
    }

    /// Unwraps the envelope into a `Result`, the shape callers consume.
    pub fn into_result(self) -> Result<Value, Fault> {
        match self {
            Self::Success { result } => Ok(result),
            Self::Fault { fault } => Err(fault),
        }
    }
}
