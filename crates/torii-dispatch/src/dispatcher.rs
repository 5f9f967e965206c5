//! One-shot request orchestration: decode → resolve → invoke → encode.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

use serde_json::Value;

use torii_protocol::{Fault, RpcRequest, RpcResponse};

use crate::identity::Identity;
use crate::mapper::Mapper;

/// Emergency response body used if serializing a response ever fails.
const FALLBACK_FAULT_BODY: &[u8] =
    br#"{"fault":{"code":-32603,"message":"internal server error"}}"#;

type InternalErrorHook = Box<dyn Fn(&str, &[Value]) + Send + Sync>;

/// Dispatches serialized RPC requests against a [`Mapper`].
///
/// Application-raised faults pass through to the caller verbatim. Any
/// other failure during invocation (a panic) is reported through the
/// internal-error hook and replaced by the generic internal-error fault;
/// the caller never sees the underlying detail.
pub struct Dispatcher {
    mapper: Arc<Mapper>,
    allow_nil: bool,
    internal_error_hook: InternalErrorHook,
}

impl Dispatcher {
    /// Creates a dispatcher over the given mapper.
    ///
    /// `null` values are permitted in responses by default; the
    /// internal-error hook logs via `tracing`.
    pub fn new(mapper: Arc<Mapper>) -> Self {
        Self {
            mapper,
            allow_nil: true,
            internal_error_hook: Box::new(|method, params| {
                tracing::error!(
                    method,
                    params = %serde_json::Value::Array(params.to_vec()),
                    "unhandled failure while dispatching method"
                );
            }),
        }
    }

    /// Sets whether `null` may appear in an encoded success response.
    pub fn with_allow_nil(mut self, allow_nil: bool) -> Self {
        self.allow_nil = allow_nil;
        self
    }

    /// Replaces the hook invoked when a handler fails unexpectedly.
    ///
    /// The hook observes the method name and parameters; it cannot
    /// prevent the internal-error fault from being returned.
    pub fn with_internal_error_hook(
        mut self,
        hook: impl Fn(&str, &[Value]) + Send + Sync + 'static,
    ) -> Self {
        self.internal_error_hook = Box::new(hook);
        self
    }

    /// Decodes a serialized request into `(method_name, params)`.
    ///
    /// # Errors
    ///
    /// A body that is not valid JSON yields a parse-error fault; valid
    /// JSON that is not a request envelope yields an invalid-request
    /// fault. Decoder detail is logged server-side, never echoed back.
    pub fn decode_request(&self, data: &[u8]) -> Result<(String, Vec<Value>), Fault> {
        let value: Value = serde_json::from_slice(data).map_err(|e| {
            tracing::debug!(error = %e, "request body is not well formed");
            Fault::not_well_formed("unable to decode request")
        })?;
        let request: RpcRequest = serde_json::from_value(value).map_err(|e| {
            tracing::debug!(error = %e, "request body is not a valid rpc envelope");
            Fault::invalid_rpc("unable to decode request")
        })?;
        Ok((request.method, request.params))
    }

    /// Resolves and invokes a method with positional parameters.
    ///
    /// # Errors
    ///
    /// Resolution misses yield a method-not-found fault naming the
    /// attempted method. Faults raised by the handler propagate
    /// unchanged. A panicking handler is reported through the
    /// internal-error hook and yields the generic internal-error fault.
    pub fn dispatch(
        &self,
        method: &str,
        params: &[Value],
        identity: Option<Identity>,
    ) -> Result<Value, Fault> {
        let bound = self
            .mapper
            .lookup(method, identity)
            .ok_or_else(|| Fault::method_not_found(method))?;
        match catch_unwind(AssertUnwindSafe(|| bound.invoke(params))) {
            Ok(outcome) => outcome,
            Err(_) => {
                (self.internal_error_hook)(method, params);
                Err(Fault::internal_error())
            }
        }
    }

    /// Dispatches a serialized request and returns the serialized
    /// response, success or fault. The single public entry point for
    /// transport code.
    pub fn marshalled_dispatch(&self, data: &[u8], identity: Option<Identity>) -> Vec<u8> {
        let outcome = self
            .decode_request(data)
            .and_then(|(method, params)| self.dispatch(&method, &params, identity));
        let response = match outcome {
            Ok(value) if !self.allow_nil && contains_null(&value) => {
                tracing::error!("response contains nil but nil is not allowed");
                RpcResponse::fault(Fault::internal_error())
            }
            Ok(value) => RpcResponse::success(value),
            Err(fault) => RpcResponse::fault(fault),
        };
        encode_response(&response)
    }
}

/// Serializes a response envelope, falling back to a pre-encoded
/// internal-error fault if serialization itself fails.
fn encode_response(response: &RpcResponse) -> Vec<u8> {
    serde_json::to_vec(response).unwrap_or_else(|e| {
        tracing::error!(error = %e, "failed to serialize rpc response");
        FALLBACK_FAULT_BODY.to_vec()
    })
}

/// True if the value is or contains a JSON `null`.
fn contains_null(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Array(items) => items.iter().any(contains_null),
        Value::Object(map) => map.values().any(contains_null),
        _ => false,
    }
}
