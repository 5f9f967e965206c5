//! # torii-protocol
//!
//! Wire envelope and fault taxonomy for the torii RPC dispatch service.
//! This crate defines the serialized shape of requests, responses and
//! faults; it carries no dispatch logic of its own.

pub mod envelope;
pub mod fault;

pub use envelope::{RpcRequest, RpcResponse};
pub use fault::{fault_codes, Fault};
