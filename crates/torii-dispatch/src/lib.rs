//! # torii-dispatch
//!
//! The RPC dispatch core: the [`ExposedApi`] contract that handler groups
//! implement, the [`Mapper`] that resolves qualified method names, the
//! [`Dispatcher`] that runs one decode → resolve → invoke → encode cycle,
//! and the [`SystemApi`] introspection handler group.

pub mod api;
pub mod dispatcher;
pub mod identity;
pub mod mapper;
pub mod system;

pub use api::{ExposedApi, MethodDef, UNDECLARED_SIGNATURE};
pub use dispatcher::Dispatcher;
pub use identity::Identity;
pub use mapper::{BoundMethod, Mapper, Registration};
pub use system::SystemApi;
