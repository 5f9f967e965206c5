//! HTTP transport adapter for the torii RPC dispatch service.
//! Exposes dispatch over `POST /rpc` with Bearer token authentication
//! and a JSON service description on `GET /rpc`.

pub mod auth;
mod error;
pub mod router;
pub mod server;

pub use error::HttpTransportError;
pub use router::{build_router, AppState};
pub use server::HttpServer;
