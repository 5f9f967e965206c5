//! Axum router for the RPC transport.
//! Routes: `POST /rpc` (dispatch), `GET /rpc` (service description),
//! `GET /health` (liveness), `GET /health/ready` (readiness).

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};

use torii_dispatch::{Dispatcher, Mapper, UNDECLARED_SIGNATURE};
use torii_store::TokenStore;

use crate::auth::{self, AuthError};

/// Shared state threaded through all axum handlers.
#[derive(Clone)]
pub struct AppState {
    /// The RPC dispatcher.
    pub dispatcher: Arc<Dispatcher>,
    /// The mapper behind the dispatcher, for the service description.
    pub mapper: Arc<Mapper>,
    /// Token store used for Bearer authentication.
    pub store: Arc<dyn TokenStore>,
}

/// Builds the axum `Router` with all RPC routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/rpc", get(handle_describe).post(handle_rpc))
        .route("/health", get(handle_health))
        .route("/health/ready", get(handle_ready))
        .with_state(state)
}

async fn handle_health() -> impl IntoResponse {
    Json(json!({"status": "ok", "service": "torii"}))
}

/// Readiness probe, returns `200 OK` once the server accepts requests.
async fn handle_ready() -> impl IntoResponse {
    Json(json!({"status": "ready", "service": "torii"}))
}

async fn handle_rpc(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> impl IntoResponse {
    let identity = match auth::authenticate(&headers, state.store.as_ref()).await {
        Ok(identity) => identity,
        Err(AuthError::Unauthorized) => {
            return (
                StatusCode::UNAUTHORIZED,
                Json(json!({"error": "unauthorized"})),
            )
                .into_response();
        }
        Err(AuthError::StoreUnavailable) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": "authentication backend unavailable"})),
            )
                .into_response();
        }
    };

    // Faults ride inside the response envelope; the HTTP status is 200
    // for anything that reached the dispatcher.
    let response = state.dispatcher.marshalled_dispatch(&body, identity);
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        response,
    )
        .into_response()
}

/// Human-readable service description: every exposed method with its
/// declared signature and documentation.
async fn handle_describe(State(state): State<AppState>) -> impl IntoResponse {
    let methods: Vec<Value> = state
        .mapper
        .list_methods()
        .into_iter()
        .map(|name| {
            let (signature, help) = match state.mapper.lookup(&name, None) {
                Some(bound) => {
                    let descriptor = bound.descriptor();
                    (descriptor.signature_value(), descriptor.help())
                }
                None => (json!(UNDECLARED_SIGNATURE), String::new()),
            };
            json!({"name": name, "signature": signature, "help": help})
        })
        .collect();
    Json(json!({"service": "torii", "methods": methods}))
}
