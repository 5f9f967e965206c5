//! # torii-store
//!
//! Port definitions (abstract traits) for the auth token store.
//! Adapter crates implement these traits.

pub mod store;
pub mod token;

pub use store::{StoreError, TokenStore};
pub use token::{generate_secret, AuthToken, Principal, SECRET_LEN};
