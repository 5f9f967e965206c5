//! CLI subcommand implementations.

pub mod methods;
pub mod principal;
pub mod serve;
pub mod token;
