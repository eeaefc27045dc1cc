//! # Depublic Config
//!
//! Configuration for the Depublic ticketing backend, layered from TOML files
//! and `DEPUBLIC_`-prefixed environment variables, with runtime reload.

mod app_config;
mod loader;

pub use app_config::*;
pub use loader::*;
