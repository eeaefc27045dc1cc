//! # Depublic Core
//!
//! Core entities, typed identifiers, and error definitions shared by every
//! layer of the Depublic ticketing backend.

pub mod entities;
pub mod error;
pub mod id;
pub mod result;
pub mod telemetry;

pub use entities::*;
pub use error::*;
pub use id::*;
pub use result::*;
