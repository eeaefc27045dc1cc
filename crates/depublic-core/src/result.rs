//! Result type aliases for Depublic.

use crate::DepublicError;

/// A specialized `Result` type for Depublic operations.
pub type DepublicResult<T> = Result<T, DepublicError>;
