//! Encoding of cached values.

use super::CacheError;
use serde::{de::DeserializeOwned, Serialize};

/// Converts typed values to and from the bytes held by a [`CacheStore`].
///
/// [`CacheStore`]: super::CacheStore
pub trait CacheCodec: Send + Sync {
    /// Encodes `value` for storage.
    fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<Vec<u8>, CacheError>;

    /// Decodes a stored payload. Any mismatch with `T` is [`CacheError::Corrupt`].
    fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T, CacheError>;
}

/// JSON codec.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl CacheCodec for JsonCodec {
    fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<Vec<u8>, CacheError> {
        serde_json::to_vec(value).map_err(|e| CacheError::Encode(e.to_string()))
    }

    fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T, CacheError> {
        serde_json::from_slice(bytes).map_err(|e| CacheError::Corrupt(e.to_string()))
    }
}
