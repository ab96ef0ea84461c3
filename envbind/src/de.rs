//! Structured decoding for sequence, mapping and record fields

use serde::de::DeserializeOwned;

use crate::error::BoxError;

/// Decode a JSON document into a fresh value of `T`.
///
/// Used by the built-in coercions of the structured kinds and by
/// `#[derive(Record)]` for records marked `#[env(json)]`.
#[doc(hidden)]
pub fn from_json<T: DeserializeOwned>(raw: &str) -> Result<T, BoxError> {
    serde_json::from_str(raw).map_err(Into::into)
}
