//! Value Codec
//!
//! Serialization shared by the remote adapters.

use std::fmt::Debug;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{CacheError, Result};

// == Encode ==
/// Encodes a value as JSON, falling back to its `Debug` text when the value
/// cannot be represented as JSON (for example a map with non-string keys).
pub fn encode<V: Serialize + Debug>(value: &V) -> Vec<u8> {
    serde_json::to_vec(value).unwrap_or_else(|_| format!("{:?}", value).into_bytes())
}

// == Decode ==
/// Decodes a stored payload.
///
/// JSON payloads decode directly. Anything else is read as UTF-8 text and
/// decoded as a JSON string, so plain-text values written by other clients
/// still load into `String`-like types.
pub fn decode<V: DeserializeOwned>(bytes: &[u8]) -> Result<V> {
    if let Ok(value) = serde_json::from_slice(bytes) {
        return Ok(value);
    }
    let text = std::str::from_utf8(bytes)
        .map_err(|err| CacheError::Encoding(format!("payload is not UTF-8: {}", err)))?;
    serde_json::from_value(serde_json::Value::String(text.to_owned()))
        .map_err(|err| CacheError::Encoding(err.to_string()))
}

// == TTL ==
/// Converts a TTL to whole seconds, rounding up so a sub-second TTL still
/// expires. Returns None for "no expiration".
pub fn ttl_secs(ttl: Duration) -> Option<u64> {
    if ttl.is_zero() {
        return None;
    }
    let secs = ttl.as_secs() + u64::from(ttl.subsec_nanos() > 0);
    Some(secs.max(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use std::collections::BTreeMap;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Profile {
        name: String,
        visits: u32,
    }

    #[test]
    fn test_structured_value() {
        let profile = Profile {
            name: "ada".to_string(),
            visits: 3,
        };
        let bytes = encode(&profile);
        assert_eq!(bytes, br#"{"name":"ada","visits":3}"#);
        assert_eq!(decode::<Profile>(&bytes).unwrap(), profile);
    }

    #[test]
    fn test_plain_text_payload_decodes_as_string() {
        assert_eq!(decode::<String>(b"hello world").unwrap(), "hello world");
    }

    #[test]
    fn test_unencodable_value_falls_back_to_debug_text() {
        let mut map = BTreeMap::new();
        map.insert((1u8, 2u8), 3u8);

        assert_eq!(encode(&map), b"{(1, 2): 3}");
    }

    #[test]
    fn test_type_mismatch_is_encoding_failure() {
        let result = decode::<u32>(b"\"not a number\"");
        assert!(matches!(result, Err(CacheError::Encoding(_))));

        let result = decode::<u32>(&[0xff, 0xfe]);
        assert!(matches!(result, Err(CacheError::Encoding(_))));
    }

    #[test]
    fn test_ttl_secs() {
        assert_eq!(ttl_secs(Duration::ZERO), None);
        assert_eq!(ttl_secs(Duration::from_millis(1)), Some(1));
        assert_eq!(ttl_secs(Duration::from_secs(5)), Some(5));
        assert_eq!(ttl_secs(Duration::from_millis(5_200)), Some(6));
    }
}
