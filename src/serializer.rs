//! Serialization layer. Defaults to JSON via serde_json.
//!
//! Implement [`Serializer`] if you need a different format.

use crate::error::{Error, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Converts documents to/from bytes for persistence.
pub trait Serializer: Send + Sync {
    /// Encode a value to bytes.
    fn serialize<T: Serialize>(&self, value: &T) -> Result<Vec<u8>>;

    /// Decode bytes back into a value.
    fn deserialize<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T>;
}

/// JSON serializer with optional pretty-printing.
#[derive(Debug, Clone, Default)]
pub struct JsonSerializer {
    pretty: bool,
}

impl JsonSerializer {
    /// Compact JSON (single line, no extra whitespace).
    pub fn new() -> Self {
        Self::default()
    }

    /// Pretty-printed JSON with indentation, easier to read by hand.
    pub fn pretty() -> Self {
        Self { pretty: true }
    }

    /// Whether output is indented.
    pub fn is_pretty(&self) -> bool {
        self.pretty
    }
}

impl Serializer for JsonSerializer {
    fn serialize<T: Serialize>(&self, value: &T) -> Result<Vec<u8>> {
        let bytes = if self.pretty {
            serde_json::to_vec_pretty(value)
        } else {
            serde_json::to_vec(value)
        };
        bytes.map_err(|e| Error::Serialize(e.to_string()))
    }

    fn deserialize<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T> {
        serde_json::from_slice(bytes).map_err(|e| Error::Deserialize(e.to_string()))
    }
}
