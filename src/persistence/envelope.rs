//! Versioned JSON envelope
//!
//! `{ "version": N, "data": ... }`. Older versions are read as-is; newer ones
//! are rejected rather than half-loaded.

use serde::{Deserialize, Serialize, de::DeserializeOwned};

use super::error::DrillError;

/// Current on-disk format version
pub const FORMAT_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub version: u32,
    pub data: T,
}

impl<T: Serialize + DeserializeOwned> Envelope<T> {
    pub fn new(data: T) -> Self {
        Self {
            version: FORMAT_VERSION,
            data,
        }
    }

    pub fn to_json(&self) -> Result<String, DrillError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Decode and unwrap, checking the version first
    pub fn decode(json: &str) -> Result<T, DrillError> {
        #[derive(Deserialize)]
        struct Header {
            version: u32,
        }

        let header: Header = serde_json::from_str(json)?;
        if header.version > FORMAT_VERSION {
            return Err(DrillError::UnsupportedVersion {
                found: header.version,
                supported: FORMAT_VERSION,
            });
        }
        let envelope: Envelope<T> = serde_json::from_str(json)?;
        Ok(envelope.data)
    }
}
