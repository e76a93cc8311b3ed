use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::StorageError;

/// A validated opaque storage key: 32 lowercase hex characters.
///
/// Keys are random, not derived from content, so every stored blob gets
/// its own handle even when two uploads carry identical bytes.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct BlobKey(String);

impl BlobKey {
    /// Generate a fresh random key.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    /// Parse a key received from the outside (URL path, database row).
    pub fn parse(s: &str) -> Result<Self, StorageError> {
        if s.len() != 32 {
            return Err(StorageError::InvalidKey(format!(
                "expected 32 characters, got {}",
                s.len()
            )));
        }

        if !s.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f')) {
            return Err(StorageError::InvalidKey(
                "keys contain only lowercase hex characters".into(),
            ));
        }

        Ok(Self(s.to_string()))
    }

    /// Return the key as its 32-character string form.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Return the first 2 characters (shard directory for filesystem layout).
    pub fn shard_prefix(&self) -> &str {
        &self.0[..2]
    }

    /// Return the remaining 30 characters (filename within shard).
    pub fn shard_suffix(&self) -> &str {
        &self.0[2..]
    }
}

impl fmt::Debug for BlobKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BlobKey({})", self.0)
    }
}

impl fmt::Display for BlobKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for BlobKey {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for BlobKey {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}
