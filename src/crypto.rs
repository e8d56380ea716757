//! Hashing primitives for HashLedger

use crate::error::ChainError;
use sha2::{Digest, Sha256};

/// A SHA-256 block digest.
pub type Sha256Hash = [u8; 32];

/// Computes the digest that links a block to its predecessor.
///
/// The input is the raw concatenation `previous ‖ payload ‖ decimal(timestamp)`
/// with no separators. A missing predecessor (the genesis block) contributes
/// no bytes at all.
pub fn link_hash(previous: Option<&Sha256Hash>, payload: &[u8], timestamp: i64) -> Sha256Hash {
    let mut hasher = Sha256::new();
    if let Some(prev) = previous {
        hasher.update(prev);
    }
    hasher.update(payload);
    hasher.update(timestamp.to_string().as_bytes());
    hasher.finalize().into()
}

/// Lowercase hex of a digest; the genesis predecessor renders as "".
pub fn hash_to_hex(hash: Option<&Sha256Hash>) -> String {
    hash.map(hex::encode).unwrap_or_default()
}

/// Convert a hex string to a digest.
pub fn hash_from_hex(hex_str: &str) -> Result<Sha256Hash, ChainError> {
    let bytes = hex::decode(hex_str)
        .map_err(|e| ChainError::SerializationError(format!("Invalid hex hash: {}", e)))?;
    if bytes.len() != 32 {
        return Err(ChainError::SerializationError(format!(
            "Hash must be 32 bytes, got {}",
            bytes.len()
        )));
    }
    bytes
        .try_into()
        .map_err(|_| ChainError::SerializationError("Failed to convert bytes into hash".to_string()))
}

/// Serde adapter writing a digest as a hex string.
pub mod serde_hex {
    use super::Sha256Hash;
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(hash: &Sha256Hash, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&hex::encode(hash))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Sha256Hash, D::Error> {
        let s = String::deserialize(deserializer)?;
        super::hash_from_hex(&s).map_err(D::Error::custom)
    }
}

/// Like [`serde_hex`], with the empty string standing for "no predecessor".
pub mod serde_hex_opt {
    use super::Sha256Hash;
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        hash: &Option<Sha256Hash>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::hash_to_hex(hash.as_ref()))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Sha256Hash>, D::Error> {
        let s = String::deserialize(deserializer)?;
        if s.is_empty() {
            return Ok(None);
        }
        super::hash_from_hex(&s).map(Some).map_err(D::Error::custom)
    }
}
