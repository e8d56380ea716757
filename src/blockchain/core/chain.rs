use crate::crypto::{self, link_hash, Sha256Hash};
use crate::error::ChainError;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::validation::verify_blocks;

/// Payload carried by the first block of every chain.
pub const GENESIS_PAYLOAD: &str = "Genesis Block";

/// A single ledger record.
///
/// Fields are fixed at construction; the stored hash always equals
/// `link_hash(previous_hash, payload, timestamp)` for blocks built here.
/// Blocks obtained through deserialization carry whatever hash they were
/// given and must go through [`verify_blocks`] before they are trusted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    timestamp: i64,
    #[serde(with = "serde_bytes")]
    payload: Vec<u8>,
    #[serde(with = "crypto::serde_hex_opt")]
    previous_hash: Option<Sha256Hash>,
    #[serde(with = "crypto::serde_hex")]
    hash: Sha256Hash,
}

impl Block {
    /// Builds a block stamped with the current wall-clock second.
    pub fn new(payload: &[u8], previous_hash: Option<Sha256Hash>) -> Self {
        let timestamp = chrono::Utc::now().timestamp();
        Self::with_timestamp(payload, previous_hash, timestamp)
    }

    pub fn with_timestamp(payload: &[u8], previous_hash: Option<Sha256Hash>, timestamp: i64) -> Self {
        let hash = link_hash(previous_hash.as_ref(), payload, timestamp);
        Block {
            timestamp,
            payload: payload.to_vec(),
            previous_hash,
            hash,
        }
    }

    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }

    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// `None` only for a genesis block.
    pub fn previous_hash(&self) -> Option<&Sha256Hash> {
        self.previous_hash.as_ref()
    }

    pub fn hash(&self) -> &Sha256Hash {
        &self.hash
    }

    /// Re-derives the digest from the block's current contents.
    pub fn calculate_hash(&self) -> Sha256Hash {
        link_hash(self.previous_hash.as_ref(), &self.payload, self.timestamp)
    }

    pub fn has_valid_hash(&self) -> bool {
        self.calculate_hash() == self.hash
    }
}

/// Append-only sequence of blocks, rooted at a genesis block.
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct Blockchain {
    blocks: Vec<Block>,
}

impl Default for Blockchain {
    fn default() -> Self {
        Self::new()
    }
}

impl Blockchain {
    /// Create a chain holding only the genesis block.
    pub fn new() -> Self {
        Blockchain {
            blocks: vec![Self::create_genesis_block()],
        }
    }

    fn create_genesis_block() -> Block {
        Block::new(GENESIS_PAYLOAD.as_bytes(), None)
    }

    /// Adopt an externally supplied block sequence after checking it end to end.
    pub fn from_blocks(blocks: Vec<Block>) -> Result<Self, ChainError> {
        if let Err(e) = verify_blocks(&blocks) {
            warn!("Rejecting imported chain of {} blocks: {}", blocks.len(), e);
            return Err(e);
        }
        Ok(Blockchain { blocks })
    }

    /// Appends a block linked to the current tip and returns it.
    pub fn append(&mut self, payload: impl AsRef<[u8]>) -> &Block {
        let previous_hash = *self.tip().hash();
        let block = Block::new(payload.as_ref(), Some(previous_hash));
        debug!(
            "Appending block {} ({} payload bytes, hash {})",
            self.blocks.len(),
            block.payload().len(),
            hex::encode(block.hash())
        );
        self.blocks.push(block);
        self.tip()
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Always false: the genesis block cannot be removed.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn genesis(&self) -> &Block {
        &self.blocks[0]
    }

    pub fn tip(&self) -> &Block {
        &self.blocks[self.blocks.len() - 1]
    }

    pub fn get(&self, index: usize) -> Option<&Block> {
        self.blocks.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Block> {
        self.blocks.iter()
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn verify(&self) -> Result<(), ChainError> {
        verify_blocks(&self.blocks)
    }
}

impl<'a> IntoIterator for &'a Blockchain {
    type Item = &'a Block;
    type IntoIter = std::slice::Iter<'a, Block>;

    fn into_iter(self) -> Self::IntoIter {
        self.blocks.iter()
    }
}
