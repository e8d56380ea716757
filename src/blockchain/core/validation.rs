use crate::error::ChainError;

use super::chain::{Block, GENESIS_PAYLOAD};

/// Checks a block sequence from genesis to tip.
///
/// Stops at the first failing block. Per block the order is: genesis
/// shape (or presence of a predecessor), stored hash against contents,
/// then the link to the preceding block.
pub fn verify_blocks(blocks: &[Block]) -> Result<(), ChainError> {
    let genesis = blocks.first().ok_or(ChainError::EmptyChain)?;
    validate_genesis(genesis)?;

    for (index, pair) in blocks.windows(2).enumerate() {
        let (prev, block) = (&pair[0], &pair[1]);
        let index = index + 1;

        let Some(previous_hash) = block.previous_hash() else {
            return Err(ChainError::InvalidBlockLinkage { index });
        };
        if !block.has_valid_hash() {
            return Err(ChainError::InvalidHash { index });
        }
        if previous_hash != prev.hash() {
            return Err(ChainError::InvalidBlockLinkage { index });
        }
    }
    Ok(())
}

fn validate_genesis(genesis: &Block) -> Result<(), ChainError> {
    if let Some(prev) = genesis.previous_hash() {
        return Err(ChainError::InvalidGenesis(format!(
            "expected no previous hash, found {}",
            hex::encode(prev)
        )));
    }
    if genesis.payload() != GENESIS_PAYLOAD.as_bytes() {
        return Err(ChainError::InvalidGenesis(format!(
            "unexpected payload {:?}",
            String::from_utf8_lossy(genesis.payload())
        )));
    }
    if !genesis.has_valid_hash() {
        return Err(ChainError::InvalidHash { index: 0 });
    }
    Ok(())
}
