// Thin re-export module: implementation is in `blockchain/core.rs`, split into
// block/chain management and integrity verification.

pub mod core;
pub use core::*;
