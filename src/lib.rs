//! HashLedger - an append-only ledger where every block commits to its predecessor
//!
//! # Architecture
//!
//! ## Core Ledger
//! - [`blockchain`] - Blocks, the chain container and integrity verification
//! - [`crypto`] - SHA-256 link hashing and hex helpers
//!
//! ## Interface
//! - [`cli`] - Interactive console, scripted demo and chain rendering
//!
//! ## Configuration & Utilities
//! - [`config`] - Configuration management
//! - [`error`] - Error types

#![forbid(unsafe_code)]

// ============================================================================
// Core Ledger
// ============================================================================
pub mod blockchain;
pub mod crypto;

// ============================================================================
// Interface
// ============================================================================
pub mod cli;

// ============================================================================
// Configuration & Utilities
// ============================================================================
pub mod config;
pub mod error;
