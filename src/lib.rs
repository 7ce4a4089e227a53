//! Alpha vault setup library
//!
//! Client-side orchestration for creating and populating alpha vault
//! deposit-escrow accounts ahead of a pool launch. All vault semantics
//! (caps, vesting, whitelist enforcement) live in the on-chain program;
//! this crate only derives addresses, builds instructions, and submits or
//! simulates the resulting transactions.

pub mod cluster;
pub mod config;
pub mod vault;
pub mod wallet;
pub mod whitelist;

// Re-export commonly used types
pub use cluster::Cluster;
pub use vault::VaultSetupError;
pub use wallet::WalletManager;
