//! Alpha vault setup component
//!
//! Client-side orchestration for creating deposit-escrow "alpha vaults"
//! ahead of a pool launch. Split into focused modules:
//! - **errors**: error taxonomy for the whole setup lifecycle
//! - **params**: pass-through parameter types and amount conversion
//! - **derive**: PDA derivation (vault, stake escrow, event authority)
//! - **instructions**: Anchor-convention instruction construction
//! - **state**: minimal on-chain vault account decoding
//! - **handle**: fetched-vault handle for follow-up instructions
//! - **sender**: compile, simulate, send, and batch submission
//! - **create**: the top-level FCFS / pro-rata / permissioned flows

pub mod create;
pub mod derive;
pub mod errors;
pub mod handle;
pub mod instructions;
pub mod params;
pub mod sender;
pub mod state;

pub use create::{
    create_fcfs_alpha_vault, create_permissioned_alpha_vault_with_authority,
    create_prorata_alpha_vault, needs_vault_creation,
};
pub use errors::VaultSetupError;
pub use handle::AlphaVaultHandle;
pub use params::{
    AlphaVaultType, FcfsVaultParams, PoolType, ProrataVaultParams, VaultMode, VaultTypeParams,
    WalletDepositCap, WhitelistMode,
};
