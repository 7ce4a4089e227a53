//! Vault parameter types
//!
//! These are pass-through values: deposit caps, vesting points, and
//! whitelist modes are translated to native units and u8 discriminants,
//! then enforced entirely by the on-chain alpha vault program.

use serde::{Deserialize, Serialize};
use solana_sdk::pubkey::Pubkey;

use crate::vault::errors::VaultSetupError;

/// Pool flavor the vault is attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PoolType {
    /// DLMM pool
    Dlmm,
    /// Dynamic AMM pool
    Damm,
    /// DAMM v2 pool
    DammV2,
}

impl PoolType {
    /// On-chain discriminant
    pub fn as_u8(self) -> u8 {
        match self {
            Self::Dlmm => 0,
            Self::Damm => 1,
            Self::DammV2 => 2,
        }
    }
}

/// Deposit-allocation policy of an existing vault account
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VaultMode {
    /// Pro-rata allocation (mode byte 0)
    Prorata,
    /// First-come-first-served allocation
    Fcfs,
}

impl VaultMode {
    /// Map the on-chain mode byte: 0 is pro-rata, anything else FCFS
    pub fn from_mode_byte(byte: u8) -> Self {
        if byte == 0 {
            Self::Prorata
        } else {
            Self::Fcfs
        }
    }
}

/// Whitelist enforcement mode, passed through to the program
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WhitelistMode {
    Permissionless,
    PermissionWithMerkleProof,
    PermissionWithAuthority,
}

impl WhitelistMode {
    /// On-chain discriminant
    pub fn as_u8(self) -> u8 {
        match self {
            Self::Permissionless => 0,
            Self::PermissionWithMerkleProof => 1,
            Self::PermissionWithAuthority => 2,
        }
    }

    /// Config-facing name, used in error messages
    pub fn name(self) -> &'static str {
        match self {
            Self::Permissionless => "permissionless",
            Self::PermissionWithMerkleProof => "permission_with_merkle_proof",
            Self::PermissionWithAuthority => "permission_with_authority",
        }
    }
}

/// Parameters for a first-come-first-served vault
///
/// Cap and fee amounts are UI amounts in the quote token; they are scaled
/// by the quote decimals at instruction build time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FcfsVaultParams {
    /// Point (slot or timestamp, per pool activation type) when deposits open
    pub depositing_point: u64,

    /// Point when bought tokens start vesting
    pub start_vesting_point: u64,

    /// Point when vesting completes
    pub end_vesting_point: u64,

    /// Vault-wide deposit cap, UI amount
    pub max_deposit_cap: f64,

    /// Per-wallet deposit cap, UI amount
    pub individual_deposit_cap: f64,

    /// Fee charged on escrow creation, UI amount
    #[serde(default)]
    pub escrow_fee: f64,

    /// Whitelist enforcement mode
    pub whitelist_mode: WhitelistMode,
}

/// Parameters for a pro-rata vault
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProrataVaultParams {
    /// Point when deposits open
    pub depositing_point: u64,

    /// Point when bought tokens start vesting
    pub start_vesting_point: u64,

    /// Point when vesting completes
    pub end_vesting_point: u64,

    /// Vault-wide buying cap, UI amount
    pub max_buying_cap: f64,

    /// Fee charged on escrow creation, UI amount
    #[serde(default)]
    pub escrow_fee: f64,

    /// Whitelist enforcement mode
    pub whitelist_mode: WhitelistMode,
}

/// Which creation path a permissioned setup should take
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlphaVaultType {
    Fcfs,
    Prorata,
}

/// Type flag plus the matching parameter table
#[derive(Debug, Clone)]
pub enum VaultTypeParams {
    Fcfs(FcfsVaultParams),
    Prorata(ProrataVaultParams),
}

impl VaultTypeParams {
    /// The type flag this parameter set selects
    pub fn vault_type(&self) -> AlphaVaultType {
        match self {
            Self::Fcfs(_) => AlphaVaultType::Fcfs,
            Self::Prorata(_) => AlphaVaultType::Prorata,
        }
    }

    /// Whitelist mode shared by both parameter tables
    pub fn whitelist_mode(&self) -> WhitelistMode {
        match self {
            Self::Fcfs(p) => p.whitelist_mode,
            Self::Prorata(p) => p.whitelist_mode,
        }
    }
}

/// Per-wallet deposit cap for authority-created stake escrows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalletDepositCap {
    /// Wallet the escrow is created for
    pub address: Pubkey,

    /// Deposit cap in native quote units
    pub max_amount: u64,
}

/// Convert a UI amount to native token units
///
/// Rejects negative, non-finite, and overflowing amounts instead of
/// truncating silently. Fractional dust below one native unit rounds to
/// the nearest unit.
pub fn amount_to_lamports(ui_amount: f64, decimals: u8) -> Result<u64, VaultSetupError> {
    if !ui_amount.is_finite() {
        return Err(VaultSetupError::AmountConversion(format!(
            "amount {ui_amount} is not finite"
        )));
    }
    if ui_amount < 0.0 {
        return Err(VaultSetupError::AmountConversion(format!(
            "amount {ui_amount} is negative"
        )));
    }

    let scaled = ui_amount * 10f64.powi(i32::from(decimals));
    if scaled >= u64::MAX as f64 {
        return Err(VaultSetupError::AmountConversion(format!(
            "amount {ui_amount} with {decimals} decimals overflows u64"
        )));
    }

    Ok(scaled.round() as u64)
}
