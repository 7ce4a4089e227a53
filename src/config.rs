//! Configuration module for the alpha vault setup tool
//!
//! All configuration is loaded from a TOML file, with environment
//! variables available through dotenv before parsing.

use std::str::FromStr;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use solana_sdk::pubkey::Pubkey;

use crate::cluster::Cluster;
use crate::vault::params::{
    AlphaVaultType, FcfsVaultParams, PoolType, ProrataVaultParams, VaultTypeParams,
};

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// RPC endpoint configuration
    pub rpc: RpcConfig,

    /// Wallet configuration
    pub wallet: WalletConfig,

    /// Vault creation configuration
    pub vault: VaultConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcConfig {
    /// RPC endpoint URL
    pub url: String,

    /// Commitment level for fetches and confirmation
    #[serde(default = "default_commitment")]
    pub commitment: String,

    /// Request timeout in seconds
    #[serde(default = "default_rpc_timeout")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalletConfig {
    /// Path to keypair file (raw 64-byte or JSON array format)
    pub keypair_path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VaultConfig {
    /// Alpha vault program id override; defaults to the mainnet-beta deploy
    #[serde(default)]
    pub program_id: Option<String>,

    /// Pool the vault gates deposits for
    pub pool: String,

    /// Base (launched) token mint
    pub base_mint: String,

    /// Quote token mint
    pub quote_mint: String,

    /// Decimal precision of the quote token
    pub quote_decimals: u8,

    /// Pool flavor
    pub pool_type: PoolType,

    /// Which creation path to take
    pub vault_type: AlphaVaultType,

    /// Simulate instead of broadcasting
    #[serde(default)]
    pub dry_run: bool,

    /// Priority fee attached to every transaction
    #[serde(default = "default_cu_price")]
    pub compute_unit_price_micro_lamports: u64,

    /// Whitelist file for permissioned vaults (JSON)
    #[serde(default)]
    pub whitelist_path: Option<String>,

    /// FCFS parameter table, required when vault_type = "fcfs"
    #[serde(default)]
    pub fcfs: Option<FcfsVaultParams>,

    /// Pro-rata parameter table, required when vault_type = "prorata"
    #[serde(default)]
    pub prorata: Option<ProrataVaultParams>,
}

// Default value functions
fn default_commitment() -> String {
    "confirmed".to_string()
}
fn default_rpc_timeout() -> u64 {
    60
}
fn default_cu_price() -> u64 {
    100_000
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {path}"))?;
        let config: Config =
            toml::from_str(&content).with_context(|| format!("Failed to parse config: {path}"))?;
        Ok(config)
    }

    /// Load configuration with environment variables available
    pub fn from_file_with_env(path: &str) -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_file(path)
    }

    /// Effective alpha vault program id
    pub fn program_id(&self) -> anyhow::Result<Pubkey> {
        match &self.vault.program_id {
            Some(id) => {
                Pubkey::from_str(id).with_context(|| format!("Invalid program id: {id}"))
            }
            None => Ok(Cluster::MainnetBeta.alpha_vault_program_id()),
        }
    }

    /// Pool address
    pub fn pool(&self) -> anyhow::Result<Pubkey> {
        Pubkey::from_str(&self.vault.pool)
            .with_context(|| format!("Invalid pool address: {}", self.vault.pool))
    }

    /// Base mint address
    pub fn base_mint(&self) -> anyhow::Result<Pubkey> {
        Pubkey::from_str(&self.vault.base_mint)
            .with_context(|| format!("Invalid base mint: {}", self.vault.base_mint))
    }

    /// Quote mint address
    pub fn quote_mint(&self) -> anyhow::Result<Pubkey> {
        Pubkey::from_str(&self.vault.quote_mint)
            .with_context(|| format!("Invalid quote mint: {}", self.vault.quote_mint))
    }

    /// Parameter table matching the configured vault type
    pub fn vault_params(&self) -> anyhow::Result<VaultTypeParams> {
        match self.vault.vault_type {
            AlphaVaultType::Fcfs => self
                .vault
                .fcfs
                .clone()
                .map(VaultTypeParams::Fcfs)
                .context("vault_type is \"fcfs\" but no [vault.fcfs] table is present"),
            AlphaVaultType::Prorata => self
                .vault
                .prorata
                .clone()
                .map(VaultTypeParams::Prorata)
                .context("vault_type is \"prorata\" but no [vault.prorata] table is present"),
        }
    }
}
