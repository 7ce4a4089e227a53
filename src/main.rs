//! Alpha vault setup CLI
//!
//! Creates and populates alpha vault deposit-escrow accounts ahead of a
//! pool launch: derives the vault address, builds the creation
//! instructions, and either simulates or broadcasts them. Whitelisted
//! stake escrows are created in batches for permissioned vaults.

#![deny(unused_imports)]
#![deny(unused_mut)]
#![warn(unused_must_use)]

use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::commitment_config::CommitmentConfig;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use alpha_vault_setup::cluster::Cluster;
use alpha_vault_setup::config::Config;
use alpha_vault_setup::vault::derive::derive_alpha_vault;
use alpha_vault_setup::vault::params::VaultTypeParams;
use alpha_vault_setup::vault::{
    create_fcfs_alpha_vault, create_permissioned_alpha_vault_with_authority,
    create_prorata_alpha_vault,
};
use alpha_vault_setup::wallet::WalletManager;
use alpha_vault_setup::whitelist::load_whitelist;

/// Command line arguments
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Simulate instead of broadcasting, regardless of config
    #[arg(long)]
    dry_run: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create a first-come-first-served alpha vault
    CreateFcfs,

    /// Create a pro-rata alpha vault
    CreateProrata,

    /// Create a permissioned vault and its whitelisted stake escrows
    CreatePermissioned,

    /// Print the derived alpha vault address without touching the chain
    Derive,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose)?;

    info!("Loading configuration from: {}", args.config);
    let config = Config::from_file_with_env(&args.config)?;

    let program_id = config.program_id()?;
    let cluster = Cluster::from_program_id(&program_id)?;
    info!(%cluster, %program_id, "Using alpha vault program");

    let wallet = WalletManager::from_file(&config.wallet.keypair_path)
        .context("Failed to load wallet")?;
    info!("Wallet address: {}", wallet.pubkey());

    let pool = config.pool()?;
    let base_mint = config.base_mint()?;
    let quote_mint = config.quote_mint()?;
    let dry_run = args.dry_run || config.vault.dry_run;

    if let Command::Derive = args.command {
        let (vault, bump) = derive_alpha_vault(&wallet.pubkey(), &pool, &program_id);
        println!("{vault} (bump {bump})");
        return Ok(());
    }

    let commitment = CommitmentConfig::from_str(&config.rpc.commitment)
        .map_err(|e| anyhow::anyhow!("Invalid commitment '{}': {e}", config.rpc.commitment))?;
    let rpc = RpcClient::new_with_timeout_and_commitment(
        config.rpc.url.clone(),
        Duration::from_secs(config.rpc.timeout_secs),
        commitment,
    );
    info!(url = %config.rpc.url, dry_run, "Connected RPC client");

    match args.command {
        Command::CreateFcfs => {
            let params = match config.vault_params()? {
                VaultTypeParams::Fcfs(p) => p,
                VaultTypeParams::Prorata(_) => {
                    anyhow::bail!("create-fcfs requires vault_type = \"fcfs\" in the config")
                }
            };
            create_fcfs_alpha_vault(
                &rpc,
                wallet.keypair(),
                config.vault.pool_type,
                pool,
                base_mint,
                quote_mint,
                config.vault.quote_decimals,
                &params,
                dry_run,
                config.vault.compute_unit_price_micro_lamports,
                program_id,
            )
            .await?;
        }
        Command::CreateProrata => {
            let params = match config.vault_params()? {
                VaultTypeParams::Prorata(p) => p,
                VaultTypeParams::Fcfs(_) => {
                    anyhow::bail!("create-prorata requires vault_type = \"prorata\" in the config")
                }
            };
            create_prorata_alpha_vault(
                &rpc,
                wallet.keypair(),
                config.vault.pool_type,
                pool,
                base_mint,
                quote_mint,
                config.vault.quote_decimals,
                &params,
                dry_run,
                config.vault.compute_unit_price_micro_lamports,
                program_id,
            )
            .await?;
        }
        Command::CreatePermissioned => {
            let whitelist_path = config
                .vault
                .whitelist_path
                .as_deref()
                .context("create-permissioned requires whitelist_path in the config")?;
            let whitelist = load_whitelist(whitelist_path, config.vault.quote_decimals)?;
            info!(wallet_count = whitelist.len(), "Loaded whitelist");

            let params = config.vault_params()?;
            let signatures = create_permissioned_alpha_vault_with_authority(
                &rpc,
                wallet.keypair(),
                config.vault.pool_type,
                pool,
                base_mint,
                quote_mint,
                config.vault.quote_decimals,
                &params,
                &whitelist,
                dry_run,
                config.vault.compute_unit_price_micro_lamports,
                program_id,
            )
            .await?;

            for signature in &signatures {
                println!("{signature}");
            }
        }
        Command::Derive => unreachable!("handled above"),
    }

    Ok(())
}

/// Initialize logging subsystem
fn init_logging(verbose: bool) -> Result<()> {
    let env_filter = if verbose {
        "alpha_vault_setup=debug,info"
    } else {
        "alpha_vault_setup=info,warn"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| env_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();

    Ok(())
}
