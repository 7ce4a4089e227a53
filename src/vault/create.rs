//! Top-level vault creation flows
//!
//! These functions are parameter translation plus submission: UI amounts
//! become native units, config enums become u8 discriminants, and the
//! resulting instruction goes out through the simulate-or-send path. All
//! cap, vesting, and whitelist enforcement happens on-chain.

use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::{
    account::Account,
    pubkey::Pubkey,
    signature::{Keypair, Signature, Signer},
};
use tracing::info;

use crate::cluster::{Cluster, MAX_ESCROW_CREATE_IXS_PER_TX};
use crate::vault::derive::derive_alpha_vault;
use crate::vault::errors::VaultSetupError;
use crate::vault::handle::AlphaVaultHandle;
use crate::vault::instructions::{
    initialize_fcfs_vault_ix, initialize_prorata_vault_ix, plan_with_compute_budget,
    stake_escrow_instructions, InitVaultArgs,
};
use crate::vault::params::{
    amount_to_lamports, FcfsVaultParams, PoolType, ProrataVaultParams, VaultTypeParams,
    WalletDepositCap, WhitelistMode,
};
use crate::vault::sender::{
    compile_transaction, send_instruction_batches, send_transaction, simulate_transaction,
};

/// A vault is only created when nothing lives at the derived address
pub fn needs_vault_creation(existing: Option<&Account>) -> bool {
    existing.is_none()
}

async fn submit_init_vault(
    rpc: &RpcClient,
    keypair: &Keypair,
    init_ix: solana_sdk::instruction::Instruction,
    cu_price_micro_lamports: u64,
    dry_run: bool,
    label: &str,
) -> Result<Option<Signature>, VaultSetupError> {
    let instructions = plan_with_compute_budget(cu_price_micro_lamports, vec![init_ix])?;
    let blockhash = rpc
        .get_latest_blockhash()
        .await
        .map_err(|e| VaultSetupError::Rpc(format!("failed to fetch blockhash: {e}")))?;
    let tx = compile_transaction(keypair, &instructions, blockhash)?;

    if dry_run {
        info!(label, "Simulating vault creation");
        simulate_transaction(rpc, &tx, label).await?;
        Ok(None)
    } else {
        info!(label, "Sending vault creation transaction");
        let signature = send_transaction(rpc, &tx, label).await?;
        info!(label, %signature, "Alpha vault initialized");
        Ok(Some(signature))
    }
}

/// Create a customizable first-come-first-served alpha vault
#[allow(clippy::too_many_arguments)]
pub async fn create_fcfs_alpha_vault(
    rpc: &RpcClient,
    keypair: &Keypair,
    pool_type: PoolType,
    pool: Pubkey,
    base_mint: Pubkey,
    quote_mint: Pubkey,
    quote_decimals: u8,
    params: &FcfsVaultParams,
    dry_run: bool,
    cu_price_micro_lamports: u64,
    program_id: Pubkey,
) -> Result<Option<Signature>, VaultSetupError> {
    let cluster = Cluster::from_program_id(&program_id)?;

    let max_depositing_cap = amount_to_lamports(params.max_deposit_cap, quote_decimals)?;
    let individual_depositing_cap =
        amount_to_lamports(params.individual_deposit_cap, quote_decimals)?;
    let escrow_fee = amount_to_lamports(params.escrow_fee, quote_decimals)?;

    info!(
        %cluster,
        ?pool_type,
        %pool,
        %base_mint,
        %quote_mint,
        depositing_point = params.depositing_point,
        start_vesting_point = params.start_vesting_point,
        end_vesting_point = params.end_vesting_point,
        max_deposit_cap_ui = params.max_deposit_cap,
        max_depositing_cap,
        individual_deposit_cap_ui = params.individual_deposit_cap,
        individual_depositing_cap,
        escrow_fee_ui = params.escrow_fee,
        escrow_fee,
        whitelist_mode = params.whitelist_mode.name(),
        "Initializing FCFS alpha vault"
    );

    let funder = keypair.pubkey();
    let (vault, _) = derive_alpha_vault(&funder, &pool, &program_id);
    let args = InitVaultArgs {
        pool_type,
        quote_mint,
        base_mint,
        depositing_point: params.depositing_point,
        start_vesting_point: params.start_vesting_point,
        end_vesting_point: params.end_vesting_point,
        escrow_fee,
        whitelist_mode: params.whitelist_mode,
    };
    let init_ix = initialize_fcfs_vault_ix(
        &program_id,
        &vault,
        &pool,
        &funder,
        &args,
        max_depositing_cap,
        individual_depositing_cap,
    );

    submit_init_vault(
        rpc,
        keypair,
        init_ix,
        cu_price_micro_lamports,
        dry_run,
        "init fcfs alpha vault",
    )
    .await
}

/// Create a customizable pro-rata alpha vault
#[allow(clippy::too_many_arguments)]
pub async fn create_prorata_alpha_vault(
    rpc: &RpcClient,
    keypair: &Keypair,
    pool_type: PoolType,
    pool: Pubkey,
    base_mint: Pubkey,
    quote_mint: Pubkey,
    quote_decimals: u8,
    params: &ProrataVaultParams,
    dry_run: bool,
    cu_price_micro_lamports: u64,
    program_id: Pubkey,
) -> Result<Option<Signature>, VaultSetupError> {
    let cluster = Cluster::from_program_id(&program_id)?;

    let max_buying_cap = amount_to_lamports(params.max_buying_cap, quote_decimals)?;
    let escrow_fee = amount_to_lamports(params.escrow_fee, quote_decimals)?;

    info!(
        %cluster,
        ?pool_type,
        %pool,
        %base_mint,
        %quote_mint,
        depositing_point = params.depositing_point,
        start_vesting_point = params.start_vesting_point,
        end_vesting_point = params.end_vesting_point,
        max_buying_cap_ui = params.max_buying_cap,
        max_buying_cap,
        escrow_fee_ui = params.escrow_fee,
        escrow_fee,
        whitelist_mode = params.whitelist_mode.name(),
        "Initializing pro-rata alpha vault"
    );

    let funder = keypair.pubkey();
    let (vault, _) = derive_alpha_vault(&funder, &pool, &program_id);
    let args = InitVaultArgs {
        pool_type,
        quote_mint,
        base_mint,
        depositing_point: params.depositing_point,
        start_vesting_point: params.start_vesting_point,
        end_vesting_point: params.end_vesting_point,
        escrow_fee,
        whitelist_mode: params.whitelist_mode,
    };
    let init_ix = initialize_prorata_vault_ix(
        &program_id,
        &vault,
        &pool,
        &funder,
        &args,
        max_buying_cap,
    );

    submit_init_vault(
        rpc,
        keypair,
        init_ix,
        cu_price_micro_lamports,
        dry_run,
        "init prorata alpha vault",
    )
    .await
}

/// Create a permissioned alpha vault and populate its whitelist
///
/// Only permission-with-authority vaults are supported here. The vault is
/// created when nothing exists at the derived address, then one stake
/// escrow is created per whitelisted wallet, batched into transactions.
#[allow(clippy::too_many_arguments)]
pub async fn create_permissioned_alpha_vault_with_authority(
    rpc: &RpcClient,
    keypair: &Keypair,
    pool_type: PoolType,
    pool: Pubkey,
    base_mint: Pubkey,
    quote_mint: Pubkey,
    quote_decimals: u8,
    params: &VaultTypeParams,
    whitelist: &[WalletDepositCap],
    dry_run: bool,
    cu_price_micro_lamports: u64,
    program_id: Pubkey,
) -> Result<Vec<Signature>, VaultSetupError> {
    let whitelist_mode = params.whitelist_mode();
    if whitelist_mode != WhitelistMode::PermissionWithAuthority {
        return Err(VaultSetupError::InvalidWhitelistMode(
            whitelist_mode.name().to_string(),
        ));
    }

    let payer = keypair.pubkey();
    let (vault, _) = derive_alpha_vault(&payer, &pool, &program_id);

    let existing = rpc
        .get_account_with_commitment(&vault, rpc.commitment())
        .await
        .map_err(|e| VaultSetupError::Rpc(format!("failed to fetch vault {vault}: {e}")))?
        .value;

    let vault_exists = !needs_vault_creation(existing.as_ref());
    if vault_exists {
        info!(%vault, "Alpha vault already exists");
    } else {
        match params {
            VaultTypeParams::Fcfs(fcfs) => {
                create_fcfs_alpha_vault(
                    rpc,
                    keypair,
                    pool_type,
                    pool,
                    base_mint,
                    quote_mint,
                    quote_decimals,
                    fcfs,
                    dry_run,
                    cu_price_micro_lamports,
                    program_id,
                )
                .await?;
            }
            VaultTypeParams::Prorata(prorata) => {
                create_prorata_alpha_vault(
                    rpc,
                    keypair,
                    pool_type,
                    pool,
                    base_mint,
                    quote_mint,
                    quote_decimals,
                    prorata,
                    dry_run,
                    cu_price_micro_lamports,
                    program_id,
                )
                .await?;
            }
        }
    }

    info!(
        %vault,
        wallet_count = whitelist.len(),
        "Creating stake escrow accounts"
    );

    // A dry run of a brand-new vault has no account to fetch; derive the
    // escrow instructions from the vault address alone in that case.
    let instructions = if vault_exists || !dry_run {
        let handle = AlphaVaultHandle::fetch(rpc, program_id, vault).await?;
        info!(mode = ?handle.mode, "Using existing vault state");
        handle.create_stake_escrow_by_authority_ixs(whitelist, &payer)
    } else {
        stake_escrow_instructions(&program_id, &vault, whitelist, &payer)
    };

    send_instruction_batches(
        rpc,
        keypair,
        instructions,
        MAX_ESCROW_CREATE_IXS_PER_TX,
        cu_price_micro_lamports,
        dry_run,
        "create stake escrow accounts",
    )
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_needs_vault_creation() {
        assert!(needs_vault_creation(None));

        let account = Account {
            lamports: 1,
            data: vec![],
            owner: Pubkey::new_unique(),
            executable: false,
            rent_epoch: 0,
        };
        assert!(!needs_vault_creation(Some(&account)));
    }
}
