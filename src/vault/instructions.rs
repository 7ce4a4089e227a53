//! Alpha vault instruction construction
//!
//! Instructions follow the Anchor wire convention: an 8-byte discriminator
//! (`sha256("global:<name>")[..8]`) followed by little-endian encoded
//! arguments in declaration order. Account lists end with the event
//! authority PDA and the program id (event-CPI convention).
//!
//! All amounts here are native units; UI-amount scaling happens in the
//! creation layer before instructions are built.

use sha2::{Digest, Sha256};
use solana_sdk::{
    compute_budget::ComputeBudgetInstruction,
    instruction::{AccountMeta, Instruction},
    pubkey::Pubkey,
    system_program,
};

use crate::vault::derive::{derive_event_authority, derive_stake_escrow};
use crate::vault::errors::VaultSetupError;
use crate::vault::params::{PoolType, WalletDepositCap, WhitelistMode};

const INIT_FCFS_VAULT_IX: &str = "initialize_customizable_fcfs_vault";
const INIT_PRORATA_VAULT_IX: &str = "initialize_customizable_prorata_vault";
const CREATE_PERMISSIONED_ESCROW_IX: &str = "create_permissioned_escrow_with_authority";

/// First 8 bytes of `sha256("<namespace>:<name>")`
pub fn anchor_discriminator(namespace: &str, name: &str) -> [u8; 8] {
    let mut hasher = Sha256::new();
    hasher.update(namespace.as_bytes());
    hasher.update(b":");
    hasher.update(name.as_bytes());
    let digest = hasher.finalize();
    let mut disc = [0u8; 8];
    disc.copy_from_slice(&digest[..8]);
    disc
}

/// Arguments shared by both vault creation instructions
#[derive(Debug, Clone)]
pub struct InitVaultArgs {
    pub pool_type: PoolType,
    pub quote_mint: Pubkey,
    pub base_mint: Pubkey,
    pub depositing_point: u64,
    pub start_vesting_point: u64,
    pub end_vesting_point: u64,
    pub escrow_fee: u64,
    pub whitelist_mode: WhitelistMode,
}

impl InitVaultArgs {
    fn encode_prefix(&self, data: &mut Vec<u8>) {
        data.push(self.pool_type.as_u8());
        data.extend_from_slice(self.quote_mint.as_ref());
        data.extend_from_slice(self.base_mint.as_ref());
        data.extend_from_slice(&self.depositing_point.to_le_bytes());
        data.extend_from_slice(&self.start_vesting_point.to_le_bytes());
        data.extend_from_slice(&self.end_vesting_point.to_le_bytes());
    }

    fn encode_suffix(&self, data: &mut Vec<u8>) {
        data.extend_from_slice(&self.escrow_fee.to_le_bytes());
        data.push(self.whitelist_mode.as_u8());
    }
}

fn init_vault_accounts(
    vault: &Pubkey,
    pool: &Pubkey,
    funder: &Pubkey,
    program_id: &Pubkey,
) -> Vec<AccountMeta> {
    let (event_authority, _) = derive_event_authority(program_id);
    vec![
        AccountMeta::new(*vault, false),
        AccountMeta::new_readonly(*pool, false),
        AccountMeta::new(*funder, true),
        AccountMeta::new_readonly(system_program::id(), false),
        AccountMeta::new_readonly(event_authority, false),
        AccountMeta::new_readonly(*program_id, false),
    ]
}

/// Build the customizable FCFS vault creation instruction
pub fn initialize_fcfs_vault_ix(
    program_id: &Pubkey,
    vault: &Pubkey,
    pool: &Pubkey,
    funder: &Pubkey,
    args: &InitVaultArgs,
    max_depositing_cap: u64,
    individual_depositing_cap: u64,
) -> Instruction {
    let mut data = Vec::with_capacity(8 + 1 + 32 + 32 + 8 * 6 + 1);
    data.extend_from_slice(&anchor_discriminator("global", INIT_FCFS_VAULT_IX));
    args.encode_prefix(&mut data);
    data.extend_from_slice(&max_depositing_cap.to_le_bytes());
    data.extend_from_slice(&individual_depositing_cap.to_le_bytes());
    args.encode_suffix(&mut data);

    Instruction {
        program_id: *program_id,
        accounts: init_vault_accounts(vault, pool, funder, program_id),
        data,
    }
}

/// Build the customizable pro-rata vault creation instruction
pub fn initialize_prorata_vault_ix(
    program_id: &Pubkey,
    vault: &Pubkey,
    pool: &Pubkey,
    funder: &Pubkey,
    args: &InitVaultArgs,
    max_buying_cap: u64,
) -> Instruction {
    let mut data = Vec::with_capacity(8 + 1 + 32 + 32 + 8 * 5 + 1);
    data.extend_from_slice(&anchor_discriminator("global", INIT_PRORATA_VAULT_IX));
    args.encode_prefix(&mut data);
    data.extend_from_slice(&max_buying_cap.to_le_bytes());
    args.encode_suffix(&mut data);

    Instruction {
        program_id: *program_id,
        accounts: init_vault_accounts(vault, pool, funder, program_id),
        data,
    }
}

/// Build an authority-created stake escrow instruction for one wallet
pub fn create_permissioned_escrow_with_authority_ix(
    program_id: &Pubkey,
    vault: &Pubkey,
    escrow: &Pubkey,
    owner: &Pubkey,
    payer: &Pubkey,
    max_cap: u64,
) -> Instruction {
    let (event_authority, _) = derive_event_authority(program_id);

    let mut data = Vec::with_capacity(8 + 8);
    data.extend_from_slice(&anchor_discriminator("global", CREATE_PERMISSIONED_ESCROW_IX));
    data.extend_from_slice(&max_cap.to_le_bytes());

    Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new(*vault, false),
            AccountMeta::new(*escrow, false),
            AccountMeta::new_readonly(*owner, false),
            AccountMeta::new(*payer, true),
            AccountMeta::new_readonly(system_program::id(), false),
            AccountMeta::new_readonly(event_authority, false),
            AccountMeta::new_readonly(*program_id, false),
        ],
        data,
    }
}

/// Build one stake-escrow creation instruction per whitelisted wallet
///
/// Escrow addresses are derived per wallet; caps are native quote units.
pub fn stake_escrow_instructions(
    program_id: &Pubkey,
    vault: &Pubkey,
    whitelist: &[WalletDepositCap],
    payer: &Pubkey,
) -> Vec<Instruction> {
    whitelist
        .iter()
        .map(|entry| {
            let (escrow, _) = derive_stake_escrow(vault, &entry.address, program_id);
            create_permissioned_escrow_with_authority_ix(
                program_id,
                vault,
                &escrow,
                &entry.address,
                payer,
                entry.max_amount,
            )
        })
        .collect()
}

/// Prepend the compute-unit price instruction when a priority fee is set
///
/// Program instructions must come after any compute budget instruction, and
/// the list must not be empty.
pub fn plan_with_compute_budget(
    cu_price_micro_lamports: u64,
    program_ixs: Vec<Instruction>,
) -> Result<Vec<Instruction>, VaultSetupError> {
    if program_ixs.is_empty() {
        return Err(VaultSetupError::Configuration(
            "No program instructions to submit".to_string(),
        ));
    }

    let mut instructions = Vec::with_capacity(program_ixs.len() + 1);
    if cu_price_micro_lamports > 0 {
        instructions.push(ComputeBudgetInstruction::set_compute_unit_price(
            cu_price_micro_lamports,
        ));
    }
    instructions.extend(program_ixs);
    Ok(instructions)
}
