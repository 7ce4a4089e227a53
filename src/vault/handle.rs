//! Handle to an existing on-chain alpha vault

use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::{instruction::Instruction, pubkey::Pubkey};
use tracing::debug;

use crate::vault::errors::VaultSetupError;
use crate::vault::instructions::stake_escrow_instructions;
use crate::vault::params::{VaultMode, WalletDepositCap};
use crate::vault::state::VaultAccount;

/// A fetched alpha vault, used to build follow-up instructions against it
#[derive(Debug, Clone)]
pub struct AlphaVaultHandle {
    pub program_id: Pubkey,
    pub address: Pubkey,
    pub state: VaultAccount,
    pub mode: VaultMode,
}

impl AlphaVaultHandle {
    /// Fetch and decode the vault account at `address`
    pub async fn fetch(
        rpc: &RpcClient,
        program_id: Pubkey,
        address: Pubkey,
    ) -> Result<Self, VaultSetupError> {
        let account = rpc.get_account(&address).await.map_err(|e| {
            VaultSetupError::Rpc(format!("failed to fetch vault {address}: {e}"))
        })?;

        if account.owner != program_id {
            return Err(VaultSetupError::account_decode(format!(
                "account {address} is owned by {}, not the alpha vault program",
                account.owner
            )));
        }

        let state = VaultAccount::decode(&account.data)?;
        let mode = state.mode();
        debug!(vault = %address, ?mode, "Fetched alpha vault");

        Ok(Self {
            program_id,
            address,
            state,
            mode,
        })
    }

    /// Build one stake-escrow creation instruction per whitelisted wallet
    ///
    /// The escrow address is derived per wallet; caps are already in native
    /// quote units. The caller batches these into transactions.
    pub fn create_stake_escrow_by_authority_ixs(
        &self,
        whitelist: &[WalletDepositCap],
        payer: &Pubkey,
    ) -> Vec<Instruction> {
        stake_escrow_instructions(&self.program_id, &self.address, whitelist, payer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vault::instructions::anchor_discriminator;

    fn test_handle() -> AlphaVaultHandle {
        let program_id = Pubkey::new_unique();
        let address = Pubkey::new_unique();
        let mut data = Vec::new();
        data.extend_from_slice(&anchor_discriminator("account", "Vault"));
        data.extend_from_slice(Pubkey::new_unique().as_ref());
        data.extend_from_slice(Pubkey::new_unique().as_ref());
        data.push(1);
        let state = VaultAccount::decode(&data).unwrap();
        let mode = state.mode();
        AlphaVaultHandle {
            program_id,
            address,
            state,
            mode,
        }
    }

    #[test]
    fn test_escrow_instructions_one_per_wallet() {
        let handle = test_handle();
        let payer = Pubkey::new_unique();
        let whitelist: Vec<WalletDepositCap> = (0..5)
            .map(|i| WalletDepositCap {
                address: Pubkey::new_unique(),
                max_amount: 1_000 * (i + 1),
            })
            .collect();

        let ixs = handle.create_stake_escrow_by_authority_ixs(&whitelist, &payer);
        assert_eq!(ixs.len(), 5);

        for (ix, entry) in ixs.iter().zip(&whitelist) {
            assert_eq!(ix.program_id, handle.program_id);
            assert_eq!(ix.accounts[0].pubkey, handle.address);
            assert_eq!(ix.accounts[2].pubkey, entry.address);
            assert_eq!(ix.accounts[3].pubkey, payer);
            assert_eq!(&ix.data[8..16], &entry.max_amount.to_le_bytes());
        }

        // Distinct wallets get distinct escrow addresses
        assert_ne!(ixs[0].accounts[1].pubkey, ixs[1].accounts[1].pubkey);
    }

    #[test]
    fn test_escrow_instructions_empty_whitelist() {
        let handle = test_handle();
        let ixs = handle.create_stake_escrow_by_authority_ixs(&[], &Pubkey::new_unique());
        assert!(ixs.is_empty());
    }
}
