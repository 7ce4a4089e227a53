//! Minimal on-chain vault account decoding
//!
//! The client only needs a few leading fields of the vault account to pick
//! the escrow-creation path, so decoding stops after them instead of
//! mirroring the full program state.

use solana_sdk::pubkey::Pubkey;

use crate::vault::errors::VaultSetupError;
use crate::vault::instructions::anchor_discriminator;
use crate::vault::params::VaultMode;

/// Account name used for the Anchor account discriminator
const VAULT_ACCOUNT_NAME: &str = "Vault";

/// Decoded prefix of an alpha vault account
#[derive(Debug, Clone)]
pub struct VaultAccount {
    /// Pool the vault gates deposits for
    pub pool: Pubkey,

    /// Base key the vault PDA was derived from
    pub base: Pubkey,

    /// Raw allocation mode byte (0 = pro-rata)
    pub vault_mode: u8,
}

impl VaultAccount {
    /// Minimum account length: discriminator + pool + base + mode byte
    pub const MIN_LEN: usize = 8 + 32 + 32 + 1;

    /// Decode the vault prefix, verifying the account discriminator
    pub fn decode(data: &[u8]) -> Result<Self, VaultSetupError> {
        if data.len() < Self::MIN_LEN {
            return Err(VaultSetupError::account_decode(format!(
                "vault account too short: {} bytes, expected at least {}",
                data.len(),
                Self::MIN_LEN
            )));
        }

        let expected = anchor_discriminator("account", VAULT_ACCOUNT_NAME);
        if data[..8] != expected {
            return Err(VaultSetupError::account_decode(
                "account discriminator does not match an alpha vault".to_string(),
            ));
        }

        let pool = Pubkey::try_from(&data[8..40])
            .map_err(|_| VaultSetupError::account_decode("invalid pool pubkey".to_string()))?;
        let base = Pubkey::try_from(&data[40..72])
            .map_err(|_| VaultSetupError::account_decode("invalid base pubkey".to_string()))?;

        Ok(Self {
            pool,
            base,
            vault_mode: data[72],
        })
    }

    /// Allocation mode of this vault
    pub fn mode(&self) -> VaultMode {
        VaultMode::from_mode_byte(self.vault_mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode_vault(pool: &Pubkey, base: &Pubkey, mode: u8) -> Vec<u8> {
        let mut data = Vec::with_capacity(VaultAccount::MIN_LEN);
        data.extend_from_slice(&anchor_discriminator("account", VAULT_ACCOUNT_NAME));
        data.extend_from_slice(pool.as_ref());
        data.extend_from_slice(base.as_ref());
        data.push(mode);
        data
    }

    #[test]
    fn test_decode_roundtrip() {
        let pool = Pubkey::new_unique();
        let base = Pubkey::new_unique();
        let decoded = VaultAccount::decode(&encode_vault(&pool, &base, 0)).unwrap();
        assert_eq!(decoded.pool, pool);
        assert_eq!(decoded.base, base);
        assert_eq!(decoded.mode(), VaultMode::Prorata);

        let decoded = VaultAccount::decode(&encode_vault(&pool, &base, 1)).unwrap();
        assert_eq!(decoded.mode(), VaultMode::Fcfs);
    }

    #[test]
    fn test_decode_trailing_data_ignored() {
        let mut data = encode_vault(&Pubkey::new_unique(), &Pubkey::new_unique(), 1);
        data.extend_from_slice(&[0u8; 256]);
        assert!(VaultAccount::decode(&data).is_ok());
    }

    #[test]
    fn test_decode_rejects_short_data() {
        let err = VaultAccount::decode(&[0u8; 16]).unwrap_err();
        assert!(matches!(err, VaultSetupError::AccountDecode(_)));
    }

    #[test]
    fn test_decode_rejects_wrong_discriminator() {
        let mut data = encode_vault(&Pubkey::new_unique(), &Pubkey::new_unique(), 0);
        data[0] ^= 0xff;
        let err = VaultAccount::decode(&data).unwrap_err();
        assert!(matches!(err, VaultSetupError::AccountDecode(_)));
    }
}
