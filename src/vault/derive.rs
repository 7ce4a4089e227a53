//! PDA derivation for alpha vault accounts

use solana_sdk::pubkey::Pubkey;

/// Seed for the vault PDA
pub const VAULT_SEED: &[u8] = b"vault";

/// Seed for per-wallet stake escrow PDAs
pub const ESCROW_SEED: &[u8] = b"escrow";

/// Anchor event-CPI authority seed
pub const EVENT_AUTHORITY_SEED: &[u8] = b"__event_authority";

/// Derive the alpha vault address for a (base, pool) pair
pub fn derive_alpha_vault(base: &Pubkey, pool: &Pubkey, program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[VAULT_SEED, base.as_ref(), pool.as_ref()], program_id)
}

/// Derive the stake escrow address for a wallet in a vault
pub fn derive_stake_escrow(vault: &Pubkey, owner: &Pubkey, program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[ESCROW_SEED, vault.as_ref(), owner.as_ref()], program_id)
}

/// Derive the program's event authority
pub fn derive_event_authority(program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[EVENT_AUTHORITY_SEED], program_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vault_derivation_is_deterministic() {
        let base = Pubkey::new_unique();
        let pool = Pubkey::new_unique();
        let program_id = Pubkey::new_unique();

        let (a, bump_a) = derive_alpha_vault(&base, &pool, &program_id);
        let (b, bump_b) = derive_alpha_vault(&base, &pool, &program_id);
        assert_eq!(a, b);
        assert_eq!(bump_a, bump_b);
    }

    #[test]
    fn test_vault_derivation_varies_by_inputs() {
        let base = Pubkey::new_unique();
        let pool = Pubkey::new_unique();
        let program_id = Pubkey::new_unique();

        let (vault, _) = derive_alpha_vault(&base, &pool, &program_id);
        let (other_base, _) = derive_alpha_vault(&Pubkey::new_unique(), &pool, &program_id);
        let (other_pool, _) = derive_alpha_vault(&base, &Pubkey::new_unique(), &program_id);
        assert_ne!(vault, other_base);
        assert_ne!(vault, other_pool);
    }

    #[test]
    fn test_escrow_derivation_varies_by_owner() {
        let vault = Pubkey::new_unique();
        let program_id = Pubkey::new_unique();

        let (a, _) = derive_stake_escrow(&vault, &Pubkey::new_unique(), &program_id);
        let (b, _) = derive_stake_escrow(&vault, &Pubkey::new_unique(), &program_id);
        assert_ne!(a, b);
    }
}
