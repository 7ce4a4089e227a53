//! Cluster identification for the alpha vault program
//!
//! The alpha vault program is deployed at the same address on mainnet-beta
//! and devnet; local validators use a separate deploy key. An id outside
//! this table is rejected immediately.

use solana_sdk::{pubkey, pubkey::Pubkey};

use crate::vault::errors::VaultSetupError;

/// Alpha vault program id on mainnet-beta and devnet
pub const MAINNET_ALPHA_VAULT_PROGRAM_ID: Pubkey =
    pubkey!("vaU6kP7iNEGkbmPkLmZfGwiGxd4Mob24QQCie5R9kd2");

/// Alpha vault program id on devnet (shared deploy with mainnet-beta)
pub const DEVNET_ALPHA_VAULT_PROGRAM_ID: Pubkey = MAINNET_ALPHA_VAULT_PROGRAM_ID;

/// Alpha vault program id on a local validator
pub const LOCALHOST_ALPHA_VAULT_PROGRAM_ID: Pubkey =
    pubkey!("SNPmGgnywBvvrAKMLundzG6StojyHTHDLu7T4sdhP4k");

/// Most stake-escrow creation instructions that fit in one transaction
pub const MAX_ESCROW_CREATE_IXS_PER_TX: usize = 22;

/// Solana cluster a program id belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cluster {
    MainnetBeta,
    Devnet,
    Localhost,
}

impl Cluster {
    /// Cluster name as the vault SDKs spell it
    pub fn name(self) -> &'static str {
        match self {
            Self::MainnetBeta => "mainnet-beta",
            Self::Devnet => "devnet",
            Self::Localhost => "localhost",
        }
    }

    /// Alpha vault program id deployed on this cluster
    pub fn alpha_vault_program_id(self) -> Pubkey {
        match self {
            Self::MainnetBeta => MAINNET_ALPHA_VAULT_PROGRAM_ID,
            Self::Devnet => DEVNET_ALPHA_VAULT_PROGRAM_ID,
            Self::Localhost => LOCALHOST_ALPHA_VAULT_PROGRAM_ID,
        }
    }

    /// Resolve a program id to its cluster
    ///
    /// Checked in order mainnet-beta, devnet, localhost; since devnet
    /// shares the mainnet deploy, that id resolves to mainnet-beta.
    /// Unknown ids are an immediate, unrecoverable error.
    pub fn from_program_id(program_id: &Pubkey) -> Result<Self, VaultSetupError> {
        if *program_id == MAINNET_ALPHA_VAULT_PROGRAM_ID {
            Ok(Self::MainnetBeta)
        } else if *program_id == DEVNET_ALPHA_VAULT_PROGRAM_ID {
            Ok(Self::Devnet)
        } else if *program_id == LOCALHOST_ALPHA_VAULT_PROGRAM_ID {
            Ok(Self::Localhost)
        } else {
            Err(VaultSetupError::UnknownProgramId(program_id.to_string()))
        }
    }
}

impl std::fmt::Display for Cluster {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_program_id_to_cluster_name() {
        let cluster = Cluster::from_program_id(&MAINNET_ALPHA_VAULT_PROGRAM_ID).unwrap();
        assert_eq!(cluster.name(), "mainnet-beta");

        let cluster = Cluster::from_program_id(&LOCALHOST_ALPHA_VAULT_PROGRAM_ID).unwrap();
        assert_eq!(cluster.name(), "localhost");

        // Devnet shares the mainnet deploy, so the first match wins
        let cluster = Cluster::from_program_id(&DEVNET_ALPHA_VAULT_PROGRAM_ID).unwrap();
        assert_eq!(cluster, Cluster::MainnetBeta);
    }

    #[test]
    fn test_unknown_program_id_rejected() {
        let err = Cluster::from_program_id(&Pubkey::new_unique()).unwrap_err();
        assert!(matches!(err, VaultSetupError::UnknownProgramId(_)));
        assert_eq!(err.category(), "cluster");
    }

    #[test]
    fn test_cluster_program_ids_roundtrip() {
        for cluster in [Cluster::MainnetBeta, Cluster::Localhost] {
            let resolved = Cluster::from_program_id(&cluster.alpha_vault_program_id()).unwrap();
            assert_eq!(resolved, cluster);
        }
    }
}
