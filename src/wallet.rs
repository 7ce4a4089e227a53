//! Wallet management module

use anyhow::{Context, Result};
use solana_sdk::{
    pubkey::Pubkey,
    signature::{Keypair, Signer},
};

/// Holds the funding keypair that signs every setup transaction
pub struct WalletManager {
    keypair: Keypair,
}

impl WalletManager {
    /// Load the funding keypair from a file
    ///
    /// Accepts the two formats `solana-keygen` produces: a raw 64-byte
    /// secret-key file or a JSON array of 64 bytes. All-zero key material
    /// is refused in both.
    pub fn from_file(path: &str) -> Result<Self> {
        let raw = std::fs::read(path)
            .with_context(|| format!("Cannot read keypair file {path}"))?;

        let keypair = if raw.len() == 64 {
            if raw.iter().all(|&b| b == 0) {
                anyhow::bail!("Keypair file {path} contains only zero bytes");
            }
            Keypair::try_from(raw.as_slice())
                .with_context(|| format!("Keypair file {path} holds no valid key"))?
        } else {
            let bytes: Vec<u8> = serde_json::from_slice(&raw)
                .with_context(|| format!("Keypair file {path} is not a JSON byte array"))?;
            if bytes.len() != 64 {
                anyhow::bail!(
                    "Keypair file {path} decodes to {} bytes, need 64",
                    bytes.len()
                );
            }
            if bytes.iter().all(|&b| b == 0) {
                anyhow::bail!("Keypair file {path} contains only zero bytes");
            }
            Keypair::try_from(bytes.as_slice())
                .with_context(|| format!("Keypair file {path} holds no valid key"))?
        };

        Ok(Self { keypair })
    }

    /// Get the public key
    pub fn pubkey(&self) -> Pubkey {
        self.keypair.pubkey()
    }

    /// Get a reference to the keypair
    pub fn keypair(&self) -> &Keypair {
        &self.keypair
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_json_keypair() {
        let keypair = Keypair::new();
        let bytes = keypair.to_bytes().to_vec();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(serde_json::to_string(&bytes).unwrap().as_bytes())
            .unwrap();

        let wallet = WalletManager::from_file(file.path().to_str().unwrap()).unwrap();
        assert_eq!(wallet.pubkey(), keypair.pubkey());
    }

    #[test]
    fn test_load_raw_keypair() {
        let keypair = Keypair::new();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&keypair.to_bytes()).unwrap();

        let wallet = WalletManager::from_file(file.path().to_str().unwrap()).unwrap();
        assert_eq!(wallet.pubkey(), keypair.pubkey());
    }

    #[test]
    fn test_loaded_keypair_signs() {
        let keypair = Keypair::new();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&keypair.to_bytes()).unwrap();

        let wallet = WalletManager::from_file(file.path().to_str().unwrap()).unwrap();
        let signature = wallet.keypair().sign_message(b"launch");
        assert!(signature.verify(wallet.pubkey().as_ref(), b"launch"));
    }

    #[test]
    fn test_reject_all_zero_key() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&[0u8; 64]).unwrap();
        assert!(WalletManager::from_file(file.path().to_str().unwrap()).is_err());
    }

    #[test]
    fn test_reject_wrong_length_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"[1,2,3]").unwrap();
        assert!(WalletManager::from_file(file.path().to_str().unwrap()).is_err());
    }
}
