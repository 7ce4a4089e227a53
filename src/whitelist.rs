//! Whitelist file loading for permissioned vaults
//!
//! The whitelist is a JSON array of wallet / cap pairs:
//!
//! ```json
//! [
//!   { "address": "...", "max_amount_ui": 100.0 }
//! ]
//! ```
//!
//! Caps are UI amounts in the quote token and are scaled to native units
//! here, before any instruction is built.

use std::collections::HashSet;
use std::str::FromStr;

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use solana_sdk::pubkey::Pubkey;

use crate::vault::params::{amount_to_lamports, WalletDepositCap};

#[derive(Debug, Deserialize)]
struct WhitelistEntry {
    address: String,
    max_amount_ui: f64,
}

/// Load and validate a whitelist file
///
/// Rejects unparseable addresses and duplicate wallets; an escrow can only
/// be created once per wallet.
pub fn load_whitelist(path: &str, quote_decimals: u8) -> Result<Vec<WalletDepositCap>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read whitelist file: {path}"))?;
    let entries: Vec<WhitelistEntry> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse whitelist file: {path}"))?;

    parse_entries(entries, quote_decimals)
}

fn parse_entries(
    entries: Vec<WhitelistEntry>,
    quote_decimals: u8,
) -> Result<Vec<WalletDepositCap>> {
    let mut seen = HashSet::with_capacity(entries.len());
    let mut whitelist = Vec::with_capacity(entries.len());

    for entry in entries {
        let address = Pubkey::from_str(&entry.address)
            .with_context(|| format!("Invalid whitelist address: {}", entry.address))?;
        if !seen.insert(address) {
            bail!("Duplicate whitelist address: {address}");
        }

        let max_amount = amount_to_lamports(entry.max_amount_ui, quote_decimals)
            .with_context(|| format!("Invalid cap for {address}"))?;
        whitelist.push(WalletDepositCap {
            address,
            max_amount,
        });
    }

    Ok(whitelist)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_whitelist(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_whitelist() {
        let a = Pubkey::new_unique();
        let b = Pubkey::new_unique();
        let json = format!(
            r#"[
                {{ "address": "{a}", "max_amount_ui": 100.0 }},
                {{ "address": "{b}", "max_amount_ui": 2.5 }}
            ]"#
        );
        let file = write_whitelist(&json);

        let whitelist = load_whitelist(file.path().to_str().unwrap(), 6).unwrap();
        assert_eq!(whitelist.len(), 2);
        assert_eq!(whitelist[0].address, a);
        assert_eq!(whitelist[0].max_amount, 100_000_000);
        assert_eq!(whitelist[1].max_amount, 2_500_000);
    }

    #[test]
    fn test_reject_duplicate_address() {
        let a = Pubkey::new_unique();
        let json = format!(
            r#"[
                {{ "address": "{a}", "max_amount_ui": 1.0 }},
                {{ "address": "{a}", "max_amount_ui": 2.0 }}
            ]"#
        );
        let file = write_whitelist(&json);
        assert!(load_whitelist(file.path().to_str().unwrap(), 6).is_err());
    }

    #[test]
    fn test_reject_bad_address() {
        let file = write_whitelist(r#"[{ "address": "garbage", "max_amount_ui": 1.0 }]"#);
        assert!(load_whitelist(file.path().to_str().unwrap(), 6).is_err());
    }

    #[test]
    fn test_reject_negative_cap() {
        let a = Pubkey::new_unique();
        let json = format!(r#"[{{ "address": "{a}", "max_amount_ui": -5.0 }}]"#);
        let file = write_whitelist(&json);
        assert!(load_whitelist(file.path().to_str().unwrap(), 6).is_err());
    }

    #[test]
    fn test_empty_whitelist_ok() {
        let file = write_whitelist("[]");
        let whitelist = load_whitelist(file.path().to_str().unwrap(), 6).unwrap();
        assert!(whitelist.is_empty());
    }
}
