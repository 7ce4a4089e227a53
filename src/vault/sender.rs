//! Transaction compilation, simulation, and submission
//!
//! Submission is intentionally plain: one transaction at a time, no retry.
//! A failed send is logged and returned to the caller. The only batching
//! logic lives in [`send_instruction_batches`], which chunks instruction
//! lists so each transaction stays under the per-transaction limit.

use solana_client::nonblocking::rpc_client::RpcClient;
use solana_rpc_client_api::config::RpcSimulateTransactionConfig;
use solana_sdk::{
    hash::Hash,
    instruction::Instruction,
    message::{v0::Message as MessageV0, VersionedMessage},
    pubkey::Pubkey,
    signature::{Keypair, Signature, Signer},
    transaction::VersionedTransaction,
};
use tracing::{error, info};

use crate::vault::errors::VaultSetupError;
use crate::vault::instructions::plan_with_compute_budget;

/// Compile instructions into a signed v0 transaction
pub fn compile_transaction(
    keypair: &Keypair,
    instructions: &[Instruction],
    recent_blockhash: Hash,
) -> Result<VersionedTransaction, VaultSetupError> {
    let payer: Pubkey = keypair.pubkey();
    let message = MessageV0::try_compile(&payer, instructions, &[], recent_blockhash).map_err(
        |e| VaultSetupError::instruction_failed("alpha_vault", format!("message compile: {e}")),
    )?;

    let mut tx = VersionedTransaction {
        signatures: vec![],
        message: VersionedMessage::V0(message),
    };

    // VersionedTransaction has no try_sign; sign the serialized message
    let message_bytes = tx.message.serialize();
    tx.signatures = vec![keypair.sign_message(&message_bytes)];
    Ok(tx)
}

/// Simulate a transaction without consuming signatures
///
/// Dry-run path: logs units consumed and program logs, and fails on any
/// simulated execution error.
pub async fn simulate_transaction(
    rpc: &RpcClient,
    tx: &VersionedTransaction,
    label: &str,
) -> Result<(), VaultSetupError> {
    let config = RpcSimulateTransactionConfig {
        sig_verify: false,
        replace_recent_blockhash: true,
        ..RpcSimulateTransactionConfig::default()
    };

    let result = rpc
        .simulate_transaction_with_config(tx, config)
        .await
        .map_err(|e| VaultSetupError::Rpc(format!("simulation request failed: {e}")))?;

    if let Some(units) = result.value.units_consumed {
        info!(label, units_consumed = units, "Simulation consumed compute units");
    }
    if let Some(logs) = &result.value.logs {
        for line in logs {
            info!(label, "{line}");
        }
    }

    if let Some(err) = result.value.err {
        error!(label, error = ?err, "Simulation failed");
        return Err(VaultSetupError::simulation_failed(format!("{err:?}")));
    }

    info!(label, "Simulation succeeded");
    Ok(())
}

/// Send a transaction and wait for confirmation
///
/// Failures are logged and propagated without retry.
pub async fn send_transaction(
    rpc: &RpcClient,
    tx: &VersionedTransaction,
    label: &str,
) -> Result<Signature, VaultSetupError> {
    let signature = rpc.send_and_confirm_transaction(tx).await.map_err(|e| {
        error!(label, error = %e, "Transaction submission failed");
        VaultSetupError::Rpc(e.to_string())
    })?;

    info!(label, %signature, "Transaction confirmed");
    Ok(signature)
}

/// Number of transactions needed for `total` instructions at `max_per_tx`
pub fn batch_count(total: usize, max_per_tx: usize) -> usize {
    if max_per_tx == 0 {
        return 0;
    }
    total.div_ceil(max_per_tx)
}

/// Chunk instructions into transactions and simulate or send them in order
///
/// Each chunk gets its own compute-unit-price instruction and a fresh
/// blockhash. Returns the confirmed signatures (empty in dry-run mode).
pub async fn send_instruction_batches(
    rpc: &RpcClient,
    keypair: &Keypair,
    instructions: Vec<Instruction>,
    max_per_tx: usize,
    cu_price_micro_lamports: u64,
    dry_run: bool,
    label: &str,
) -> Result<Vec<Signature>, VaultSetupError> {
    if instructions.is_empty() {
        info!(label, "No instructions to submit");
        return Ok(Vec::new());
    }
    if max_per_tx == 0 {
        return Err(VaultSetupError::Configuration(
            "max instructions per transaction must be non-zero".to_string(),
        ));
    }

    let batches = batch_count(instructions.len(), max_per_tx);
    info!(
        label,
        instruction_count = instructions.len(),
        batches,
        dry_run,
        "Submitting instruction batches"
    );

    let mut signatures = Vec::new();
    for (index, chunk) in instructions.chunks(max_per_tx).enumerate() {
        let planned = plan_with_compute_budget(cu_price_micro_lamports, chunk.to_vec())?;
        let blockhash = rpc
            .get_latest_blockhash()
            .await
            .map_err(|e| VaultSetupError::Rpc(format!("failed to fetch blockhash: {e}")))?;
        let tx = compile_transaction(keypair, &planned, blockhash)?;

        if dry_run {
            info!(label, batch = index + 1, batches, "Simulating batch");
            simulate_transaction(rpc, &tx, label).await?;
        } else {
            info!(label, batch = index + 1, batches, "Sending batch");
            signatures.push(send_transaction(rpc, &tx, label).await?);
        }
    }

    Ok(signatures)
}

#[cfg(test)]
mod tests {
    use super::*;
    use solana_sdk::instruction::AccountMeta;

    #[test]
    fn test_batch_count() {
        assert_eq!(batch_count(0, 22), 0);
        assert_eq!(batch_count(1, 22), 1);
        assert_eq!(batch_count(22, 22), 1);
        assert_eq!(batch_count(23, 22), 2);
        assert_eq!(batch_count(45, 22), 3);
        assert_eq!(batch_count(10, 0), 0);
    }

    #[test]
    fn test_compile_transaction_signs_with_payer() {
        let keypair = Keypair::new();
        let ix = Instruction {
            program_id: Pubkey::new_unique(),
            accounts: vec![AccountMeta::new(keypair.pubkey(), true)],
            data: vec![1, 2, 3],
        };

        let tx = compile_transaction(&keypair, &[ix], Hash::default()).unwrap();
        assert_eq!(tx.signatures.len(), 1);

        // Payer is the first static account key of the compiled message
        assert_eq!(tx.message.static_account_keys()[0], keypair.pubkey());

        // Signature verifies against the serialized message
        let message_bytes = tx.message.serialize();
        assert!(tx.signatures[0].verify(keypair.pubkey().as_ref(), &message_bytes));
    }
}
