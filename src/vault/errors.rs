//! Error types for alpha vault setup operations
//!
//! Covers the full client-side lifecycle: cluster resolution, parameter
//! translation, instruction construction, simulation, and submission.
//! Errors carry enough context to diagnose a failed launch setup from the
//! logs alone.

use thiserror::Error;

/// Error type for all vault setup operations
#[derive(Error, Debug)]
pub enum VaultSetupError {
    /// The configured alpha vault program id does not belong to any known
    /// cluster. Raised immediately and never recovered.
    #[error("Invalid alpha vault program id {0}")]
    UnknownProgramId(String),

    /// The authority-whitelist path only accepts permission-with-authority
    /// vaults; every other mode is rejected up front.
    #[error("Invalid whitelist mode {0}. Only permission_with_authority is allowed")]
    InvalidWhitelistMode(String),

    /// Configuration or validation error
    ///
    /// Invalid config values, missing required fields, constraint
    /// violations.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// UI amount could not be converted to native token units
    #[error("Amount conversion error: {0}")]
    AmountConversion(String),

    /// On-chain account data did not decode as an alpha vault
    #[error("Account decode error: {0}")]
    AccountDecode(String),

    /// Failed to build an instruction or compile a message
    #[error("Instruction build error (program={program}): {reason}")]
    InstructionBuild {
        /// Program the instruction was being built for
        program: String,
        /// Detailed reason for the failure
        reason: String,
    },

    /// Transaction simulation failed (dry-run path)
    #[error("Simulation failed: {0}")]
    Simulation(String),

    /// RPC communication failure
    #[error("RPC error: {0}")]
    Rpc(String),

    /// Failed to sign the transaction
    #[error("Signing failed: {0}")]
    Signing(String),

    /// Wrapped error from external crates
    #[error("External error: {0}")]
    External(#[from] anyhow::Error),
}

impl VaultSetupError {
    /// Check if this error is potentially transient
    ///
    /// Submission is never retried locally, but callers re-running the tool
    /// can use this to tell transient network failures from configuration
    /// mistakes that will fail again.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Rpc(_) => true,
            Self::Simulation(msg) => {
                // Blockhash staleness is transient, program errors are not
                !msg.contains("insufficient") && !msg.contains("InstructionError")
            }

            Self::UnknownProgramId(_) => false,
            Self::InvalidWhitelistMode(_) => false,
            Self::Configuration(_) => false,
            Self::AmountConversion(_) => false,
            Self::AccountDecode(_) => false,
            Self::InstructionBuild { .. } => false,
            Self::Signing(_) => false,
            Self::External(_) => false,
        }
    }

    /// Get the error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            Self::UnknownProgramId(_) => "cluster",
            Self::InvalidWhitelistMode(_) => "whitelist",
            Self::Configuration(_) => "config",
            Self::AmountConversion(_) => "amount",
            Self::AccountDecode(_) => "account",
            Self::InstructionBuild { .. } => "instruction",
            Self::Simulation(_) => "simulation",
            Self::Rpc(_) => "rpc",
            Self::Signing(_) => "signing",
            Self::External(_) => "external",
        }
    }
}

// Convenience constructors for common error scenarios
impl VaultSetupError {
    /// Create an instruction build error for a specific program
    pub fn instruction_failed(program: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InstructionBuild {
            program: program.into(),
            reason: reason.into(),
        }
    }

    /// Create a simulation failure error
    pub fn simulation_failed(reason: impl Into<String>) -> Self {
        Self::Simulation(reason.into())
    }

    /// Create an account decode error
    pub fn account_decode(reason: impl Into<String>) -> Self {
        Self::AccountDecode(reason.into())
    }
}

impl From<solana_client::client_error::ClientError> for VaultSetupError {
    fn from(err: solana_client::client_error::ClientError) -> Self {
        Self::Rpc(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = VaultSetupError::UnknownProgramId("11111".to_string());
        assert_eq!(err.to_string(), "Invalid alpha vault program id 11111");

        let err = VaultSetupError::InstructionBuild {
            program: "alpha_vault".to_string(),
            reason: "empty account list".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Instruction build error (program=alpha_vault): empty account list"
        );
    }

    #[test]
    fn test_error_retryability() {
        assert!(VaultSetupError::Rpc("timeout".to_string()).is_retryable());
        assert!(VaultSetupError::Simulation("BlockhashNotFound".to_string()).is_retryable());

        assert!(!VaultSetupError::Simulation("InstructionError(0, Custom(1))".to_string())
            .is_retryable());
        assert!(!VaultSetupError::UnknownProgramId("x".to_string()).is_retryable());
        assert!(!VaultSetupError::InvalidWhitelistMode("permissionless".to_string())
            .is_retryable());
        assert!(!VaultSetupError::Configuration("bad".to_string()).is_retryable());
    }

    #[test]
    fn test_error_categories() {
        assert_eq!(
            VaultSetupError::UnknownProgramId("x".to_string()).category(),
            "cluster"
        );
        assert_eq!(
            VaultSetupError::simulation_failed("x").category(),
            "simulation"
        );
        assert_eq!(
            VaultSetupError::instruction_failed("p", "r").category(),
            "instruction"
        );
    }
}
