use alloy_primitives::{Bytes, U256};
use alloy_sol_types::SolInterface;
use selfguard_contracts::{RecoveryRegistryError, RecoveryWrapperError, SelfAccountError};
use selfguard_primitives::ScopeError;

/// Errors surfaced by ledger execution.
///
/// Contract rejections carry the ABI-encoded typed error so callers can
/// distinguish them; they are always fatal for the failing call and leave no
/// partial state behind.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    #[error("execution reverted: {0}")]
    Revert(Bytes),
    #[error("calldata decoding failed: {0}")]
    Abi(#[from] alloy_sol_types::Error),
    #[error("insufficient funds: have {available}, need {requested}")]
    InsufficientFunds { requested: U256, available: U256 },
    #[error("identity proof rejected by verifier")]
    ProofRejected,
    #[error("proof request scope does not match the account's bound scope")]
    ScopeMismatch,
    #[error(transparent)]
    Scope(#[from] ScopeError),
}

impl LedgerError {
    /// The ABI-encoded revert payload, if this is a contract rejection.
    pub fn revert_data(&self) -> Option<&Bytes> {
        match self {
            Self::Revert(data) => Some(data),
            _ => None,
        }
    }
}

impl From<SelfAccountError> for LedgerError {
    fn from(err: SelfAccountError) -> Self {
        Self::Revert(err.abi_encode().into())
    }
}

impl From<RecoveryWrapperError> for LedgerError {
    fn from(err: RecoveryWrapperError) -> Self {
        Self::Revert(err.abi_encode().into())
    }
}

impl From<RecoveryRegistryError> for LedgerError {
    fn from(err: RecoveryRegistryError) -> Self {
        Self::Revert(err.abi_encode().into())
    }
}
