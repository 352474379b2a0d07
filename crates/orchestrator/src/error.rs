use selfguard_primitives::ScopeError;

/// Errors surfaced by recovery orchestration.
#[derive(Debug, thiserror::Error)]
pub enum OrchestratorError {
    #[error("account is already initialized")]
    AlreadyInitialized,
    #[error("account is not initialized")]
    NotInitialized,
    #[error("recovery mode is not enabled")]
    RecoveryModeNotEnabled,
    #[error("no signer bound after {0} polls")]
    SignerTimeout(usize),
    #[error(transparent)]
    Scope(#[from] ScopeError),
    #[error(transparent)]
    Abi(#[from] alloy_sol_types::Error),
    #[error(transparent)]
    Backend(#[from] eyre::Report),
}
