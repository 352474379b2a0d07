//! The recovery state machine as seen from the client side.

use std::time::Duration;

use alloy_primitives::{Address, B256, Bytes, U256};
use alloy_sol_types::SolCall;
use selfguard_contracts::{IRecoveryRegistry, IRecoveryWrapper, ISelfAccount, RECOVERY_REGISTRY_ADDRESS};
use selfguard_primitives::{ProofRequest, hash_endpoint_with_scope, predict_binding_address};
use tracing::{debug, info};

use crate::{backend::RecoveryBackend, error::OrchestratorError};

/// Phase of the recovery lifecycle, derived from on-chain state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoveryPhase {
    /// `initialize` has not run.
    Uninitialized,
    /// Initialized, window closed, no signer bound.
    Initialized,
    /// Window open, waiting for a verified proof to bind a signer.
    RecoveryEnabled,
    /// Window open with a bound signer; `recover` calls are honored.
    SignerBound,
    /// Window closed again with the signer still bound.
    Recovered,
}

/// Drives one account's recovery lifecycle against a backend.
pub struct RecoveryOrchestrator<B> {
    backend: B,
    account: Address,
    scope_seed: String,
}

impl<B: RecoveryBackend> RecoveryOrchestrator<B> {
    pub fn new(backend: B, account: Address, scope_seed: impl Into<String>) -> Self {
        Self { backend, account, scope_seed: scope_seed.into() }
    }

    pub fn account(&self) -> Address {
        self.account
    }

    /// Address the account's wrapper will occupy: the account's next CREATE
    /// slot after the pending initialize transaction.
    pub async fn predict_wrapper(&self) -> Result<Address, OrchestratorError> {
        let nonce = self.backend.transaction_count(self.account).await?;
        Ok(predict_binding_address(self.account, nonce))
    }

    /// Scope identifier for a wrapper endpoint under this app's seed.
    pub fn scope_for(&self, wrapper: Address) -> Result<U256, OrchestratorError> {
        Ok(hash_endpoint_with_scope(&wrapper.to_checksum(None), &self.scope_seed)?)
    }

    /// Initializes the account, binding the scope of its predicted wrapper.
    ///
    /// Guarded client-side: the delegation carrying the account code is
    /// consumed on first use, so re-submitting after initialization would
    /// burn a transaction on a guaranteed revert.
    pub async fn initialize(&self, is_production: bool) -> Result<Address, OrchestratorError> {
        if self.is_initialized().await? {
            return Err(OrchestratorError::AlreadyInitialized);
        }

        let wrapper = self.predict_wrapper().await?;
        let scope = self.scope_for(wrapper)?;
        info!(account = %self.account, %wrapper, %scope, "initializing account");

        self.send_to_account(ISelfAccount::initializeCall { scope, isProduction: is_production }.abi_encode())
            .await?;

        let deployed = self.wrapper().await?;
        debug!(predicted = %wrapper, %deployed, "wrapper deployed");
        Ok(deployed)
    }

    pub async fn is_initialized(&self) -> Result<bool, OrchestratorError> {
        let raw = self
            .backend
            .call(self.account, ISelfAccount::isInitializedCall {}.abi_encode().into())
            .await?;
        Ok(ISelfAccount::isInitializedCall::abi_decode_returns(&raw)?)
    }

    pub async fn wrapper(&self) -> Result<Address, OrchestratorError> {
        let raw = self
            .backend
            .call(self.account, ISelfAccount::wrapperCall {}.abi_encode().into())
            .await?;
        Ok(ISelfAccount::wrapperCall::abi_decode_returns(&raw)?)
    }

    pub async fn is_recovery_mode_enabled(&self) -> Result<bool, OrchestratorError> {
        let raw = self
            .backend
            .call(
                self.account,
                ISelfAccount::isRecoveryModeEnabledCall {}.abi_encode().into(),
            )
            .await?;
        Ok(ISelfAccount::isRecoveryModeEnabledCall::abi_decode_returns(&raw)?)
    }

    pub async fn allowed_signer(&self) -> Result<Address, OrchestratorError> {
        let wrapper = self.wrapper().await?;
        let raw = self
            .backend
            .call(wrapper, IRecoveryWrapper::allowedSignerCall {}.abi_encode().into())
            .await?;
        Ok(IRecoveryWrapper::allowedSignerCall::abi_decode_returns(&raw)?)
    }

    pub async fn master_nullifier(&self) -> Result<U256, OrchestratorError> {
        let wrapper = self.wrapper().await?;
        let raw = self
            .backend
            .call(wrapper, IRecoveryWrapper::getMasterNullifierCall {}.abi_encode().into())
            .await?;
        Ok(IRecoveryWrapper::getMasterNullifierCall::abi_decode_returns(&raw)?)
    }

    /// Current phase, derived from the window flag and the bound signer.
    pub async fn phase(&self) -> Result<RecoveryPhase, OrchestratorError> {
        if !self.is_initialized().await? {
            return Ok(RecoveryPhase::Uninitialized);
        }
        let window_open = self.is_recovery_mode_enabled().await?;
        let signer = self.allowed_signer().await?;
        Ok(match (window_open, signer.is_zero()) {
            (false, true) => RecoveryPhase::Initialized,
            (true, true) => RecoveryPhase::RecoveryEnabled,
            (true, false) => RecoveryPhase::SignerBound,
            (false, false) => RecoveryPhase::Recovered,
        })
    }

    /// Opens the recovery window.
    pub async fn enable_recovery(&self) -> Result<B256, OrchestratorError> {
        if !self.is_initialized().await? {
            return Err(OrchestratorError::NotInitialized);
        }
        info!(account = %self.account, "opening recovery window");
        self.send_to_account(ISelfAccount::enableRecoveryModeCall {}.abi_encode())
            .await
    }

    /// Closes the recovery window; the bound signer stays valid.
    pub async fn finish_recovery(&self) -> Result<B256, OrchestratorError> {
        if !self.is_recovery_mode_enabled().await? {
            return Err(OrchestratorError::RecoveryModeNotEnabled);
        }
        info!(account = %self.account, "closing recovery window");
        self.send_to_account(ISelfAccount::finishRecoveryModeCall {}.abi_encode())
            .await
    }

    /// Polls until a signer is bound in the current window.
    pub async fn wait_for_signer(
        &self,
        poll_interval: Duration,
        max_polls: usize,
    ) -> Result<Address, OrchestratorError> {
        for _ in 0..max_polls {
            let signer = self.allowed_signer().await?;
            if !signer.is_zero() {
                info!(account = %self.account, %signer, "signer bound");
                return Ok(signer);
            }
            tokio::time::sleep(poll_interval).await;
        }
        Err(OrchestratorError::SignerTimeout(max_polls))
    }

    /// Sweeps funds out of the account; `value` defaults to the balance read
    /// immediately before submission. Must be sent by the bound signer.
    pub async fn recover(
        &self,
        to: Address,
        value: Option<U256>,
    ) -> Result<B256, OrchestratorError> {
        let value = match value {
            Some(v) => v,
            None => self.backend.get_balance(self.account).await?,
        };
        info!(account = %self.account, %to, %value, "recovering funds");
        self.send_to_account(
            ISelfAccount::recoverCall { to, value, data: Bytes::new() }.abi_encode(),
        )
        .await
    }

    /// Proof request for binding `signer` in the current window, addressed to
    /// the account's wrapper endpoint.
    pub async fn binding_request(
        &self,
        user_id: B256,
        signer: Address,
    ) -> Result<ProofRequest, OrchestratorError> {
        Ok(ProofRequest {
            endpoint: self.wrapper().await?,
            scope_seed: self.scope_seed.clone(),
            user_id,
            user_defined_data: Bytes::copy_from_slice(signer.as_slice()),
        })
    }

    // Legacy registry operations. Signatures are produced by the caller's
    // wallet; the orchestrator only submits them.

    pub async fn register_recovery(
        &self,
        recovery_address: Address,
        signature: Bytes,
    ) -> Result<B256, OrchestratorError> {
        info!(user = %self.backend.sender(), %recovery_address, "registering recovery address");
        Ok(self
            .backend
            .send(
                RECOVERY_REGISTRY_ADDRESS,
                U256::ZERO,
                IRecoveryRegistry::registerRecoveryCall {
                    recoveryAddress: recovery_address,
                    signature,
                }
                .abi_encode()
                .into(),
            )
            .await?)
    }

    pub async fn cleanup_recovery(&self, signature: Bytes) -> Result<B256, OrchestratorError> {
        info!(user = %self.backend.sender(), "clearing recovery address");
        Ok(self
            .backend
            .send(
                RECOVERY_REGISTRY_ADDRESS,
                U256::ZERO,
                IRecoveryRegistry::cleanupRecoveryCall { signature }.abi_encode().into(),
            )
            .await?)
    }

    pub async fn recovery_address(&self, user: Address) -> Result<Address, OrchestratorError> {
        let raw = self
            .backend
            .call(
                RECOVERY_REGISTRY_ADDRESS,
                IRecoveryRegistry::getRecoveryAddressCall { user }.abi_encode().into(),
            )
            .await?;
        Ok(IRecoveryRegistry::getRecoveryAddressCall::abi_decode_returns(&raw)?)
    }

    async fn send_to_account(&self, data: Vec<u8>) -> Result<B256, OrchestratorError> {
        Ok(self
            .backend
            .send(self.account, U256::ZERO, data.into())
            .await?)
    }
}
