//! Single-ordered ledger hosting the recovery contracts.
//!
//! Calls execute one at a time against an in-memory storage provider. Each
//! call is atomic: a revert restores the pre-call snapshot wholesale, so
//! failed calls leave no trace, including the sender's nonce.

use std::collections::HashMap;

use alloy_primitives::{Address, B256, Bytes, Log, U256, keccak256};
use alloy_sol_types::SolCall;
use selfguard_contracts::{
    IRecoveryWrapper, ISelfAccount, RECOVERY_REGISTRY_ADDRESS, VERIFICATION_HUB_ADDRESS,
};
use selfguard_primitives::{ProofPayload, ProofRequest};
use tracing::{debug, warn};

use crate::{
    account::SelfAccount,
    dispatch::Contract,
    error::LedgerError,
    registry::RecoveryRegistry,
    slots,
    storage::{HashMapStorageProvider, StorageProvider},
    verifier::ProofVerifier,
    wrapper::RecoveryWrapper,
};

/// A state-changing call submitted to the ledger.
#[derive(Debug, Clone)]
pub struct CallRequest {
    pub from: Address,
    pub to: Address,
    pub value: U256,
    pub data: Bytes,
}

/// Outcome of a successfully executed call.
#[derive(Debug, Clone)]
pub struct Receipt {
    pub tx_hash: B256,
    pub output: Bytes,
    pub logs: Vec<Log>,
}

/// The ledger: ordered execution, contract routing, and the verification
/// hub that turns accepted identity proofs into wrapper callbacks.
pub struct Ledger {
    storage: HashMapStorageProvider,
    /// Wrapper address to the account it recovers, filled in as accounts
    /// initialize. Routing falls through to the account contract otherwise.
    wrappers: HashMap<Address, Address>,
    verifier: Box<dyn ProofVerifier>,
}

impl Ledger {
    pub fn new(verifier: Box<dyn ProofVerifier>) -> Self {
        Self {
            storage: HashMapStorageProvider::new(),
            wrappers: HashMap::new(),
            verifier,
        }
    }

    /// Credits `value` to an address, outside of any call.
    pub fn fund(&mut self, address: Address, value: U256) {
        self.storage.credit(address, value);
    }

    pub fn balance(&self, address: Address) -> U256 {
        self.storage.balance(address)
    }

    /// Number of calls the address has executed; also its CREATE nonce.
    pub fn transaction_count(&self, address: Address) -> u64 {
        self.storage.nonce(address)
    }

    /// Executes a state-changing call atomically.
    pub fn execute(&mut self, request: CallRequest) -> Result<Receipt, LedgerError> {
        let snapshot = self.storage.clone();
        let nonce = self.storage.nonce(request.from);
        let tx_hash = transaction_hash(request.from, nonce);
        debug!(from = %request.from, to = %request.to, %tx_hash, "executing call");

        match self.execute_inner(&request) {
            Ok(output) => {
                let logs = self.storage.take_logs();
                Ok(Receipt { tx_hash, output, logs })
            }
            Err(err) => {
                warn!(from = %request.from, to = %request.to, %err, "call reverted");
                self.storage = snapshot;
                Err(err)
            }
        }
    }

    /// Read-only call: executed against a throwaway copy of state.
    pub fn call(&self, to: Address, data: &[u8], from: Address) -> Result<Bytes, LedgerError> {
        let mut scratch = self.storage.clone();
        route(&mut scratch, &self.wrappers, to, data, from)
    }

    /// Verification-hub entry point: checks the request's scope against the
    /// account's bound scope, runs the external verifier, and on acceptance
    /// delivers the claim to the account's wrapper as a verified callback.
    pub fn submit_proof(
        &mut self,
        account: Address,
        request: &ProofRequest,
        payload: &ProofPayload,
    ) -> Result<Receipt, LedgerError> {
        let bound_scope = self.storage.sload(account, slots::account::SCOPE)?;
        if request.scope()? != bound_scope {
            return Err(LedgerError::ScopeMismatch);
        }

        let claim = self
            .verifier
            .verify(request, payload)
            .ok_or(LedgerError::ProofRejected)?;
        debug!(%account, nullifier = %claim.nullifier, signer = %claim.signer, "proof accepted");

        let wrapper = Address::from_word(B256::from(
            self.storage.sload(account, slots::account::WRAPPER)?,
        ));
        let data = IRecoveryWrapper::onVerificationSuccessCall {
            nullifier: claim.nullifier,
            userData: request.user_defined_data.clone(),
        }
        .abi_encode();

        self.execute(CallRequest {
            from: VERIFICATION_HUB_ADDRESS,
            to: wrapper,
            value: U256::ZERO,
            data: data.into(),
        })
    }

    fn execute_inner(&mut self, request: &CallRequest) -> Result<Bytes, LedgerError> {
        self.storage.bump_nonce(request.from);
        if !request.value.is_zero() {
            self.storage
                .transfer(request.from, request.to, request.value)?;
        }

        let output = route(
            &mut self.storage,
            &self.wrappers,
            request.to,
            &request.data,
            request.from,
        )?;

        // A successful initialize pairs a wrapper with the account; record
        // the pairing so calls to the wrapper address route there.
        if request.data.starts_with(&ISelfAccount::initializeCall::SELECTOR) {
            let wrapper = Address::from_word(B256::from(
                self.storage.sload(request.to, slots::account::WRAPPER)?,
            ));
            self.wrappers.insert(wrapper, request.to);
        }

        Ok(output)
    }
}

fn route(
    storage: &mut HashMapStorageProvider,
    wrappers: &HashMap<Address, Address>,
    to: Address,
    data: &[u8],
    from: Address,
) -> Result<Bytes, LedgerError> {
    if to == RECOVERY_REGISTRY_ADDRESS {
        RecoveryRegistry::new(to, storage).call(data, from)
    } else if wrappers.contains_key(&to) {
        RecoveryWrapper::new(to, storage).call(data, from)
    } else {
        SelfAccount::new(to, storage).call(data, from)
    }
}

fn transaction_hash(from: Address, nonce: u64) -> B256 {
    let mut preimage = [0u8; 28];
    preimage[..20].copy_from_slice(from.as_slice());
    preimage[20..].copy_from_slice(&nonce.to_be_bytes());
    keccak256(preimage)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{test_util::assert_reverts_with, verifier::RejectAll};
    use selfguard_contracts::SelfAccountError;

    fn ledger() -> Ledger {
        Ledger::new(Box::new(RejectAll))
    }

    #[test]
    fn reverted_call_leaves_no_trace() {
        let mut ledger = ledger();
        let account = Address::random();
        let outsider = Address::random();
        ledger.fund(outsider, U256::from(10));

        // enableRecoveryMode from a non-owner reverts; the value transfer
        // and nonce bump roll back with it.
        let result = ledger.execute(CallRequest {
            from: outsider,
            to: account,
            value: U256::from(3),
            data: ISelfAccount::enableRecoveryModeCall {}.abi_encode().into(),
        });
        assert_reverts_with(result, SelfAccountError::unauthorized_caller());

        assert_eq!(ledger.balance(outsider), U256::from(10));
        assert_eq!(ledger.balance(account), U256::ZERO);
        assert_eq!(ledger.transaction_count(outsider), 0);
    }

    #[test]
    fn initialize_consumes_two_nonces() -> eyre::Result<()> {
        let mut ledger = ledger();
        let account = Address::random();

        let receipt = ledger.execute(CallRequest {
            from: account,
            to: account,
            value: U256::ZERO,
            data: ISelfAccount::initializeCall {
                scope: U256::from(7),
                isProduction: false,
            }
            .abi_encode()
            .into(),
        })?;
        assert!(!receipt.logs.is_empty());
        // one for the transaction itself, one for the wrapper CREATE
        assert_eq!(ledger.transaction_count(account), 2);
        Ok(())
    }

    #[test]
    fn distinct_nonces_give_distinct_hashes() {
        let from = Address::random();
        assert_ne!(transaction_hash(from, 0), transaction_hash(from, 1));
    }

    #[test]
    fn read_only_call_does_not_mutate() -> eyre::Result<()> {
        let ledger = ledger();
        let account = Address::random();

        let out = ledger.call(
            account,
            &ISelfAccount::isInitializedCall {}.abi_encode(),
            account,
        )?;
        assert_eq!(out.len(), 32);
        assert_eq!(ledger.transaction_count(account), 0);
        Ok(())
    }
}
