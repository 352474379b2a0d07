//! Backend over the in-memory ledger, for tests and local runs.

use std::sync::{Arc, Mutex};

use alloy_primitives::{Address, B256, Bytes, U256};
use async_trait::async_trait;
use eyre::Result;
use selfguard_ledger::{CallRequest, Ledger};

use crate::backend::RecoveryBackend;

/// Shares one ledger between several orchestrators, each submitting from its
/// own sender. The mutex is held only across the synchronous ledger call.
#[derive(Clone)]
pub struct LedgerBackend {
    ledger: Arc<Mutex<Ledger>>,
    sender: Address,
}

impl LedgerBackend {
    pub fn new(ledger: Arc<Mutex<Ledger>>, sender: Address) -> Self {
        Self { ledger, sender }
    }

    /// The same ledger viewed from a different sender.
    pub fn as_sender(&self, sender: Address) -> Self {
        Self { ledger: Arc::clone(&self.ledger), sender }
    }

    pub fn ledger(&self) -> &Arc<Mutex<Ledger>> {
        &self.ledger
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Ledger> {
        // a poisoned ledger means a test already panicked; propagate
        self.ledger.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl RecoveryBackend for LedgerBackend {
    fn sender(&self) -> Address {
        self.sender
    }

    async fn transaction_count(&self, address: Address) -> Result<u64> {
        Ok(self.lock().transaction_count(address))
    }

    async fn get_balance(&self, address: Address) -> Result<U256> {
        Ok(self.lock().balance(address))
    }

    async fn call(&self, to: Address, data: Bytes) -> Result<Bytes> {
        Ok(self.lock().call(to, &data, self.sender)?)
    }

    async fn send(&self, to: Address, value: U256, data: Bytes) -> Result<B256> {
        let receipt = self.lock().execute(CallRequest {
            from: self.sender,
            to,
            value,
            data,
        })?;
        Ok(receipt.tx_hash)
    }
}
