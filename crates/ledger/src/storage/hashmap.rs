use std::collections::HashMap;

use alloy_primitives::{Address, Log, U256};

use crate::{error::LedgerError, storage::StorageProvider};

/// In-memory storage provider over hash maps.
///
/// Cloning snapshots the full state; the ledger relies on this to roll back
/// rejected calls atomically.
#[derive(Debug, Default, Clone)]
pub struct HashMapStorageProvider {
    slots: HashMap<(Address, U256), U256>,
    balances: HashMap<Address, U256>,
    nonces: HashMap<Address, u64>,
    logs: Vec<Log>,
}

impl HashMapStorageProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Credits a balance out of thin air; test/setup convenience.
    pub fn credit(&mut self, address: Address, value: U256) {
        let balance = self.balances.entry(address).or_default();
        *balance = balance.saturating_add(value);
    }

    /// Drains the logs emitted since the last drain.
    pub fn take_logs(&mut self) -> Vec<Log> {
        std::mem::take(&mut self.logs)
    }
}

impl StorageProvider for HashMapStorageProvider {
    fn sload(&mut self, address: Address, slot: U256) -> Result<U256, LedgerError> {
        Ok(self.slots.get(&(address, slot)).copied().unwrap_or_default())
    }

    fn sstore(&mut self, address: Address, slot: U256, value: U256) -> Result<(), LedgerError> {
        self.slots.insert((address, slot), value);
        Ok(())
    }

    fn balance(&self, address: Address) -> U256 {
        self.balances.get(&address).copied().unwrap_or_default()
    }

    fn transfer(&mut self, from: Address, to: Address, value: U256) -> Result<(), LedgerError> {
        let available = self.balance(from);
        if available < value {
            return Err(LedgerError::InsufficientFunds {
                requested: value,
                available,
            });
        }
        self.balances.insert(from, available - value);
        self.credit(to, value);
        Ok(())
    }

    fn nonce(&self, address: Address) -> u64 {
        self.nonces.get(&address).copied().unwrap_or_default()
    }

    fn bump_nonce(&mut self, address: Address) {
        *self.nonces.entry(address).or_default() += 1;
    }

    fn emit_event(&mut self, log: Log) {
        self.logs.push(log);
    }
}
