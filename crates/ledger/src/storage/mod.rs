pub mod hashmap;
pub use hashmap::HashMapStorageProvider;

use alloy_primitives::{Address, IntoLogData, Log, U256};

use crate::error::LedgerError;

/// Low-level storage provider backing contract execution.
pub trait StorageProvider {
    fn sload(&mut self, address: Address, slot: U256) -> Result<U256, LedgerError>;
    fn sstore(&mut self, address: Address, slot: U256, value: U256) -> Result<(), LedgerError>;
    fn balance(&self, address: Address) -> U256;
    fn transfer(&mut self, from: Address, to: Address, value: U256) -> Result<(), LedgerError>;
    fn nonce(&self, address: Address) -> u64;
    fn bump_nonce(&mut self, address: Address);
    fn emit_event(&mut self, log: Log);
}

/// Trait providing access to a contract's address and storage provider.
///
/// Abstracts the common pattern of contracts needing both an address and a
/// mutable reference to a storage provider.
pub trait ContractStorage {
    type Storage: StorageProvider;
    fn address(&self) -> Address;
    fn storage(&mut self) -> &mut Self::Storage;
}

/// Storage operations scoped to the implementing contract's own address.
pub trait StorageOps {
    fn sstore(&mut self, slot: U256, value: U256) -> Result<(), LedgerError>;
    fn sload(&mut self, slot: U256) -> Result<U256, LedgerError>;
    fn emit(&mut self, event: impl IntoLogData);
}

/// Blanket implementation of `StorageOps` for all types that implement
/// `ContractStorage`, delegating to the underlying provider.
impl<T> StorageOps for T
where
    T: ContractStorage,
{
    fn sstore(&mut self, slot: U256, value: U256) -> Result<(), LedgerError> {
        let address = self.address();
        self.storage().sstore(address, slot, value)
    }

    fn sload(&mut self, slot: U256) -> Result<U256, LedgerError> {
        let address = self.address();
        self.storage().sload(address, slot)
    }

    fn emit(&mut self, event: impl IntoLogData) {
        let log = Log {
            address: self.address(),
            data: event.into_log_data(),
        };
        self.storage().emit_event(log);
    }
}
