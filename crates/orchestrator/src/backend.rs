//! The execution seam the orchestrator drives.

use alloy_primitives::{Address, B256, Bytes, U256};
use async_trait::async_trait;
use eyre::Result;

/// Where recovery transactions land: an in-memory ledger or a live RPC
/// endpoint. `send` submits a transaction and waits until it is included,
/// returning its hash; a revert surfaces as an error.
#[async_trait]
pub trait RecoveryBackend: Send + Sync {
    /// Address transactions are sent from.
    fn sender(&self) -> Address;

    async fn transaction_count(&self, address: Address) -> Result<u64>;

    async fn get_balance(&self, address: Address) -> Result<U256>;

    /// Read-only contract call.
    async fn call(&self, to: Address, data: Bytes) -> Result<Bytes>;

    /// Submit a transaction and wait for inclusion.
    async fn send(&self, to: Address, value: U256, data: Bytes) -> Result<B256>;
}
