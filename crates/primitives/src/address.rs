//! Deterministic contract-address prediction.
//!
//! The binding flow needs the address of a contract *before* it is deployed:
//! the scope is derived from the predicted address and submitted in the same
//! transaction that consumes the deployer's one-shot delegation. Keeping the
//! derivation here, as a pure function of (deployer, nonce), makes it
//! testable without a live network.

use alloy_primitives::Address;

/// CREATE address of the contract a deployer produces at the given nonce.
pub fn contract_address(deployer: Address, nonce: u64) -> Address {
    deployer.create(nonce)
}

/// Address the deployer's next contract will occupy once the pending binding
/// transaction has consumed the current nonce.
///
/// `current_nonce` is the deployer's nonce read from the ledger at prediction
/// time; the binding transaction itself takes that nonce, so the deployment
/// lands at `current_nonce + 1`.
pub fn predict_binding_address(deployer: Address, current_nonce: u64) -> Address {
    contract_address(deployer, current_nonce + 1)
}
