//! Contract bindings and ABI definitions for the recovery protocol.
//!
//! One canonical ABI revision per contract; earlier revisions observed in the
//! wild (`initialize(uint256)` without the production flag, `proposeRecovery`)
//! are deprecated and not supported.
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

use alloy_primitives::{Address, B256, address, keccak256};

pub mod account;
pub mod registry;
pub mod wrapper;

pub use account::{ISelfAccount, SelfAccountError, SelfAccountEvent};
pub use registry::{IRecoveryRegistry, RecoveryRegistryError, RecoveryRegistryEvent};
pub use wrapper::{IRecoveryWrapper, RecoveryWrapperError, RecoveryWrapperEvent};

/// Well-known address of the legacy recovery registry.
pub const RECOVERY_REGISTRY_ADDRESS: Address =
    address!("0x5e1F000000000000000000000000000000000001");

/// Well-known address of the identity verification hub. The hub is the only
/// caller the recovery wrapper accepts verification callbacks from.
pub const VERIFICATION_HUB_ADDRESS: Address =
    address!("0x5e1F000000000000000000000000000000000002");

/// Digest a user signs to register a recovery address: the EIP-191
/// personal-sign hash over `keccak256(abi.encodePacked(recoveryAddress))`.
pub fn registration_digest(recovery_address: Address) -> B256 {
    alloy_primitives::eip191_hash_message(keccak256(recovery_address.as_slice()))
}

/// Digest a user signs to clean up their recovery registration: the EIP-191
/// personal-sign hash over `keccak256(abi.encodePacked(user))`.
pub fn cleanup_digest(user: Address) -> B256 {
    alloy_primitives::eip191_hash_message(keccak256(user.as_slice()))
}
