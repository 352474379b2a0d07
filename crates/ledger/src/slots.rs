//! Storage layout of the ledger-hosted contracts.

use alloy_primitives::{Address, U256, keccak256};

pub mod account {
    use alloy_primitives::U256;

    pub const INITIALIZED: U256 = U256::ZERO;
    pub const SCOPE: U256 = U256::from_limbs([1, 0, 0, 0]);
    pub const WRAPPER: U256 = U256::from_limbs([2, 0, 0, 0]);
    pub const RECOVERY_MODE: U256 = U256::from_limbs([3, 0, 0, 0]);
}

pub mod wrapper {
    use alloy_primitives::U256;

    pub const ACCOUNT: U256 = U256::ZERO;
    pub const ALLOWED_SIGNER: U256 = U256::from_limbs([1, 0, 0, 0]);
    pub const MASTER_NULLIFIER: U256 = U256::from_limbs([2, 0, 0, 0]);
}

pub mod registry {
    use alloy_primitives::U256;

    /// Base slot of the `user => recoveryAddress` mapping.
    pub const RECOVERY_ADDRESS: U256 = U256::ZERO;
}

/// Solidity-style mapping slot: `keccak256(pad32(key) ++ pad32(base))`.
pub fn mapping_slot(key: Address, base: U256) -> U256 {
    let mut buf = [0u8; 64];
    buf[..32].copy_from_slice(key.into_word().as_slice());
    buf[32..].copy_from_slice(&base.to_be_bytes::<32>());
    keccak256(buf).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mapping_slots_are_disjoint_per_key() {
        let a = mapping_slot(Address::random(), registry::RECOVERY_ADDRESS);
        let b = mapping_slot(Address::random(), registry::RECOVERY_ADDRESS);
        assert_ne!(a, b);
    }

    #[test]
    fn mapping_slots_are_disjoint_per_base() {
        let key = Address::random();
        assert_ne!(
            mapping_slot(key, U256::ZERO),
            mapping_slot(key, U256::from(1))
        );
    }
}
