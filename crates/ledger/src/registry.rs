//! The legacy recovery registry.
//!
//! An earlier design iteration kept as an alternate backend: users bind an
//! explicit fallback address with an ECDSA signature instead of a credential
//! proof. Not composable with the wrapper-based flow.

use alloy_primitives::{Address, B256, Signature, U256};
use selfguard_contracts::{
    IRecoveryRegistry, RecoveryRegistryError, cleanup_digest, registration_digest,
};

use crate::{
    error::LedgerError,
    slots,
    storage::{ContractStorage, StorageOps, StorageProvider},
};

pub struct RecoveryRegistry<'a, S> {
    address: Address,
    storage: &'a mut S,
}

impl<S: StorageProvider> ContractStorage for RecoveryRegistry<'_, S> {
    type Storage = S;

    fn address(&self) -> Address {
        self.address
    }

    fn storage(&mut self) -> &mut Self::Storage {
        self.storage
    }
}

impl<'a, S: StorageProvider> RecoveryRegistry<'a, S> {
    pub fn new(address: Address, storage: &'a mut S) -> Self {
        Self { address, storage }
    }

    /// Binds `recovery_address` as the sender's fallback. The signature must
    /// be the sender's own, over the registration digest of the address.
    /// A zero address or a signature not produced by the sender's key is
    /// rejected before any state is touched.
    pub fn register_recovery(
        &mut self,
        sender: Address,
        recovery_address: Address,
        signature: &[u8],
    ) -> Result<(), LedgerError> {
        if recovery_address.is_zero() {
            return Err(RecoveryRegistryError::zero_address().into());
        }
        verify_signer(registration_digest(recovery_address), signature, sender)?;

        self.sstore(
            slots::mapping_slot(sender, slots::registry::RECOVERY_ADDRESS),
            recovery_address.into_word().into(),
        )?;
        self.emit(IRecoveryRegistry::RecoveryRegistered {
            user: sender,
            recoveryAddress: recovery_address,
        });
        Ok(())
    }

    /// Clears the sender's fallback. The signature must be the sender's own,
    /// over the cleanup digest of their address; fails when nothing is set.
    pub fn cleanup_recovery(&mut self, sender: Address, signature: &[u8]) -> Result<(), LedgerError> {
        verify_signer(cleanup_digest(sender), signature, sender)?;

        let slot = slots::mapping_slot(sender, slots::registry::RECOVERY_ADDRESS);
        if self.sload(slot)?.is_zero() {
            return Err(RecoveryRegistryError::no_recovery_address_set().into());
        }

        self.sstore(slot, U256::ZERO)?;
        self.emit(IRecoveryRegistry::RecoveryCleanedUp { user: sender });
        Ok(())
    }

    /// Pure read; zero address when unset.
    pub fn get_recovery_address(&mut self, user: Address) -> Result<Address, LedgerError> {
        let value = self.sload(slots::mapping_slot(user, slots::registry::RECOVERY_ADDRESS))?;
        Ok(Address::from_word(B256::from(value)))
    }
}

fn verify_signer(digest: B256, signature: &[u8], expected: Address) -> Result<(), LedgerError> {
    let signature = Signature::from_raw(signature)
        .map_err(|_| RecoveryRegistryError::invalid_signature())?;
    let recovered = signature
        .recover_address_from_prehash(&digest)
        .map_err(|_| RecoveryRegistryError::invalid_signature())?;
    if recovered != expected {
        return Err(RecoveryRegistryError::invalid_signature().into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{storage::HashMapStorageProvider, test_util::assert_reverts_with};
    use alloy_signer::SignerSync;
    use alloy_signer_local::PrivateKeySigner;
    use selfguard_contracts::RECOVERY_REGISTRY_ADDRESS;

    fn sign(signer: &PrivateKeySigner, digest: B256) -> Vec<u8> {
        signer.sign_hash_sync(&digest).unwrap().as_bytes().to_vec()
    }

    #[test]
    fn register_and_read_back() -> eyre::Result<()> {
        let mut storage = HashMapStorageProvider::new();
        let mut registry = RecoveryRegistry::new(RECOVERY_REGISTRY_ADDRESS, &mut storage);

        let user = PrivateKeySigner::random();
        let recovery = Address::random();

        let sig = sign(&user, registration_digest(recovery));
        registry.register_recovery(user.address(), recovery, &sig)?;

        assert_eq!(registry.get_recovery_address(user.address())?, recovery);
        // unrelated users stay unset
        assert_eq!(registry.get_recovery_address(Address::random())?, Address::ZERO);
        Ok(())
    }

    #[test]
    fn register_rejects_foreign_signature() {
        let mut storage = HashMapStorageProvider::new();
        let mut registry = RecoveryRegistry::new(RECOVERY_REGISTRY_ADDRESS, &mut storage);

        let user = PrivateKeySigner::random();
        let other = PrivateKeySigner::random();
        let recovery = Address::random();

        let sig = sign(&other, registration_digest(recovery));
        assert_reverts_with(
            registry.register_recovery(user.address(), recovery, &sig),
            RecoveryRegistryError::invalid_signature(),
        );
    }

    #[test]
    fn register_rejects_zero_address() {
        let mut storage = HashMapStorageProvider::new();
        let mut registry = RecoveryRegistry::new(RECOVERY_REGISTRY_ADDRESS, &mut storage);

        let user = PrivateKeySigner::random();
        let sig = sign(&user, registration_digest(Address::ZERO));
        assert_reverts_with(
            registry.register_recovery(user.address(), Address::ZERO, &sig),
            RecoveryRegistryError::zero_address(),
        );
    }

    #[test]
    fn register_rejects_garbage_signature() {
        let mut storage = HashMapStorageProvider::new();
        let mut registry = RecoveryRegistry::new(RECOVERY_REGISTRY_ADDRESS, &mut storage);

        assert_reverts_with(
            registry.register_recovery(Address::random(), Address::random(), &[0u8; 10]),
            RecoveryRegistryError::invalid_signature(),
        );
    }

    #[test]
    fn cleanup_clears_and_then_fails() -> eyre::Result<()> {
        let mut storage = HashMapStorageProvider::new();
        let mut registry = RecoveryRegistry::new(RECOVERY_REGISTRY_ADDRESS, &mut storage);

        let user = PrivateKeySigner::random();
        let recovery = Address::random();

        let sig = sign(&user, registration_digest(recovery));
        registry.register_recovery(user.address(), recovery, &sig)?;

        let cleanup_sig = sign(&user, cleanup_digest(user.address()));
        registry.cleanup_recovery(user.address(), &cleanup_sig)?;
        assert_eq!(registry.get_recovery_address(user.address())?, Address::ZERO);

        // a second consecutive cleanup has nothing to clear
        assert_reverts_with(
            registry.cleanup_recovery(user.address(), &cleanup_sig),
            RecoveryRegistryError::no_recovery_address_set(),
        );
        Ok(())
    }

    #[test]
    fn cleanup_rejects_foreign_signature() -> eyre::Result<()> {
        let mut storage = HashMapStorageProvider::new();
        let mut registry = RecoveryRegistry::new(RECOVERY_REGISTRY_ADDRESS, &mut storage);

        let user = PrivateKeySigner::random();
        let other = PrivateKeySigner::random();
        let recovery = Address::random();

        let sig = sign(&user, registration_digest(recovery));
        registry.register_recovery(user.address(), recovery, &sig)?;

        let cleanup_sig = sign(&other, cleanup_digest(user.address()));
        assert_reverts_with(
            registry.cleanup_recovery(user.address(), &cleanup_sig),
            RecoveryRegistryError::invalid_signature(),
        );
        // binding is untouched
        assert_eq!(registry.get_recovery_address(user.address())?, recovery);
        Ok(())
    }
}
