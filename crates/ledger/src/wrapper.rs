//! The recovery wrapper paired 1:1 with each recoverable account.

use alloy_primitives::{Address, B256, U256};
use selfguard_contracts::{IRecoveryWrapper, RecoveryWrapperError, VERIFICATION_HUB_ADDRESS};

use crate::{
    error::LedgerError,
    slots,
    storage::{ContractStorage, StorageOps, StorageProvider},
};

/// Holds the credential nullifier bound at enrollment and the signer
/// authorized by the latest verified recovery proof.
pub struct RecoveryWrapper<'a, S> {
    address: Address,
    storage: &'a mut S,
}

impl<S: StorageProvider> ContractStorage for RecoveryWrapper<'_, S> {
    type Storage = S;

    fn address(&self) -> Address {
        self.address
    }

    fn storage(&mut self) -> &mut Self::Storage {
        self.storage
    }
}

impl<'a, S: StorageProvider> RecoveryWrapper<'a, S> {
    pub fn new(address: Address, storage: &'a mut S) -> Self {
        Self { address, storage }
    }

    pub fn account(&mut self) -> Result<Address, LedgerError> {
        Ok(Address::from_word(B256::from(
            self.sload(slots::wrapper::ACCOUNT)?,
        )))
    }

    pub fn allowed_signer(&mut self) -> Result<Address, LedgerError> {
        Ok(Address::from_word(B256::from(
            self.sload(slots::wrapper::ALLOWED_SIGNER)?,
        )))
    }

    pub fn master_nullifier(&mut self) -> Result<U256, LedgerError> {
        self.sload(slots::wrapper::MASTER_NULLIFIER)
    }

    /// Verification-hub callback for a successfully verified identity proof.
    ///
    /// Outside a recovery window the proof enrolls the credential, binding
    /// the master nullifier exactly once. Inside an open window it binds the
    /// signer encoded in `user_data` exactly once; a second valid proof in
    /// the same window is an attempted rebind and is rejected.
    pub fn on_verification_success(
        &mut self,
        sender: Address,
        nullifier: U256,
        user_data: &[u8],
    ) -> Result<(), LedgerError> {
        if sender != VERIFICATION_HUB_ADDRESS {
            return Err(RecoveryWrapperError::only_verification_hub().into());
        }
        if nullifier.is_zero() {
            return Err(RecoveryWrapperError::zero_nullifier().into());
        }

        let account = self.account()?;
        let window_open = !self
            .storage
            .sload(account, slots::account::RECOVERY_MODE)?
            .is_zero();
        let master = self.master_nullifier()?;

        if !window_open {
            // enrollment
            if !master.is_zero() {
                return Err(RecoveryWrapperError::identity_already_bound().into());
            }
            self.sstore(slots::wrapper::MASTER_NULLIFIER, nullifier)?;
            self.emit(IRecoveryWrapper::IdentityBound { nullifier });
            return Ok(());
        }

        if master.is_zero() {
            return Err(RecoveryWrapperError::identity_not_bound().into());
        }
        if nullifier != master {
            return Err(RecoveryWrapperError::nullifier_mismatch().into());
        }
        if !self.allowed_signer()?.is_zero() {
            return Err(RecoveryWrapperError::signer_already_bound().into());
        }

        let signer = decode_signer(user_data)?;
        self.sstore(slots::wrapper::ALLOWED_SIGNER, signer.into_word().into())?;
        self.emit(IRecoveryWrapper::SignerBound { signer, nullifier });
        Ok(())
    }

    /// Records the paired account; called once when the account initializes.
    pub(crate) fn set_account(&mut self, account: Address) -> Result<(), LedgerError> {
        self.sstore(slots::wrapper::ACCOUNT, account.into_word().into())
    }

    /// Invalidates the bound signer; called when a fresh recovery window
    /// opens.
    pub(crate) fn clear_signer(&mut self) -> Result<(), LedgerError> {
        self.sstore(slots::wrapper::ALLOWED_SIGNER, U256::ZERO)
    }
}

/// The signer a proof authorizes rides in the first 20 bytes of the proof's
/// user-defined data.
fn decode_signer(user_data: &[u8]) -> Result<Address, LedgerError> {
    if user_data.len() < Address::len_bytes() {
        return Err(RecoveryWrapperError::invalid_user_data().into());
    }
    let signer = Address::from_slice(&user_data[..Address::len_bytes()]);
    if signer.is_zero() {
        return Err(RecoveryWrapperError::invalid_user_data().into());
    }
    Ok(signer)
}
