//! The recoverable account state machine.

use alloy_primitives::{Address, B256, Bytes, U256};
use selfguard_contracts::{ISelfAccount, SelfAccountError};

use crate::{
    error::LedgerError,
    slots,
    storage::{ContractStorage, StorageOps, StorageProvider},
    wrapper::RecoveryWrapper,
};

/// A recoverable account: an externally owned address that adopted the
/// account implementation through one-shot delegation.
///
/// State transitions:
/// `Uninitialized -> Initialized -> RecoveryEnabled -> SignerBound -> Recovered`,
/// cycling back through a fresh `enable_recovery_mode`.
pub struct SelfAccount<'a, S> {
    address: Address,
    storage: &'a mut S,
}

impl<S: StorageProvider> ContractStorage for SelfAccount<'_, S> {
    type Storage = S;

    fn address(&self) -> Address {
        self.address
    }

    fn storage(&mut self) -> &mut Self::Storage {
        self.storage
    }
}

impl<'a, S: StorageProvider> SelfAccount<'a, S> {
    pub fn new(address: Address, storage: &'a mut S) -> Self {
        Self { address, storage }
    }

    /// Binds the proof scope, pairs a freshly derived recovery wrapper, and
    /// marks the account initialized. Valid exactly once; the wrapper lands
    /// at the account's current CREATE nonce, which the paired deployment
    /// consumes.
    pub fn initialize(
        &mut self,
        sender: Address,
        scope: U256,
        _is_production: bool,
    ) -> Result<Address, LedgerError> {
        if sender != self.address {
            return Err(SelfAccountError::unauthorized_caller().into());
        }
        if self.is_initialized()? {
            return Err(SelfAccountError::already_initialized().into());
        }

        let wrapper = self.address.create(self.storage.nonce(self.address));
        self.storage.bump_nonce(self.address);

        self.sstore(slots::account::SCOPE, scope)?;
        self.sstore(slots::account::WRAPPER, wrapper.into_word().into())?;
        self.sstore(slots::account::INITIALIZED, U256::from(1))?;

        RecoveryWrapper::new(wrapper, &mut *self.storage).set_account(self.address)?;

        self.emit(ISelfAccount::AccountInitialized {
            scope,
            wrapper,
        });
        Ok(wrapper)
    }

    pub fn is_initialized(&mut self) -> Result<bool, LedgerError> {
        Ok(!self.sload(slots::account::INITIALIZED)?.is_zero())
    }

    pub fn scope(&mut self) -> Result<U256, LedgerError> {
        self.sload(slots::account::SCOPE)
    }

    pub fn wrapper_address(&mut self) -> Result<Address, LedgerError> {
        Ok(Address::from_word(B256::from(
            self.sload(slots::account::WRAPPER)?,
        )))
    }

    pub fn is_recovery_mode_enabled(&mut self) -> Result<bool, LedgerError> {
        Ok(!self.sload(slots::account::RECOVERY_MODE)?.is_zero())
    }

    /// Opens a recovery window. Self-service: only the account itself may
    /// open it. Any signer bound in a previous window is invalidated here,
    /// and only here.
    pub fn enable_recovery_mode(&mut self, sender: Address) -> Result<(), LedgerError> {
        if sender != self.address {
            return Err(SelfAccountError::unauthorized_caller().into());
        }
        if !self.is_initialized()? {
            return Err(SelfAccountError::not_initialized().into());
        }
        if self.is_recovery_mode_enabled()? {
            return Err(SelfAccountError::recovery_mode_already_enabled().into());
        }

        let wrapper = self.wrapper_address()?;
        RecoveryWrapper::new(wrapper, &mut *self.storage).clear_signer()?;

        self.sstore(slots::account::RECOVERY_MODE, U256::from(1))?;
        self.emit(ISelfAccount::RecoveryModeEnabled {});
        Ok(())
    }

    /// Closes the recovery window. Ordered strictly after signer binding;
    /// the bound signer stays valid so `recover` calls are honored
    /// independent of finalization.
    pub fn finish_recovery_mode(&mut self, sender: Address) -> Result<(), LedgerError> {
        if !self.is_initialized()? {
            return Err(SelfAccountError::not_initialized().into());
        }
        if !self.is_recovery_mode_enabled()? {
            return Err(SelfAccountError::recovery_mode_not_enabled().into());
        }

        let signer = self.allowed_signer()?;
        if signer.is_zero() {
            return Err(SelfAccountError::no_signer_bound().into());
        }
        if sender != self.address && sender != signer {
            return Err(SelfAccountError::unauthorized_caller().into());
        }

        self.sstore(slots::account::RECOVERY_MODE, U256::ZERO)?;
        self.emit(ISelfAccount::RecoveryModeFinished {});
        Ok(())
    }

    /// Executes a value transfer as the account. The caller is re-checked
    /// against the wrapper's current `allowedSigner` on every invocation,
    /// and the balance is checked at execution time.
    pub fn recover(
        &mut self,
        sender: Address,
        to: Address,
        value: U256,
        _data: &Bytes,
    ) -> Result<(), LedgerError> {
        if !self.is_initialized()? {
            return Err(SelfAccountError::not_initialized().into());
        }

        let signer = self.allowed_signer()?;
        if signer.is_zero() {
            return Err(SelfAccountError::no_signer_bound().into());
        }
        if sender != signer {
            return Err(SelfAccountError::not_allowed_signer().into());
        }

        let available = self.storage.balance(self.address);
        if value > available {
            return Err(SelfAccountError::insufficient_balance(value, available).into());
        }
        self.storage.transfer(self.address, to, value)?;

        self.emit(ISelfAccount::Recovered { to, value });
        Ok(())
    }

    fn allowed_signer(&mut self) -> Result<Address, LedgerError> {
        let wrapper = self.wrapper_address()?;
        RecoveryWrapper::new(wrapper, &mut *self.storage).allowed_signer()
    }
}
