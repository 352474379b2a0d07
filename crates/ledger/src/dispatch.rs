//! Selector dispatch from ABI calldata into the contract state machines.

use alloy_primitives::{Address, Bytes};
use alloy_sol_types::{SolCall, SolInterface};
use selfguard_contracts::{
    IRecoveryRegistry::{self, IRecoveryRegistryCalls},
    IRecoveryWrapper::{self, IRecoveryWrapperCalls},
    ISelfAccount::{self, ISelfAccountCalls},
};

use crate::{
    account::SelfAccount, error::LedgerError, registry::RecoveryRegistry,
    storage::StorageProvider, wrapper::RecoveryWrapper,
};

/// A contract reachable through calldata dispatch. Calldata whose selector is
/// unknown to the interface fails decoding and surfaces as an ABI error.
pub trait Contract {
    fn call(&mut self, calldata: &[u8], msg_sender: Address) -> Result<Bytes, LedgerError>;
}

fn void() -> Bytes {
    Bytes::new()
}

fn returns<C: SolCall>(value: C::Return) -> Bytes {
    C::abi_encode_returns(&value).into()
}

impl<S: StorageProvider> Contract for SelfAccount<'_, S> {
    fn call(&mut self, calldata: &[u8], msg_sender: Address) -> Result<Bytes, LedgerError> {
        match ISelfAccountCalls::abi_decode(calldata)? {
            ISelfAccountCalls::initialize(call) => {
                self.initialize(msg_sender, call.scope, call.isProduction)?;
                Ok(void())
            }
            ISelfAccountCalls::isInitialized(_) => {
                Ok(returns::<ISelfAccount::isInitializedCall>(self.is_initialized()?))
            }
            ISelfAccountCalls::scope(_) => Ok(returns::<ISelfAccount::scopeCall>(self.scope()?)),
            ISelfAccountCalls::wrapper(_) => {
                Ok(returns::<ISelfAccount::wrapperCall>(self.wrapper_address()?))
            }
            ISelfAccountCalls::isRecoveryModeEnabled(_) => {
                Ok(returns::<ISelfAccount::isRecoveryModeEnabledCall>(
                    self.is_recovery_mode_enabled()?,
                ))
            }
            ISelfAccountCalls::enableRecoveryMode(_) => {
                self.enable_recovery_mode(msg_sender)?;
                Ok(void())
            }
            ISelfAccountCalls::finishRecoveryMode(_) => {
                self.finish_recovery_mode(msg_sender)?;
                Ok(void())
            }
            ISelfAccountCalls::recover(call) => {
                self.recover(msg_sender, call.to, call.value, &call.data)?;
                Ok(void())
            }
        }
    }
}

impl<S: StorageProvider> Contract for RecoveryWrapper<'_, S> {
    fn call(&mut self, calldata: &[u8], msg_sender: Address) -> Result<Bytes, LedgerError> {
        match IRecoveryWrapperCalls::abi_decode(calldata)? {
            IRecoveryWrapperCalls::account(_) => {
                Ok(returns::<IRecoveryWrapper::accountCall>(self.account()?))
            }
            IRecoveryWrapperCalls::allowedSigner(_) => {
                Ok(returns::<IRecoveryWrapper::allowedSignerCall>(self.allowed_signer()?))
            }
            IRecoveryWrapperCalls::getMasterNullifier(_) => {
                Ok(returns::<IRecoveryWrapper::getMasterNullifierCall>(
                    self.master_nullifier()?,
                ))
            }
            IRecoveryWrapperCalls::onVerificationSuccess(call) => {
                self.on_verification_success(msg_sender, call.nullifier, &call.userData)?;
                Ok(void())
            }
        }
    }
}

impl<S: StorageProvider> Contract for RecoveryRegistry<'_, S> {
    fn call(&mut self, calldata: &[u8], msg_sender: Address) -> Result<Bytes, LedgerError> {
        match IRecoveryRegistryCalls::abi_decode(calldata)? {
            IRecoveryRegistryCalls::registerRecovery(call) => {
                self.register_recovery(msg_sender, call.recoveryAddress, &call.signature)?;
                Ok(void())
            }
            IRecoveryRegistryCalls::cleanupRecovery(call) => {
                self.cleanup_recovery(msg_sender, &call.signature)?;
                Ok(void())
            }
            IRecoveryRegistryCalls::getRecoveryAddress(call) => {
                Ok(returns::<IRecoveryRegistry::getRecoveryAddressCall>(
                    self.get_recovery_address(call.user)?,
                ))
            }
        }
    }
}
