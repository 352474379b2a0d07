//! Tests for the generated interface types (Calls, Error, Event) of the
//! three protocol contracts.

use alloy_primitives::{Address, Bytes, IntoLogData, U256};
use alloy_sol_types::{SolCall, SolError, SolEvent, SolInterface};
use selfguard_contracts::{
    IRecoveryRegistry, IRecoveryWrapper, ISelfAccount, RecoveryRegistryError, SelfAccountError,
    cleanup_digest, registration_digest,
};

#[test]
fn account_calls_round_trip() {
    let call = ISelfAccount::initializeCall {
        scope: U256::from(42),
        isProduction: false,
    };
    let encoded = ISelfAccount::ISelfAccountCalls::initialize(call.clone()).abi_encode();

    let decoded = ISelfAccount::ISelfAccountCalls::abi_decode(&encoded).unwrap();
    assert_eq!(decoded, ISelfAccount::ISelfAccountCalls::initialize(call));

    let call = ISelfAccount::recoverCall {
        to: Address::random(),
        value: U256::from(1),
        data: Bytes::new(),
    };
    let encoded = ISelfAccount::ISelfAccountCalls::recover(call.clone()).abi_encode();
    let decoded = ISelfAccount::ISelfAccountCalls::abi_decode(&encoded).unwrap();
    assert_eq!(decoded, ISelfAccount::ISelfAccountCalls::recover(call));
}

#[test]
fn canonical_selectors_are_present() {
    for selector in [
        ISelfAccount::initializeCall::SELECTOR,
        ISelfAccount::isInitializedCall::SELECTOR,
        ISelfAccount::enableRecoveryModeCall::SELECTOR,
        ISelfAccount::finishRecoveryModeCall::SELECTOR,
        ISelfAccount::recoverCall::SELECTOR,
        ISelfAccount::wrapperCall::SELECTOR,
    ] {
        assert!(ISelfAccount::ISelfAccountCalls::valid_selector(selector));
    }

    for selector in [
        IRecoveryWrapper::allowedSignerCall::SELECTOR,
        IRecoveryWrapper::getMasterNullifierCall::SELECTOR,
        IRecoveryWrapper::onVerificationSuccessCall::SELECTOR,
    ] {
        assert!(IRecoveryWrapper::IRecoveryWrapperCalls::valid_selector(selector));
    }

    for selector in [
        IRecoveryRegistry::registerRecoveryCall::SELECTOR,
        IRecoveryRegistry::cleanupRecoveryCall::SELECTOR,
        IRecoveryRegistry::getRecoveryAddressCall::SELECTOR,
    ] {
        assert!(IRecoveryRegistry::IRecoveryRegistryCalls::valid_selector(selector));
    }
}

#[test]
fn unknown_selector_is_rejected() {
    let calldata = [0xde, 0xad, 0xbe, 0xef, 0x00, 0x00, 0x00, 0x00];
    assert!(ISelfAccount::ISelfAccountCalls::abi_decode(&calldata).is_err());
    assert!(IRecoveryRegistry::IRecoveryRegistryCalls::abi_decode(&calldata).is_err());
}

#[test]
fn error_constructors() {
    let err = SelfAccountError::insufficient_balance(U256::from(200), U256::from(100));
    assert!(matches!(err, SelfAccountError::InsufficientBalance(_)));

    let err = SelfAccountError::already_initialized();
    assert_eq!(
        err.abi_encode(),
        ISelfAccount::AlreadyInitialized {}.abi_encode()
    );

    let err = RecoveryRegistryError::no_recovery_address_set();
    assert_eq!(
        err.abi_encode(),
        IRecoveryRegistry::NoRecoveryAddressSet {}.abi_encode()
    );
}

#[test]
fn registry_events_carry_indexed_topics() {
    let user = Address::random();
    let recovery = Address::random();

    let log = IRecoveryRegistry::RecoveryRegistered {
        user,
        recoveryAddress: recovery,
    }
    .into_log_data();
    assert_eq!(log.topics().len(), 3);

    let decoded = IRecoveryRegistry::RecoveryRegistered::decode_log_data(&log).unwrap();
    assert_eq!(decoded.user, user);
    assert_eq!(decoded.recoveryAddress, recovery);

    let log = IRecoveryRegistry::RecoveryCleanedUp { user }.into_log_data();
    assert_eq!(log.topics().len(), 2);
}

#[test]
fn digest_helpers_hash_the_packed_address() {
    let addr = Address::random();
    // registering an address and cleaning up as that address sign the same
    // digest; distinct addresses never collide
    assert_eq!(registration_digest(addr), cleanup_digest(addr));
    assert_ne!(registration_digest(addr), registration_digest(Address::random()));
}
