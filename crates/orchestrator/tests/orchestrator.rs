//! Orchestrator lifecycle against the in-memory ledger backend.

use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use alloy_primitives::{Address, B256, Bytes, U256};
use alloy_signer::SignerSync;
use alloy_signer_local::PrivateKeySigner;
use selfguard_contracts::registration_digest;
use selfguard_ledger::{Ledger, StaticVerifier};
use selfguard_orchestrator::{
    LedgerBackend, OrchestratorError, RecoveryOrchestrator, RecoveryPhase,
};
use selfguard_primitives::{BoundSignerClaim, ProofPayload, ProofRequest};

const SCOPE_SEED: &str = "my-app-dev";

const ENROLL: &[u8] = b"enrollment-proof";
const BIND: &[u8] = b"binding-proof";

fn shared_ledger(nullifier: U256) -> Arc<Mutex<Ledger>> {
    let mut verifier = StaticVerifier::new();
    verifier.accept(
        ProofPayload(Bytes::from_static(ENROLL)),
        BoundSignerClaim { nullifier, signer: Address::ZERO },
    );
    verifier.accept(
        ProofPayload(Bytes::from_static(BIND)),
        BoundSignerClaim { nullifier, signer: Address::ZERO },
    );
    Arc::new(Mutex::new(Ledger::new(Box::new(verifier))))
}

fn submit(
    ledger: &Arc<Mutex<Ledger>>,
    account: Address,
    request: &ProofRequest,
    payload: &'static [u8],
) -> eyre::Result<()> {
    ledger
        .lock()
        .unwrap()
        .submit_proof(account, request, &ProofPayload(Bytes::from_static(payload)))?;
    Ok(())
}

#[tokio::test]
async fn lifecycle_runs_to_recovered() -> eyre::Result<()> {
    let nullifier = U256::from(42);
    let ledger = shared_ledger(nullifier);
    let account = Address::random();
    let signer = Address::random();
    let destination = Address::random();
    ledger.lock().unwrap().fund(account, U256::from(500));

    let backend = LedgerBackend::new(Arc::clone(&ledger), account);
    let orch = RecoveryOrchestrator::new(backend.clone(), account, SCOPE_SEED);

    assert_eq!(orch.phase().await?, RecoveryPhase::Uninitialized);

    let predicted = orch.predict_wrapper().await?;
    let wrapper = orch.initialize(false).await?;
    assert_eq!(wrapper, predicted);
    assert_eq!(orch.phase().await?, RecoveryPhase::Initialized);

    // enrollment binds the credential while the window is closed
    let enroll_request = orch.binding_request(B256::repeat_byte(1), Address::ZERO).await?;
    submit(&ledger, account, &enroll_request, ENROLL)?;
    assert_eq!(orch.master_nullifier().await?, nullifier);
    assert_eq!(orch.phase().await?, RecoveryPhase::Initialized);

    orch.enable_recovery().await?;
    assert_eq!(orch.phase().await?, RecoveryPhase::RecoveryEnabled);

    let bind_request = orch.binding_request(B256::repeat_byte(1), signer).await?;
    submit(&ledger, account, &bind_request, BIND)?;
    let bound = orch.wait_for_signer(Duration::from_millis(1), 10).await?;
    assert_eq!(bound, signer);
    assert_eq!(orch.phase().await?, RecoveryPhase::SignerBound);

    // the new signer sweeps the account and closes the window
    let signer_orch = RecoveryOrchestrator::new(backend.as_sender(signer), account, SCOPE_SEED);
    signer_orch.recover(destination, None).await?;
    assert_eq!(ledger.lock().unwrap().balance(destination), U256::from(500));
    assert_eq!(ledger.lock().unwrap().balance(account), U256::ZERO);

    signer_orch.finish_recovery().await?;
    assert_eq!(orch.phase().await?, RecoveryPhase::Recovered);
    Ok(())
}

#[tokio::test]
async fn initialize_is_guarded_client_side() -> eyre::Result<()> {
    let ledger = shared_ledger(U256::from(1));
    let account = Address::random();
    let orch = RecoveryOrchestrator::new(
        LedgerBackend::new(Arc::clone(&ledger), account),
        account,
        SCOPE_SEED,
    );

    orch.initialize(false).await?;
    let err = orch.initialize(false).await.unwrap_err();
    assert!(matches!(err, OrchestratorError::AlreadyInitialized));
    Ok(())
}

#[tokio::test]
async fn wait_for_signer_times_out_without_a_proof() -> eyre::Result<()> {
    let ledger = shared_ledger(U256::from(1));
    let account = Address::random();
    let orch = RecoveryOrchestrator::new(
        LedgerBackend::new(Arc::clone(&ledger), account),
        account,
        SCOPE_SEED,
    );

    orch.initialize(false).await?;
    orch.enable_recovery().await?;

    let err = orch
        .wait_for_signer(Duration::from_millis(1), 3)
        .await
        .unwrap_err();
    assert!(matches!(err, OrchestratorError::SignerTimeout(3)));
    Ok(())
}

#[tokio::test]
async fn enable_recovery_requires_initialization() {
    let ledger = shared_ledger(U256::from(1));
    let account = Address::random();
    let orch = RecoveryOrchestrator::new(
        LedgerBackend::new(ledger, account),
        account,
        SCOPE_SEED,
    );

    let err = orch.enable_recovery().await.unwrap_err();
    assert!(matches!(err, OrchestratorError::NotInitialized));
}

#[tokio::test]
async fn legacy_registry_round_trip() -> eyre::Result<()> {
    let ledger = shared_ledger(U256::from(1));
    let user = PrivateKeySigner::random();
    let recovery = Address::random();

    let orch = RecoveryOrchestrator::new(
        LedgerBackend::new(Arc::clone(&ledger), user.address()),
        user.address(),
        SCOPE_SEED,
    );

    let signature = user
        .sign_hash_sync(&registration_digest(recovery))?
        .as_bytes()
        .to_vec();
    orch.register_recovery(recovery, signature.into()).await?;
    assert_eq!(orch.recovery_address(user.address()).await?, recovery);

    let cleanup = user
        .sign_hash_sync(&selfguard_contracts::cleanup_digest(user.address()))?
        .as_bytes()
        .to_vec();
    orch.cleanup_recovery(cleanup.into()).await?;
    assert_eq!(orch.recovery_address(user.address()).await?, Address::ZERO);
    Ok(())
}
