//! The identity-proof verification seam.
//!
//! Proof verification itself is an external cryptographic collaborator; the
//! ledger only needs a yes/no answer plus the claim a valid proof attests to.

use std::collections::HashMap;

use alloy_primitives::Bytes;
use selfguard_primitives::{BoundSignerClaim, ProofPayload, ProofRequest};

/// Verifies an identity proof against its request and, on success, yields the
/// claim it attests to.
pub trait ProofVerifier: Send {
    fn verify(&self, request: &ProofRequest, payload: &ProofPayload) -> Option<BoundSignerClaim>;
}

/// Verifier that accepts a fixed set of proof payloads, each mapped to the
/// claim it stands for. Everything else is rejected.
#[derive(Debug, Default)]
pub struct StaticVerifier {
    accepted: HashMap<Bytes, BoundSignerClaim>,
}

impl StaticVerifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks `payload` as a valid proof of `claim`.
    pub fn accept(&mut self, payload: ProofPayload, claim: BoundSignerClaim) {
        self.accepted.insert(payload.0, claim);
    }
}

impl ProofVerifier for StaticVerifier {
    fn verify(&self, _request: &ProofRequest, payload: &ProofPayload) -> Option<BoundSignerClaim> {
        self.accepted.get(&payload.0).copied()
    }
}

/// Verifier that rejects every proof.
#[derive(Debug, Default)]
pub struct RejectAll;

impl ProofVerifier for RejectAll {
    fn verify(&self, _request: &ProofRequest, _payload: &ProofPayload) -> Option<BoundSignerClaim> {
        None
    }
}
