//! Proof-request model exchanged with the identity-proof provider.
//!
//! The cryptographic verifier itself is an external collaborator; these types
//! describe the request handed to it and the claim a valid proof attests to.

use alloy_primitives::{Address, B256, Bytes, U256};
use serde::{Deserialize, Serialize};

use crate::scope::{ScopeError, hash_endpoint_with_scope};

/// A proof request binding an identity proof to one contract endpoint and
/// application context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProofRequest {
    /// Target contract the proof is scoped to.
    pub endpoint: Address,
    /// Application scope seed, e.g. `my-app-dev`.
    pub scope_seed: String,
    /// Stable identifier of the credential holder.
    pub user_id: B256,
    /// Caller-chosen payload carried through verification; for recovery this
    /// encodes the signer to authorize.
    pub user_defined_data: Bytes,
}

impl ProofRequest {
    /// Scope identifier the verifier must see in the proof's public signals.
    ///
    /// The endpoint address is rendered in its EIP-55 checksummed form before
    /// packing, matching how clients present it to the proof provider.
    pub fn scope(&self) -> Result<U256, ScopeError> {
        hash_endpoint_with_scope(&self.endpoint.to_checksum(None), &self.scope_seed)
    }
}

/// Opaque proof bytes produced by the credential holder's prover.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofPayload(pub Bytes);

/// The claim a successfully verified proof attests to: credential nullifier
/// plus the signer the proof authorizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoundSignerClaim {
    /// Credential-derived nullifier; non-zero for any real credential.
    pub nullifier: U256,
    /// Signer address encoded in the proof's user-defined data.
    pub signer: Address,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> ProofRequest {
        ProofRequest {
            endpoint: Address::repeat_byte(0x11),
            scope_seed: "my-app-dev".to_string(),
            user_id: B256::repeat_byte(0x22),
            user_defined_data: Bytes::from_static(&[0xab; 20]),
        }
    }

    #[test]
    fn request_scope_matches_direct_derivation() {
        let req = request();
        let direct =
            hash_endpoint_with_scope(&req.endpoint.to_checksum(None), "my-app-dev").unwrap();
        assert_eq!(req.scope().unwrap(), direct);
    }

    #[test]
    fn request_round_trips_through_json() {
        let req = request();
        let json = serde_json::to_string(&req).unwrap();
        assert_eq!(serde_json::from_str::<ProofRequest>(&json).unwrap(), req);
        // wire casing follows the provider's convention
        assert!(json.contains("scopeSeed"));
        assert!(json.contains("userDefinedData"));
    }
}
