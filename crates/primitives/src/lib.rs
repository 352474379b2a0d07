//! Protocol primitives for identity-bound account recovery.
//!
//! Everything in this crate is pure and network-free: scope derivation,
//! deterministic contract-address prediction, and the proof-request model
//! exchanged with the identity-proof provider.
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

pub mod address;
pub mod proof;
pub mod scope;

pub use address::{contract_address, predict_binding_address};
pub use proof::{BoundSignerClaim, ProofPayload, ProofRequest};
pub use scope::{ScopeError, format_endpoint, hash_endpoint_with_scope, pack_ascii};
