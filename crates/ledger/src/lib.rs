//! In-memory ledger hosting the recovery contract state machines.
//!
//! The authoritative protocol state lives in three contracts: the
//! recoverable account, its paired recovery wrapper, and the legacy recovery
//! registry. This crate implements their state transitions against an
//! abstract storage provider and wraps them in a single-ordered ledger that
//! serializes calls, applies value transfers atomically, and hosts the
//! identity-proof verification hub.
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

pub mod account;
pub mod dispatch;
pub mod error;
pub mod ledger;
pub mod registry;
pub mod slots;
pub mod storage;
pub mod test_util;
pub mod verifier;
pub mod wrapper;

pub use account::SelfAccount;
pub use dispatch::Contract;
pub use error::LedgerError;
pub use ledger::{CallRequest, Ledger, Receipt};
pub use registry::RecoveryRegistry;
pub use verifier::{ProofVerifier, RejectAll, StaticVerifier};
pub use wrapper::RecoveryWrapper;
