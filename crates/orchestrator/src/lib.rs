//! Client-side orchestration of the recovery lifecycle.
//!
//! The orchestrator drives the account through its phases against a
//! `RecoveryBackend`: either the in-memory ledger for tests and local runs,
//! or a live JSON-RPC endpoint.
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

pub mod backend;
pub mod error;
pub mod ledger_backend;
pub mod orchestrator;
pub mod retry;
pub mod rpc;

pub use backend::RecoveryBackend;
pub use error::OrchestratorError;
pub use ledger_backend::LedgerBackend;
pub use orchestrator::{RecoveryOrchestrator, RecoveryPhase};
pub use rpc::RpcBackend;
