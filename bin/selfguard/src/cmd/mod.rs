pub mod init;
pub mod predict;
pub mod proof_request;
pub mod recover;
pub mod recovery_mode;
pub mod registry;
pub mod scope;
pub mod status;

use alloy::signers::local::PrivateKeySigner;
use alloy_primitives::Address;
use clap::Parser;
use eyre::Result;
use selfguard_orchestrator::{RecoveryOrchestrator, RpcBackend};

pub const DEFAULT_SCOPE_SEED: &str = "my-app-dev";

/// Connection arguments shared by every on-chain subcommand.
#[derive(Parser, Debug)]
pub struct ChainArgs {
    /// RPC endpoint
    #[arg(long, default_value = "http://localhost:8545")]
    pub rpc: String,

    /// Hex private key used to sign and send transactions
    #[arg(long)]
    pub private_key: String,

    /// Account under recovery; defaults to the key's own address
    #[arg(long)]
    pub account: Option<Address>,

    /// Application scope seed
    #[arg(long, default_value = DEFAULT_SCOPE_SEED)]
    pub scope_seed: String,
}

impl ChainArgs {
    pub fn signer(&self) -> Result<PrivateKeySigner> {
        Ok(self.private_key.parse()?)
    }

    pub async fn orchestrator(&self) -> Result<RecoveryOrchestrator<RpcBackend>> {
        let signer = self.signer()?;
        let account = self.account.unwrap_or_else(|| signer.address());
        let backend = RpcBackend::connect(&self.rpc, signer).await?;
        Ok(RecoveryOrchestrator::new(backend, account, self.scope_seed.clone()))
    }
}
