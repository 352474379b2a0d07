use alloy_primitives::{Address, B256};
use clap::Parser;
use eyre::Result;

use crate::cmd::ChainArgs;

#[derive(Parser, Debug)]
pub struct ProofRequestArgs {
    #[command(flatten)]
    chain: ChainArgs,

    /// Signer the proof should authorize
    #[arg(long)]
    signer: Address,

    /// Stable identifier of the credential holder
    #[arg(long)]
    user_id: B256,
}

impl ProofRequestArgs {
    pub async fn run(self) -> Result<()> {
        let orch = self.chain.orchestrator().await?;
        let request = orch.binding_request(self.user_id, self.signer).await?;
        println!("{}", serde_json::to_string_pretty(&request)?);
        Ok(())
    }
}
