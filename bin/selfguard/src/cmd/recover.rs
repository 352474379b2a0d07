use alloy_primitives::{Address, U256};
use clap::Parser;
use eyre::Result;

use crate::cmd::ChainArgs;

#[derive(Parser, Debug)]
pub struct RecoverArgs {
    #[command(flatten)]
    chain: ChainArgs,

    /// Destination for the recovered funds
    #[arg(long)]
    to: Address,

    /// Amount in wei; defaults to the account's full balance
    #[arg(long)]
    value: Option<U256>,
}

impl RecoverArgs {
    pub async fn run(self) -> Result<()> {
        let orch = self.chain.orchestrator().await?;
        let tx = orch.recover(self.to, self.value).await?;
        println!("recovered to {} in {tx}", self.to.to_checksum(None));
        Ok(())
    }
}
