use clap::Parser;
use eyre::Result;

use crate::cmd::ChainArgs;

#[derive(Parser, Debug)]
pub struct InitArgs {
    #[command(flatten)]
    chain: ChainArgs,

    /// Target the production identity network instead of staging
    #[arg(long)]
    production: bool,
}

impl InitArgs {
    pub async fn run(self) -> Result<()> {
        let orch = self.chain.orchestrator().await?;
        let wrapper = orch.initialize(self.production).await?;
        println!("initialized; wrapper deployed at {}", wrapper.to_checksum(None));
        Ok(())
    }
}
