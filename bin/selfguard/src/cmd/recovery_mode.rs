use clap::Parser;
use eyre::Result;

use crate::cmd::ChainArgs;

#[derive(Parser, Debug)]
pub struct EnableRecoveryArgs {
    #[command(flatten)]
    chain: ChainArgs,
}

impl EnableRecoveryArgs {
    pub async fn run(self) -> Result<()> {
        let orch = self.chain.orchestrator().await?;
        let tx = orch.enable_recovery().await?;
        println!("recovery window opened in {tx}");
        Ok(())
    }
}

#[derive(Parser, Debug)]
pub struct FinishRecoveryArgs {
    #[command(flatten)]
    chain: ChainArgs,
}

impl FinishRecoveryArgs {
    pub async fn run(self) -> Result<()> {
        let orch = self.chain.orchestrator().await?;
        let tx = orch.finish_recovery().await?;
        println!("recovery window closed in {tx}");
        Ok(())
    }
}
