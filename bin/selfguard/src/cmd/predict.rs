use clap::Parser;
use eyre::Result;

use crate::cmd::ChainArgs;

#[derive(Parser, Debug)]
pub struct PredictArgs {
    #[command(flatten)]
    chain: ChainArgs,
}

impl PredictArgs {
    pub async fn run(self) -> Result<()> {
        let orch = self.chain.orchestrator().await?;
        let wrapper = orch.predict_wrapper().await?;
        let scope = orch.scope_for(wrapper)?;

        println!("account: {}", orch.account().to_checksum(None));
        println!("wrapper: {}", wrapper.to_checksum(None));
        println!("scope:   {scope:#x}");
        Ok(())
    }
}
