use clap::Parser;
use eyre::Result;
use selfguard_orchestrator::RecoveryPhase;

use crate::cmd::ChainArgs;

#[derive(Parser, Debug)]
pub struct StatusArgs {
    #[command(flatten)]
    chain: ChainArgs,
}

impl StatusArgs {
    pub async fn run(self) -> Result<()> {
        let orch = self.chain.orchestrator().await?;
        let phase = orch.phase().await?;

        println!("account: {}", orch.account().to_checksum(None));
        println!("phase:   {phase:?}");

        if phase == RecoveryPhase::Uninitialized {
            return Ok(());
        }

        let wrapper = orch.wrapper().await?;
        let nullifier = orch.master_nullifier().await?;
        let signer = orch.allowed_signer().await?;
        println!("wrapper: {}", wrapper.to_checksum(None));
        if nullifier.is_zero() {
            println!("credential: not enrolled");
        } else {
            println!("credential: enrolled (nullifier {nullifier:#x})");
        }
        if signer.is_zero() {
            println!("signer:  none bound");
        } else {
            println!("signer:  {}", signer.to_checksum(None));
        }
        Ok(())
    }
}
