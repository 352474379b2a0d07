use alloy::signers::SignerSync;
use alloy_primitives::Address;
use clap::{Parser, Subcommand};
use eyre::Result;
use selfguard_contracts::{cleanup_digest, registration_digest};

use crate::cmd::ChainArgs;

#[derive(Parser, Debug)]
pub struct RegistryArgs {
    #[command(subcommand)]
    cmd: RegistrySubcommand,
}

#[derive(Subcommand, Debug)]
pub enum RegistrySubcommand {
    /// Bind a fallback recovery address for the sender
    Register(RegisterArgs),

    /// Clear the sender's fallback recovery address
    Cleanup(CleanupArgs),

    /// Look up the fallback recovery address of a user
    Get(GetArgs),
}

impl RegistryArgs {
    pub async fn run(self) -> Result<()> {
        match self.cmd {
            RegistrySubcommand::Register(cmd) => cmd.run().await,
            RegistrySubcommand::Cleanup(cmd) => cmd.run().await,
            RegistrySubcommand::Get(cmd) => cmd.run().await,
        }
    }
}

#[derive(Parser, Debug)]
pub struct RegisterArgs {
    #[command(flatten)]
    chain: ChainArgs,

    /// Recovery address to bind
    #[arg(long)]
    recovery_address: Address,
}

impl RegisterArgs {
    pub async fn run(self) -> Result<()> {
        let signer = self.chain.signer()?;
        let signature = signer
            .sign_hash_sync(&registration_digest(self.recovery_address))?
            .as_bytes()
            .to_vec();

        let orch = self.chain.orchestrator().await?;
        let tx = orch
            .register_recovery(self.recovery_address, signature.into())
            .await?;
        println!(
            "registered {} in {tx}",
            self.recovery_address.to_checksum(None)
        );
        Ok(())
    }
}

#[derive(Parser, Debug)]
pub struct CleanupArgs {
    #[command(flatten)]
    chain: ChainArgs,
}

impl CleanupArgs {
    pub async fn run(self) -> Result<()> {
        let signer = self.chain.signer()?;
        let signature = signer
            .sign_hash_sync(&cleanup_digest(signer.address()))?
            .as_bytes()
            .to_vec();

        let orch = self.chain.orchestrator().await?;
        let tx = orch.cleanup_recovery(signature.into()).await?;
        println!("recovery address cleared in {tx}");
        Ok(())
    }
}

#[derive(Parser, Debug)]
pub struct GetArgs {
    #[command(flatten)]
    chain: ChainArgs,

    /// User to look up; defaults to the sender
    #[arg(long)]
    user: Option<Address>,
}

impl GetArgs {
    pub async fn run(self) -> Result<()> {
        let orch = self.chain.orchestrator().await?;
        let user = self.user.unwrap_or_else(|| orch.account());
        let recovery = orch.recovery_address(user).await?;
        if recovery.is_zero() {
            println!("no recovery address set for {}", user.to_checksum(None));
        } else {
            println!("{}", recovery.to_checksum(None));
        }
        Ok(())
    }
}
