use clap::Parser;
use opts::{SelfguardCli, SelfguardSubcommand};

mod cmd;
mod opts;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = SelfguardCli::parse();

    match args.cmd {
        SelfguardSubcommand::Scope(cmd) => cmd.run(),
        SelfguardSubcommand::Predict(cmd) => cmd.run().await,
        SelfguardSubcommand::Status(cmd) => cmd.run().await,
        SelfguardSubcommand::Init(cmd) => cmd.run().await,
        SelfguardSubcommand::EnableRecovery(cmd) => cmd.run().await,
        SelfguardSubcommand::FinishRecovery(cmd) => cmd.run().await,
        SelfguardSubcommand::ProofRequest(cmd) => cmd.run().await,
        SelfguardSubcommand::Recover(cmd) => cmd.run().await,
        SelfguardSubcommand::Registry(cmd) => cmd.run().await,
    }
}
