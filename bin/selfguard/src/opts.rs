use crate::cmd::{
    init::InitArgs, predict::PredictArgs, proof_request::ProofRequestArgs, recover::RecoverArgs,
    recovery_mode::{EnableRecoveryArgs, FinishRecoveryArgs},
    registry::RegistryArgs, scope::ScopeArgs, status::StatusArgs,
};
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "selfguard")]
#[command(version, about = "CLI for identity-bound account recovery", long_about = None)]
pub struct SelfguardCli {
    #[command(subcommand)]
    pub cmd: SelfguardSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum SelfguardSubcommand {
    /// Derive the proof scope for an endpoint address (offline)
    Scope(ScopeArgs),

    /// Predict the wrapper address the next initialize will deploy
    Predict(PredictArgs),

    /// Show the account's recovery phase and bindings
    Status(StatusArgs),

    /// Initialize the account with its predicted wrapper's scope
    Init(InitArgs),

    /// Open the account's recovery window
    EnableRecovery(EnableRecoveryArgs),

    /// Close the recovery window, keeping the bound signer
    FinishRecovery(FinishRecoveryArgs),

    /// Print the proof request JSON for binding a signer
    ProofRequest(ProofRequestArgs),

    /// Sweep funds out of the account as the bound signer
    Recover(RecoverArgs),

    /// Legacy recovery-address registry operations
    Registry(RegistryArgs),
}
