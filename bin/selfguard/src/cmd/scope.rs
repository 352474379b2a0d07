use alloy_primitives::Address;
use clap::Parser;
use eyre::Result;
use selfguard_primitives::hash_endpoint_with_scope;

use crate::cmd::DEFAULT_SCOPE_SEED;

#[derive(Parser, Debug)]
pub struct ScopeArgs {
    /// Endpoint contract address
    pub endpoint: Address,

    /// Application scope seed
    #[arg(long, default_value = DEFAULT_SCOPE_SEED)]
    pub scope_seed: String,
}

impl ScopeArgs {
    pub fn run(self) -> Result<()> {
        let scope = hash_endpoint_with_scope(&self.endpoint.to_checksum(None), &self.scope_seed)?;
        println!("endpoint: {}", self.endpoint.to_checksum(None));
        println!("seed:     {}", self.scope_seed);
        println!("scope:    {scope:#x}");
        println!("decimal:  {scope}");
        Ok(())
    }
}
