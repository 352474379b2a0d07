//! Backend over a live JSON-RPC endpoint.

use alloy::{
    network::EthereumWallet,
    providers::{Provider, ProviderBuilder},
    rpc::types::TransactionRequest,
    signers::local::PrivateKeySigner,
};
use alloy_primitives::{Address, B256, Bytes, U256};
use async_trait::async_trait;
use eyre::Result;
use tracing::info;

use crate::{backend::RecoveryBackend, retry::with_retry};

/// Provider type with wallet filler
type WalletProvider = alloy::providers::fillers::FillProvider<
    alloy::providers::fillers::JoinFill<
        alloy::providers::fillers::JoinFill<
            alloy::providers::Identity,
            alloy::providers::fillers::JoinFill<
                alloy::providers::fillers::GasFiller,
                alloy::providers::fillers::JoinFill<
                    alloy::providers::fillers::BlobGasFiller,
                    alloy::providers::fillers::JoinFill<
                        alloy::providers::fillers::NonceFiller,
                        alloy::providers::fillers::ChainIdFiller,
                    >,
                >,
            >,
        >,
        alloy::providers::fillers::WalletFiller<EthereumWallet>,
    >,
    alloy::providers::RootProvider,
>;

/// Live-chain backend signing with a local key.
pub struct RpcBackend {
    sender: Address,
    provider: WalletProvider,
}

impl RpcBackend {
    pub async fn connect(rpc_url: &str, signer: PrivateKeySigner) -> Result<Self> {
        let sender = signer.address();
        let provider = ProviderBuilder::new()
            .wallet(EthereumWallet::from(signer))
            .connect(rpc_url)
            .await?;
        Ok(Self { sender, provider })
    }
}

#[async_trait]
impl RecoveryBackend for RpcBackend {
    fn sender(&self) -> Address {
        self.sender
    }

    async fn transaction_count(&self, address: Address) -> Result<u64> {
        with_retry("get_transaction_count", || async {
            Ok(self.provider.get_transaction_count(address).await?)
        })
        .await
    }

    async fn get_balance(&self, address: Address) -> Result<U256> {
        with_retry("get_balance", || async {
            Ok(self.provider.get_balance(address).await?)
        })
        .await
    }

    async fn call(&self, to: Address, data: Bytes) -> Result<Bytes> {
        let tx = TransactionRequest::default().to(to).input(data.into());
        with_retry("eth_call", || async {
            Ok(self.provider.call(tx.clone()).await?)
        })
        .await
    }

    async fn send(&self, to: Address, value: U256, data: Bytes) -> Result<B256> {
        let tx = TransactionRequest::default()
            .to(to)
            .value(value)
            .input(data.into());

        let pending = self.provider.send_transaction(tx).await?;
        let receipt = pending.get_receipt().await?;
        if !receipt.status() {
            eyre::bail!("transaction {} reverted", receipt.transaction_hash);
        }

        info!(tx_hash = %receipt.transaction_hash, %to, "transaction included");
        Ok(receipt.transaction_hash)
    }
}
