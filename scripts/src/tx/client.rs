use alloy::{
    network::EthereumWallet,
    primitives::Address,
    providers::{DynProvider, Provider, ProviderBuilder},
    signers::local::PrivateKeySigner,
};
use tracing::info;

use crate::{config::NetworkConfig, errors::ScriptError};

/// An alloy provider with the recommended fillers, and a wallet filler when a
/// private key was given, interfacing with the RPC endpoint over HTTP
pub type RpcProvider = DynProvider;

/// The RPC provider along with the account it signs for
#[derive(Clone)]
pub struct RpcClient {
    provider: RpcProvider,
    local_signer: Option<Address>,
    chain_id: u64,
}

impl RpcClient {
    /// Wrap an already connected provider
    pub fn new(provider: RpcProvider, local_signer: Option<Address>, chain_id: u64) -> Self {
        Self {
            provider,
            local_signer,
            chain_id,
        }
    }

    /// The underlying provider
    pub fn provider(&self) -> &RpcProvider {
        &self.provider
    }

    /// Chain id reported by the endpoint when connecting
    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    /// The local wallet account if a private key was given, the node's unlocked accounts otherwise
    pub async fn signers(&self) -> Result<Vec<Address>, ScriptError> {
        match self.local_signer {
            Some(address) => Ok(vec![address]),
            None => self
                .provider
                .get_accounts()
                .await
                .map_err(|e| ScriptError::ClientInitialization(e.to_string())),
        }
    }
}

/// Sets up the RPC client, attaching a local wallet when the network config holds a private key
pub async fn create_rpc_provider(network: &NetworkConfig) -> Result<RpcClient, ScriptError> {
    let (provider, local_signer) = match &network.private_key {
        Some(private_key) => {
            // Create our signer, the key may or may not be 0x prefixed
            let signer = private_key
                .trim()
                .parse::<PrivateKeySigner>()
                .map_err(|e| {
                    ScriptError::ClientInitialization(format!("invalid private key: {}", e))
                })?;
            let address = signer.address();
            let wallet = EthereumWallet::from(signer);

            let provider = ProviderBuilder::new()
                .wallet(wallet)
                .connect_http(network.rpc_url.clone())
                .erased();
            (provider, Some(address))
        }
        None => {
            let provider = ProviderBuilder::new()
                .connect_http(network.rpc_url.clone())
                .erased();
            (provider, None)
        }
    };

    // Fetch chain id, this also checks the endpoint is reachable
    let chain_id = provider
        .get_chain_id()
        .await
        .map_err(|e| ScriptError::ClientInitialization(e.to_string()))?;

    info!("Build client on chain ID: {}", chain_id);

    Ok(RpcClient::new(provider, local_signer, chain_id))
}
