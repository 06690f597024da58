use alloy::{
    network::TransactionBuilder,
    primitives::Address,
    providers::Provider,
    rpc::types::eth::{TransactionReceipt, TransactionRequest},
};
use async_trait::async_trait;
use tracing::{debug, info};

use crate::{
    config::NetworkConfig,
    deploy::{
        artifact::ArtifactStore, ConstructorArg, ContractCreation, DeploymentProvider,
    },
    errors::ScriptError,
    tx::client::{create_rpc_provider, RpcClient},
};

/// Deploys compiled artifacts over JSON-RPC
pub struct ChainDeployer {
    client: RpcClient,
    artifacts: ArtifactStore,
}

impl ChainDeployer {
    /// Deployer over an existing client
    pub fn new(client: RpcClient, artifacts: ArtifactStore) -> Self {
        Self { client, artifacts }
    }

    /// Connect to the configured network
    pub async fn connect(
        network: &NetworkConfig,
        artifacts: ArtifactStore,
    ) -> Result<Self, ScriptError> {
        let client = create_rpc_provider(network).await?;
        Ok(Self::new(client, artifacts))
    }

    /// Predict the address of the next contract created by `deployer`
    pub async fn predict_contract_address(&self, deployer: Address) -> Result<Address, ScriptError> {
        let nonce = self
            .client
            .provider()
            .get_transaction_count(deployer)
            .await
            .map_err(|e| ScriptError::NonceFetching(e.to_string()))?;

        Ok(deployer.create(nonce))
    }
}

#[async_trait]
impl DeploymentProvider for ChainDeployer {
    async fn signers(&self) -> Result<Vec<Address>, ScriptError> {
        self.client.signers().await
    }

    async fn deploy_contract(
        &self,
        from: Address,
        contract: &str,
        args: &[ConstructorArg],
    ) -> Result<ContractCreation, ScriptError> {
        // Encode before touching the chain, a mismatch must not send anything
        let artifact = self.artifacts.load(contract)?;
        let code = artifact.deploy_code(args)?;
        debug!("{} creation code is {} bytes", artifact.name, code.len());

        let expected_address = self.predict_contract_address(from).await?;
        info!(
            "Expected {} address on chain {}: {}",
            artifact.name,
            self.client.chain_id(),
            expected_address
        );

        let tx_request = TransactionRequest::default()
            .with_from(from)
            .with_deploy_code(code);

        // Send it
        let pending_tx = self
            .client
            .provider()
            .send_transaction(tx_request)
            .await
            .map_err(|e| ScriptError::ContractDeployment(e.to_string()))?;
        info!("Pending deploy transaction... {}", pending_tx.tx_hash());

        // Wait for the transaction to be included.
        let receipt = pending_tx
            .get_receipt()
            .await
            .map_err(|e| ScriptError::ContractDeployment(e.to_string()))?;

        created_contract(&receipt)
    }
}

/// The contract created by a mined deploy transaction
fn created_contract(receipt: &TransactionReceipt) -> Result<ContractCreation, ScriptError> {
    if !receipt.status() {
        return Err(ScriptError::ContractDeployment(format!(
            "deploy tx {} reverted",
            receipt.transaction_hash
        )));
    }
    if let Some(block) = receipt.block_number {
        info!("Deploy tx done on block: {}", block);
    }

    let address = receipt
        .contract_address
        .ok_or(ScriptError::ContractDeployment(String::from(
            "no contract address in receipt",
        )))?;

    Ok(ContractCreation {
        address,
        transaction_hash: receipt.transaction_hash,
    })
}
