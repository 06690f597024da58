//! The deployment runner: resolve a signer, create the contract, wait for it

use std::time::Duration;

use tracing::{info, warn};

use super::{DeploymentProvider, DeploymentRequest, DeploymentResult};
use crate::errors::ScriptError;

/// Runs deployment requests against a provider, bounding each by a timeout
pub struct DeploymentRunner<P> {
    provider: P,
    timeout: Duration,
}

impl<P: DeploymentProvider> DeploymentRunner<P> {
    /// Runner giving each deployment at most `timeout` to be confirmed
    pub fn new(provider: P, timeout: Duration) -> Self {
        Self { provider, timeout }
    }

    /// The provider deployments go through
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Deploy the requested contract from the first available signer.
    ///
    /// Errors from the provider are returned unchanged, nothing is retried.
    pub async fn deploy(&self, request: &DeploymentRequest) -> Result<DeploymentResult, ScriptError> {
        if request.contract.trim().is_empty() {
            return Err(ScriptError::Config(String::from(
                "contract identifier is empty",
            )));
        }

        let signer_address = self
            .provider
            .signers()
            .await?
            .into_iter()
            .next()
            .ok_or(ScriptError::ClientInitialization(String::from(
                "no signer account available",
            )))?;

        info!(
            "Deploying {} from {} with {} constructor argument(s)",
            request.contract,
            signer_address,
            request.args.len()
        );

        let creation = tokio::time::timeout(
            self.timeout,
            self.provider
                .deploy_contract(signer_address, &request.contract, &request.args),
        )
        .await
        .map_err(|_| {
            warn!(
                "Gave up waiting for {} after {:?}, the transaction may still be mined",
                request.contract, self.timeout
            );
            ScriptError::DeploymentTimeout(self.timeout)
        })??;

        info!("{} deployed at {}", request.contract, creation.address);

        Ok(DeploymentResult {
            contract: request.contract.clone(),
            deployed_address: creation.address,
            signer_address,
            transaction_hash: creation.transaction_hash,
        })
    }
}
