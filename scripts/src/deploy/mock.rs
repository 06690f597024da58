//! In-memory deployment provider and artifact fixtures for tests

use std::{
    collections::HashMap,
    fs,
    path::Path,
    sync::atomic::{AtomicU64, Ordering},
    time::Duration,
};

use alloy::primitives::{address, keccak256, Address};
use async_trait::async_trait;

use super::{
    artifact::ContractArtifact, ConstructorArg, ContractCreation, DeploymentProvider,
};
use crate::errors::ScriptError;

/// First account of the default development mnemonic
pub const DEV_ACCOUNT: Address = address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266");

pub const FIXTURE_BYTECODE_LEN: usize = 5;

pub const CONFIDEX_ARTIFACT: &str = r#"{
    "_format": "hh-sol-artifact-1",
    "contractName": "Confidex",
    "sourceName": "contracts/Confidex.sol",
    "abi": [
        {
            "inputs": [
                { "internalType": "address", "name": "_trustedSigner", "type": "address" }
            ],
            "stateMutability": "nonpayable",
            "type": "constructor"
        },
        {
            "inputs": [],
            "name": "trustedSigner",
            "outputs": [{ "internalType": "address", "name": "", "type": "address" }],
            "stateMutability": "view",
            "type": "function"
        }
    ],
    "bytecode": "0x6080604052",
    "deployedBytecode": "0x6080604052",
    "linkReferences": {},
    "deployedLinkReferences": {}
}"#;

pub const CONFIDENTIAL_ERC20_ARTIFACT: &str = r#"{
    "_format": "hh-sol-artifact-1",
    "contractName": "ConfidentialERC20",
    "sourceName": "contracts/ConfidentialERC20.sol",
    "abi": [
        {
            "inputs": [
                { "internalType": "string", "name": "name_", "type": "string" },
                { "internalType": "string", "name": "symbol_", "type": "string" }
            ],
            "stateMutability": "nonpayable",
            "type": "constructor"
        }
    ],
    "bytecode": "0x6080604052",
    "deployedBytecode": "0x6080604052",
    "linkReferences": {},
    "deployedLinkReferences": {}
}"#;

pub const CONFI_TOKEN_ARTIFACT: &str = r#"{
    "_format": "hh-sol-artifact-1",
    "contractName": "ConfiToken",
    "sourceName": "contracts/ConfiToken.sol",
    "abi": [
        {
            "inputs": [
                { "internalType": "uint256", "name": "initialSupply", "type": "uint256" },
                { "internalType": "string", "name": "name_", "type": "string" },
                { "internalType": "string", "name": "symbol_", "type": "string" }
            ],
            "stateMutability": "nonpayable",
            "type": "constructor"
        }
    ],
    "bytecode": "0x6080604052",
    "deployedBytecode": "0x6080604052",
    "linkReferences": {},
    "deployedLinkReferences": {}
}"#;

/// Write `contents` to `<root>/<source>/<name>.json`, the Hardhat layout
pub fn write_artifact(root: &Path, source: &str, name: &str, contents: &str) {
    let dir = root.join(source);
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join(format!("{name}.json")), contents).unwrap();
}

/// A chain that knows the three fixture contracts and derives addresses from a nonce
pub struct InMemoryChain {
    signers: Vec<Address>,
    artifacts: HashMap<String, ContractArtifact>,
    nonce: AtomicU64,
    latency: Option<Duration>,
}

impl InMemoryChain {
    pub fn new() -> Self {
        let artifacts = [
            ("Confidex", CONFIDEX_ARTIFACT),
            ("ConfidentialERC20", CONFIDENTIAL_ERC20_ARTIFACT),
            ("ConfiToken", CONFI_TOKEN_ARTIFACT),
        ]
        .into_iter()
        .map(|(name, contents)| {
            (
                name.to_string(),
                ContractArtifact::from_json(name, contents).unwrap(),
            )
        })
        .collect();

        Self {
            signers: vec![DEV_ACCOUNT],
            artifacts,
            nonce: AtomicU64::new(0),
            latency: None,
        }
    }

    pub fn without_signers(mut self) -> Self {
        self.signers.clear();
        self
    }

    /// Delay every deployment confirmation by `latency`
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Number of contracts created so far
    pub fn nonce(&self) -> u64 {
        self.nonce.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DeploymentProvider for InMemoryChain {
    async fn signers(&self) -> Result<Vec<Address>, ScriptError> {
        Ok(self.signers.clone())
    }

    async fn deploy_contract(
        &self,
        from: Address,
        contract: &str,
        args: &[ConstructorArg],
    ) -> Result<ContractCreation, ScriptError> {
        let artifact = self.artifacts.get(contract).ok_or_else(|| {
            ScriptError::ArtifactLoading(format!("no artifact named {}.json", contract))
        })?;
        let code = artifact.deploy_code(args)?;

        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }

        let nonce = self.nonce.fetch_add(1, Ordering::SeqCst);
        let mut preimage = code.to_vec();
        preimage.extend_from_slice(&nonce.to_be_bytes());

        Ok(ContractCreation {
            address: from.create(nonce),
            transaction_hash: keccak256(preimage),
        })
    }
}
