//! Contract deployment: requests, results and the provider they run against

use std::fmt::{self, Display, Formatter};

use alloy::primitives::{Address, TxHash, U256};
use async_trait::async_trait;

use crate::errors::ScriptError;

pub mod artifact;
pub mod report;
pub mod runner;

#[cfg(test)]
pub(crate) mod mock;

/// A primitive constructor argument, coerced to the declared Solidity type when encoded
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConstructorArg {
    /// Strings, addresses, booleans and anything else given in textual form
    Text(String),
    /// An unsigned integer
    Integer(U256),
}

impl Display for ConstructorArg {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ConstructorArg::Text(s) => f.write_str(s),
            ConstructorArg::Integer(n) => write!(f, "{}", n),
        }
    }
}

impl From<&str> for ConstructorArg {
    fn from(value: &str) -> Self {
        ConstructorArg::Text(value.to_string())
    }
}

impl From<String> for ConstructorArg {
    fn from(value: String) -> Self {
        ConstructorArg::Text(value)
    }
}

impl From<U256> for ConstructorArg {
    fn from(value: U256) -> Self {
        ConstructorArg::Integer(value)
    }
}

impl From<u64> for ConstructorArg {
    fn from(value: u64) -> Self {
        ConstructorArg::Integer(U256::from(value))
    }
}

impl From<Address> for ConstructorArg {
    fn from(value: Address) -> Self {
        ConstructorArg::Text(value.to_string())
    }
}

/// What to deploy: a contract identifier and its ordered constructor arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentRequest {
    /// Artifact name, or `path/File.sol:Name`
    pub contract: String,
    /// Constructor arguments, in declaration order
    pub args: Vec<ConstructorArg>,
}

impl DeploymentRequest {
    /// A request for `contract` without constructor arguments
    pub fn new(contract: impl Into<String>) -> Self {
        Self {
            contract: contract.into(),
            args: Vec::new(),
        }
    }

    /// Append a constructor argument
    pub fn arg(mut self, arg: impl Into<ConstructorArg>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append all of `args`
    pub fn with_args<I, A>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<ConstructorArg>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }
}

/// A confirmed contract creation, as seen by the provider
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContractCreation {
    /// Address of the new contract
    pub address: Address,
    /// Hash of the creation transaction
    pub transaction_hash: TxHash,
}

/// Outcome of a successful deployment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentResult {
    /// Contract identifier from the request
    pub contract: String,
    /// Address the contract was created at
    pub deployed_address: Address,
    /// Account that sent the creation transaction, the contract owner
    pub signer_address: Address,
    /// Hash of the creation transaction
    pub transaction_hash: TxHash,
}

/// Something able to resolve signers and create contracts on a chain
#[async_trait]
pub trait DeploymentProvider: Send + Sync {
    /// The accounts able to sign a deployment, in preference order
    async fn signers(&self) -> Result<Vec<Address>, ScriptError>;

    /// Submit a creation transaction for `contract` from `from` and wait for its receipt
    async fn deploy_contract(
        &self,
        from: Address,
        contract: &str,
        args: &[ConstructorArg],
    ) -> Result<ContractCreation, ScriptError>;
}
