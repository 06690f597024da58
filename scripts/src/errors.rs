//! Definitions of errors that can occur during the execution of the deployment scripts

use std::{
    error::Error,
    fmt::{self, Display, Formatter},
    time::Duration,
};

/// Errors that can occur during the execution of the deployment scripts
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptError {
    /// Error when reading or writing the deployments output file
    JsonOutputError(String),
    /// Error when creating the client or resolving a signer
    ClientInitialization(String),
    /// Error when fetching the nonce to predict a deployment address
    NonceFetching(String),
    /// Error when locating or parsing a compiled contract artifact
    ArtifactLoading(String),
    /// The constructor arguments don't match the contract constructor
    ConstructorMismatch(String),
    /// Error deploying a contract
    ContractDeployment(String),
    /// The deployment wasn't confirmed within the configured timeout
    DeploymentTimeout(Duration),
    /// Error in the deployment configuration
    Config(String),
    /// Error writing the deployment report
    Output(String),
}

impl Display for ScriptError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ScriptError::JsonOutputError(s) => write!(f, "error writing json output: {}", s),
            ScriptError::ClientInitialization(s) => write!(f, "error during client init: {}", s),
            ScriptError::NonceFetching(s) => {
                write!(f, "error during nonce fetching for client signing: {}", s)
            }
            ScriptError::ArtifactLoading(s) => write!(f, "error loading contract artifact: {}", s),
            ScriptError::ConstructorMismatch(s) => {
                write!(f, "constructor arguments mismatch: {}", s)
            }
            ScriptError::ContractDeployment(s) => write!(f, "error deploying contract: {}", s),
            ScriptError::DeploymentTimeout(timeout) => {
                write!(f, "deployment not confirmed within {:?}", timeout)
            }
            ScriptError::Config(s) => write!(f, "invalid deployment config: {}", s),
            ScriptError::Output(s) => write!(f, "error writing deployment report: {}", s),
        }
    }
}

impl Error for ScriptError {}
