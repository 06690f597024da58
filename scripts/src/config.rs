//! Network settings and deployment config files

use std::{fs, path::Path, time::Duration};

use alloy::primitives::U256;
use json::JsonValue;
use reqwest::Url;

use crate::{
    deploy::{ConstructorArg, DeploymentRequest},
    errors::ScriptError,
};

/// Where and as whom to deploy
#[derive(Clone)]
pub struct NetworkConfig {
    /// JSON-RPC endpoint
    pub rpc_url: Url,
    /// Hex private key of the deployer, the node's unlocked accounts are used without one
    pub private_key: Option<String>,
    /// How long to wait for a deployment to be confirmed
    pub timeout: Duration,
}

impl NetworkConfig {
    /// Validate the RPC URL, a blank private key counts as none
    pub fn new(rpc_url: &str, private_key: Option<String>, timeout: Duration) -> Result<Self, ScriptError> {
        Ok(Self {
            rpc_url: parse_rpc_url(rpc_url)?,
            private_key: private_key.filter(|key| !key.trim().is_empty()),
            timeout,
        })
    }
}

// Keep the private key out of debug output
impl std::fmt::Debug for NetworkConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NetworkConfig")
            .field("rpc_url", &self.rpc_url.as_str())
            .field("private_key", &self.private_key.as_ref().map(|_| "<redacted>"))
            .field("timeout", &self.timeout)
            .finish()
    }
}

fn parse_rpc_url(rpc_url: &str) -> Result<Url, ScriptError> {
    rpc_url
        .parse::<Url>()
        .map_err(|e| ScriptError::Config(format!("invalid rpc url `{}`: {}", rpc_url, e)))
}

/// A deployment described by a JSON file:
///
/// ```json
/// {
///     "network": { "rpc_url": "http://127.0.0.1:8545", "timeout_secs": 60 },
///     "contract": "ConfiToken",
///     "args": ["1000000000000000000000000", "ConfiToken", "CFT"]
/// }
/// ```
///
/// `network` and its fields are optional and override the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentConfig {
    /// Overrides the RPC endpoint
    pub rpc_url: Option<String>,
    /// Overrides the confirmation timeout
    pub timeout: Option<Duration>,
    /// What to deploy
    pub request: DeploymentRequest,
}

impl DeploymentConfig {
    /// Read and parse the config file at `path`
    pub fn load(path: &Path) -> Result<Self, ScriptError> {
        let contents = fs::read_to_string(path)
            .map_err(|e| ScriptError::Config(format!("{}: {}", path.display(), e)))?;
        Self::parse(&contents)
    }

    /// Parse the JSON content of a config file
    pub fn parse(contents: &str) -> Result<Self, ScriptError> {
        let parsed = json::parse(contents).map_err(|e| ScriptError::Config(e.to_string()))?;

        let contract = parsed["contract"]
            .as_str()
            .filter(|contract| !contract.trim().is_empty())
            .ok_or(ScriptError::Config(String::from("missing contract identifier")))?;

        let args = match &parsed["args"] {
            JsonValue::Null => Vec::new(),
            JsonValue::Array(values) => values
                .iter()
                .enumerate()
                .map(|(i, value)| parse_arg(i, value))
                .collect::<Result<Vec<_>, _>>()?,
            _ => return Err(ScriptError::Config(String::from("args must be an array"))),
        };

        let network = &parsed["network"];
        let rpc_url = network["rpc_url"].as_str().map(String::from);
        if let Some(url) = &rpc_url {
            parse_rpc_url(url)?;
        }
        let timeout = match &network["timeout_secs"] {
            JsonValue::Null => None,
            value => Some(Duration::from_secs(
                value
                    .as_u64()
                    .filter(|secs| *secs > 0)
                    .ok_or(ScriptError::Config(String::from(
                        "timeout_secs must be a positive integer",
                    )))?,
            )),
        };

        Ok(Self {
            rpc_url,
            timeout,
            request: DeploymentRequest {
                contract: contract.to_string(),
                args,
            },
        })
    }

    /// Apply this file's network overrides on top of `base`
    pub fn network(&self, base: &NetworkConfig) -> Result<NetworkConfig, ScriptError> {
        let mut network = base.clone();
        if let Some(url) = &self.rpc_url {
            network.rpc_url = parse_rpc_url(url)?;
        }
        if let Some(timeout) = self.timeout {
            network.timeout = timeout;
        }
        Ok(network)
    }
}

/// Large integers don't survive JSON numbers, pass them as strings
fn parse_arg(index: usize, value: &JsonValue) -> Result<ConstructorArg, ScriptError> {
    if let Some(s) = value.as_str() {
        return Ok(ConstructorArg::Text(s.to_string()));
    }
    if let Some(b) = value.as_bool() {
        return Ok(ConstructorArg::Text(b.to_string()));
    }
    if value.is_number() {
        if let Some(n) = value.as_u64() {
            return Ok(ConstructorArg::Integer(U256::from(n)));
        }
        if let Some(n) = value.as_i64() {
            return Ok(ConstructorArg::Text(n.to_string()));
        }
    }
    Err(ScriptError::Config(format!(
        "argument {} must be a string, an integer or a boolean, got {}",
        index,
        value.dump()
    )))
}
