//! Constants used in the deploy scripts

use alloy::primitives::{address, Address};

/// Default RPC endpoint, a local development node
pub const DEFAULT_RPC: &str = "http://127.0.0.1:8545";

/// Default directory holding the compiled contract artifacts
pub const DEFAULT_ARTIFACTS_DIR: &str = "artifacts";

/// Default file in which deployed addresses are recorded
pub const DEPLOYMENTS_FILE: &str = "deployed.json";

/// Default number of seconds to wait for a deployment to be confirmed
pub const DEFAULT_DEPLOY_TIMEOUT_SECS: u64 = 120;

/// Artifacts sub-directory holding compiler metadata rather than contracts
pub const BUILD_INFO_DIR: &str = "build-info";

/// Artifact name of the Confidex exchange
pub const CONFIDEX_CONTRACT: &str = "Confidex";
/// Artifact name of the two argument confidential token
pub const CONFIDENTIAL_ERC20_CONTRACT: &str = "ConfidentialERC20";
/// Artifact name of the token taking an initial supply
pub const CONFI_TOKEN_CONTRACT: &str = "ConfiToken";

/// Signer trusted by the Confidex contract
pub const CONFIDEX_TRUSTED_SIGNER: Address = address!("39e5A008A0f182398d76c422E551a1348675Dc1b");

/// Default token name
pub const DEFAULT_TOKEN_NAME: &str = "ConfiToken";
/// Default token symbol
pub const DEFAULT_TOKEN_SYMBOL: &str = "CFT";
/// 1M tokens with 18 decimals
pub const DEFAULT_INITIAL_SUPPLY: &str = "1000000000000000000000000";
