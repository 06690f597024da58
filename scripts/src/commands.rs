use std::{
    io::{self, Write},
    path::{Path, PathBuf},
};

use alloy::primitives::{Address, U256};
use tracing::{info, warn};

use crate::{
    config::NetworkConfig,
    constants::{CONFIDENTIAL_ERC20_CONTRACT, CONFIDEX_CONTRACT},
    deploy::{
        artifact::ArtifactStore,
        report::{Report, TokenMetadata},
        runner::DeploymentRunner,
        ConstructorArg, DeploymentProvider, DeploymentRequest, DeploymentResult,
    },
    errors::ScriptError,
    output_writer::{read_output_file, record_deployment, OutputKeys},
    tx::provider::ChainDeployer,
};

/// Everything a deployment needs besides the request itself
#[derive(Debug, Clone)]
pub struct DeployContext {
    /// Endpoint, deployer key and confirmation timeout
    pub network: NetworkConfig,
    /// Where the compiled contracts are looked up
    pub artifacts: ArtifactStore,
    /// File the deployed addresses are recorded in
    pub output: PathBuf,
    /// Whether successful deployments are written to `output`
    pub record: bool,
}

impl DeployContext {
    /// The same context on another network
    pub fn with_network(self, network: NetworkConfig) -> Self {
        Self { network, ..self }
    }

    fn record_path(&self) -> Option<&Path> {
        self.record.then_some(self.output.as_path())
    }
}

/// The Confidex exchange, trusting `trusted_signer`
pub fn confidex_deployment(trusted_signer: Address) -> (DeploymentRequest, Report) {
    (
        DeploymentRequest::new(CONFIDEX_CONTRACT).arg(trusted_signer),
        Report::plain().detail("Trusted signer address", trusted_signer),
    )
}

/// The two argument confidential token, `(name, symbol)`.
///
/// With a `banner_supply` the token banner is printed with that supply, the constructor
/// still only takes the name and symbol.
pub fn confidential_erc20_deployment(
    name: &str,
    symbol: &str,
    banner_supply: Option<U256>,
) -> (DeploymentRequest, Report) {
    let report = match banner_supply {
        Some(initial_supply) => Report::TokenBanner(TokenMetadata {
            name: name.to_string(),
            symbol: symbol.to_string(),
            initial_supply,
        }),
        None => Report::plain(),
    };

    (
        DeploymentRequest::new(CONFIDENTIAL_ERC20_CONTRACT)
            .arg(name)
            .arg(symbol),
        report,
    )
}

/// The three argument token, `(initialSupply, name, symbol)`, reported with the token banner
pub fn token_deployment(
    contract: &str,
    initial_supply: U256,
    name: &str,
    symbol: &str,
) -> (DeploymentRequest, Report) {
    (
        DeploymentRequest::new(contract)
            .arg(initial_supply)
            .arg(name)
            .arg(symbol),
        Report::TokenBanner(TokenMetadata {
            name: name.to_string(),
            symbol: symbol.to_string(),
            initial_supply,
        }),
    )
}

/// A contract given on the command line, its arguments coerced against the ABI
pub fn generic_deployment(contract: &str, args: Vec<String>) -> (DeploymentRequest, Report) {
    (
        DeploymentRequest::new(contract).with_args(args.into_iter().map(ConstructorArg::Text)),
        Report::plain(),
    )
}

/// Deploy on the configured network, print the report to stdout and record the addresses
pub async fn deploy_on_chain(
    ctx: &DeployContext,
    request: &DeploymentRequest,
    report: &Report,
) -> Result<DeploymentResult, ScriptError> {
    let deployer = ChainDeployer::connect(&ctx.network, ctx.artifacts.clone()).await?;
    let runner = DeploymentRunner::new(deployer, ctx.network.timeout);

    execute(&runner, request, report, &mut io::stdout(), ctx.record_path()).await
}

/// Run a deployment, then report and record it. Nothing is written if it fails.
///
/// Once the contract is on chain the run succeeds, a ledger that can't be written is only
/// warned about.
pub async fn execute<P: DeploymentProvider, W: Write>(
    runner: &DeploymentRunner<P>,
    request: &DeploymentRequest,
    report: &Report,
    out: &mut W,
    record: Option<&Path>,
) -> Result<DeploymentResult, ScriptError> {
    let result = runner.deploy(request).await?;

    report.write(out, &result)?;

    if let Some(path) = record {
        match record_deployment(path, &result) {
            Ok(()) => info!("Recorded {} in {}", result.contract, path.display()),
            Err(e) => warn!(
                "{} is deployed at {} but could not be recorded in {}: {}",
                result.contract,
                result.deployed_address,
                path.display(),
                e
            ),
        }
    }

    Ok(result)
}

/// Print what was recorded for `contract`
pub fn show_deployment<W: Write>(output: &Path, contract: &str, out: &mut W) -> Result<(), ScriptError> {
    let address = recorded_address(output, OutputKeys::Deployment { key: contract })?;
    writeln!(out, "{} deployed to: {}", contract, address)
        .map_err(|e| ScriptError::Output(e.to_string()))?;

    if let Ok(owner) = recorded_address(output, OutputKeys::Owner { key: contract }) {
        writeln!(out, "Owner address: {}", owner).map_err(|e| ScriptError::Output(e.to_string()))?;
    }

    Ok(())
}

// The ledger stores lowercase hex, parse it back to print the checksummed form
fn recorded_address(output: &Path, key: OutputKeys<'_>) -> Result<Address, ScriptError> {
    let value = read_output_file(output, key)?;
    value
        .parse::<Address>()
        .map_err(|e| ScriptError::JsonOutputError(format!("bad address `{}`: {}", value, e)))
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::{
        constants::{CONFIDEX_TRUSTED_SIGNER, CONFI_TOKEN_CONTRACT},
        deploy::mock::{InMemoryChain, DEV_ACCOUNT},
    };

    fn runner() -> DeploymentRunner<InMemoryChain> {
        DeploymentRunner::new(InMemoryChain::new(), Duration::from_secs(5))
    }

    fn supply() -> U256 {
        U256::from(10).pow(U256::from(24))
    }

    #[tokio::test]
    async fn test_token_deployment_banner_and_record() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("deployed.json");
        let (request, report) = token_deployment(CONFI_TOKEN_CONTRACT, supply(), "ConfiToken", "CFT");

        let mut out = Vec::new();
        let result = execute(&runner(), &request, &report, &mut out, Some(&output))
            .await
            .unwrap();

        let printed = String::from_utf8(out).unwrap();
        assert!(printed.contains("ConfiToken"));
        assert!(printed.contains("CFT"));
        assert!(printed.contains("1000000000000000000000000"));
        assert!(printed.contains(&result.deployed_address.to_string()));

        let recorded = read_output_file(&output, OutputKeys::Deployment { key: "ConfiToken" }).unwrap();
        assert_eq!(recorded, format!("{:#x}", result.deployed_address));
    }

    #[tokio::test]
    async fn test_confidex_owner_is_connected_account() {
        let (request, report) = confidex_deployment(CONFIDEX_TRUSTED_SIGNER);

        let mut out = Vec::new();
        let result = execute(&runner(), &request, &report, &mut out, None)
            .await
            .unwrap();
        assert_eq!(result.signer_address, DEV_ACCOUNT);

        let printed = String::from_utf8(out).unwrap();
        assert!(printed.contains(&format!("Owner address: {}", DEV_ACCOUNT)));
        assert!(printed.contains(&format!(
            "Trusted signer address: {}",
            CONFIDEX_TRUSTED_SIGNER
        )));
    }

    #[tokio::test]
    async fn test_short_args_write_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("deployed.json");
        let (request, report) = generic_deployment(CONFI_TOKEN_CONTRACT, vec!["ConfiToken".into()]);

        let mut out = Vec::new();
        let err = execute(&runner(), &request, &report, &mut out, Some(&output))
            .await
            .unwrap_err();

        assert!(matches!(err, ScriptError::ConstructorMismatch(_)));
        assert!(out.is_empty());
        assert!(!output.exists());
    }

    #[tokio::test]
    async fn test_confidential_erc20_two_args() {
        let (request, report) = confidential_erc20_deployment("COMFY", "cCMF", None);
        assert_eq!(request.args.len(), 2);

        let mut out = Vec::new();
        execute(&runner(), &request, &report, &mut out, None)
            .await
            .unwrap();
        assert!(String::from_utf8(out)
            .unwrap()
            .starts_with("ConfidentialERC20 deployed to: 0x"));
    }

    #[tokio::test]
    async fn test_show_recorded_deployment() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("deployed.json");
        let (request, report) = confidex_deployment(CONFIDEX_TRUSTED_SIGNER);
        let result = execute(&runner(), &request, &report, &mut io::sink(), Some(&output))
            .await
            .unwrap();

        let mut out = Vec::new();
        show_deployment(&output, "Confidex", &mut out).unwrap();
        let printed = String::from_utf8(out).unwrap();
        assert_eq!(
            printed,
            format!(
                "Confidex deployed to: {}\nOwner address: {}\n",
                result.deployed_address, result.signer_address
            )
        );
        assert!(printed.contains(&DEV_ACCOUNT.to_checksum(None)));

        assert!(show_deployment(&output, "ConfiToken", &mut io::sink()).is_err());
    }

    #[tokio::test]
    async fn test_confidential_erc20_with_banner() {
        let (request, report) = confidential_erc20_deployment("COMFY", "cCMF", Some(supply()));
        assert_eq!(
            request.args,
            vec![ConstructorArg::from("COMFY"), ConstructorArg::from("cCMF")]
        );

        let mut out = Vec::new();
        let result = execute(&runner(), &request, &report, &mut out, None)
            .await
            .unwrap();

        let printed = String::from_utf8(out).unwrap();
        assert!(printed.contains("COMFY"));
        assert!(printed.contains("cCMF"));
        assert!(printed.contains("1000000000000000000000000"));
        assert!(printed.contains(&result.deployed_address.to_string()));
        assert!(!printed.starts_with("ConfidentialERC20 deployed to:"));
    }

    #[tokio::test]
    async fn test_unwritable_ledger_still_succeeds() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("deployed.json");
        std::fs::write(&output, "not json").unwrap();

        let runner = runner();
        let (request, report) = confidex_deployment(CONFIDEX_TRUSTED_SIGNER);
        let mut out = Vec::new();
        let result = execute(&runner, &request, &report, &mut out, Some(&output))
            .await
            .unwrap();

        assert_eq!(runner.provider().nonce(), 1);
        let printed = String::from_utf8(out).unwrap();
        assert!(printed.starts_with(&format!("Confidex deployed to: {}", result.deployed_address)));
        assert_eq!(std::fs::read_to_string(&output).unwrap(), "not json");
    }

    #[test]
    fn test_show_checksums_lowercase_ledger() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("deployed.json");
        std::fs::write(
            &output,
            r#"{"Confidex": {"deploy": "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266"}}"#,
        )
        .unwrap();

        let mut out = Vec::new();
        show_deployment(&output, "Confidex", &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Confidex deployed to: 0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266\n"
        );

        std::fs::write(&output, r#"{"Confidex": {"deploy": "0x1234"}}"#).unwrap();
        assert!(matches!(
            show_deployment(&output, "Confidex", &mut io::sink()),
            Err(ScriptError::JsonOutputError(_))
        ));
    }
}
