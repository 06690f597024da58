//! Definitions of CLI arguments and commands for deploy scripts

use std::{io, path::PathBuf, time::Duration};

use alloy::primitives::{Address, U256};
use clap::{Args, Parser, Subcommand};
use tracing::info;

use crate::{
    commands::{
        confidential_erc20_deployment, confidex_deployment, deploy_on_chain,
        generic_deployment, show_deployment, token_deployment, DeployContext,
    },
    config::{DeploymentConfig, NetworkConfig},
    constants::{
        CONFIDEX_TRUSTED_SIGNER, CONFI_TOKEN_CONTRACT, DEFAULT_ARTIFACTS_DIR,
        DEFAULT_DEPLOY_TIMEOUT_SECS, DEFAULT_INITIAL_SUPPLY, DEFAULT_RPC, DEFAULT_TOKEN_NAME,
        DEFAULT_TOKEN_SYMBOL, DEPLOYMENTS_FILE,
    },
    deploy::{artifact::ArtifactStore, report::Report},
    errors::ScriptError,
};

/// Scripts for deploying the Confidex and confidential token contracts
#[derive(Parser)]
#[command(version)]
pub struct Cli {
    /// Private key of the deployer, the node's first unlocked account is used without it
    #[arg(short, long, env = "PRIVATE_KEY", hide_env_values = true, global = true)]
    pub priv_key: Option<String>,

    /// Network RPC URL
    #[arg(short, long, env = "RPC_URL", default_value = DEFAULT_RPC, global = true)]
    pub rpc_url: String,

    /// Directory holding the compiled contract artifacts
    #[arg(long, env = "ARTIFACTS_DIR", default_value = DEFAULT_ARTIFACTS_DIR, global = true)]
    pub artifacts: PathBuf,

    /// Seconds to wait for a deployment to be confirmed
    #[arg(
        long,
        env = "DEPLOY_TIMEOUT",
        default_value_t = DEFAULT_DEPLOY_TIMEOUT_SECS,
        value_parser = clap::value_parser!(u64).range(1..),
        global = true
    )]
    pub timeout: u64,

    /// File in which the deployed addresses are recorded
    #[arg(short, long, default_value = DEPLOYMENTS_FILE, global = true)]
    pub output: PathBuf,

    /// Don't record the deployed addresses
    #[arg(long, global = true)]
    pub no_record: bool,

    /// The command to run
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Resolve the global settings, then run the command
    pub async fn run(self) -> Result<(), ScriptError> {
        let Cli {
            priv_key,
            rpc_url,
            artifacts,
            timeout,
            output,
            no_record,
            command,
        } = self;

        let ctx = DeployContext {
            network: NetworkConfig::new(&rpc_url, priv_key, Duration::from_secs(timeout))?,
            artifacts: ArtifactStore::new(artifacts),
            output,
            record: !no_record,
        };

        command.run(ctx).await
    }
}

/// The possible CLI commands
#[derive(Subcommand)]
pub enum Command {
    /// Deploy the Confidex contract
    DeployConfidex(DeployConfidexArgs),
    /// Deploy the ConfidentialERC20 token, constructed with (name, symbol)
    DeployConfidentialErc20(DeployConfidentialErc20Args),
    /// Deploy a token constructed with (initialSupply, name, symbol)
    DeployToken(DeployTokenArgs),
    /// Deploy any contract with the given constructor arguments
    Deploy(DeployArgs),
    /// Run the deployment described by a JSON config file
    Run(RunArgs),
    /// Show the recorded deployment of a contract
    Deployed(DeployedArgs),
}

impl Command {
    /// Run the command
    pub async fn run(self, ctx: DeployContext) -> Result<(), ScriptError> {
        match self {
            Command::DeployConfidex(args) => {
                info!("Deploying Confidex...");
                let (request, report) = confidex_deployment(args.trusted_signer);
                deploy_on_chain(&ctx, &request, &report).await?;
            }
            Command::DeployConfidentialErc20(args) => {
                info!("Deploying confidential ERC20...");
                let banner_supply = args.banner.then_some(args.initial_supply);
                let (request, report) =
                    confidential_erc20_deployment(&args.name, &args.symbol, banner_supply);
                deploy_on_chain(&ctx, &request, &report).await?;
            }
            Command::DeployToken(args) => {
                info!("Deploying token...");
                let (request, report) = token_deployment(
                    &args.contract,
                    args.initial_supply,
                    &args.name,
                    &args.symbol,
                );
                deploy_on_chain(&ctx, &request, &report).await?;
            }
            Command::Deploy(args) => {
                let (request, report) = generic_deployment(&args.contract, args.args);
                deploy_on_chain(&ctx, &request, &report).await?;
            }
            Command::Run(args) => {
                info!("Loading deployment config {}", args.config.display());
                let config = DeploymentConfig::load(&args.config)?;
                let network = config.network(&ctx.network)?;
                let ctx = ctx.with_network(network);
                deploy_on_chain(&ctx, &config.request, &Report::plain()).await?;
            }
            Command::Deployed(args) => {
                show_deployment(&ctx.output, &args.contract, &mut io::stdout())?;
            }
        }

        Ok(())
    }
}

/// Deploy the Confidex contract
#[derive(Args)]
pub struct DeployConfidexArgs {
    /// Address of the signer trusted by the contract
    #[arg(short, long, default_value_t = CONFIDEX_TRUSTED_SIGNER)]
    pub trusted_signer: Address,
}

/// Deploy the confidential ERC20
#[derive(Args)]
pub struct DeployConfidentialErc20Args {
    /// Name of the token
    #[arg(short, long, default_value = DEFAULT_TOKEN_NAME)]
    pub name: String,
    /// Symbol of the token
    #[arg(short, long, default_value = DEFAULT_TOKEN_SYMBOL)]
    pub symbol: String,
    /// Print the token banner instead of the plain report
    #[arg(long)]
    pub banner: bool,
    /// Supply shown in the banner, the constructor doesn't take it
    #[arg(short, long, default_value = DEFAULT_INITIAL_SUPPLY)]
    pub initial_supply: U256,
}

/// Deploy a token with an initial supply
#[derive(Args)]
pub struct DeployTokenArgs {
    /// Artifact name of the token contract
    #[arg(short, long, default_value = CONFI_TOKEN_CONTRACT)]
    pub contract: String,
    /// Initial supply, in base units
    #[arg(short, long, default_value = DEFAULT_INITIAL_SUPPLY)]
    pub initial_supply: U256,
    /// Name of the token
    #[arg(short, long, default_value = DEFAULT_TOKEN_NAME)]
    pub name: String,
    /// Symbol of the token
    #[arg(short, long, default_value = DEFAULT_TOKEN_SYMBOL)]
    pub symbol: String,
}

/// Deploy any contract
#[derive(Args)]
pub struct DeployArgs {
    /// Artifact name, or fully qualified `path/File.sol:Name`
    #[arg(short, long)]
    pub contract: String,
    /// Constructor arguments, in order
    #[arg(allow_hyphen_values = true)]
    pub args: Vec<String>,
}

/// Run a deployment config
#[derive(Args)]
pub struct RunArgs {
    /// Path of the JSON deployment config
    #[arg(short, long)]
    pub config: PathBuf,
}

/// Show a recorded deployment
#[derive(Args)]
pub struct DeployedArgs {
    /// Contract identifier the deployment was recorded under
    #[arg(short, long)]
    pub contract: String,
}
