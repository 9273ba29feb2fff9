//! Definitions of CLI arguments and commands for deploy scripts

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::{
    commands::{deploy, deploy_mocks, fund, show, withdraw},
    constants::{DEFAULT_CONFIRMATION_TIMEOUT, DEFAULT_FUND_AMOUNT, FUND_ME_CONTRACT},
    errors::DeployError,
};

/// Deploy and interact with the FundMe contract
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Arguments shared by every command
    #[command(flatten)]
    pub global: GlobalArgs,

    /// The command to run
    #[command(subcommand)]
    pub command: Command,
}

/// Arguments shared by every command
#[derive(Args, Clone, Debug)]
pub struct GlobalArgs {
    /// Private key of the deployer
    #[arg(long = "pkey", env = "PKEY", hide_env_values = true)]
    pub priv_key: Option<String>,

    /// Network RPC URL
    #[arg(short, long, env = "RPC_URL", default_value = "http://127.0.0.1:8545")]
    pub rpc_url: String,

    /// The name of the network, used to pick the deployments ledger and to
    /// tell development networks from public ones
    #[arg(short, long, env = "NETWORK", default_value = "localhost")]
    pub network: String,

    /// The expected chain ID of the network, checked against the node
    #[arg(long, env = "CHAIN_ID")]
    pub chain_id: Option<u64>,

    /// The number of confirmations to wait for on deployments, overriding the
    /// network configuration
    #[arg(long)]
    pub block_confirmations: Option<u64>,

    /// The maximum number of seconds to wait for a deployment to confirm
    #[arg(long, default_value_t = DEFAULT_CONFIRMATION_TIMEOUT.as_secs())]
    pub confirmation_timeout: u64,

    /// Path to a network configuration file, replacing the bundled one
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Directory holding the per-network deployment ledgers
    #[arg(long, default_value = "deployments")]
    pub deployments_dir: PathBuf,

    /// Directory holding the compiled contract artifacts
    #[arg(long, default_value = "out")]
    pub artifacts_dir: PathBuf,

    /// Root of the foundry project, used for source verification
    #[arg(long, default_value = ".")]
    pub project_root: PathBuf,

    /// Block explorer API key. Contracts are only verified when one is given
    #[arg(long, env = "ETHERSCAN_API_KEY", hide_env_values = true)]
    pub etherscan_api_key: Option<String>,
}

/// The commands the scripts can run
#[derive(Subcommand)]
pub enum Command {
    /// Deploy the FundMe contract, deploying mocks first on development networks
    Deploy,
    /// Deploy the price feed mock, on development networks only
    DeployMocks,
    /// Fund the deployed FundMe contract
    Fund(FundArgs),
    /// Withdraw the funds of the deployed FundMe contract
    Withdraw,
    /// Print a deployment record from the ledger
    Show(ShowArgs),
}

/// Fund the deployed FundMe contract
#[derive(Args)]
pub struct FundArgs {
    /// The amount to send, in ether
    #[arg(short, long, default_value = DEFAULT_FUND_AMOUNT)]
    pub amount: String,
}

/// Print a deployment record
#[derive(Args)]
pub struct ShowArgs {
    /// The name of the deployed contract
    #[arg(default_value = FUND_ME_CONTRACT)]
    pub contract: String,
}

impl Command {
    /// Run the command
    pub async fn run(self, args: GlobalArgs) -> Result<(), DeployError> {
        match self {
            Command::Deploy => deploy(&args).await,
            Command::DeployMocks => deploy_mocks(&args).await,
            Command::Fund(fund_args) => fund(&args, fund_args).await,
            Command::Withdraw => withdraw(&args).await,
            Command::Show(show_args) => show(&args, show_args),
        }
    }
}
