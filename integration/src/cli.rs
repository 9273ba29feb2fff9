//! Definition of the CLI arguments for the staging tests

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::constants::DEFAULT_RPC_URL;

/// CLI tool for running staging tests against a public network.
///
/// Assumes that FundMe has already been deployed to the network and recorded
/// in its deployments ledger.
#[derive(Parser)]
pub(crate) struct Cli {
    /// Test to run, all tests are run if not given
    #[arg(short, long)]
    pub(crate) test: Option<Tests>,

    /// The name of the network, selecting the deployments ledger
    #[arg(short, long, env = "NETWORK")]
    pub(crate) network: String,

    /// Directory holding the per-network deployment ledgers
    #[arg(short, long, default_value = "deployments")]
    pub(crate) deployments_dir: PathBuf,

    /// Path to a network configuration file, replacing the bundled one
    #[arg(long)]
    pub(crate) config: Option<PathBuf>,

    /// Private key of the account running the tests
    #[arg(short, long = "pkey", env = "PKEY", hide_env_values = true)]
    pub(crate) priv_key: String,

    /// Network RPC URL
    #[arg(short, long, env = "RPC_URL", default_value = DEFAULT_RPC_URL)]
    pub(crate) rpc_url: String,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub(crate) enum Tests {
    /// Fund the contract, withdraw, and check it is left empty
    FundAndWithdraw,
    /// Withdraw as the owner and check the contract is left empty
    OwnerWithdraw,
}

impl Tests {
    /// All the staging tests, in run order
    pub(crate) const ALL: [Tests; 2] = [Tests::FundAndWithdraw, Tests::OwnerWithdraw];
}
