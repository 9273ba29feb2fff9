//! Staging tests for the FundMe contract. These assume that FundMe has already
//! been deployed to the network under test, and are skipped on development networks.

use clap::Parser;
use cli::{Cli, Tests};
use eyre::Result;
use scripts::{config::HelperConfig, types::NetworkDescriptor, utils::init_tracing};
use tests::{test_fund_and_withdraw, test_owner_withdraw};
use tracing::info;
use utils::fund_me_from_ledger;

mod cli;
mod constants;
mod tests;
mod utils;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    // Classification only looks at the network name
    let helper = HelperConfig::load(cli.config.as_deref())?;
    let network = NetworkDescriptor::new(cli.network.as_str(), 0, None);
    if helper.classify(&network).is_development() {
        info!(network = %cli.network, "development network, skipping staging tests");
        return Ok(());
    }

    let contract = fund_me_from_ledger(&cli)?;
    let tests = match cli.test {
        Some(test) => vec![test],
        None => Tests::ALL.to_vec(),
    };

    for test in tests {
        info!("Running test `{:?}`", test);
        match test {
            Tests::FundAndWithdraw => test_fund_and_withdraw(&contract).await?,
            Tests::OwnerWithdraw => test_owner_withdraw(&contract).await?,
        }
        info!("Test succeeded!");
    }

    Ok(())
}
