//! Utilities for running the staging tests

use alloy::providers::DynProvider;
use eyre::{eyre, Result};
use scripts::{
    constants::FUND_ME_CONTRACT,
    ledger::{DeploymentStore, JsonFileStore},
    solidity::FundMe::{self, FundMeInstance},
    utils::setup_client,
};

use crate::cli::Cli;

/// A FundMe handle using the default generics
pub(crate) type FundMeContract = FundMeInstance<DynProvider>;

/// Build a handle to the FundMe contract recorded in the network's ledger
pub(crate) fn fund_me_from_ledger(cli: &Cli) -> Result<FundMeContract> {
    let client = setup_client(Some(cli.priv_key.as_str()), &cli.rpc_url)?;
    let store = JsonFileStore::open(&cli.deployments_dir, &cli.network)?;
    let record = store.require(FUND_ME_CONTRACT)?;

    Ok(FundMe::new(record.address, client))
}

/// Return an error if `condition` does not hold
pub(crate) fn ensure(condition: bool, msg: impl Into<String>) -> Result<()> {
    if condition {
        Ok(())
    } else {
        Err(eyre!(msg.into()))
    }
}
