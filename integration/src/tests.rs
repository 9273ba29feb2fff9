//! Staging tests for the FundMe contract

use alloy::providers::Provider;
use alloy_primitives::{utils::parse_ether, U256};
use eyre::Result;

use crate::{
    constants::{SEND_VALUE, TX_CONFIRMATIONS},
    utils::{ensure, FundMeContract},
};

pub(crate) async fn test_fund_and_withdraw(contract: &FundMeContract) -> Result<()> {
    contract
        .fund()
        .value(parse_ether(SEND_VALUE)?)
        .send()
        .await?
        .with_required_confirmations(TX_CONFIRMATIONS)
        .get_receipt()
        .await?;

    withdraw_and_check_empty(contract).await
}

pub(crate) async fn test_owner_withdraw(contract: &FundMeContract) -> Result<()> {
    withdraw_and_check_empty(contract).await
}

/// Withdraw all funds and assert the contract holds no balance afterwards
async fn withdraw_and_check_empty(contract: &FundMeContract) -> Result<()> {
    let receipt = contract
        .withdraw()
        .send()
        .await?
        .with_required_confirmations(TX_CONFIRMATIONS)
        .get_receipt()
        .await?;
    ensure(receipt.status(), "withdraw transaction reverted")?;

    let ending_balance = contract.provider().get_balance(*contract.address()).await?;
    ensure(
        ending_balance == U256::ZERO,
        format!("expected empty contract, found balance {ending_balance}"),
    )
}
